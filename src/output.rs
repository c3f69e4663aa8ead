// src/output.rs
use crate::batch::SensitivitySeries;
use crate::report::ValuationTable;
use std::fs::File;
use std::io::{self, Write};

/// Write the spot-sensitivity series as `spot,call_price,call_intrinsic_value`
pub fn write_sensitivity_to_csv(filename: &str, series: &SensitivitySeries) -> io::Result<()> {
    let mut file = File::create(filename)?;
    write_sensitivity(&mut file, series)
}

pub fn write_sensitivity<W: Write>(out: &mut W, series: &SensitivitySeries) -> io::Result<()> {
    writeln!(out, "spot,call_price,call_intrinsic_value")?;
    for ((spot, price), intrinsic) in series
        .spots
        .iter()
        .zip(&series.call_prices)
        .zip(&series.call_intrinsic_values)
    {
        writeln!(out, "{},{},{}", spot, price, intrinsic)?;
    }
    Ok(())
}

/// Write a valuation table with a generation timestamp comment line
pub fn write_table_to_csv(filename: &str, table: &ValuationTable) -> io::Result<()> {
    let mut file = File::create(filename)?;
    write_table(&mut file, table)
}

pub fn write_table<W: Write>(out: &mut W, table: &ValuationTable) -> io::Result<()> {
    writeln!(
        out,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let mut header = vec!["spot", "strike"];
    header.extend(table.quantities.headers());
    writeln!(out, "{}", header.join(","))?;

    for row in &table.rows {
        let mut fields = vec![row.spot.to_string(), row.strike.to_string()];
        fields.extend(row.values().iter().map(|v| v.to_string()));
        writeln!(out, "{}", fields.join(","))?;
    }
    Ok(())
}

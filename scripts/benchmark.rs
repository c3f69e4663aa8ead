use bs_implied::batch::OptionBatch;
use bs_implied::math_utils::Timer;
use bs_implied::solvers::SolverConfig;
use bs_implied::units::{Days, Percent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, Uniform};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use tracing::{info, Level};

const MATURITY_DAYS: f64 = 182.5;
const RATE_PCT: f64 = 4.0;
const VOL_PCT: f64 = 35.0;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        let rust_version = Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string());

        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version,
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    contracts: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    failures: usize,
    max_vol_error: Option<f64>,
}

impl BenchmarkResult {
    fn new(name: String, contracts: usize, time_ms: f64) -> Self {
        Self {
            name,
            contracts,
            time_ms,
            throughput_per_sec: contracts as f64 / (time_ms / 1000.0),
            failures: 0,
            max_vol_error: None,
        }
    }
}

/// Spots log-normally spread around 100, strikes uniform in [80, 120]
fn random_inputs(contracts: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let spot_dist = LogNormal::new(100f64.ln(), 0.1).expect("Valid log-normal parameters");
    let strike_dist = Uniform::new(80.0, 120.0);

    let spots = (0..contracts).map(|_| spot_dist.sample(&mut rng)).collect();
    let strikes = (0..contracts).map(|_| strike_dist.sample(&mut rng)).collect();
    (spots, strikes)
}

fn max_error(vols: &[Result<f64, bs_implied::PricingError>], target: f64) -> (usize, f64) {
    let failures = vols.iter().filter(|v| v.is_err()).count();
    let worst = vols
        .iter()
        .filter_map(|v| v.as_ref().ok())
        .map(|v| (v - target).abs())
        .fold(0.0, f64::max);
    (failures, worst)
}

fn run_batch_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let config = SolverConfig::default();
    let target_vol = Percent(VOL_PCT).to_fraction();

    for &contracts in &[1_000, 10_000, 100_000] {
        info!(contracts, "running batch benchmarks");

        let (spots, strikes) = random_inputs(contracts, 42);
        let priced = OptionBatch::new(
            &spots,
            &strikes,
            Days(MATURITY_DAYS),
            Percent(RATE_PCT),
            Some(Percent(VOL_PCT)),
        )
        .expect("Valid batch");
        let unpriced =
            OptionBatch::new(&spots, &strikes, Days(MATURITY_DAYS), Percent(RATE_PCT), None)
                .expect("Valid batch");

        let mut timer = Timer::new();

        timer.start();
        let market_prices = priced.call_prices().expect("Volatility is set");
        results.push(BenchmarkResult::new(
            format!("Call prices ({}k)", contracts / 1000),
            contracts,
            timer.elapsed_ms(),
        ));

        timer.start();
        let par_prices = priced.par_call_prices().expect("Volatility is set");
        results.push(BenchmarkResult::new(
            format!("Call prices parallel ({}k)", contracts / 1000),
            contracts,
            timer.elapsed_ms(),
        ));
        assert_eq!(market_prices, par_prices);

        timer.start();
        let vols = unpriced
            .implied_vols(&market_prices, &config)
            .expect("Lengths match");
        let mut result = BenchmarkResult::new(
            format!("Implied vols ({}k)", contracts / 1000),
            contracts,
            timer.elapsed_ms(),
        );
        let (failures, worst) = max_error(&vols, target_vol);
        result.failures = failures;
        result.max_vol_error = Some(worst);
        results.push(result);

        timer.start();
        let par_vols = unpriced
            .par_implied_vols(&market_prices, &config)
            .expect("Lengths match");
        let mut result = BenchmarkResult::new(
            format!("Implied vols parallel ({}k)", contracts / 1000),
            contracts,
            timer.elapsed_ms(),
        );
        let (failures, worst) = max_error(&par_vols, target_vol);
        result.failures = failures;
        result.max_vol_error = Some(worst);
        results.push(result);
    }

    results
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Contracts,Time_ms,Throughput_per_sec,Failures,Max_Vol_Error"
    )?;

    for result in results {
        writeln!(
            file,
            "{},{},{:.3},{:.0},{},{}",
            result.name,
            result.contracts,
            result.time_ms,
            result.throughput_per_sec,
            result.failures,
            result
                .max_vol_error
                .map(|e| format!("{:.3e}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    println!("bs-implied Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let results = run_batch_benchmarks();

    println!("\n{:=<90}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<90}", "");
    println!(
        "{:<35} {:>9} {:>12} {:>15} {:>8} {:>12}",
        "Benchmark", "Contracts", "Time (ms)", "Throughput", "Failed", "Max Vol Err"
    );
    println!("{:-<90}", "");

    for result in &results {
        println!(
            "{:<35} {:>9} {:>12.3} {:>15.0} {:>8} {:>12}",
            result.name,
            result.contracts,
            result.time_ms,
            result.throughput_per_sec,
            result.failures,
            result
                .max_vol_error
                .map(|e| format!("{:.2e}", e))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }

    println!("{:=<90}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nCould not write {}: {}", filename, e),
    }
}

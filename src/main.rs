use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod bottle;
mod demo;
mod error;
mod prime;
mod search;
mod sink;

use bottle::Bottle;
use demo::{AsyncDemoReport, DemoConfig, TimingReport};
use search::parallel::{ParallelConfig, PartitionedResult, run_partitioned_search};
use search::{Progression, ReportMode, ScanConfig, ScanStatistics, scan, scan_cooperative};
use sink::TracingSink;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "primescan")]
#[command(about = "primescan - concurrent and cooperative prime search demos")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Log every prime found (debug level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cooperative search on one thread while a partitioned search runs in the background
    Demo {
        /// Bound for the cooperative search
        #[arg(long, default_value = "7654321")]
        example_prime: u64,
        /// Bound for the partitioned background search
        #[arg(long, default_value = "32452843")]
        max_prime: u64,
        /// Number of worker threads for the background search
        #[arg(long, short = 'j', default_value = "4")]
        workers: usize,
    },
    /// Find the first prime above a bound in one progression
    Next {
        /// Search stops at the first prime strictly greater than this
        #[arg(long)]
        bound: u64,
        /// Distance between candidates
        #[arg(long, default_value = "1")]
        stride: u64,
        /// Residue offset, must be below the stride
        #[arg(long, default_value = "0")]
        offset: u64,
        /// Run as a task on a single-threaded async runtime
        #[arg(long)]
        cooperative: bool,
        /// What to do at each prime: announce or yield (default: yield when
        /// cooperative, announce otherwise)
        #[arg(long)]
        mode: Option<ReportMode>,
    },
    /// Find all primes up to a bound with one thread per useful progression
    Scan {
        /// Every worker stops at its first prime above this
        #[arg(long)]
        bound: u64,
        /// Number of progressions (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        workers: Option<usize>,
    },
    /// Compare a sequential nth-prime search with a partitioned search
    Bench {
        /// Which prime to look for
        #[arg(long, default_value = "1000000")]
        nth: u64,
        /// Number of worker threads
        #[arg(long, short = 'j', default_value = "4")]
        workers: usize,
    },
    /// Fill, pour and empty two bottles
    Bottle {
        /// Litres poured into the plastic bottle
        #[arg(long, allow_negative_numbers = true)]
        plastic: f32,
        /// Litres poured into the glass bottle
        #[arg(long, allow_negative_numbers = true)]
        glass: f32,
        /// Litres to pour from the plastic bottle into the glass one
        #[arg(long, allow_negative_numbers = true)]
        pour: f32,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // RUST_LOG wins when set; otherwise fall back to the --verbose level
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

// --- Commands ---

fn run_next(
    bound: u64,
    stride: u64,
    offset: u64,
    cooperative: bool,
    mode: Option<ReportMode>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = mode.unwrap_or(if cooperative {
        ReportMode::Yield
    } else {
        ReportMode::Announce
    });
    let progression = Progression::new(offset, stride)?;
    let config = ScanConfig::new(bound)
        .with_progression(progression)
        .with_mode(mode);

    let outcome = if cooperative {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        runtime.block_on(scan_cooperative(&config, &TracingSink))?
    } else {
        scan(&config, &TracingSink)?
    };

    println!("Next prime after {}: {}", bound, outcome.next_prime);
    println!("Report mode: {}", mode);
    print_scan_statistics(&outcome.statistics);
    Ok(())
}

fn run_scan(bound: u64, workers: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = ParallelConfig::new(bound).with_workers_option(workers);
    println!(
        "Finding all prime numbers up to {} with {} progression(s) ...",
        config.bound, config.num_workers
    );

    let result = run_partitioned_search(&config, &TracingSink)?;
    print_partitioned_result(config.bound, &result);
    println!("All done!");
    Ok(())
}

fn run_bottle(plastic: f32, glass: f32, pour: f32) -> Result<(), Box<dyn std::error::Error>> {
    println!("Creating a new Bottle object with Material = plastic.");
    let mut plastic_bottle = Bottle::new("plastic");
    plastic_bottle.fill(plastic)?;
    println!("{}", plastic_bottle);

    println!("Creating a new Bottle object with Material = glass.");
    let mut glass_bottle = Bottle::new("glass");
    glass_bottle.fill(glass)?;
    println!("{}", glass_bottle);

    println!("Pouring {} liter(s) from the plastic bottle into the glass bottle.", pour);
    plastic_bottle.pour_into(&mut glass_bottle, pour)?;
    println!("{}", plastic_bottle);
    println!("{}", glass_bottle);

    println!("Spilling the water out.");
    plastic_bottle.empty();
    glass_bottle.empty();
    println!("{}", plastic_bottle);
    println!("{}", glass_bottle);
    Ok(())
}

/// Print scan statistics
fn print_scan_statistics(stats: &ScanStatistics) {
    println!("\nScan Statistics:");
    println!("  Progression: offset {}, stride {}", stats.offset, stats.stride);
    println!("  Elapsed time: {:?}", stats.elapsed_time);
    println!("  Candidates tested: {}", stats.candidates_tested);
    println!("  Primes found: {}", stats.primes_found);
    if stats.yields > 0 {
        println!("  Yields: {}", stats.yields);
    }
    println!("  Prime density: {:.2}%", stats.prime_density() * 100.0);
}

fn print_partitioned_result(bound: u64, result: &PartitionedResult) {
    println!("\nWorker plan (stride {}):", result.plan.stride);
    println!("  Launched offsets: {:?}", result.plan.launched);
    for (offset, reason) in &result.plan.skipped {
        println!("  Skipped offset {}: {}", offset, reason);
    }

    println!("\nWorkers:");
    for worker in &result.workers {
        println!(
            "  Offset {}: next prime {} ({} candidates, {} primes, {:?})",
            worker.statistics.offset,
            worker.next_prime,
            worker.statistics.candidates_tested,
            worker.statistics.primes_found,
            worker.statistics.elapsed_time
        );
    }

    if let Some(next) = result.next_prime() {
        println!("\nFirst prime above {}: {}", bound, next);
    }
    println!("Total candidates tested: {}", result.candidates_tested());
    println!("Total primes found: {}", result.primes_found());
    println!("Elapsed time: {:?}", result.elapsed_time);
}

fn print_async_demo_report(config: &DemoConfig, report: &AsyncDemoReport) {
    println!(
        "\nCooperative search: first prime above {} is {}",
        config.example_prime, report.found_prime
    );
    print_partitioned_result(config.max_prime, &report.partitioned);
    println!("All done!");
}

fn print_timing_report(report: &TimingReport) {
    println!("\nTiming Summary:");
    println!("  Prime #{}: {}", report.nth, report.prime);
    println!("  Sequential: {:?}", report.sequential);
    println!("  Partitioned: {:?}", report.partitioned);
    let partitioned = report.partitioned.as_secs_f64();
    if partitioned > 0.0 {
        println!("  Speedup: {:.2}x", report.sequential.as_secs_f64() / partitioned);
    }
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let outcome: Result<(), Box<dyn std::error::Error>> = match args.command {
        Commands::Demo {
            example_prime,
            max_prime,
            workers,
        } => {
            println!("Running async code example...\n");
            let config = DemoConfig::default()
                .with_example_prime(example_prime)
                .with_max_prime(max_prime)
                .with_workers(workers);
            demo::run_async_demo(&config, Arc::new(TracingSink))
                .map(|report| print_async_demo_report(&config, &report))
                .map_err(Into::into)
        }
        Commands::Next {
            bound,
            stride,
            offset,
            cooperative,
            mode,
        } => run_next(bound, stride, offset, cooperative, mode),
        Commands::Scan { bound, workers } => run_scan(bound, workers),
        Commands::Bench { nth, workers } => {
            println!("Running async code time test...\n");
            let config = DemoConfig::default().with_nth(nth).with_workers(workers);
            demo::run_timing_demo(&config, &TracingSink)
                .map(|report| print_timing_report(&report))
                .map_err(Into::into)
        }
        Commands::Bottle {
            plastic,
            glass,
            pour,
        } => run_bottle(plastic, glass, pour),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

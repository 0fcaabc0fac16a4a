use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_primescan"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute primescan")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

#[test]
fn test_next_prime_after_ten() {
    let output = run(&["next", "--bound", "10"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(
        stdout.contains("Next prime after 10: 11"),
        "Should report 11, got: {}",
        stdout
    );
    assert!(stdout.contains("Candidates tested: 10"));
}

#[test]
fn test_next_prime_strided() {
    let output = run(&["next", "--bound", "20", "--stride", "4", "--offset", "2"]);
    assert_success(&output);
    assert!(stdout_of(&output).contains("Next prime after 20: 23"));
}

#[test]
fn test_next_prime_cooperative() {
    let output = run(&["next", "--bound", "1000", "--cooperative"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Next prime after 1000: 1009"));
    assert!(stdout.contains("Yields: 169"));
}

#[test]
fn test_next_rejects_barren_progression() {
    let output = run(&["next", "--bound", "100", "--stride", "4", "--offset", "3"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("holds no primes"),
        "Should explain the rejection, got: {}",
        stderr
    );
}

#[test]
fn test_next_rejects_small_bound() {
    let output = run(&["next", "--bound", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid bound 1"));
}

#[test]
fn test_scan_four_workers() {
    let output = run(&["scan", "--bound", "100", "-j", "4"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Launched offsets: [0, 2]"));
    assert!(stdout.contains("Skipped offset 1"));
    assert!(stdout.contains("Skipped offset 3"));
    assert!(stdout.contains("Offset 0: next prime 101"));
    assert!(stdout.contains("Offset 2: next prime 103"));
    assert!(stdout.contains("First prime above 100: 101"));
    assert!(stdout.trim_end().ends_with("All done!"));
}

#[test]
fn test_scan_rejects_zero_workers() {
    let output = run(&["scan", "--bound", "100", "-j", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("worker count"));
}

#[test]
fn test_bench_small() {
    let output = run(&["bench", "--nth", "100", "-j", "4"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Synchronously found the 100th prime number 541"));
    assert!(stdout.contains("Concurrently found all the prime numbers up to 541"));
}

#[test]
fn test_demo_small() {
    let output = run(&[
        "demo",
        "--example-prime",
        "1000",
        "--max-prime",
        "5000",
        "-j",
        "4",
    ]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Found the prime number: 1009"));
    assert!(stdout.contains("Cooperative search: first prime above 1000 is 1009"));
    assert!(stdout.contains("Launched offsets: [0, 2]"));
    assert!(stdout.trim_end().ends_with("All done!"));
}

#[test]
fn test_bottle() {
    let output = run(&[
        "bottle",
        "--plastic",
        "0.5",
        "--glass",
        "0.75",
        "--pour",
        "0.5",
    ]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("The plastic bottle now has 0.5 liter(s) of water."));
    assert!(stdout.contains("The glass bottle now has 1 liter(s) of water."));
    assert!(stdout.contains("The plastic bottle now has 0 liter(s) of water."));
}

#[test]
fn test_bottle_rejects_negative_volume() {
    let output = run(&[
        "bottle",
        "--plastic",
        "-1",
        "--glass",
        "0.5",
        "--pour",
        "0.1",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must not be negative"));
}

#[test]
fn test_verbose_logs_primes_to_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_primescan"))
        .args(["--verbose", "next", "--bound", "10"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute primescan");
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("prime found"), "stderr: {}", stderr);
    // Logs stay off stdout
    assert!(!stdout_of(&output).contains("prime found"));
}

#[test]
fn test_rust_log_lowers_verbosity() {
    // `run` sets RUST_LOG=warn, so the sink's info lines must be filtered out
    let output = run(&["scan", "--bound", "100", "-j", "4"]);
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("INFO"), "stderr: {}", stderr);
    assert!(!stderr.contains("partitioned search started"));
}

#[test]
fn test_rust_log_raises_verbosity() {
    let output = Command::new(env!("CARGO_BIN_EXE_primescan"))
        .args(["next", "--bound", "10"])
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute primescan");
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("prime found"), "stderr: {}", stderr);
}

#[test]
fn test_default_log_level_is_info() {
    let output = Command::new(env!("CARGO_BIN_EXE_primescan"))
        .args(["next", "--bound", "10"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute primescan");
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("scan done"), "stderr: {}", stderr);
    assert!(!stderr.contains("prime found"));
}

#[test]
fn test_next_with_explicit_mode() {
    let output = run(&["next", "--bound", "30", "--mode", "yield"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Next prime after 30: 31"));
    assert!(stdout.contains("Report mode: yield"));
    assert!(stdout.contains("Yields: 11"));
}

#[test]
fn test_next_rejects_unknown_mode() {
    let output = run(&["next", "--bound", "30", "--mode", "sometimes"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown report mode"));
}

#[test]
fn test_bench_prints_timing_summary() {
    let output = run(&["bench", "--nth", "25", "-j", "2"]);
    assert_success(&output);

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Timing Summary:"));
    assert!(stdout.contains("Prime #25: 97"));
}

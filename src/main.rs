use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::Command;

use jlbench::bench::BenchOutcome;
use jlbench::config::Config;
use jlbench::exec::{Execute, Shell};
use jlbench::format_count;
use jlbench::scenario::CommandSet;
use jlbench::verify::{ModeCheck, RefCheck, VerifyReport};
use jlbench::{bench, dataset, report, verify};

#[derive(Parser)]
#[command(
    name = "jlbench",
    about = "Correctness and throughput harness for newline-delimited JSON log filters",
    version
)]
struct Cli {
    /// Dataset path (reused as-is when it already exists)
    #[arg(long, default_value = "bench_data.jsonl")]
    data_file: PathBuf,

    /// Target dataset size in gigabytes (approximate)
    #[arg(long, default_value_t = 1.0)]
    size_gb: f64,

    /// Assumed average bytes per serialized record (estimate, not measured)
    #[arg(long, default_value_t = 110)]
    bytes_per_record: u64,

    /// Primary candidate filter binary
    #[arg(long, default_value = "./zig-out/bin/zog")]
    tool: String,

    /// Predicate field name
    #[arg(long, default_value = "level")]
    key: String,

    /// Predicate field value
    #[arg(long, default_value = "error")]
    val: String,

    /// Build command for the primary tool, run before anything else.
    /// A failing build is reported, not fatal: the tool's own runs will
    /// fail and be recorded as execution errors.
    #[arg(long)]
    build_cmd: Option<String>,

    /// Also benchmark jq (file and pipe) when it is on $PATH
    #[arg(long)]
    bench_jq: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            data_path: self.data_file,
            size_gb: self.size_gb,
            bytes_per_record: self.bytes_per_record,
            tool_bin: self.tool,
            key: self.key,
            val: self.val,
            bench_jq: self.bench_jq,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let build_cmd = cli.build_cmd.clone();
    let config = cli.into_config();

    if let Some(cmd) = &build_cmd {
        println!("--- Building {} ---", config.tool_name());
        match Command::new("sh").args(["-c", cmd]).status() {
            Ok(status) if status.success() => {}
            Ok(status) => eprintln!("Note: build exited with {status}; continuing."),
            Err(e) => eprintln!("Note: build could not be started ({e}); continuing."),
        }
    }

    dataset::generate(&config)?;

    let exec = Shell;
    let commands = CommandSet::new(&config);
    let tool = config.tool_name();

    println!("\n--- Running Integrity Check ---");
    let verify_report = match verify::verify(&exec, &commands, tool) {
        Ok(report) => {
            print_verify_report(&report, tool);
            Some(report)
        }
        Err(e) => {
            println!("FAIL: integrity check could not complete: {e:#}");
            None
        }
    };

    println!("\n--- Running Performance Benchmarks ---");
    let scenarios = commands.bench_scenarios(&config, exec.is_available("jq"));
    let outcomes = bench::run(&exec, &scenarios, config.size_gb);

    let mut results = Vec::new();
    for BenchOutcome { name, result } in outcomes {
        match result {
            Ok(r) => results.push(r),
            Err(e) => println!("FAIL: benchmark '{name}' did not complete: {e:#}"),
        }
    }

    println!("\n{}", report::render_table(&results, config.size_gb));

    // Exit status reflects proven integrity failures, nothing else.
    if verify_report.is_some_and(|r| r.hard_failure()) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_verify_report(report: &VerifyReport, tool: &str) {
    match report.modes {
        ModeCheck::Consistent { count } => println!(
            "PASS: {tool} internal consistency: file and pipe both found {} matches.",
            format_count(count)
        ),
        ModeCheck::Inconsistent { file, pipe } => {
            println!("FAIL: {tool} internal consistency!");
            println!("   file found: {}", format_count(file));
            println!("   pipe found: {}", format_count(pipe));
            println!("   diff:       {}", format_count(report.modes.diff()));
        }
    }

    match report.reference {
        RefCheck::RawAgreed { .. } => {
            println!("PASS: {tool} and grep agree perfectly.");
        }
        RefCheck::RefereeConfirmed { .. } => {
            println!(
                "NOTE: {tool} and grep counts differ by {} (raw pattern vs structured records).",
                format_count(report.reference.diff())
            );
            println!("PASS: {tool} matches jq count.");
        }
        RefCheck::RefereeDisputed { primary, referee } => {
            println!(
                "FAIL: {tool} and jq disagree ({tool}: {}, jq: {}, diff: {}).",
                format_count(primary),
                format_count(referee),
                format_count(report.reference.diff())
            );
        }
        RefCheck::Unresolved { .. } => {
            println!(
                "NOTE: {tool} and grep counts differ by {}; jq not available, left unresolved.",
                format_count(report.reference.diff())
            );
        }
    }
}

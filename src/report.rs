//! Final comparison table, fastest scenario first.

use std::fmt::Write;

use crate::bench::BenchResult;

/// Render the fixed-width report table, sorted ascending by duration.
/// Sorting happens on a copy; the caller's ordering is left alone.
pub fn render_table(results: &[BenchResult], size_gb: f64) -> String {
    let mut sorted: Vec<&BenchResult> = results.iter().collect();
    sorted.sort_by(|a, b| a.duration.cmp(&b.duration));

    let mut out = String::new();
    let rule = "=".repeat(60);
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "FINAL REPORT ({size_gb}GB File)").unwrap();
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "{:<25} | {:<10} | Throughput", "Tool/Scenario", "Time").unwrap();
    writeln!(out, "{}", "-".repeat(60)).unwrap();
    for result in sorted {
        writeln!(
            out,
            "{:<25} | {:>8.2}s | {:>8.2} GB/s",
            result.name,
            result.duration.as_secs_f64(),
            result.throughput
        )
        .unwrap();
    }
    writeln!(out, "{rule}").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(name: &str, secs: f64) -> BenchResult {
        BenchResult {
            name: name.to_string(),
            duration: Duration::from_secs_f64(secs),
            throughput: 1.0 / secs,
        }
    }

    #[test]
    fn rows_are_sorted_fastest_first() {
        let results = [result("slow", 3.0), result("fast", 1.0), result("mid", 2.0)];
        let table = render_table(&results, 1.0);

        let rows: Vec<&str> = table
            .lines()
            .filter(|l| l.contains("GB/s"))
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("fast"));
        assert!(rows[1].starts_with("mid"));
        assert!(rows[2].starts_with("slow"));
    }

    #[test]
    fn input_ordering_is_untouched() {
        let results = [result("slow", 3.0), result("fast", 1.0)];
        render_table(&results, 1.0);
        assert_eq!(results[0].name, "slow");
    }

    #[test]
    fn two_decimal_formatting() {
        let results = [BenchResult {
            name: "tool (file)".to_string(),
            duration: Duration::from_secs(2),
            throughput: 0.5,
        }];
        let table = render_table(&results, 1.0);
        assert!(table.contains("2.00s"), "{table}");
        assert!(table.contains("0.50 GB/s"), "{table}");
        assert!(table.contains("FINAL REPORT (1GB File)"), "{table}");
    }

    #[test]
    fn empty_results_still_render_a_frame() {
        let table = render_table(&[], 1.0);
        assert!(table.contains("Tool/Scenario"));
    }
}

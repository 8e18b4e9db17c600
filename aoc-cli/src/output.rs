//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

/// Totals over a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print one result: answers to stdout, failures to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match self.format_result(result) {
            Ok(line) => println!("{}", line),
            Err(line) => eprintln!("{}", line),
        }
    }

    /// The line printed for a result; `Err` when the part failed
    fn format_result(&self, result: &SolverResult) -> Result<String, String> {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

        match &result.answer {
            Ok(answer) if self.quiet => Ok(answer.clone()),
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Ok(format!(
                    "{}: {} ({}solve: {})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                ))
            }
            Err(e) => Err(format!("{}: Error - {}", prefix, e)),
        }
    }

    /// Print a summary after all results
    ///
    /// Shows the summed parse and solve times next to the wall-clock time;
    /// their ratio is the speedup gained from parallel execution.
    pub fn print_summary(&self, results: &[SolverResult]) -> Summary {
        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        let summary = Summary {
            solved,
            failed: results.len() - solved,
        };
        if self.quiet {
            return summary;
        }

        let total_parse_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_duration(TimeDelta::from_std(elapsed_time).unwrap_or(TimeDelta::MAX))
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
        summary
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};

    fn result(answer: Result<&str, ArcExecutorError>) -> SolverResult {
        SolverResult {
            year: 2024,
            day: 7,
            part: 2,
            answer: answer.map(str::to_string),
            parse_duration: Some(TimeDelta::microseconds(1500)),
            solve_duration: TimeDelta::microseconds(42),
        }
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-3)), "-3µs");
    }

    #[test]
    fn test_full_line_is_labelled() {
        let formatter = OutputFormatter::new(false);
        assert_eq!(
            formatter.format_result(&result(Ok("11387"))),
            Ok("2024/07 Part 2: 11387 (parse: 1.50ms, solve: 42µs)".to_string())
        );
    }

    #[test]
    fn test_quiet_line_is_bare_answer() {
        let formatter = OutputFormatter::new(true);
        assert_eq!(formatter.format_result(&result(Ok("11387"))), Ok("11387".to_string()));
    }

    #[test]
    fn test_failure_goes_to_error_line() {
        let formatter = OutputFormatter::new(true);
        let err: ArcExecutorError = ExecutorError::ChannelSend.into();
        assert_eq!(
            formatter.format_result(&result(Err(err))),
            Err("2024/07 Part 2: Error - Channel send error".to_string())
        );
    }

    #[test]
    fn test_summary_counts() {
        let formatter = OutputFormatter::new(true);
        let results = vec![result(Ok("1")), result(Err(ExecutorError::ChannelSend.into()))];
        assert_eq!(formatter.print_summary(&results), Summary { solved: 1, failed: 1 });
    }
}

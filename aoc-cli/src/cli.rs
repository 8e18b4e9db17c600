//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every day one after another
    Sequential,
    /// One task per year; days inside a year run in order
    Year,
    /// One task per day; parts run in order on a shared parse (default)
    #[default]
    Day,
    /// One task per part; each part parses its own copy of the input
    Part,
}

/// Run puzzle solutions from the Advent of Code archive
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solutions", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run days carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/dayDD.txt` puzzle inputs
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Read this file instead of the input directory (needs --year and --day)
    #[arg(short, long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.year, None);
        assert_eq!(args.input_dir, PathBuf::from("inputs"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert!(!args.quiet);
    }

    #[test]
    fn test_selectors_and_tags() {
        let args = Args::try_parse_from([
            "aoc",
            "-y",
            "2024",
            "-d",
            "6",
            "-p",
            "2",
            "--tags",
            "grid,parallel",
            "--parallelize-by",
            "part",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2024));
        assert_eq!(args.day, Some(6));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["grid", "parallel"]);
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
    }

    #[test]
    fn test_day_and_part_ranges_enforced() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-d", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
    }

    #[test]
    fn test_input_file_needs_year_and_day() {
        assert!(Args::try_parse_from(["aoc", "-i", "day.txt"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-y", "2024", "-i", "day.txt"]).is_err());
        let args = Args::try_parse_from(["aoc", "-y", "2024", "-d", "1", "-i", "day.txt"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("day.txt")));
    }
}

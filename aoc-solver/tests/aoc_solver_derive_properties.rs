//! Property-based tests for the AocSolver derive macro
//!
//! The generated `Solver` impl must forward part `k` to `PartSolver<k>` on the
//! same shared data and reject everything outside `1..=max_parts`.

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

/// Space separated levels per line; part 1 counts strictly rising reports,
/// part 2 reuses the per-report spread recorded by part 1.
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Reports;

#[derive(Debug)]
struct ReportData {
    reports: Vec<Vec<u32>>,
    spreads: Option<Vec<u32>>,
}

impl AocParser for Reports {
    type SharedData<'a> = ReportData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let reports = input
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| {
                l.split_whitespace()
                    .map(|n| n.parse::<u32>().map_err(|e| ParseError::at_line(i + 1, e)))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReportData {
            reports,
            spreads: None,
        })
    }
}

impl PartSolver<1> for Reports {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let spreads = shared
            .reports
            .iter()
            .map(|r| r.iter().max().copied().unwrap_or(0) - r.iter().min().copied().unwrap_or(0))
            .collect();
        shared.spreads = Some(spreads);
        let rising = shared
            .reports
            .iter()
            .filter(|r| r.windows(2).all(|w| w[0] < w[1]))
            .count();
        Ok(rising.to_string())
    }
}

impl PartSolver<2> for Reports {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let spreads = shared
            .spreads
            .as_ref()
            .ok_or_else(|| SolveError::no_answer("part 1 has not run"))?;
        Ok(spreads.iter().sum::<u32>().to_string())
    }
}

/// Single-part day, like a final puzzle of the year
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct Finale;

impl AocParser for Finale {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.trim())
    }
}

impl PartSolver<1> for Finale {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

fn reports() -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(prop::collection::vec(0u32..50, 1..6), 1..8)
}

fn render(reports: &[Vec<u32>]) -> String {
    reports
        .iter()
        .map(|r| r.iter().map(u32::to_string).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_part_one_dispatch_matches_direct_call(data in reports()) {
        let input = render(&data);
        let mut via_dispatch = Reports::parse(&input).unwrap();
        let mut direct = Reports::parse(&input).unwrap();

        prop_assert_eq!(
            Reports::solve_part(&mut via_dispatch, 1).unwrap(),
            <Reports as PartSolver<1>>::solve(&mut direct).unwrap()
        );
    }

    #[test]
    fn prop_part_two_sees_part_one_state(data in reports()) {
        let input = render(&data);
        let mut shared = Reports::parse(&input).unwrap();

        prop_assert!(Reports::solve_part(&mut shared, 2).is_err());
        Reports::solve_part(&mut shared, 1).unwrap();

        let expected: u32 = data
            .iter()
            .map(|r| r.iter().max().unwrap() - r.iter().min().unwrap())
            .sum();
        prop_assert_eq!(Reports::solve_part(&mut shared, 2).unwrap(), expected.to_string());
    }

    #[test]
    fn prop_parts_outside_range_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Reports::parse("1 2 3").unwrap();
        match Reports::solve_part(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange for {}, got {:?}", part, other),
        }
    }

    #[test]
    fn prop_single_part_day_rejects_part_two(text in "[a-z#.]{0,20}") {
        let mut shared = Finale::parse(&text).unwrap();
        prop_assert_eq!(Finale::solve_part(&mut shared, 1).unwrap(), text.len().to_string());
        prop_assert!(matches!(Finale::solve_part(&mut shared, 2), Err(SolveError::PartOutOfRange(2))));
    }
}

#[test]
fn test_parts_constant() {
    assert_eq!(Reports::PARTS, 2);
    assert_eq!(Finale::PARTS, 1);
}

#[test]
fn test_parse_error_points_at_line() {
    let err = Reports::parse("1 2\n\n3 x\n").unwrap_err();
    assert_eq!(err.line(), Some(3));
}

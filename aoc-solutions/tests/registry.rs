//! Every solution module registers itself through the plugin inventory.

use aoc_solver::{SolverError, SolverRegistryBuilder};

// Link the solutions so their plugin submissions are collected.
use aoc_solutions as _;

fn expected_days() -> Vec<(u16, u8, u8)> {
    let mut days: Vec<(u16, u8, u8)> = (1..=25)
        .map(|day| (2024, day, if day == 25 { 1 } else { 2 }))
        .collect();
    days.extend((1..=12).map(|day| (2025, day, if day == 12 { 1 } else { 2 })));
    days
}

#[test]
fn test_all_days_registered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let registered: Vec<(u16, u8, u8)> = registry
        .storage()
        .iter_info()
        .map(|info| (info.year, info.day, info.parts))
        .collect();

    assert_eq!(registered, expected_days());
}

#[test]
fn test_tag_filter_selects_subset() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2025 && plugin.tags.contains(&"grid"))
        .unwrap()
        .build();

    let days: Vec<u8> = registry.storage().iter_info().map(|info| info.day).collect();
    assert_eq!(days, vec![4, 7, 9]);
    assert!(!registry.storage().contains(2024, 6));
}

#[test]
fn test_solve_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let input = "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n";
    let mut solver = registry.create_solver(2024, 1, input).unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "11");
    assert_eq!(solver.solve(2).unwrap().answer, "31");
}

#[test]
fn test_malformed_input_is_a_parse_error() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2024, 1, "3 x\n"),
        Err(SolverError::ParseError(_))
    ));
    assert!(matches!(
        registry.create_solver(2025, 13, ""),
        Err(SolverError::NotFound(2025, 13))
    ));
}

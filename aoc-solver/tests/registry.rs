use aoc_solver::{
    AocParser, AocSolver, FactoryInfo, ParseError, PartSolver, RegistrationError, SolveError,
    SolverError, SolverRegistryBuilder,
};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Lines;

impl AocParser for Lines {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {}", l)))
            })
            .collect()
    }
}

impl PartSolver<1> for Lines {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

impl PartSolver<2> for Lines {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .min()
            .map(u32::to_string)
            .ok_or_else(|| SolveError::SolveFailed("empty input".into()))
    }
}

#[test]
fn test_duplicate_registration_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_solver::<Lines>(2024, 1)
        .unwrap()
        .register_solver::<Lines>(2024, 1);

    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2024, 1))));
}

#[test]
fn test_out_of_range_registration_rejected() {
    let result = SolverRegistryBuilder::new().register_solver::<Lines>(2014, 1);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2014, 1))));

    let result = SolverRegistryBuilder::new().register_solver::<Lines>(2024, 26);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2024, 26))));
}

#[test]
fn test_storage_iterates_in_year_day_order() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Lines>(2025, 3)
        .unwrap()
        .register_solver::<Lines>(2024, 25)
        .unwrap()
        .register_solver::<Lines>(2024, 2)
        .unwrap()
        .build();

    let infos: Vec<FactoryInfo> = registry.storage().iter_info().collect();
    let keys: Vec<(u16, u8)> = infos.iter().map(|i| (i.year, i.day)).collect();
    assert_eq!(keys, vec![(2024, 2), (2024, 25), (2025, 3)]);
    assert!(infos.iter().all(|i| i.parts == 2));
    assert_eq!(registry.storage().len(), 3);
    assert!(!registry.storage().is_empty());
    assert_eq!(registry.storage().get_info(2024, 3), None);
}

#[test]
fn test_create_solver_errors() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Lines>(2024, 1)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2024, 2, "1"),
        Err(SolverError::NotFound(2024, 2))
    ));
    assert!(matches!(
        registry.create_solver(1999, 2, "1"),
        Err(SolverError::InvalidYearDay(1999, 2))
    ));
    assert!(matches!(
        registry.create_solver(2024, 1, "x"),
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}

#[test]
fn test_dyn_solver_reports_metadata_and_timings() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Lines>(2024, 9)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2024, 9, "4\n9\n2").unwrap();
    assert_eq!(solver.year(), 2024);
    assert_eq!(solver.day(), 9);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let part1 = solver.solve(1).unwrap();
    assert_eq!(part1.answer, "9");
    assert!(part1.elapsed >= chrono::TimeDelta::zero());
    assert_eq!(part1.part, 1);
    assert_eq!(solver.solve(2).unwrap().answer, "2");
}

#[test]
fn test_solve_failure_is_propagated() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<Lines>(2024, 9)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2024, 9, "").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "0");
    assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
}

pub mod year_2024;
pub mod year_2025;

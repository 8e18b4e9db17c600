//! Puzzle inputs read from a local directory

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Directory structure: `{dir}/{year}/day{day:02}.txt`. A single day can be
/// pointed at another file with [`InputStore::with_file`].
pub struct InputStore {
    dir: PathBuf,
    file_override: Option<(u16, u8, PathBuf)>,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            file_override: None,
        }
    }

    /// Read `year`/`day` from `path` instead of the directory
    pub fn with_file(mut self, year: u16, day: u8, path: PathBuf) -> Self {
        self.file_override = Some((year, day, path));
        self
    }

    /// Location the input for a specific year/day is read from
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        match &self.file_override {
            Some((y, d, path)) if *y == year && *d == day => path.clone(),
            _ => self
                .dir
                .join(year.to_string())
                .join(format!("day{:02}.txt", day)),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the whole input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Io { path, source },
        })
    }
}

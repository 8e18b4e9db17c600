use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 9, tags = ["simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// Alternating file and free-space lengths from the disk map.
    type SharedData<'a> = Vec<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .bytes()
            .map(|b| {
                b.is_ascii_digit()
                    .then(|| b - b'0')
                    .ok_or_else(|| invalid_format(format!("unexpected {:?} in disk map", b as char)))
            })
            .collect()
    }
}

fn block_checksum(blocks: &[Option<u32>]) -> u64 {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(i, id)| id.map(|id| i as u64 * u64::from(id)))
        .sum()
}

fn expand(map: &[u8]) -> Vec<Option<u32>> {
    map.iter()
        .enumerate()
        .flat_map(|(i, &len)| {
            let id = (i % 2 == 0).then_some(i as u32 / 2);
            std::iter::repeat_n(id, usize::from(len))
        })
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut blocks = expand(shared);
        let (mut lo, mut hi) = (0, blocks.len());
        loop {
            while lo < hi && blocks[lo].is_some() {
                lo += 1;
            }
            while hi > lo && blocks[hi - 1].is_none() {
                hi -= 1;
            }
            if lo + 1 >= hi {
                break;
            }
            blocks.swap(lo, hi - 1);
        }
        Ok(block_checksum(&blocks).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // (start, len) for files by id and for free spans in disk order.
        let mut files = Vec::new();
        let mut gaps = Vec::new();
        let mut offset = 0usize;
        for (i, &len) in shared.iter().enumerate() {
            let len = usize::from(len);
            if i % 2 == 0 {
                files.push((offset, len));
            } else {
                gaps.push((offset, len));
            }
            offset += len;
        }

        for file in files.iter_mut().rev() {
            let (start, len) = *file;
            if let Some(gap) = gaps
                .iter_mut()
                .take_while(|(gap_start, _)| *gap_start < start)
                .find(|(_, gap_len)| *gap_len >= len)
            {
                file.0 = gap.0;
                gap.0 += len;
                gap.1 -= len;
            }
        }

        let checksum: u64 = files
            .iter()
            .enumerate()
            .map(|(id, &(start, len))| (start..start + len).map(|pos| (id * pos) as u64).sum::<u64>())
            .sum();
        Ok(checksum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "2333133121414131402\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "1928");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "2858");
    }

    #[test]
    fn test_small_map() {
        assert_eq!(solve::<Solver, 1>("12345"), "60");
        assert_eq!(solve::<Solver, 2>("12345"), "132");
    }
}

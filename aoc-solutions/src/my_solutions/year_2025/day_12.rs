use std::collections::BTreeSet;

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use tracing::debug;

use crate::utils::parse::{blocks, invalid_format, ints, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["search", "parallel"])]
pub struct Solver;

/// Cell offsets from the first cell of the shape in row-major order.
type Orientation = Vec<(i32, i32)>;

#[derive(Debug)]
pub struct Present {
    cells: usize,
    orientations: Vec<Orientation>,
}

#[derive(Debug)]
pub struct Region {
    width: usize,
    height: usize,
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct SharedData {
    presents: Vec<Present>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut presents = Vec::new();
        let mut regions = Vec::new();
        for block in blocks(input) {
            let first = block.lines().next().unwrap_or_default();
            if first.contains('x') {
                regions.extend(parse_lines(block, parse_region)?);
            } else {
                let (_, shape) = block
                    .split_once(':')
                    .ok_or_else(|| invalid_format(format!("shape block {:?} has no index", first)))?;
                presents.push(parse_present(shape)?);
            }
        }
        if let Some(r) = regions.iter().find(|r| r.counts.len() != presents.len()) {
            return Err(invalid_format(format!(
                "region {}x{} lists {} presents but there are {} shapes",
                r.width,
                r.height,
                r.counts.len(),
                presents.len()
            )));
        }
        Ok(SharedData { presents, regions })
    }
}

fn parse_region(line: &str) -> anyhow::Result<Region> {
    let (size, counts) = line.split_once(':').ok_or_else(|| anyhow!("expected `WxH: counts`"))?;
    let (w, h) = size.trim().split_once('x').ok_or_else(|| anyhow!("bad region size {:?}", size))?;
    let width: usize = w.parse()?;
    if width > 64 {
        bail!("regions wider than 64 are not supported");
    }
    Ok(Region {
        width,
        height: h.parse()?,
        counts: ints(counts)?,
    })
}

fn parse_present(shape: &str) -> Result<Present, ParseError> {
    let mut cells = Vec::new();
    for (y, row) in shape.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        for (x, b) in row.bytes().enumerate() {
            match b {
                b'#' if x < 3 && y < 3 => cells.push((x as i32, y as i32)),
                b'#' => return Err(invalid_format("shapes must fit in a 3x3 box")),
                b'.' => {}
                _ => return Err(invalid_format(format!("unexpected {:?} in shape", b as char))),
            }
        }
    }
    if cells.is_empty() {
        return Err(invalid_format("empty shape"));
    }
    Ok(Present {
        cells: cells.len(),
        orientations: orientations(&cells),
    })
}

/// Distinct rotations and reflections, anchored at their first row-major cell.
fn orientations(cells: &[(i32, i32)]) -> Vec<Orientation> {
    let mut seen = BTreeSet::new();
    let mut current = cells.to_vec();
    for _ in 0..2 {
        for _ in 0..4 {
            let mut normal: Vec<(i32, i32)> = current.iter().map(|&(x, y)| (y, x)).collect();
            normal.sort_unstable();
            let (ay, ax) = normal[0];
            seen.insert(normal.iter().map(|&(y, x)| (x - ax, y - ay)).collect::<Vec<_>>());
            current = current.iter().map(|&(x, y)| (-y, x)).collect();
        }
        current = current.iter().map(|&(x, y)| (-x, y)).collect();
    }
    seen.into_iter().collect()
}

struct Packer<'p> {
    presents: &'p [Present],
    width: usize,
    height: usize,
    /// Occupied cells, one bit per column.
    rows: Vec<u64>,
    counts: Vec<usize>,
}

impl Packer<'_> {
    fn fits(&self, orientation: &Orientation, x: usize, y: usize) -> bool {
        orientation.iter().all(|&(dx, dy)| {
            let (cx, cy) = (x as i32 + dx, y as i32 + dy);
            cx >= 0
                && cy >= 0
                && (cx as usize) < self.width
                && (cy as usize) < self.height
                && self.rows[cy as usize] & (1 << cx) == 0
        })
    }

    fn toggle(&mut self, orientation: &Orientation, x: usize, y: usize) {
        for &(dx, dy) in orientation {
            self.rows[(y as i32 + dy) as usize] ^= 1 << (x as i32 + dx);
        }
    }

    /// Fill cells in row-major order: the first free cell is either covered by
    /// the anchor of some present or left empty, which spends one unit of slack.
    fn search(&mut self, from: usize, slack: usize, left: usize) -> bool {
        if left == 0 {
            return true;
        }
        let Some(idx) = (from..self.width * self.height)
            .find(|&i| self.rows[i / self.width] & (1 << (i % self.width)) == 0)
        else {
            return false;
        };
        let (x, y) = (idx % self.width, idx / self.width);
        let presents = self.presents;
        for (kind, present) in presents.iter().enumerate() {
            if self.counts[kind] == 0 {
                continue;
            }
            for orientation in &present.orientations {
                if !self.fits(orientation, x, y) {
                    continue;
                }
                self.toggle(orientation, x, y);
                self.counts[kind] -= 1;
                let found = self.search(idx + 1, slack, left - 1);
                self.counts[kind] += 1;
                self.toggle(orientation, x, y);
                if found {
                    return true;
                }
            }
        }
        if slack > 0 {
            self.rows[y] |= 1 << x;
            let found = self.search(idx + 1, slack - 1, left);
            self.rows[y] &= !(1 << x);
            return found;
        }
        false
    }
}

fn can_fit(presents: &[Present], region: &Region) -> bool {
    let area = region.width * region.height;
    let needed: usize = presents.iter().zip(&region.counts).map(|(p, &c)| p.cells * c).sum();
    if needed > area {
        return false;
    }
    let total: usize = region.counts.iter().sum();
    // Every present fits in a 3x3 box, so a grid of whole boxes is enough.
    if (region.width / 3) * (region.height / 3) >= total {
        return true;
    }
    debug!(width = region.width, height = region.height, total, "packing region by search");
    let mut packer = Packer {
        presents,
        width: region.width,
        height: region.height,
        rows: vec![0; region.height],
        counts: region.counts.clone(),
    };
    packer.search(0, area - needed, total)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .par_iter()
            .filter(|region| can_fit(&shared.presents, region))
            .count();
        Ok(fitting.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "2");
    }

    #[test]
    fn test_orientation_count() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.presents.len(), 6);
        assert_eq!(shared.regions.len(), 3);
        // Half-turn and mirror symmetric.
        assert_eq!(shared.presents[5].orientations.len(), 2);
        // Mirroring equals a half turn.
        assert_eq!(shared.presents[4].orientations.len(), 4);
    }

    #[test]
    fn test_area_rejection() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        let region = Region {
            width: 3,
            height: 3,
            counts: vec![0, 0, 0, 0, 0, 2],
        };
        assert!(!can_fit(&shared.presents, &region));
    }
}

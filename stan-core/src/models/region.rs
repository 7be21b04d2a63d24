use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionError;

///
/// A marker region: closed interval `[start, end]` in 0-based coordinates.
///
/// Parsed from and displayed in the 1-based `start-end` notation used on
/// the command line, e.g. `4501-5500` covers 0-based positions 4500..=5499.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
pub struct MarkerRegion {
    pub start: usize,
    pub end: usize,
}

impl MarkerRegion {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    ///
    /// Number of nucleotides covered by the region
    ///
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn overlaps(&self, other: &MarkerRegion) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl FromStr for MarkerRegion {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| RegionError::RegionParseError(format!("expected start-end, got '{}'", s)))?;

        let parse = |coord: &str| {
            coord.trim().parse::<usize>().map_err(|e| {
                RegionError::RegionParseError(format!("invalid coordinate '{}' in '{}': {}", coord, s, e))
            })
        };
        let start = parse(start)?;
        let end = parse(end)?;

        if start == 0 {
            return Err(RegionError::RegionParseError(format!(
                "coordinates are 1-based, got start 0 in '{}'",
                s
            )));
        }
        if start > end {
            return Err(RegionError::RegionParseError(format!(
                "start exceeds end in '{}'",
                s
            )));
        }

        Ok(MarkerRegion::new(start - 1, end - 1))
    }
}

impl Display for MarkerRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start + 1, self.end + 1)
    }
}

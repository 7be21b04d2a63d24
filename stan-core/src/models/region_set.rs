use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionError;
use crate::models::region::MarkerRegion;

///
/// Sorted, non-overlapping set of marker regions on a single locus.
///
/// Every position of the locus belongs to exactly one of two site classes:
/// marker (inside some region) or background (outside all regions).
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerRegions {
    pub regions: Vec<MarkerRegion>,
}

impl MarkerRegions {
    pub fn new(mut regions: Vec<MarkerRegion>) -> Self {
        regions.sort_by_key(|r| r.start);
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerRegion> {
        self.regions.iter()
    }

    ///
    /// Check the regions against a locus of `length` nucleotides.
    ///
    /// Fails on the first region whose end lies beyond the locus, then on
    /// the first pair of overlapping regions.
    ///
    pub fn validate(&self, length: usize) -> Result<(), RegionError> {
        for region in &self.regions {
            if region.end >= length {
                return Err(RegionError::OutOfBounds {
                    start: region.start + 1,
                    end: region.end + 1,
                    length,
                });
            }
        }

        for pair in self.regions.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(RegionError::Overlap(pair[0].to_string(), pair[1].to_string()));
            }
        }

        Ok(())
    }

    /// Total number of marker sites.
    pub fn marker_site_count(&self) -> usize {
        self.regions.iter().map(|r| r.width()).sum()
    }

    pub fn is_marker(&self, position: usize) -> bool {
        self.regions.iter().any(|r| r.contains(position))
    }

    ///
    /// Marker positions in ascending order; index `i` of the result is the
    /// `i`-th marker site.
    ///
    pub fn marker_positions(&self) -> Vec<usize> {
        self.regions.iter().flat_map(|r| r.start..=r.end).collect()
    }

    ///
    /// Background positions of a locus of `length` nucleotides, ascending.
    ///
    pub fn background_positions(&self, length: usize) -> Vec<usize> {
        let mut positions = Vec::with_capacity(length.saturating_sub(self.marker_site_count()));
        let mut next = 0;
        for region in &self.regions {
            positions.extend(next..region.start.min(length));
            next = region.end + 1;
        }
        positions.extend(next..length);
        positions
    }
}

impl FromStr for MarkerRegions {
    type Err = RegionError;

    /// Parse a comma-separated list of 1-based `start-end` intervals.
    /// An empty string yields an empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let regions = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(MarkerRegion::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MarkerRegions::new(regions))
    }
}

impl From<Vec<MarkerRegion>> for MarkerRegions {
    fn from(regions: Vec<MarkerRegion>) -> Self {
        MarkerRegions::new(regions)
    }
}

impl Display for MarkerRegions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.regions.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn two_regions() -> MarkerRegions {
        "3501-4000,1501-2000".parse().unwrap()
    }

    #[rstest]
    fn test_parse_sorts_by_start(two_regions: MarkerRegions) {
        assert_eq!(two_regions.len(), 2);
        assert_eq!(two_regions.regions[0], MarkerRegion::new(1500, 1999));
        assert_eq!(two_regions.regions[1], MarkerRegion::new(3500, 3999));
        assert_eq!(two_regions.to_string(), "1501-2000,3501-4000");
    }

    #[rstest]
    fn test_empty_string_is_empty_set() {
        let regions: MarkerRegions = "".parse().unwrap();
        assert!(regions.is_empty());
        assert_eq!(regions.marker_site_count(), 0);
    }

    #[rstest]
    fn test_parse_propagates_malformed_region() {
        let result = "1-10,x-20".parse::<MarkerRegions>();
        assert!(matches!(result, Err(RegionError::RegionParseError(_))));
    }

    #[rstest]
    #[case(10000, true)]
    #[case(4000, true)]
    #[case(3999, false)]
    fn test_validate_bounds(two_regions: MarkerRegions, #[case] length: usize, #[case] ok: bool) {
        assert_eq!(two_regions.validate(length).is_ok(), ok);
    }

    #[rstest]
    fn test_validate_reports_out_of_bounds_in_input_coordinates() {
        let regions: MarkerRegions = "4501-5500".parse().unwrap();
        match regions.validate(5000) {
            Err(RegionError::OutOfBounds { start, end, length }) => {
                assert_eq!((start, end, length), (4501, 5500, 5000));
            }
            other => panic!("Expected OutOfBounds, got {:?}", other),
        }
    }

    #[rstest]
    fn test_validate_rejects_overlap() {
        let regions: MarkerRegions = "1-10,5-20".parse().unwrap();
        assert!(matches!(regions.validate(100), Err(RegionError::Overlap(_, _))));
    }

    #[rstest]
    fn test_site_tables_partition_the_locus(two_regions: MarkerRegions) {
        let length = 5000;
        let markers = two_regions.marker_positions();
        let background = two_regions.background_positions(length);

        assert_eq!(markers.len(), 1000);
        assert_eq!(two_regions.marker_site_count(), 1000);
        assert_eq!(background.len(), length - 1000);
        assert_eq!(markers[0], 1500);
        assert_eq!(markers[500], 3500);
        assert_eq!(background[1500], 2000);
        assert_eq!(*background.last().unwrap(), length - 1);

        let mut all: Vec<usize> = markers.iter().chain(background.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..length).collect::<Vec<_>>());
        assert!(markers.iter().all(|&p| two_regions.is_marker(p)));
        assert!(background.iter().all(|&p| !two_regions.is_marker(p)));
    }
}

// ============================================================================
// Site Classes
// ============================================================================

/// Number of sites in each class of the locus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteCounts {
    pub marker: usize,
    pub background: usize,
}

impl SiteCounts {
    pub fn new(marker: usize, background: usize) -> Self {
        Self { marker, background }
    }

    pub fn total(&self) -> usize {
        self.marker + self.background
    }
}

/// Mutation rates (theta per nucleotide) of the two site classes on one
/// side of the tree. A negative marker rate means the marker sites mutate
/// no further; in neighbors it also switches on deletion mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteRates {
    pub marker: f64,
    pub background: f64,
}

impl SiteRates {
    pub fn new(marker: f64, background: f64) -> Self {
        Self { marker, background }
    }
}

// ============================================================================
// Mutation Model
// ============================================================================

/// Mutation events on the branch directly above a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationCounts {
    pub marker: u32,
    pub background: u32,
}

impl MutationCounts {
    pub fn total(&self) -> u32 {
        self.marker + self.background
    }
}

/// Site class a mutation event was drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteClass {
    Marker,
    Background,
}

///
/// One mutation event: the genomic position it hit and, per haplotype
/// column, whether that sample inherits it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypeEvent {
    /// 0-based position on the locus
    pub position: usize,
    pub class: SiteClass,
    /// One entry per column, targets first
    pub carriers: Vec<bool>,
}

impl HaplotypeEvent {
    pub fn carrier_count(&self) -> usize {
        self.carriers.iter().filter(|&&c| c).count()
    }

    pub fn carrier_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.carriers
            .iter()
            .enumerate()
            .filter_map(|(column, &c)| c.then_some(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_haplotype_event_carriers() {
        let event = HaplotypeEvent {
            position: 12,
            class: SiteClass::Background,
            carriers: vec![false, true, true, false, true],
        };
        assert_eq!(event.carrier_count(), 3);
        assert_eq!(event.carrier_columns().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_totals() {
        assert_eq!(SiteCounts::new(1000, 9000).total(), 10000);
        let counts = MutationCounts { marker: 2, background: 5 };
        assert_eq!(counts.total(), 7);
    }
}

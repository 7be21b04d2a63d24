//! Assembly of the simulated alignment from the ancestral sequence and the
//! haplotype events.

use rand::Rng;
use stan_core::models::Sequence;

use crate::consts::{DELETED, NUCLEOTIDES};
use crate::models::HaplotypeEvent;

/// Draw a sequence of `length` bases, each uniform over `ACGT`.
pub fn ancestral_sequence<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<u8> {
    (0..length)
        .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
        .collect()
}

/// Draw a base uniformly from `ACGT`, redrawing until it differs from `ancestral`.
pub fn derived_base<R: Rng + ?Sized>(ancestral: u8, rng: &mut R) -> u8 {
    loop {
        let base = NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())];
        if base != ancestral {
            return base;
        }
    }
}

///
/// Nucleotide matrix with one row per locus position and one column per
/// haplotype, targets first.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub ancestral: Vec<u8>,
    /// Derived base drawn for each applied event, in event order
    pub derived: Vec<u8>,
    columns: usize,
    cells: Vec<u8>,
}

impl Alignment {
    /// Every cell starts out as the ancestral base of its row.
    pub fn new(ancestral: Vec<u8>, columns: usize) -> Self {
        let cells = ancestral
            .iter()
            .flat_map(|&base| std::iter::repeat(base).take(columns))
            .collect();

        Self {
            ancestral,
            derived: Vec::new(),
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.ancestral.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.cells[row * self.columns + column]
    }

    fn set(&mut self, row: usize, column: usize, base: u8) {
        self.cells[row * self.columns + column] = base;
    }

    ///
    /// Apply the events in order: each draws a derived base different from
    /// the ancestral base at its position and writes it into every carrier
    /// column of that row.
    ///
    pub fn apply_events<R: Rng + ?Sized>(&mut self, events: &[HaplotypeEvent], rng: &mut R) {
        self.derived.reserve(events.len());
        for event in events {
            let base = derived_base(self.ancestral[event.position], rng);
            for column in event.carrier_columns() {
                self.set(event.position, column, base);
            }
            self.derived.push(base);
        }
    }

    ///
    /// Within columns `from_column..`, move the rows listed in `kept_rows`
    /// (ascending) to the top, in order, and mark every row below them as
    /// [`DELETED`]. Columns before `from_column` are left untouched.
    ///
    pub fn compact_rows(&mut self, kept_rows: &[usize], from_column: usize) {
        for (dest, &src) in kept_rows.iter().enumerate() {
            if dest == src {
                continue;
            }
            for column in from_column..self.columns {
                let base = self.get(src, column);
                self.set(dest, column, base);
            }
        }

        for row in kept_rows.len()..self.rows() {
            for column in from_column..self.columns {
                self.set(row, column, DELETED);
            }
        }
    }

    /// The full column, including any [`DELETED`] rows.
    pub fn column(&self, column: usize) -> Vec<u8> {
        (0..self.rows()).map(|row| self.get(row, column)).collect()
    }

    /// The column up to, not including, its first [`DELETED`] row.
    pub fn truncated_column(&self, column: usize) -> Vec<u8> {
        (0..self.rows())
            .map(|row| self.get(row, column))
            .take_while(|&base| base != DELETED)
            .collect()
    }

    ///
    /// Slice the alignment into named sequences. The first `target_count`
    /// columns are emitted full length, the remaining columns are truncated
    /// at their first deleted row.
    ///
    pub fn to_sequences(&self, labels: &[String], target_count: usize) -> (Vec<Sequence>, Vec<Sequence>) {
        let targets = (0..target_count)
            .map(|column| Sequence::new(labels[column].clone(), self.column(column)))
            .collect();
        let neighbors = (target_count..self.columns)
            .map(|column| Sequence::new(labels[column].clone(), self.truncated_column(column)))
            .collect();

        (targets, neighbors)
    }
}

//! Core models shared by the stan simulator.
//!
//! - [`models::MarkerRegions`] parses and validates the marker regions of a locus
//!   and splits its positions into marker and background site tables.
//! - [`models::Sequence`] is a named nucleotide sequence.
//! - [`utils`] manages output directories and writes FASTA files.

pub mod errors;
pub mod models;
pub mod utils;

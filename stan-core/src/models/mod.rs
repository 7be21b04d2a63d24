pub mod region;
pub mod region_set;
pub mod sequence;

// re-export for cleaner imports
pub use self::region::MarkerRegion;
pub use self::region_set::MarkerRegions;
pub use self::sequence::Sequence;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Error parsing marker region: {0}")]
    RegionParseError(String),

    #[error("Marker region {start}-{end} extends beyond the end of the sequence ({length} bp).")]
    OutOfBounds { start: usize, end: usize, length: usize },

    #[error("Marker regions {0} and {1} overlap")]
    Overlap(String, String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("directory {0} already exists")]
    DirectoryExists(String),

    #[error("couldn't create {0}: {1}")]
    CreateFailed(String, std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use std::fmt::{self, Display};

///
/// A named nucleotide sequence, written out as one FASTA record.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sequence {
    pub name: String,
    pub data: Vec<u8>,
}

impl Sequence {
    pub fn new(name: String, data: Vec<u8>) -> Self {
        Self { name, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

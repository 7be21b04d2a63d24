use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::errors::OutputError;
use crate::models::Sequence;

/// File extension of written sequence files.
pub const FASTA_EXTENSION: &str = "fasta";

///
/// Make sure `dir` can be created by a later [`write_sample_dir`] call.
///
/// An existing directory is an error unless `overwrite` is set, in which
/// case it is removed with all its contents.
///
pub fn prepare_output_dir(dir: &Path, overwrite: bool) -> Result<(), OutputError> {
    if !dir.exists() {
        return Ok(());
    }

    if !overwrite {
        return Err(OutputError::DirectoryExists(dir.display().to_string()));
    }

    fs::remove_dir_all(dir)?;
    info!("Removed existing directory {}", dir.display());
    Ok(())
}

///
/// Write one FASTA record: `>` header line, then the sequence in chunks of
/// `line_width` characters.
///
pub fn write_fasta<W: Write>(writer: &mut W, sequence: &Sequence, line_width: usize) -> std::io::Result<()> {
    writeln!(writer, ">{}", sequence.name)?;

    for chunk in sequence.data.chunks(line_width.max(1)) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }

    Ok(())
}

///
/// Create `dir` and write each sequence to its own file `<name>.fasta`.
///
pub fn write_sample_dir(dir: &Path, sequences: &[Sequence], line_width: usize) -> Result<(), OutputError> {
    fs::create_dir(dir).map_err(|e| OutputError::CreateFailed(dir.display().to_string(), e))?;

    for sequence in sequences {
        let path = dir.join(format!("{}.{}", sequence.name, FASTA_EXTENSION));
        let file = File::create(&path).map_err(|e| OutputError::CreateFailed(path.display().to_string(), e))?;

        let mut writer = BufWriter::new(file);
        write_fasta(&mut writer, sequence, line_width)?;
        writer.flush()?;
    }

    info!("Wrote {} sequences to {}", sequences.len(), dir.display());
    Ok(())
}

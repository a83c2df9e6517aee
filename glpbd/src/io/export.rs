use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{ParameterIo, Result};

pub struct ByteSize(pub usize);

impl std::fmt::Display for ByteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < 1024 {
            write!(f, "{} B", self.0)
        } else if self.0 < 1024 * 1024 {
            write!(f, "{:.3} KB", self.0 as f64 / 1024.0)
        } else {
            write!(f, "{:.3} MB", self.0 as f64 / (1024.0 * 1024.0))
        }
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `data` next to `path` and renames it into place, so readers never
/// see a partially written file.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let temporary = temporary_path(path);

    let result = (|| -> Result<()> {
        let file = std::fs::File::create(&temporary)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(data)?;
        writer.into_inner().map_err(|err| err.into_error())?.sync_all()?;
        std::fs::rename(&temporary, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temporary);
    }

    result
}

/// Writes the serialized document.
pub fn save<P: AsRef<Path>>(pio: &ParameterIo, path: P) -> Result<usize> {
    let data = pio.to_bytes()?;
    write_atomic(&path, &data)?;

    log::info!("Saved {} ({})", path.as_ref().display(), ByteSize(data.len()));

    Ok(data.len())
}

/// Writes the serialized document wrapped in a Yaz0 container.
pub fn save_compressed<P: AsRef<Path>>(pio: &ParameterIo, path: P) -> Result<usize> {
    let data = pio.to_compressed_bytes()?;
    write_atomic(&path, &data)?;

    log::info!("Saved {} ({})", path.as_ref().display(), ByteSize(data.len()));

    Ok(data.len())
}

//! Disk I/O helpers: load the item document and write it back atomically.
//!
//! Rename-over is close to atomic on local filesystems. Network shares and
//! FAT volumes give no such guarantee.

use crate::error::{Error, Result};
use crate::model::Item;
use crate::serializer::Serializer;
use std::path::Path;

/// Reads and decodes the document at `path`. A missing or empty file is an
/// empty list, not an error.
pub fn load<S>(path: &Path, serializer: &S) -> Result<Vec<Item>>
where
    S: Serializer,
{
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::Io(e.to_string())),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serializer.deserialize(&bytes)
}

/// Write `bytes` to `<path>.tmp`, then rename it over `path`.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    std::fs::write(&tmp, bytes).map_err(|e| Error::Io(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Io(e.to_string()))?;
    Ok(())
}

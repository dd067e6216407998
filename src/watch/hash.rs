use std::fmt;
use std::io::Read;
use std::path::Path;

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, RuwnchError};
use crate::fs::FileSystem;

/// Size of each read when streaming a file into the hasher.
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Hex-encoded digest of a file's full content at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a single file.
///
/// The file is read in [`HASH_CHUNK_SIZE`] chunks, never loaded whole. Any
/// open or read failure becomes [`RuwnchError::FileAccess`].
pub fn fingerprint(fs: &dyn FileSystem, path: &Path) -> Result<Fingerprint> {
    let access_error = |reason: String| RuwnchError::FileAccess {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = fs
        .open_read(path)
        .map_err(|err| access_error(format!("{err:#}")))?;

    let mut hasher = Hasher::new();
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|err| access_error(err.to_string()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let hex = hasher.finalize().to_hex().to_string();
    debug!(file = ?path, hash = %hex, "computed file fingerprint");
    Ok(Fingerprint(hex))
}

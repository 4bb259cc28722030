//! Whole-file JSON persistence.
//!
//! A `JsonStore` owns one path. Reads are tolerant: a missing file yields the
//! caller's default, and a corrupt or unreadable file yields the default with
//! a warning. Writes overwrite the whole file and never fail the caller.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;

/// A JSON document stored at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file. `Ok(None)` when it does not exist.
    pub fn try_load(&self) -> Result<Option<T>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Load the stored value, falling back to `default` if the file is
    /// missing, unreadable, or malformed.
    pub fn load_or(&self, default: T) -> T {
        match self.try_load() {
            Ok(Some(data)) => {
                debug!(path = %self.path.display(), "loaded store");
                data
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "store file absent, using default");
                default
            }
            Err(e) => {
                warn!("{e}; resetting to default data");
                default
            }
        }
    }

    /// Serialize `data` and overwrite the file.
    pub fn try_save(&self, data: &T) -> Result<(), StoreError> {
        let json = to_pretty_json(data).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`try_save`](Self::try_save) but only logs failures.
    ///
    /// Returns `false` when the write failed; the caller's in-memory data is
    /// then ahead of the file.
    pub fn save(&self, data: &T) -> bool {
        match self.try_save(data) {
            Ok(()) => {
                debug!(path = %self.path.display(), "saved store");
                true
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }
}

/// Pretty JSON with four-space indentation.
fn to_pretty_json<T: Serialize>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    Ok(buf)
}

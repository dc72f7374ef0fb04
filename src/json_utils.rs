//! JSON persistence helpers shared by the stores.
//!
//! Backing files are always read whole and rewritten whole. A missing file
//! is reported as `None`, never as an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::Error;

/// Reads and deserializes the whole file at `path`.
/// Returns `Ok(None)` if the file does not exist.
pub fn read_json<T, P>(path: P) -> Result<Option<T>, Error>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::Persistence {
                path: path.to_owned(),
                source,
            })
        }
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| {
            if source.is_io() {
                Error::Persistence {
                    path: path.to_owned(),
                    source: source.into(),
                }
            } else {
                Error::StoreUnavailable {
                    path: path.to_owned(),
                    source,
                }
            }
        })
}

/// Serializes `value` and overwrites the file at `path`, creating the parent
/// directory if needed. The rewrite is not atomic.
pub fn write_json<T, P>(path: P, value: &T) -> Result<(), Error>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let persistence = |source: io::Error| Error::Persistence {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(persistence)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(persistence)?);
    serde_json::to_writer(&mut writer, value).map_err(|e| persistence(e.into()))?;
    writer.flush().map_err(persistence)
}

use std::{
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::errors::ServiceError;

/// A single JSON document on disk, read and rewritten as a whole.
#[derive(Debug, Clone)]
pub struct JsonFile {
    file_path: PathBuf,
    pretty: bool,
}

impl JsonFile {
    pub fn new<P: Into<PathBuf>>(path: P, pretty: bool) -> Self {
        Self { file_path: path.into(), pretty }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the document. Returns `Ok(None)` when the file does not exist.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::Storage(format!("read {}: {}", self.file_path.display(), e))),
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Corrupt(format!("{}: {}", self.file_path.display(), e)))?;
        Ok(Some(value))
    }

    /// Serialize `value` to `<file>.tmp`, flush it, then rename it over the target.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ServiceError> {
        let data = self.encode(value)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ServiceError::Storage(e.to_string()))?;
            }
        }

        let tmp_path = self.tmp_path();
        if let Err(e) = Self::write_and_rename(&tmp_path, &self.file_path, &data) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ServiceError::Storage(e.to_string()));
        }
        debug!(path = %self.file_path.display(), bytes = data.len(), "json_file_written");
        Ok(())
    }

    fn write_and_rename(tmp_path: &Path, target: &Path, data: &[u8]) -> io::Result<()> {
        let mut tmp = File::create(tmp_path)?;
        tmp.write_all(data)?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(tmp_path, target)
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, ServiceError> {
        if !self.pretty {
            return serde_json::to_vec(value).map_err(|e| ServiceError::Storage(e.to_string()));
        }
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut ser).map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(buf)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

//! `_metadata.yml` sidecar I/O.
//!
//! Reading never mutates; writing is left to the caller (`prerender-sync`
//! owns the atomic writer) except for [`ensure_record_exists`], which only
//! ever creates an empty file.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{io_err, CoreError};
use crate::types::{MetadataRecord, PostDir, PostMetadata};

/// Default sidecar file name inside each post directory.
pub const DEFAULT_METADATA_FILE: &str = "_metadata.yml";

/// Create an empty metadata file for `post` if none exists.
///
/// Returns `true` when a file was created. Existing files are never touched,
/// whatever their content.
pub fn ensure_record_exists(post: &PostDir, file_name: &str) -> Result<bool, CoreError> {
    let path = post.metadata_path(file_name);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => {
            tracing::debug!(path = %path.display(), "created empty metadata file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Read and classify the metadata file at `path`.
pub fn load_record(path: &Path) -> Result<MetadataRecord, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    parse_record(path, &contents)
}

/// Classify raw file contents. `path` is only used for error context.
///
/// Empty or all-whitespace input is [`MetadataRecord::Absent`], not an empty mapping.
pub fn parse_record(path: &Path, contents: &str) -> Result<MetadataRecord, CoreError> {
    if contents.trim().is_empty() {
        return Ok(MetadataRecord::Absent);
    }
    let value: Value = serde_yaml::from_str(contents).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(MetadataRecord::from_value(value))
}

/// Serialize a record to YAML text.
pub fn render_record(meta: &PostMetadata) -> Result<String, CoreError> {
    let value = Value::Mapping(meta.clone().into_mapping());
    Ok(serde_yaml::to_string(&value)?)
}

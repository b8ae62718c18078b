//! Domain types for post metadata.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Metadata values stay as `serde_yaml::Value` so unknown keys survive a
//! load/save cycle untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};

/// Metadata key holding the publication date.
pub const DATE_KEY: &str = "date";
/// Metadata key holding the registered identifier.
pub const DOI_KEY: &str = "doi";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A directory representing one post, e.g. `posts/2024/06/2024-06-01_my-post`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostDir(pub PathBuf);

impl PostDir {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Final path segment, lossily converted to UTF-8.
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Date token: everything before the first `_` of the directory name,
    /// or the whole name when it has no underscore.
    pub fn date_token(&self) -> String {
        let name = self.name();
        match name.split_once('_') {
            Some((date, _)) => date.to_owned(),
            None => name,
        }
    }

    /// The date token read as an ISO `YYYY-MM-DD` calendar date, if it is one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_token(), "%Y-%m-%d").ok()
    }

    /// `<post>/<file_name>`
    pub fn metadata_path(&self, file_name: &str) -> PathBuf {
        self.0.join(file_name)
    }
}

impl fmt::Display for PostDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl From<PathBuf> for PostDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

impl From<&str> for PostDir {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

/// A registered identifier without its resolver prefix, e.g. `10.59350/sfzv4-xdb68`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Doi(pub String);

impl Doi {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Doi {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Doi {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Metadata record
// ---------------------------------------------------------------------------

/// A parsed `_metadata.yml` mapping.
///
/// `date` and `doi` are pulled out of the mapping; everything else lives in
/// `extra` in its original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostMetadata {
    pub date: Option<Value>,
    pub doi: Option<Value>,
    pub extra: Mapping,
}

impl PostMetadata {
    /// A fresh record holding only `date` and `doi`.
    pub fn new(date: impl Into<String>, doi: &Doi) -> Self {
        Self {
            date: Some(Value::String(date.into())),
            doi: Some(Value::String(doi.0.clone())),
            extra: Mapping::new(),
        }
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        let mut meta = Self::default();
        for (key, value) in mapping {
            match key.as_str() {
                Some(DATE_KEY) => meta.date = Some(value),
                Some(DOI_KEY) => meta.doi = Some(value),
                _ => {
                    meta.extra.insert(key, value);
                }
            }
        }
        meta
    }

    /// Back to a mapping: `date`, `doi`, then the extra keys.
    pub fn into_mapping(self) -> Mapping {
        let mut mapping = Mapping::new();
        if let Some(date) = self.date {
            mapping.insert(Value::String(DATE_KEY.to_owned()), date);
        }
        if let Some(doi) = self.doi {
            mapping.insert(Value::String(DOI_KEY.to_owned()), doi);
        }
        for (key, value) in self.extra {
            mapping.insert(key, value);
        }
        mapping
    }

    /// True when `date` is a string equal to `expected`.
    pub fn date_matches(&self, expected: &str) -> bool {
        matches!(&self.date, Some(Value::String(s)) if s == expected)
    }

    /// True when the `doi` key is present, whatever its value.
    pub fn has_doi(&self) -> bool {
        self.doi.is_some()
    }

    pub fn doi_str(&self) -> Option<&str> {
        self.doi.as_ref().and_then(Value::as_str)
    }
}

/// The three shapes a metadata file can take once parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataRecord {
    /// Empty file, whitespace, comments only, or an explicit YAML `null`.
    Absent,
    /// Parsed, but not a mapping (a scalar, a sequence, a tagged value).
    Malformed(Value),
    Valid(PostMetadata),
}

impl MetadataRecord {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => MetadataRecord::Absent,
            Value::Mapping(mapping) => MetadataRecord::Valid(PostMetadata::from_mapping(mapping)),
            other => MetadataRecord::Malformed(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

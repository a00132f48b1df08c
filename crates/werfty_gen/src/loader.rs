//! Input document loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenError, GenResult, ParseFailure};
use crate::property::{PropertyTree, RESOURCE_TYPE_KEY};

/// Serialization format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` select YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    /// Parse `content` into any deserializable type.
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T, ParseFailure> {
        Ok(match self {
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
            DocumentFormat::Json => serde_json::from_str(content)?,
        })
    }
}

/// A parsed input document.
///
/// Only syntactic parsing has happened; `properties()` performs the single
/// structural check the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        debug!("Loading document from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| GenError::ConfigLoad {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &content)
    }

    /// Parse `content` as if it had been read from `path`.
    pub fn parse(path: impl AsRef<Path>, content: &str) -> GenResult<Self> {
        let path = path.as_ref();
        let root = load_file_content(path, content)?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as used for detection hints.
    pub fn source_hint(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The top-level `resourceType`, if it is a string.
    pub fn resource_type(&self) -> Option<&str> {
        self.root.get(RESOURCE_TYPE_KEY).and_then(Value::as_str)
    }

    /// The `properties` mapping.
    pub fn properties(&self) -> GenResult<PropertyTree> {
        match self.root.get("properties") {
            Some(Value::Object(map)) => Ok(PropertyTree::from(map.clone())),
            _ => Err(GenError::MissingProperties(self.path.clone())),
        }
    }
}

/// Parse a config file's content using the format implied by its path.
pub(crate) fn load_file_content<T: DeserializeOwned>(path: &Path, content: &str) -> GenResult<T> {
    DocumentFormat::from_path(path)
        .parse(content)
        .map_err(|source| GenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and parse a config file using the format implied by its path.
pub(crate) fn load_file<T: DeserializeOwned>(path: &Path) -> GenResult<T> {
    let content = fs::read_to_string(path).map_err(|source| GenError::ConfigLoad {
        path: path.to_path_buf(),
        source,
    })?;
    load_file_content(path, &content)
}

/// Input documents directly inside `dir`, sorted by path.
pub fn discover_documents(dir: impl AsRef<Path>) -> GenResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(GenError::ConfigLoad {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut documents: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| {
            p.is_file()
                && p.extension().map_or(false, |ext| {
                    matches!(ext.to_string_lossy().to_lowercase().as_str(), "yaml" | "yml" | "json")
                })
        })
        .collect();

    documents.sort();
    debug!("Discovered {} documents in {:?}", documents.len(), dir);
    Ok(documents)
}

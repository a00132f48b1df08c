//! Error types for the generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Underlying syntax error from one of the two document formats.
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while loading, validating or generating a resource.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },

    #[error("No 'properties' key found or not a map in {0:?}")]
    MissingProperties(PathBuf),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown resource type: {provider}/{kind}")]
    UnknownResourceKind { provider: String, kind: String },

    #[error("Missing required fields for {provider}/{kind}: {}", missing.join(", "))]
    Validation {
        provider: String,
        kind: String,
        missing: Vec<String>,
    },

    #[error("Unsupported or unrecognized {provider} resource type in {path}")]
    Detection { provider: String, path: String },

    #[error("Unsupported or unrecognized provider: {0}")]
    UnsupportedProvider(String),

    #[error("Failed to write output to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output {path:?} would be written by several inputs: {}", display_paths(inputs))]
    OutputCollision { path: PathBuf, inputs: Vec<PathBuf> },

    #[error("No plugin registered for resource type: {0}")]
    NoPlugin(String),

    #[error("Plugin already registered: {0}")]
    DuplicatePlugin(String),

    #[error("Invalid plugin manifest {path:?}: {message}")]
    PluginManifest { path: PathBuf, message: String },
}

/// Coarse classification of errors, used by callers to pick exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Schema,
    Detection,
    Provider,
    Plugin,
    Io,
}

impl GenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenError::ConfigParse { .. } | GenError::MissingProperties(_) => ErrorCategory::Config,
            GenError::UnknownProvider(_)
            | GenError::UnknownResourceKind { .. }
            | GenError::Validation { .. } => ErrorCategory::Schema,
            GenError::Detection { .. } => ErrorCategory::Detection,
            GenError::UnsupportedProvider(_) => ErrorCategory::Provider,
            GenError::NoPlugin(_) | GenError::DuplicatePlugin(_) | GenError::PluginManifest { .. } => {
                ErrorCategory::Plugin
            }
            GenError::ConfigLoad { .. } | GenError::Write { .. } | GenError::OutputCollision { .. } => {
                ErrorCategory::Io
            }
        }
    }

    /// Missing fields reported by a validation failure, if any.
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            GenError::Validation { missing, .. } => Some(missing),
            _ => None,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = GenError::Validation {
            provider: "azure".to_string(),
            kind: "aks".to_string(),
            missing: vec!["location".to_string(), "nodeCount".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required fields for azure/aks: location, nodeCount"
        );
        assert_eq!(err.category(), ErrorCategory::Schema);
        assert_eq!(err.missing_fields().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_output_collision_names_every_input() {
        let err = GenError::OutputCollision {
            path: PathBuf::from("out/gke.tf"),
            inputs: vec![PathBuf::from("in/gke.json"), PathBuf::from("in/gke.yaml")],
        };
        let message = err.to_string();
        assert!(message.contains("in/gke.json, in/gke.yaml"));
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_detection_message_names_path() {
        let err = GenError::Detection {
            provider: "gcp".to_string(),
            path: "inputs/bucket.json".to_string(),
        };
        assert!(err.to_string().contains("inputs/bucket.json"));
        assert!(err.missing_fields().is_none());
    }
}

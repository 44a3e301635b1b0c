//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between an SVG document and a written
/// topology. Path-data errors are fatal for the offending path only;
/// document, io and serialization errors are fatal for the run.
#[derive(Debug, Error)]
pub enum TopoError {
    #[error("sample count must be at least 1, got {0}")]
    InvalidSamples(u32),

    #[error("path produced no points")]
    EmptyPath,

    #[error("malformed path data: {0}")]
    Parse(#[from] kurbo::SvgParseError),

    #[error("malformed svg document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

use std::path::PathBuf;

use thiserror::Error;

/// Problems that stop a run before any document is touched.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("persona.json not found in {}", .0.display())]
    MissingPersona(PathBuf),

    #[error("documents directory not found in {}", .0.display())]
    MissingDocuments(PathBuf),

    #[error("no PDF documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed persona file {}: {source}", .path.display())]
    MalformedPersona {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Per-document extraction failure. The corpus assembler logs it and moves on.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("failed to extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },
}

/// The vector space could not be built for a ranking call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary; texts contain only stop words or no tokens")]
    EmptyVocabulary,
}

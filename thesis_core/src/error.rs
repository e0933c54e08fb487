// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning profile data into output files.
///
/// `Io`, `MalformedInput` and `NotACollection` raised while loading the input are
/// fatal for the whole run. The rest are raised per profile and the factory
/// isolates them.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Input must be a JSON array of profiles, found {found}")]
    NotACollection { found: &'static str },

    #[error("Profile '{id}' could not be decoded: {source}")]
    Profile {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Text {text:?} contains U+{code:04X}, which cannot be stored in a document")]
    InvalidText { text: String, code: u32 },

    #[error("Failed to package document: {0}")]
    Package(#[from] zip::result::ZipError),
}

impl FactoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

//! Content loading errors
//!
//! A bad source file is an authoring defect, so every variant here aborts
//! the build and names the offending file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning source files into posts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} has no front-matter block")]
    MissingFrontMatter { path: PathBuf },

    #[error("Invalid front-matter in {path:?}: {source}")]
    InvalidFrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path:?} is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path:?} has an invalid date: {value}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Duplicate slug `{slug}` ({first:?} and {second:?})")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{path:?} has a file name that is not valid UTF-8")]
    InvalidFileName { path: PathBuf },
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;

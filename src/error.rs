use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures while turning one repository into posts. Each one is fatal for
/// that repository path only.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no repository found at or above {path}")]
    RepositoryNotFound {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("repository at {path} has no resolvable head")]
    HeadUnresolvable {
        path: PathBuf,
        #[source]
        source: Option<git2::Error>,
    },

    #[error("error walking the history of {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

impl ExtractError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ExtractError::RepositoryNotFound { path, .. } => path,
            ExtractError::HeadUnresolvable { path, .. } => path,
            ExtractError::Walk { path, .. } => path,
        }
    }
}

/// Raised at render time only, never while extracting.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read embedded file {path}")]
    DirectiveContentUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("embedded file {path} is not valid UTF-8")]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("markdown conversion failed: {0}")]
    Markdown(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size has to be greater than 0, got {0}")]
    InvalidPageSize(usize),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("error parsing template: {0}")]
    Template(#[from] ramhorns::Error),

    #[error(transparent)]
    Content(#[from] ContentError),
}

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::extract::format::OutputFormat;

/// Worker layout for conversion and extraction
///
/// Only single-threaded execution exists; any other job count is rejected
/// with `NotImplemented`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Workers {
    #[default]
    Single,
}

impl Workers {
    /// Map a job count (`n_jobs`) onto a worker layout
    pub fn from_count(n_jobs: usize) -> Result<Self> {
        match n_jobs {
            1 => Ok(Workers::Single),
            _ => Err(ConvertError::NotImplemented("multi-worker execution")),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Workers::Single => 1,
        }
    }
}

impl TryFrom<usize> for Workers {
    type Error = ConvertError;

    fn try_from(n_jobs: usize) -> Result<Self> {
        Workers::from_count(n_jobs)
    }
}

impl From<Workers> for usize {
    fn from(workers: Workers) -> Self {
        workers.count()
    }
}

/// Options for corpus -> matrix conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// n-gram width; 0 and 1 both mean plain tokens
    pub ngram: usize,
    pub workers: Workers,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            ngram: 1,
            workers: Workers::Single,
        }
    }
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ngram(mut self, ngram: usize) -> Self {
        self.ngram = ngram;
        self
    }

    pub fn with_workers(mut self, n_jobs: usize) -> Result<Self> {
        self.workers = Workers::from_count(n_jobs)?;
        Ok(self)
    }
}

/// Options for weighted matrix -> score records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub format: OutputFormat,
    /// sort by score, highest first
    pub sort_desc: bool,
    pub workers: Workers,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Flat,
            sort_desc: true,
            workers: Workers::Single,
        }
    }
}

impl ScoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse a format selector such as `"flat"` or `"grouped"`
    pub fn with_format_str(mut self, selector: &str) -> Result<Self> {
        self.format = selector.parse()?;
        Ok(self)
    }

    pub fn with_sort_desc(mut self, sort_desc: bool) -> Self {
        self.sort_desc = sort_desc;
        self
    }

    pub fn with_workers(mut self, n_jobs: usize) -> Result<Self> {
        self.workers = Workers::from_count(n_jobs)?;
        Ok(self)
    }
}

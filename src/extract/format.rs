use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::extract::ScoredRecord;

/// Shape of the score output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OutputFormat {
    /// one ordered list of records
    #[default]
    Flat,
    /// `label -> [(word, score)]`
    Grouped,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Flat => "flat",
            OutputFormat::Grouped => "grouped",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    /// `flat`/`items` and `grouped`/`dict` are accepted
    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            "flat" | "items" => Ok(OutputFormat::Flat),
            "grouped" | "dict" => Ok(OutputFormat::Grouped),
            other => Err(ConvertError::InvalidOutputFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConvertError;

    fn try_from(selector: String) -> Result<Self, Self::Error> {
        selector.parse()
    }
}

impl From<OutputFormat> for &'static str {
    fn from(format: OutputFormat) -> Self {
        format.as_str()
    }
}

/// One word of a label group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: f64,
}

/// Formatted score records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoreOutput {
    Flat(Vec<ScoredRecord>),
    Grouped(IndexMap<String, Vec<WordScore>>),
}

impl ScoreOutput {
    pub fn as_flat(&self) -> Option<&[ScoredRecord]> {
        match self {
            ScoreOutput::Flat(records) => Some(records),
            ScoreOutput::Grouped(_) => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&IndexMap<String, Vec<WordScore>>> {
        match self {
            ScoreOutput::Grouped(groups) => Some(groups),
            ScoreOutput::Flat(_) => None,
        }
    }
}

/// Sort by score, highest first
///
/// Stable: equal scores keep their extraction order (row-major).
pub fn sort_desc(records: &mut [ScoredRecord]) {
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// `label -> [(word, score)]`, labels in first-seen order
pub fn group_by_label(records: Vec<ScoredRecord>) -> IndexMap<String, Vec<WordScore>> {
    let mut groups: IndexMap<String, Vec<WordScore>> = IndexMap::new();
    for ScoredRecord { label, word, score } in records {
        groups.entry(label).or_default().push(WordScore { word, score });
    }
    groups
}

/// Optionally sort, then reshape
pub fn format_scores(mut records: Vec<ScoredRecord>, format: OutputFormat, sort: bool) -> ScoreOutput {
    if sort {
        sort_desc(&mut records);
    }
    match format {
        OutputFormat::Flat => ScoreOutput::Flat(records),
        OutputFormat::Grouped => ScoreOutput::Grouped(group_by_label(records)),
    }
}

pub mod ngram;
pub mod validate;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Documents grouped by category label
///
/// `label -> [document -> [token]]`. Labels keep their insertion order,
/// which is also the order in which the indexer hands out label ids.
///
/// Untyped input (JSON) has to go through [`validate::validate_corpus`]
/// to become a `LabeledCorpus`; built by hand it is valid by construction.
///
/// # Examples
/// ```
/// use labeled_freq_matrix::LabeledCorpus;
/// let mut corpus = LabeledCorpus::new();
/// corpus.push_doc("a", ["x", "x", "y"]);
/// corpus.push_doc("b", ["y", "z"]);
///
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.doc_count("a"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabeledCorpus {
    groups: IndexMap<String, Vec<Vec<String>>>,
}

impl LabeledCorpus {
    pub fn new() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }

    /// Parse JSON text and validate its structure
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        validate::validate_corpus(&value)
    }

    /// Validate an already parsed JSON value
    pub fn from_json_value(value: &Value) -> Result<Self> {
        validate::validate_corpus(value)
    }

    /// Set the documents of a label, replacing any existing ones
    ///
    /// # Returns
    /// * `Option<Vec<Vec<String>>>` - documents previously stored under the label
    pub fn insert<L, I, D, T>(&mut self, label: L, docs: I) -> Option<Vec<Vec<String>>>
    where
        L: Into<String>,
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let docs = docs
            .into_iter()
            .map(|doc| doc.into_iter().map(Into::into).collect())
            .collect();
        self.groups.insert(label.into(), docs)
    }

    /// Register a label without documents
    pub fn insert_empty_label<L: Into<String>>(&mut self, label: L) -> &mut Self {
        self.groups.entry(label.into()).or_default();
        self
    }

    /// Append one document to a label, creating the label when unseen
    pub fn push_doc<L, D, T>(&mut self, label: L, doc: D) -> &mut Self
    where
        L: Into<String>,
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.groups
            .entry(label.into())
            .or_default()
            .push(doc.into_iter().map(Into::into).collect());
        self
    }

    /// Number of labels
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|s| s.as_str())
    }

    /// `(label, documents)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<String>])> {
        self.groups.iter().map(|(label, docs)| (label.as_str(), docs.as_slice()))
    }

    pub fn docs(&self, label: &str) -> Option<&[Vec<String>]> {
        self.groups.get(label).map(|docs| docs.as_slice())
    }

    /// Number of documents under a label, 0 for an unknown label
    pub fn doc_count(&self, label: &str) -> usize {
        self.groups.get(label).map_or(0, |docs| docs.len())
    }

    /// Total number of tokens under a label, 0 for an unknown label
    pub fn token_count(&self, label: &str) -> usize {
        self.groups
            .get(label)
            .map_or(0, |docs| docs.iter().map(|doc| doc.len()).sum())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.groups.contains_key(label)
    }
}

impl<L, D, T> FromIterator<(L, Vec<D>)> for LabeledCorpus
where
    L: Into<String>,
    D: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, Vec<D>)>>(iter: I) -> Self {
        let mut corpus = LabeledCorpus::new();
        for (label, docs) in iter {
            corpus.insert(label, docs);
        }
        corpus
    }
}

use std::collections::{HashMap, HashSet};

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::corpus::LabeledCorpus;
use crate::error::{ConvertError, Result};
use crate::index::{LabelIndex, VocabularyIndex};
use crate::matrix::coo::CooMatrix;

/// Count of one term under one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub label_id: u32,
    pub term_id: u32,
    pub count: u64,
}

/// How tokens are counted per label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// every occurrence counts
    TermFrequency,
    /// a document counts once per distinct term
    DocumentFrequency,
}

/// `(label_id, term_id) -> count` accumulator
///
/// Built by one pass over a corpus and consumed by [`FrequencyTable::into_coo`].
/// `n_groups` counts every label seen, including labels without documents,
/// and is the row count of the matrix built from this table.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: HashMap<(u32, u32), u64, RandomState>,
    n_groups: usize,
    n_terms: usize,
    mode: CountMode,
}

impl FrequencyTable {
    /// Term frequency per label
    ///
    /// # Returns
    /// * `FrequencyTable` - summed occurrences per `(label, term)`
    /// * `LabelIndex` - labels in first-seen order
    /// * `VocabularyIndex` - terms in first-seen order
    pub fn term_frequency(corpus: &LabeledCorpus) -> Result<(Self, LabelIndex, VocabularyIndex)> {
        Self::build(corpus, CountMode::TermFrequency)
    }

    /// Document frequency per label
    ///
    /// Same id layout as [`FrequencyTable::term_frequency`] for the same corpus.
    pub fn document_frequency(corpus: &LabeledCorpus) -> Result<(Self, LabelIndex, VocabularyIndex)> {
        Self::build(corpus, CountMode::DocumentFrequency)
    }

    pub fn build(corpus: &LabeledCorpus, mode: CountMode) -> Result<(Self, LabelIndex, VocabularyIndex)> {
        if corpus.is_empty() {
            return Err(ConvertError::EmptyCorpus);
        }

        let mut labels = LabelIndex::new();
        let mut vocab = VocabularyIndex::new();
        let mut counts: HashMap<(u32, u32), u64, RandomState> = HashMap::with_hasher(RandomState::new());
        // term ids already counted for the current document
        let mut seen_in_doc: HashSet<u32, RandomState> = HashSet::with_hasher(RandomState::new());

        for (label, docs) in corpus.iter() {
            let label_id = labels.get_or_insert(label)?;
            for doc in docs {
                seen_in_doc.clear();
                for token in doc {
                    // ids are assigned in token order in both modes
                    let term_id = vocab.get_or_insert(token)?;
                    let counted = match mode {
                        CountMode::TermFrequency => true,
                        CountMode::DocumentFrequency => seen_in_doc.insert(term_id),
                    };
                    if counted {
                        *counts.entry((label_id, term_id)).or_insert(0) += 1;
                    }
                }
            }
        }

        let table = FrequencyTable {
            counts,
            n_groups: labels.len(),
            n_terms: vocab.len(),
            mode,
        };
        Ok((table, labels, vocab))
    }

    /// Number of label groups (matrix rows)
    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Vocabulary size (matrix columns)
    #[inline]
    pub fn n_terms(&self) -> usize {
        self.n_terms
    }

    /// Number of non-zero `(label, term)` pairs
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn mode(&self) -> CountMode {
        self.mode
    }

    pub fn count(&self, label_id: u32, term_id: u32) -> u64 {
        self.counts.get(&(label_id, term_id)).copied().unwrap_or(0)
    }

    /// Records in no particular order
    pub fn records(&self) -> impl Iterator<Item = FrequencyRecord> + '_ {
        self.counts.iter().map(|(&(label_id, term_id), &count)| FrequencyRecord {
            label_id,
            term_id,
            count,
        })
    }

    /// Hand the counts over as coordinate triples
    pub fn into_coo(self) -> CooMatrix<u64> {
        let mut coo = CooMatrix::with_capacity(self.counts.len());
        for ((label_id, term_id), count) in self.counts {
            coo.push(label_id, term_id, count);
        }
        coo
    }
}

use std::borrow::Cow;
use std::marker::PhantomData;

use num::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConvertConfig, ScoreConfig};
use crate::corpus::ngram::{JoinedNgram, NgramExpander};
use crate::corpus::LabeledCorpus;
use crate::error::{ConvertError, Result};
use crate::extract::format::ScoreOutput;
use crate::extract::score_matrix_to_records;
use crate::index::frequency::{CountMode, FrequencyTable};
use crate::index::{LabelIndex, VocabularyIndex};
use crate::matrix::CsrMatrix;

/// Frequency matrix and the mappings that give its rows and columns meaning
///
/// Rows line up with `label_index` and `doc_counts`, columns with
/// `vocabulary`. Deserialization checks that alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DataCsrParts")]
pub struct DataCsrMatrix {
    /// labels x vocabulary counts
    pub matrix: CsrMatrix<u64>,
    /// label -> row id
    pub label_index: LabelIndex,
    /// term -> column id
    pub vocabulary: VocabularyIndex,
    /// number of documents per label, indexed by row id
    pub doc_counts: Vec<usize>,
}

#[derive(Deserialize)]
struct DataCsrParts {
    matrix: CsrMatrix<u64>,
    label_index: LabelIndex,
    vocabulary: VocabularyIndex,
    doc_counts: Vec<usize>,
}

impl TryFrom<DataCsrParts> for DataCsrMatrix {
    type Error = ConvertError;

    fn try_from(parts: DataCsrParts) -> Result<Self> {
        DataCsrMatrix::from_parts(parts.matrix, parts.label_index, parts.vocabulary, parts.doc_counts)
    }
}

impl DataCsrMatrix {
    /// Assemble an artifact, checking that rows and columns line up with the mappings
    ///
    /// # Errors
    /// * `MalformedMatrix` - row count differs from the label or doc count,
    ///   or column count differs from the vocabulary size
    pub fn from_parts(
        matrix: CsrMatrix<u64>,
        label_index: LabelIndex,
        vocabulary: VocabularyIndex,
        doc_counts: Vec<usize>,
    ) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != label_index.len() || rows != doc_counts.len() {
            return Err(ConvertError::MalformedMatrix(format!(
                "{rows} rows, but {} labels and {} document counts",
                label_index.len(),
                doc_counts.len()
            )));
        }
        if cols != vocabulary.len() {
            return Err(ConvertError::MalformedMatrix(format!(
                "{cols} columns, but {} vocabulary terms",
                vocabulary.len()
            )));
        }
        Ok(Self {
            matrix,
            label_index,
            vocabulary,
            doc_counts,
        })
    }

    /// Number of documents under a label
    pub fn doc_count(&self, label: &str) -> Option<usize> {
        self.label_index
            .id_of(label)
            .and_then(|id| self.doc_counts.get(id as usize).copied())
    }

    /// Stored count for `(label, term)`, 0 when either is unknown
    pub fn count(&self, label: &str, term: &str) -> u64 {
        match (self.label_index.id_of(label), self.vocabulary.id_of(term)) {
            (Some(row), Some(col)) => self.matrix.get(row as usize, col as usize).unwrap_or(0),
            _ => 0,
        }
    }
}

/// Number of documents per label, position = label id
///
/// # Errors
/// * `UnknownLabel` - a corpus label has no id in `labels`
pub fn count_document_distribution(corpus: &LabeledCorpus, labels: &LabelIndex) -> Result<Vec<usize>> {
    let mut counts = vec![0usize; labels.len()];
    for (label, docs) in corpus.iter() {
        let id = labels
            .id_of(label)
            .ok_or_else(|| ConvertError::UnknownLabel(label.to_string()))?;
        counts[id as usize] = docs.len();
    }
    Ok(counts)
}

/// Labeled corpus -> sparse frequency matrix, and weighted matrix -> scores
///
/// `X` expands tokens into n-grams when `config.ngram > 1`.
///
/// # Examples
/// ```
/// use labeled_freq_matrix::{ConvertConfig, DataConverter, LabeledCorpus};
///
/// let mut corpus = LabeledCorpus::new();
/// corpus.push_doc("a", ["x", "x", "y"]);
/// corpus.push_doc("b", ["y", "z"]);
///
/// let converter: DataConverter = DataConverter::new(ConvertConfig::default());
/// let data = converter.term_freq_matrix(&corpus).unwrap();
///
/// assert_eq!(data.matrix.to_dense(), vec![vec![2, 1, 0], vec![0, 1, 1]]);
/// assert_eq!(data.doc_counts, vec![1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct DataConverter<X = JoinedNgram>
where
    X: NgramExpander,
{
    config: ConvertConfig,
    _expander: PhantomData<X>,
}

impl<X> DataConverter<X>
where
    X: NgramExpander,
{
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            _expander: PhantomData,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Term-frequency matrix: occurrences of each term per label
    pub fn term_freq_matrix(&self, corpus: &LabeledCorpus) -> Result<DataCsrMatrix> {
        self.convert(corpus, CountMode::TermFrequency)
    }

    /// Document-frequency matrix: documents per label containing each term
    pub fn doc_freq_matrix(&self, corpus: &LabeledCorpus) -> Result<DataCsrMatrix> {
        self.convert(corpus, CountMode::DocumentFrequency)
    }

    /// Weighted matrix -> flat or grouped score records
    pub fn score_matrix_to_records<N>(
        &self,
        matrix: &CsrMatrix<N>,
        labels: &LabelIndex,
        vocabulary: &VocabularyIndex,
        config: &ScoreConfig,
    ) -> Result<ScoreOutput>
    where
        N: Num + Copy + ToPrimitive,
    {
        score_matrix_to_records(matrix, labels, vocabulary, config)
    }

    fn convert(&self, corpus: &LabeledCorpus, mode: CountMode) -> Result<DataCsrMatrix> {
        if corpus.is_empty() {
            return Err(ConvertError::EmptyCorpus);
        }

        let corpus = if self.config.ngram > 1 {
            debug!(ngram = self.config.ngram, "expanding n-grams");
            Cow::Owned(X::expand(corpus, self.config.ngram, self.config.workers)?)
        } else {
            Cow::Borrowed(corpus)
        };

        debug!(labels = corpus.len(), ?mode, "building frequency table");
        let (table, label_index, vocabulary) = FrequencyTable::build(&corpus, mode)?;
        debug!(terms = vocabulary.len(), pairs = table.len(), "finished frequency table");

        let shape = (table.n_groups(), table.n_terms());
        let matrix = table.into_coo().into_csr(shape)?;
        debug!(shape = ?matrix.shape(), nnz = matrix.nnz(), "built csr matrix");

        let doc_counts = count_document_distribution(&corpus, &label_index)?;

        DataCsrMatrix::from_parts(matrix, label_index, vocabulary, doc_counts)
    }
}

impl<X> Default for DataConverter<X>
where
    X: NgramExpander,
{
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workers;

    fn sample_corpus() -> LabeledCorpus {
        LabeledCorpus::from_json_str(
            r#"{
                "label_a": [
                    ["I", "aa", "aa", "aa", "aa", "aa"],
                    ["bb", "aa", "aa", "aa", "aa", "aa"],
                    ["I", "aa", "hero", "some", "ok", "aa"]
                ],
                "label_b": [
                    ["bb", "bb", "bb"],
                    ["bb", "bb", "bb"],
                    ["hero", "ok", "bb"],
                    ["hero", "cc", "bb"]
                ],
                "label_c": [
                    ["cc", "cc", "cc"],
                    ["cc", "cc", "bb"],
                    ["xx", "xx", "cc"],
                    ["aa", "xx", "cc"]
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn term_frequency_rows_sum_to_token_counts() {
        let corpus = sample_corpus();
        let data = DataConverter::<JoinedNgram>::default().term_freq_matrix(&corpus).unwrap();

        assert_eq!(data.matrix.shape(), (3, data.vocabulary.len()));
        for (id, label) in data.label_index.iter() {
            assert_eq!(data.matrix.row_sum(id as usize) as usize, corpus.token_count(label));
        }
        assert_eq!(data.count("label_a", "aa"), 12);
        assert_eq!(data.count("label_c", "cc"), 7);
    }

    #[test]
    fn document_frequency_counts_documents() {
        let corpus = sample_corpus();
        let data = DataConverter::<JoinedNgram>::default().doc_freq_matrix(&corpus).unwrap();

        assert_eq!(data.count("label_a", "aa"), 3);
        assert_eq!(data.count("label_b", "bb"), 4);
        assert_eq!(data.count("label_c", "cc"), 4);
        assert_eq!(data.count("label_c", "xx"), 2);
        assert_eq!(data.count("label_a", "cc"), 0);
    }

    #[test]
    fn doc_counts_align_with_rows() {
        let corpus = sample_corpus();
        let data = DataConverter::<JoinedNgram>::default().term_freq_matrix(&corpus).unwrap();
        assert_eq!(data.doc_counts, vec![3, 4, 4]);
        assert_eq!(data.doc_count("label_b"), Some(4));
        assert_eq!(data.doc_count("nope"), None);
    }

    #[test]
    fn empty_label_keeps_its_row() {
        let mut corpus = LabeledCorpus::new();
        corpus.push_doc("a", ["x"]);
        corpus.insert_empty_label("b");

        let data = DataConverter::<JoinedNgram>::default().term_freq_matrix(&corpus).unwrap();
        assert_eq!(data.matrix.shape(), (2, 1));
        assert_eq!(data.doc_counts, vec![1, 0]);
        assert_eq!(data.matrix.row(1), Some((&[][..], &[][..])));
    }

    #[test]
    fn only_empty_documents_give_zero_columns() {
        let mut corpus = LabeledCorpus::new();
        corpus.push_doc("a", Vec::<String>::new());
        let data = DataConverter::<JoinedNgram>::default().doc_freq_matrix(&corpus).unwrap();
        assert_eq!(data.matrix.shape(), (1, 0));
        assert_eq!(data.doc_counts, vec![1]);
    }

    #[test]
    fn ngram_expansion_runs_before_indexing() {
        let mut corpus = LabeledCorpus::new();
        corpus.push_doc("a", ["I", "aa", "hero"]);
        corpus.push_doc("a", ["I", "aa"]);
        let converter: DataConverter = DataConverter::new(ConvertConfig::new().with_ngram(2));
        let data = converter.term_freq_matrix(&corpus).unwrap();

        assert_eq!(data.vocabulary.keys().collect::<Vec<_>>(), vec!["I_aa", "aa_hero"]);
        assert_eq!(data.count("a", "I_aa"), 2);
        assert_eq!(data.doc_counts, vec![2]);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let converter: DataConverter = DataConverter::default();
        assert!(matches!(
            converter.term_freq_matrix(&LabeledCorpus::new()),
            Err(ConvertError::EmptyCorpus)
        ));
    }

    #[test]
    fn distribution_rejects_foreign_labels() {
        let mut corpus = LabeledCorpus::new();
        corpus.push_doc("a", ["x"]);
        let labels = LabelIndex::from_keys(["b"]).unwrap();
        assert!(matches!(
            count_document_distribution(&corpus, &labels),
            Err(ConvertError::UnknownLabel(l)) if l == "a"
        ));
    }

    #[test]
    fn output_artifact_roundtrips_through_json() {
        let data = DataConverter::<JoinedNgram>::default().doc_freq_matrix(&sample_corpus()).unwrap();
        let s = serde_json::to_string(&data).unwrap();
        let de: DataCsrMatrix = serde_json::from_str(&s).unwrap();
        assert_eq!(de, data);
    }

    #[test]
    fn misaligned_artifact_is_rejected_on_load() {
        let data = DataConverter::<JoinedNgram>::default().doc_freq_matrix(&sample_corpus()).unwrap();

        let mut extra_count = serde_json::to_value(&data).unwrap();
        extra_count["doc_counts"].as_array_mut().unwrap().push(serde_json::json!(9));
        assert!(serde_json::from_value::<DataCsrMatrix>(extra_count).is_err());

        let mut short_vocab = serde_json::to_value(&data).unwrap();
        short_vocab["vocabulary"]["keys"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<DataCsrMatrix>(short_vocab).is_err());
    }

    #[test]
    fn from_parts_checks_alignment() {
        let matrix = CsrMatrix::<u64>::zeros(2, 1);
        let labels = LabelIndex::from_keys(["a", "b"]).unwrap();
        let vocab = VocabularyIndex::from_keys(["x"]).unwrap();

        assert!(DataCsrMatrix::from_parts(matrix.clone(), labels.clone(), vocab.clone(), vec![1, 0]).is_ok());
        assert!(matches!(
            DataCsrMatrix::from_parts(matrix.clone(), labels.clone(), vocab, vec![1]),
            Err(ConvertError::MalformedMatrix(_))
        ));
        assert!(matches!(
            DataCsrMatrix::from_parts(matrix, labels, VocabularyIndex::new(), vec![1, 0]),
            Err(ConvertError::MalformedMatrix(_))
        ));
    }

    #[test]
    fn config_workers_stay_single() {
        let converter: DataConverter = DataConverter::default();
        assert_eq!(converter.config().workers, Workers::Single);
    }
}

//! This crate turns labeled, tokenized documents into sparse label x term
//! frequency matrices and reads weighted versions of those matrices back as
//! ranked label-word scores.
pub mod config;
pub mod convert;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;
pub mod matrix;
pub mod utils;

/// Data Converter
/// The top-level struct of this crate.
/// It converts a `LabeledCorpus` into a `DataCsrMatrix` using either
/// term-frequency or document-frequency counting, and converts an externally
/// weighted matrix (PMI, TF-IDF, ...) back into score records.
///
/// `DataConverter<X>` has one generic parameter:
/// - `X`: n-gram expander used when `ConvertConfig::ngram > 1`
///   (default `JoinedNgram`)
pub use convert::DataConverter;

/// Conversion Output
/// The primary output artifact:
/// - the frequency matrix (rows = labels, columns = vocabulary)
/// - label -> row id
/// - term -> column id
/// - document count per label, aligned with row ids
///
/// # Serialization
/// Supported. Deserialization re-checks the matrix structure.
pub use convert::DataCsrMatrix;

/// Document count per label, position = label id
pub use convert::count_document_distribution;

/// Labeled Corpus
/// `label -> documents -> tokens`, labels in insertion order.
/// Build it by hand or validate untyped JSON with `LabeledCorpus::from_json_str`.
pub use corpus::LabeledCorpus;

/// N-gram expansion seam and the default `_`-joined sliding window
pub use corpus::ngram::{JoinedNgram, NgramExpander};

/// Label and Vocabulary Indexes
/// Dense, first-seen ids for labels (rows) and terms (columns).
/// The two are distinct types so they cannot be swapped by accident.
pub use index::{IdIndex, LabelIndex, VocabularyIndex};

/// Frequency accumulator and its records
pub use index::frequency::{CountMode, FrequencyRecord, FrequencyTable};

/// Sparse Matrices
/// - `CsrMatrix`: compressed sparse rows with a non-zero iterator
/// - `CooMatrix`: coordinate triples, compressed with `into_csr`
pub use matrix::{coo::CooMatrix, CsrMatrix};

/// Score extraction and formatting
/// - `ScoredRecord`: `(label, word, score)`
/// - `OutputFormat`: `flat` or `grouped`
/// - `ScoreOutput`: the formatted result
pub use extract::{extract_scored_records, score_matrix_to_records, ScoredRecord};
pub use extract::format::{OutputFormat, ScoreOutput, WordScore};

/// Options
/// - `ConvertConfig`: n-gram width and workers for conversion
/// - `ScoreConfig`: output format, sort order and workers for extraction
/// - `Workers`: only single-worker execution is available
pub use config::{ConvertConfig, ScoreConfig, Workers};

/// Error type and result alias
pub use error::{Axis, ConvertError, Result};

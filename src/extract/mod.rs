pub mod format;

use num::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ScoreConfig, Workers};
use crate::error::{Axis, ConvertError, Result};
use crate::extract::format::{format_scores, ScoreOutput};
use crate::index::{LabelIndex, VocabularyIndex};
use crate::matrix::CsrMatrix;

/// Score of one word under one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub label: String,
    pub word: String,
    pub score: f64,
}

/// Read every stored entry of a weighted matrix back as `(label, word, score)`
///
/// Rows are looked up in `labels`, columns in `vocabulary`; both must come
/// from the conversion that produced the matrix the weights were computed on.
/// Output is row-major with ascending columns. Stored zeros are skipped.
///
/// # Errors
/// * `UnknownId` - a row or column id has no entry in the mappings
/// * `ScoreConversion` - a value has no `f64` representation
pub fn extract_scored_records<N>(
    matrix: &CsrMatrix<N>,
    labels: &LabelIndex,
    vocabulary: &VocabularyIndex,
    workers: Workers,
) -> Result<Vec<ScoredRecord>>
where
    N: Num + Copy + ToPrimitive,
{
    match workers {
        Workers::Single => extract_single(matrix, labels, vocabulary),
    }
}

fn extract_single<N>(
    matrix: &CsrMatrix<N>,
    labels: &LabelIndex,
    vocabulary: &VocabularyIndex,
) -> Result<Vec<ScoredRecord>>
where
    N: Num + Copy + ToPrimitive,
{
    debug!(nnz = matrix.nnz(), shape = ?matrix.shape(), "start making score objects");

    // the mappings must cover the whole shape, stored values or not
    if matrix.rows() > labels.len() {
        return Err(ConvertError::UnknownId { axis: Axis::Row, id: labels.len() as u32 });
    }
    if matrix.cols() > vocabulary.len() {
        return Err(ConvertError::UnknownId { axis: Axis::Col, id: vocabulary.len() as u32 });
    }

    let mut records = Vec::with_capacity(matrix.nnz());
    for (row, col, val) in matrix.iter() {
        if val.is_zero() {
            continue;
        }
        let label = labels
            .key_of(row)
            .ok_or(ConvertError::UnknownId { axis: Axis::Row, id: row })?;
        let word = vocabulary
            .key_of(col)
            .ok_or(ConvertError::UnknownId { axis: Axis::Col, id: col })?;
        let score = val.to_f64().ok_or(ConvertError::ScoreConversion { row, col })?;
        records.push(ScoredRecord {
            label: label.to_string(),
            word: word.to_string(),
            score,
        });
    }

    debug!(records = records.len(), "end making score objects");
    Ok(records)
}

/// Weighted matrix -> flat or grouped score records
///
/// Argument order is always matrix, labels, vocabulary.
pub fn score_matrix_to_records<N>(
    matrix: &CsrMatrix<N>,
    labels: &LabelIndex,
    vocabulary: &VocabularyIndex,
    config: &ScoreConfig,
) -> Result<ScoreOutput>
where
    N: Num + Copy + ToPrimitive,
{
    let records = extract_scored_records(matrix, labels, vocabulary, config.workers)?;
    Ok(format_scores(records, config.format, config.sort_desc))
}

use std::collections::{HashMap, HashSet};

use labeled_freq_matrix::{
    extract_scored_records, ConvertConfig, ConvertError, DataConverter, LabeledCorpus, OutputFormat, ScoreConfig,
    ScoreOutput, ScoredRecord, Workers,
};

fn converter() -> DataConverter {
    DataConverter::new(ConvertConfig::default())
}

fn corpus_from(json: &str) -> LabeledCorpus {
    LabeledCorpus::from_json_str(json).unwrap()
}

/// tiny deterministic PRNG (xorshift32)
struct Rng(u32);
impl Rng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

fn random_corpus(seed: u32) -> LabeledCorpus {
    let mut rng = Rng(seed);
    let mut corpus = LabeledCorpus::new();
    for label in 0..5 {
        let n_docs = rng.next_u32() % 4;
        corpus.insert_empty_label(format!("label{label}"));
        for _ in 0..n_docs {
            let len = rng.next_u32() % 12;
            let doc: Vec<String> = (0..len).map(|_| format!("t{}", rng.next_u32() % 15)).collect();
            corpus.push_doc(format!("label{label}"), doc);
        }
    }
    corpus
}

#[test]
fn term_frequency_scenario() {
    let corpus = corpus_from(r#"{"a": [["x","x","y"]], "b": [["y","z"]]}"#);
    let data = converter().term_freq_matrix(&corpus).unwrap();

    assert_eq!(data.label_index.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(data.vocabulary.keys().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    assert_eq!(data.matrix.to_dense(), vec![vec![2, 1, 0], vec![0, 1, 1]]);
    assert_eq!(data.doc_counts, vec![1, 1]);
}

#[test]
fn document_frequency_scenario_matches_here() {
    let corpus = corpus_from(r#"{"a": [["x","x","y"]], "b": [["y","z"]]}"#);
    let tf = converter().term_freq_matrix(&corpus).unwrap();
    let df = converter().doc_freq_matrix(&corpus).unwrap();

    assert_eq!(df.label_index, tf.label_index);
    assert_eq!(df.vocabulary, tf.vocabulary);
    assert_eq!(df.matrix.to_dense(), vec![vec![1, 1, 0], vec![0, 1, 1]]);
}

#[test]
fn term_vs_document_frequency_divergence() {
    let two_docs = corpus_from(r#"{"a": [["x"],["x"]]}"#);
    assert_eq!(converter().term_freq_matrix(&two_docs).unwrap().matrix.to_dense(), vec![vec![2]]);
    assert_eq!(converter().doc_freq_matrix(&two_docs).unwrap().matrix.to_dense(), vec![vec![2]]);

    let one_doc = corpus_from(r#"{"a": [["x","x"]]}"#);
    assert_eq!(converter().term_freq_matrix(&one_doc).unwrap().matrix.to_dense(), vec![vec![2]]);
    assert_eq!(converter().doc_freq_matrix(&one_doc).unwrap().matrix.to_dense(), vec![vec![1]]);
}

#[test]
fn sizes_and_row_properties_hold_on_random_corpora() {
    for seed in [1u32, 7, 42, 0xDEAD_BEEF, 12345] {
        let corpus = random_corpus(seed);
        let tf = converter().term_freq_matrix(&corpus).unwrap();
        let df = converter().doc_freq_matrix(&corpus).unwrap();

        let distinct: HashSet<&str> = corpus
            .iter()
            .flat_map(|(_, docs)| docs.iter().flatten().map(|t| t.as_str()))
            .collect();
        assert_eq!(tf.label_index.len(), corpus.len());
        assert_eq!(tf.vocabulary.len(), distinct.len());
        assert_eq!(tf.matrix.shape(), (corpus.len(), distinct.len()));

        for (id, label) in tf.label_index.iter() {
            assert_eq!(tf.doc_counts[id as usize], corpus.doc_count(label));
            assert_eq!(tf.matrix.row_sum(id as usize) as usize, corpus.token_count(label));

            for (term_id, term) in tf.vocabulary.iter() {
                let k = corpus
                    .docs(label)
                    .unwrap()
                    .iter()
                    .filter(|doc| doc.iter().any(|t| t == term))
                    .count();
                assert_eq!(df.matrix.get(id as usize, term_id as usize), Some(k as u64));
                assert!(k <= corpus.doc_count(label));
            }
        }
    }
}

#[test]
fn extracting_an_unweighted_matrix_reproduces_counts() {
    let corpus = random_corpus(99);
    let data = converter().term_freq_matrix(&corpus).unwrap();
    let records =
        extract_scored_records(&data.matrix, &data.label_index, &data.vocabulary, Workers::Single).unwrap();

    let mut summed: HashMap<(String, String), f64> = HashMap::new();
    for ScoredRecord { label, word, score } in records {
        *summed.entry((label, word)).or_insert(0.0) += score;
    }

    let mut expected: HashMap<(String, String), f64> = HashMap::new();
    for (label, docs) in corpus.iter() {
        for token in docs.iter().flatten() {
            *expected.entry((label.to_string(), token.clone())).or_insert(0.0) += 1.0;
        }
    }
    assert_eq!(summed, expected);
}

#[test]
fn weighted_matrix_to_grouped_scores() {
    let corpus = corpus_from(r#"{"a": [["x","y"]], "b": [["z"]]}"#);
    let data = converter().doc_freq_matrix(&corpus).unwrap();
    let weights = [[0.5, 0.9, 0.0], [0.0, 0.0, 0.1]];
    let weighted = data.matrix.map_values(|row, col, _| weights[row as usize][col as usize]);

    let cfg = ScoreConfig::new().with_format(OutputFormat::Grouped).with_sort_desc(true);
    let out = converter()
        .score_matrix_to_records(&weighted, &data.label_index, &data.vocabulary, &cfg)
        .unwrap();

    let groups = out.as_grouped().unwrap();
    let a: Vec<(&str, f64)> = groups["a"].iter().map(|w| (w.word.as_str(), w.score)).collect();
    let b: Vec<(&str, f64)> = groups["b"].iter().map(|w| (w.word.as_str(), w.score)).collect();
    assert_eq!(a, vec![("y", 0.9), ("x", 0.5)]);
    assert_eq!(b, vec![("z", 0.1)]);
}

#[test]
fn flat_output_sorted_descending_is_idempotent() {
    let data = converter().term_freq_matrix(&random_corpus(5)).unwrap();
    let cfg = ScoreConfig::new();
    let once = converter()
        .score_matrix_to_records(&data.matrix, &data.label_index, &data.vocabulary, &cfg)
        .unwrap();
    let ScoreOutput::Flat(mut records) = once.clone() else {
        panic!("expected flat output");
    };
    assert!(records.windows(2).all(|w| w[0].score >= w[1].score));

    labeled_freq_matrix::extract::format::sort_desc(&mut records);
    assert_eq!(ScoreOutput::Flat(records), once);
}

#[test]
fn invalid_selector_produces_no_output() {
    let res = ScoreConfig::new().with_format_str("xml");
    assert!(matches!(res, Err(ConvertError::InvalidOutputFormat(ref s)) if s == "xml"));
    assert!(res.unwrap_err().is_usage_error());
}

#[test]
fn mismatched_mappings_are_reported() {
    let big = converter().term_freq_matrix(&corpus_from(r#"{"a": [["x","y","z"]]}"#)).unwrap();
    let small = converter().term_freq_matrix(&corpus_from(r#"{"a": [["x"]]}"#)).unwrap();

    let res = extract_scored_records(&big.matrix, &small.label_index, &small.vocabulary, Workers::Single);
    assert!(matches!(res, Err(ConvertError::UnknownId { id: 1, .. })));
}

#[test]
fn multiple_workers_fail_fast() {
    assert!(matches!(ConvertConfig::new().with_workers(2), Err(ConvertError::NotImplemented(_))));
    assert!(matches!(ScoreConfig::new().with_workers(4), Err(ConvertError::NotImplemented(_))));
}

#[test]
fn non_string_token_is_a_type_mismatch() {
    let err = LabeledCorpus::from_json_str(r#"{"a": [["x", 1]]}"#).unwrap_err();
    assert!(matches!(err, ConvertError::TypeMismatch { found: "number", .. }));
    assert!(err.is_input_error());
}

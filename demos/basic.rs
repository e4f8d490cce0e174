use labeled_freq_matrix::{ConvertConfig, DataConverter, LabeledCorpus};
use tracing_subscriber::EnvFilter;

fn main() -> labeled_freq_matrix::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // build corpus
    let corpus = LabeledCorpus::from_json_str(
        r#"{
            "label_a": [["I", "aa", "aa", "aa", "aa", "aa"], ["bb", "aa", "aa", "aa", "aa", "aa"], ["I", "aa", "hero", "some", "ok", "aa"]],
            "label_b": [["bb", "bb", "bb"], ["bb", "bb", "bb"], ["hero", "ok", "bb"], ["hero", "cc", "bb"]],
            "label_c": [["cc", "cc", "cc"], ["cc", "cc", "bb"], ["xx", "xx", "cc"], ["aa", "xx", "cc"]]
        }"#,
    )?;

    // term frequency and document frequency
    let converter: DataConverter = DataConverter::new(ConvertConfig::default());
    let tf = converter.term_freq_matrix(&corpus)?;
    let df = converter.doc_freq_matrix(&corpus)?;

    println!("labels: {:?}", tf.label_index);
    println!("vocabulary: {:?}", tf.vocabulary);
    println!("docs per label: {:?}", tf.doc_counts);
    println!("term frequency:");
    for row in tf.matrix.to_dense() {
        println!("  {:?}", row);
    }
    println!("document frequency:");
    for row in df.matrix.to_dense() {
        println!("  {:?}", row);
    }

    // bigrams
    let bigram: DataConverter = DataConverter::new(ConvertConfig::new().with_ngram(2));
    let bi = bigram.term_freq_matrix(&corpus)?;
    println!("bigram vocabulary size: {}", bi.vocabulary.len());
    Ok(())
}

use labeled_freq_matrix::{ConvertConfig, DataConverter, LabeledCorpus, ScoreConfig, ScoreOutput};
use tracing_subscriber::EnvFilter;

fn main() -> labeled_freq_matrix::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut corpus = LabeledCorpus::new();
    corpus.push_doc("sports", ["ball", "goal", "team", "ball"]);
    corpus.push_doc("sports", ["team", "coach", "win"]);
    corpus.push_doc("tech", ["rust", "compiler", "team"]);
    corpus.push_doc("tech", ["rust", "memory", "safe"]);

    let converter: DataConverter = DataConverter::new(ConvertConfig::default());
    let data = converter.doc_freq_matrix(&corpus)?;

    // stand-in for an external scorer: PMI over document frequencies
    let n_docs: usize = data.doc_counts.iter().sum();
    let mut term_docs = vec![0u64; data.vocabulary.len()];
    for (_, col, df) in data.matrix.iter() {
        term_docs[col as usize] += df;
    }
    let weighted = data.matrix.map_values(|row, col, df| {
        let p_joint = df as f64 / n_docs as f64;
        let p_label = data.doc_counts[row as usize] as f64 / n_docs as f64;
        let p_term = term_docs[col as usize] as f64 / n_docs as f64;
        (p_joint / (p_label * p_term)).log2()
    });

    let config = ScoreConfig::new().with_format_str("grouped")?;
    let scores = converter.score_matrix_to_records(&weighted, &data.label_index, &data.vocabulary, &config)?;
    if let ScoreOutput::Grouped(groups) = scores {
        for (label, words) in groups {
            println!("{label}");
            for ws in words {
                println!("  {:>10}  {:.4}", ws.word, ws.score);
            }
        }
    }
    Ok(())
}

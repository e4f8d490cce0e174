use crate::config::Workers;
use crate::corpus::LabeledCorpus;
use crate::error::Result;

/// N-gram expansion applied before indexing when `ngram > 1`
///
/// The output must keep the corpus shape: same labels, same number of
/// documents per label, string tokens only.
pub trait NgramExpander {
    /// # Arguments
    /// * `corpus` - tokenized corpus
    /// * `n` - window width, always > 1 when called by the converter
    /// * `workers` - worker layout requested by the caller
    fn expand(corpus: &LabeledCorpus, n: usize, workers: Workers) -> Result<LabeledCorpus>;
}

/// Sliding-window n-grams joined with `_`
///
/// `["I", "aa", "hero"]` with `n = 2` becomes `["I_aa", "aa_hero"]`.
/// Documents shorter than `n` become empty documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinedNgram;

impl JoinedNgram {
    pub const SEPARATOR: &'static str = "_";
}

impl NgramExpander for JoinedNgram {
    fn expand(corpus: &LabeledCorpus, n: usize, workers: Workers) -> Result<LabeledCorpus> {
        match workers {
            Workers::Single => {}
        }
        let n = n.max(1);
        let mut expanded = LabeledCorpus::new();
        for (label, docs) in corpus.iter() {
            let grams = docs.iter().map(|doc| {
                doc.windows(n)
                    .map(|window| window.join(Self::SEPARATOR))
                    .collect::<Vec<String>>()
            });
            expanded.insert(label, grams);
        }
        Ok(expanded)
    }
}

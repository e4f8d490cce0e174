use serde_json::Value;

use crate::corpus::LabeledCorpus;
use crate::error::{ConvertError, Result};

/// JSON type name used in error messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: String, expected: &'static str, found: &Value) -> ConvertError {
    ConvertError::TypeMismatch {
        path,
        expected,
        found: type_name(found),
    }
}

/// Check `label -> [document -> [token]]` and build a typed corpus
///
/// Single pass over the value. Stops at the first element of the wrong
/// type and reports its JSON path (`$.label[doc][pos]`).
///
/// # Errors
/// * `TypeMismatch` - any level has the wrong JSON type
/// * `EmptyCorpus` - the outer object has no labels
pub fn validate_corpus(value: &Value) -> Result<LabeledCorpus> {
    let groups = match value {
        Value::Object(groups) => groups,
        other => return Err(mismatch("$".to_string(), "object", other)),
    };
    if groups.is_empty() {
        return Err(ConvertError::EmptyCorpus);
    }

    let mut corpus = LabeledCorpus::new();
    for (label, docs_in_label) in groups {
        let docs = match docs_in_label {
            Value::Array(docs) => docs,
            other => return Err(mismatch(format!("$.{label}"), "array of documents", other)),
        };

        let mut checked_docs = Vec::with_capacity(docs.len());
        for (doc_idx, doc) in docs.iter().enumerate() {
            let tokens = match doc {
                Value::Array(tokens) => tokens,
                other => {
                    return Err(mismatch(format!("$.{label}[{doc_idx}]"), "array of tokens", other))
                }
            };

            let mut checked_tokens = Vec::with_capacity(tokens.len());
            for (pos, token) in tokens.iter().enumerate() {
                match token {
                    Value::String(s) => checked_tokens.push(s.clone()),
                    other => {
                        return Err(mismatch(format!("$.{label}[{doc_idx}][{pos}]"), "string", other))
                    }
                }
            }
            checked_docs.push(checked_tokens);
        }
        corpus.insert(label.clone(), checked_docs);
    }

    Ok(corpus)
}

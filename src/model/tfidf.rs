//! TF-IDF vectorizer for lexical feature extraction.

use std::collections::{HashMap, HashSet};

use crate::error::{ResenhaError, Result};

/// TF-IDF vectorizer over word n-grams of normalized text.
///
/// The vocabulary is built once during [`fit`](TfIdfVectorizer::fit) and
/// frozen: terms unseen at fit time map to no feature and contribute no
/// signal at inference. Term frequency is normalized by the number of terms
/// in the document; IDF uses the smoothed form `ln((N + 1) / (df + 1)) + 1`.
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Total number of documents seen during fit.
    n_documents: usize,
    /// Inclusive n-gram range, e.g. `(1, 2)` for unigrams and bigrams.
    ngram_range: (usize, usize),
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("ngram_range", &self.ngram_range)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a vectorizer over the given inclusive n-gram range.
    pub fn new(ngram_range: (usize, usize)) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ResenhaError::model(format!(
                "invalid ngram range ({min_n}, {max_n})"
            )));
        }
        Ok(TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            ngram_range,
        })
    }

    /// Extract the n-gram terms of a document, unigrams first.
    fn terms(&self, document: &str) -> Vec<String> {
        let tokens: Vec<&str> = document.split_whitespace().collect();
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Fit the vocabulary and IDF weights on the training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.n_documents = documents.len();
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen_in_doc: HashSet<usize> = HashSet::new();
            for term in self.terms(doc) {
                let next_idx = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next_idx);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                if seen_in_doc.insert(idx) {
                    document_frequency[idx] += 1;
                }
            }
        }

        let n = self.n_documents as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;

        Ok(())
    }

    /// Transform a document into its TF-IDF feature vector.
    ///
    /// Out-of-vocabulary terms are ignored; an empty document yields the
    /// all-zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let terms = self.terms(document);
        let mut tf = vec![0.0; self.vocabulary.len()];

        for term in &terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                tf[idx] += 1.0;
            }
        }

        let doc_length = terms.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (count, idf) in tf.iter_mut().zip(self.idf.iter()) {
            *count *= idf;
        }

        tf
    }

    /// Transform a batch of documents.
    pub fn transform_batch(&self, documents: &[String]) -> Vec<Vec<f64>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

//! Stopword lexicon provisioning.
//!
//! Stopword sets are keyed by [`Language`] and obtained through a
//! [`LexiconProvider`]. The bundled provider carries compiled-in lists;
//! [`FileLexiconProvider`] reads them from a JSON file; and
//! [`RetryingLexiconProvider`] wraps any provider with a per-language cache
//! and a single retry before giving up with
//! [`ResenhaError::LexiconUnavailable`](crate::error::ResenhaError).
//!
//! # Examples
//!
//! ```
//! use resenha::lexicon::{BundledLexicon, Language, LexiconProvider};
//!
//! let stopwords = BundledLexicon::new().stopwords(Language::Portuguese).unwrap();
//! assert!(stopwords.contains("não"));
//! ```

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{ResenhaError, Result};

/// Languages with bundled stopword lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Portuguese,
    English,
}

impl Language {
    /// The identifier used in configuration files and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Portuguese => "portuguese",
            Language::English => "english",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ResenhaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "portuguese" | "pt" => Ok(Language::Portuguese),
            "english" | "en" => Ok(Language::English),
            other => Err(ResenhaError::lexicon_unavailable(format!(
                "unknown language identifier: {other}"
            ))),
        }
    }
}

/// Default Portuguese stop words list.
///
/// Entries keep their diacritics; normalization folds tokens to ASCII before
/// stopword removal, so accented entries act as documentation of the source
/// list rather than as live filters.
const DEFAULT_PORTUGUESE_STOP_WORDS: &[&str] = &[
    "de", "a", "o", "que", "e", "é", "do", "da", "em", "um", "para", "com", "não", "uma", "os",
    "no", "se", "na", "por", "mais", "as", "dos", "como", "mas", "ao", "ele", "das", "à", "seu",
    "sua", "ou", "quando", "muito", "nos", "já", "eu", "também", "só", "pelo", "pela", "até",
    "isso", "ela", "entre", "depois", "sem", "mesmo", "aos", "seus", "quem", "nas", "me", "esse",
    "eles", "você", "essa", "num", "nem", "suas", "meu", "às", "minha", "numa", "pelos", "elas",
    "qual", "nós", "lhe", "deles", "essas", "esses", "pelas", "este", "dele", "tu", "te", "vocês",
    "vos", "lhes", "meus", "minhas", "teu", "tua", "teus", "tuas", "nosso", "nossa", "nossos",
    "nossas", "dela", "delas", "esta", "estes", "estas", "aquele", "aquela", "aqueles", "aquelas",
    "isto", "aquilo", "estou", "está", "estamos", "estão", "estive", "esteve", "estivemos",
    "estiveram", "estava", "estávamos", "estavam", "estivera", "estivéramos", "esteja",
    "estejamos", "estejam", "estivesse", "estivéssemos", "estivessem", "estiver", "estivermos",
    "estiverem", "hei", "há", "havemos", "hão", "houve", "houvemos", "houveram", "houvera",
    "houvéramos", "haja", "hajamos", "hajam", "houvesse", "houvéssemos", "houvessem", "houver",
    "houvermos", "houverem", "houverei", "houverá", "houveremos", "houverão", "houveria",
    "houveríamos", "houveriam", "sou", "somos", "são", "era", "éramos", "eram", "fui", "foi",
    "fomos", "foram", "fora", "fôramos", "seja", "sejamos", "sejam", "fosse", "fôssemos",
    "fossem", "for", "formos", "forem", "serei", "será", "seremos", "serão", "seria", "seríamos",
    "seriam", "tenho", "tem", "temos", "têm", "tinha", "tínhamos", "tinham", "tive", "teve",
    "tivemos", "tiveram", "tivera", "tivéramos", "tenha", "tenhamos", "tenham", "tivesse",
    "tivéssemos", "tivessem", "tiver", "tivermos", "tiverem", "terei", "terá", "teremos",
    "terão", "teria", "teríamos", "teriam",
];

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default Portuguese stop words as a HashSet.
pub static DEFAULT_PORTUGUESE_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_PORTUGUESE_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A source of stopword sets keyed by language.
pub trait LexiconProvider: Send + Sync {
    /// Return the stopword set for the given language.
    fn stopwords(&self, language: Language) -> Result<HashSet<String>>;

    /// Get the name of this provider.
    fn name(&self) -> &'static str;
}

/// Provider backed by the compiled-in stopword lists.
#[derive(Clone, Debug, Default)]
pub struct BundledLexicon;

impl BundledLexicon {
    /// Create a new bundled lexicon provider.
    pub fn new() -> Self {
        BundledLexicon
    }
}

impl LexiconProvider for BundledLexicon {
    fn stopwords(&self, language: Language) -> Result<HashSet<String>> {
        match language {
            Language::Portuguese => Ok(DEFAULT_PORTUGUESE_STOP_WORDS_SET.clone()),
            Language::English => Ok(DEFAULT_ENGLISH_STOP_WORDS_SET.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "bundled"
    }
}

/// Provider backed by a JSON file mapping language identifiers to word
/// lists, e.g. `{"portuguese": ["de", "a", ...]}`.
#[derive(Clone, Debug)]
pub struct FileLexiconProvider {
    path: PathBuf,
}

impl FileLexiconProvider {
    /// Create a provider reading from the given JSON file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileLexiconProvider { path: path.into() }
    }
}

impl LexiconProvider for FileLexiconProvider {
    fn stopwords(&self, language: Language) -> Result<HashSet<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ResenhaError::lexicon_unavailable(format!(
                "cannot read stopword file {}: {e}",
                self.path.display()
            ))
        })?;
        let lists: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        lists
            .get(language.as_str())
            .map(|words| words.iter().cloned().collect())
            .ok_or_else(|| {
                ResenhaError::lexicon_unavailable(format!(
                    "stopword file {} has no entry for {language}",
                    self.path.display()
                ))
            })
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Wrapper that caches per-language results and retries the inner provider
/// once before surfacing the failure.
pub struct RetryingLexiconProvider<P: LexiconProvider> {
    inner: P,
    cache: Mutex<HashMap<Language, HashSet<String>>>,
}

impl<P: LexiconProvider> RetryingLexiconProvider<P> {
    /// Wrap a provider with caching and one-shot retry.
    pub fn new(inner: P) -> Self {
        RetryingLexiconProvider {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: LexiconProvider> LexiconProvider for RetryingLexiconProvider<P> {
    fn stopwords(&self, language: Language) -> Result<HashSet<String>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| ResenhaError::lexicon_unavailable("lexicon cache poisoned"))?;
        if let Some(hit) = cache.get(&language) {
            return Ok(hit.clone());
        }

        let words = match self.inner.stopwords(language) {
            Ok(words) => words,
            Err(first) => {
                log::warn!("lexicon fetch for {language} failed, retrying once: {first}");
                self.inner.stopwords(language).map_err(|e| {
                    ResenhaError::lexicon_unavailable(format!(
                        "stopwords for {language} unavailable after retry: {e}"
                    ))
                })?
            }
        };
        cache.insert(language, words.clone());
        Ok(words)
    }

    fn name(&self) -> &'static str {
        "retrying"
    }
}

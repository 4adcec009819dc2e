//! Keyword-based topic tagging.
//!
//! A [`TopicLexicon`] maps topic names to keyword lists; the
//! [`TopicTagger`] marks a review with every topic whose keywords occur in
//! the normalized text. Matching is substring containment by default: a
//! keyword may match inside a longer word, trading precision for recall. A
//! stricter token-boundary mode is available behind [`MatchMode`].
//!
//! # Examples
//!
//! ```
//! use resenha::topics::TopicTagger;
//!
//! let tagger = TopicTagger::with_default_lexicon();
//! let topics = tagger.tag("entrega atrasou demais");
//! assert!(topics.contains("ENTREGA"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Topic assigned when no keyword from any topic matches.
pub const GENERAL_TOPIC: &str = "GERAL";

/// Mapping from topic name to keyword list.
///
/// The map is ordered so tagging output and serialized form are
/// deterministic. Keywords are expected in normalized form (lowercase,
/// unaccented); topic names are free-form labels and keep their accents.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicLexicon {
    topics: BTreeMap<String, Vec<String>>,
}

impl TopicLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        TopicLexicon {
            topics: BTreeMap::new(),
        }
    }

    /// Add a topic with its keyword list, replacing any previous entry.
    pub fn with_topic<S, I, K>(mut self, name: S, keywords: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.topics.insert(
            name.into(),
            keywords.into_iter().map(|k| k.into()).collect(),
        );
        self
    }

    /// Load a lexicon from a JSON file shaped `{"TOPIC": ["kw", ...], ...}`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The built-in review topic map.
    pub fn default_reviews() -> Self {
        TopicLexicon::new()
            .with_topic(
                "ENTREGA",
                [
                    "entrega",
                    "prazo",
                    "chegou",
                    "rapido",
                    "rapida",
                    "demorou",
                    "atraso",
                    "embalagem",
                    "correios",
                    "frete",
                    "transportadora",
                    "rastreio",
                    "logistica",
                ],
            )
            .with_topic(
                "QUALIDADE DO PRODUTO",
                [
                    "qualidade",
                    "produto",
                    "material",
                    "perfeito",
                    "excelente",
                    "ruim",
                    "quebrado",
                    "defeito",
                    "funciona",
                    "funcionou",
                    "gostei",
                    "bonito",
                    "horrivel",
                    "durabilidade",
                    "acabamento",
                    "resistente",
                    "fragil",
                    "original",
                    "falsificado",
                ],
            )
            .with_topic(
                "ATENDIMENTO",
                [
                    "atendimento",
                    "vendedor",
                    "loja",
                    "resposta",
                    "contato",
                    "suporte",
                    "atencao",
                    "educado",
                    "mal educado",
                    "gentil",
                    "demorado",
                    "prestativo",
                    "descaso",
                ],
            )
            .with_topic(
                "PRECO",
                [
                    "preco",
                    "caro",
                    "barato",
                    "custo",
                    "valor",
                    "compra",
                    "carissimo",
                    "promocao",
                    "oferta",
                    "desconto",
                    "custo beneficio",
                ],
            )
            .with_topic(
                "PAGAMENTO",
                [
                    "pagamento",
                    "boleto",
                    "cartao",
                    "credito",
                    "debito",
                    "pix",
                    "parcelamento",
                    "juros",
                    "cobranca",
                    "fatura",
                ],
            )
            .with_topic(
                "PLATAFORMA / SITE",
                [
                    "site",
                    "aplicativo",
                    "app",
                    "plataforma",
                    "navegacao",
                    "facil",
                    "dificil",
                    "erro",
                    "bug",
                    "trava",
                    "compra online",
                    "checkout",
                ],
            )
            .with_topic(
                "EXPERIÊNCIA GERAL",
                [
                    "satisfeito",
                    "insatisfeito",
                    "recomendo",
                    "nao recomendo",
                    "horrivel",
                    "otimo",
                    "pessimo",
                    "excelente",
                    "amei",
                    "odiei",
                    "voltar",
                    "comprarei",
                    "experiencia",
                    "arrependo",
                ],
            )
            .with_topic(
                "SERVIÇO",
                [
                    "servico",
                    "instalacao",
                    "manutencao",
                    "garantia",
                    "troca",
                    "devolucao",
                    "suporte tecnico",
                    "conserto",
                    "assistencia",
                ],
            )
            .with_topic(
                "USABILIDADE / FUNCIONALIDADE",
                [
                    "facil",
                    "complicado",
                    "funcional",
                    "rapido",
                    "intuitivo",
                    "dificil",
                    "simples",
                    "pratico",
                    "bugado",
                    "lento",
                ],
            )
            .with_topic(
                "ESTÉTICA / DESIGN",
                [
                    "bonito",
                    "feio",
                    "design",
                    "moderno",
                    "antigo",
                    "cor",
                    "tamanho",
                    "forma",
                    "aparencia",
                    "estilo",
                ],
            )
    }

    /// Iterate over `(topic, keywords)` entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.topics.iter()
    }

    /// Get the number of topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if the lexicon has no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// How keywords are located in the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment. A keyword can match inside a longer
    /// word ("cor" matches "recorrente").
    #[default]
    Substring,
    /// Keywords must align with token boundaries.
    TokenBoundary,
}

/// Tags normalized review text with topics from a [`TopicLexicon`].
#[derive(Clone, Debug)]
pub struct TopicTagger {
    lexicon: TopicLexicon,
    mode: MatchMode,
}

impl TopicTagger {
    /// Create a tagger over the given lexicon with default matching.
    pub fn new(lexicon: TopicLexicon) -> Self {
        TopicTagger {
            lexicon,
            mode: MatchMode::default(),
        }
    }

    /// Create a tagger over the built-in review lexicon.
    pub fn with_default_lexicon() -> Self {
        Self::new(TopicLexicon::default_reviews())
    }

    /// Set the keyword matching mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Tag normalized text with every matching topic.
    ///
    /// Returns `{GERAL}` when nothing matches; never returns an empty set.
    pub fn tag(&self, normalized_text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for (topic, keywords) in self.lexicon.iter() {
            if keywords.iter().any(|kw| self.matches(normalized_text, kw)) {
                found.insert(topic.clone());
            }
        }
        if found.is_empty() {
            found.insert(GENERAL_TOPIC.to_string());
        }
        found
    }

    fn matches(&self, text: &str, keyword: &str) -> bool {
        match self.mode {
            MatchMode::Substring => text.contains(keyword),
            MatchMode::TokenBoundary => {
                let padded_text = format!(" {text} ");
                let padded_keyword = format!(" {keyword} ");
                padded_text.contains(&padded_keyword)
            }
        }
    }
}

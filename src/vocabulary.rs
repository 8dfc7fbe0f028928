use std::collections::HashSet;

use serde::Serialize;

use crate::figures::KeywordCount;
use crate::lexicon::{words_min3, REGIONAL_LEXICON, STOPWORDS};
use crate::normalize::strip_accents;
use crate::params::HP;
use crate::tally::Tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Richness {
    Alta,
    Media,
    Baja,
}

impl Richness {
    pub fn from_density(density: f64) -> Self {
        if density > HP.richness_high {
            Richness::Alta
        } else if density > HP.richness_medium {
            Richness::Media
        } else {
            Richness::Baja
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VocabularyProfile {
    #[serde(rename = "total_palabras")]
    pub total_tokens: usize,
    #[serde(rename = "vocabulario_unico")]
    pub unique_types: usize,
    /// Type/token ratio as a percentage, one decimal.
    #[serde(rename = "densidad_lexica")]
    pub lexical_density: f64,
    #[serde(rename = "palabras_clave")]
    pub keywords: Vec<KeywordCount>,
    #[serde(rename = "lexico_gaditano")]
    pub regional_terms: Vec<String>,
    #[serde(rename = "riqueza")]
    pub richness: Richness,
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

/// Lexical richness, keyword ranking and regional vocabulary of a lyric.
pub fn analyze_vocabulary<S: AsRef<str>>(verses: &[S]) -> VocabularyProfile {
    let tokens: Vec<String> = verses
        .iter()
        .flat_map(|v| words_min3(v.as_ref()))
        .map(|w| strip_accents(&w))
        .collect();

    let total_tokens = tokens.len();
    let types: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let unique_types = types.len();

    let lexical_density = if total_tokens > 0 {
        round1(unique_types as f64 / total_tokens as f64 * 100.0)
    } else {
        0.0
    };

    let ranked: Tally<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|w| !STOPWORDS.contains(*w) && w.chars().count() >= HP.vocab_min_len)
        .collect();
    let keywords = ranked
        .most_common(Some(HP.vocab_keyword_top))
        .into_iter()
        .map(|(word, frequency)| KeywordCount {
            word: word.to_string(),
            frequency,
        })
        .collect();

    let mut regional_terms: Vec<String> = types
        .iter()
        .filter(|w| REGIONAL_LEXICON.contains(**w))
        .map(|w| w.to_string())
        .collect();
    regional_terms.sort();

    VocabularyProfile {
        total_tokens,
        unique_types,
        lexical_density,
        keywords,
        regional_terms,
        richness: Richness::from_density(lexical_density),
    }
}

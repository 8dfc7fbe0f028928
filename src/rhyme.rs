use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::normalize::{char_len, strip_accents};
use crate::params::HP;
use crate::syllables::strip_verse_punctuation;
use crate::tally::Tally;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Rhyme signatures of a verse's last word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhymeEnding {
    /// Last letters of the word, accents stripped.
    pub consonant: String,
    /// Vowels of the word's tail; empty when the tail has none.
    pub assonant: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RhymeType {
    #[serde(rename = "consonante")]
    Consonant,
    #[serde(rename = "asonante")]
    Assonant,
    #[serde(rename = "libre")]
    Free,
}

impl RhymeType {
    pub fn label(self) -> &'static str {
        match self {
            RhymeType::Consonant => "consonante",
            RhymeType::Assonant => "asonante",
            RhymeType::Free => "libre",
        }
    }

    /// Whether the type counts as rhymed verse for scoring.
    pub fn is_rhymed(self) -> bool {
        matches!(self, RhymeType::Consonant | RhymeType::Assonant)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StanzaScheme {
    #[serde(rename = "esquema")]
    pub scheme: String,
    #[serde(rename = "tipo")]
    pub rhyme_type: Option<RhymeType>,
    #[serde(rename = "esquema_consonante")]
    pub consonant_scheme: String,
    #[serde(rename = "esquema_asonante")]
    pub assonant_scheme: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StanzaRhyme {
    pub n_versos: usize,
    #[serde(rename = "esquema")]
    pub scheme: String,
    #[serde(rename = "tipo_rima")]
    pub rhyme_type: Option<RhymeType>,
    #[serde(rename = "forma_estrofica")]
    pub form: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RhymeSummary {
    #[serde(rename = "estrofas")]
    pub stanzas: Vec<StanzaRhyme>,
    #[serde(rename = "esquema_predominante")]
    pub predominant_scheme: Option<String>,
    #[serde(rename = "tipo_rima")]
    pub predominant_type: Option<RhymeType>,
}

// ---------------------------------------------------------------------------
// Strophic forms
// ---------------------------------------------------------------------------

/// (verse count, consonant scheme, name)
static STROPHIC_FORMS: &[(usize, &str, &str)] = &[
    (4, "ABBA", "serventesio"),
    (4, "ABAB", "cuarteto"),
    (4, "AABB", "pareado doble"),
    (4, "ABCB", "romance (cuarteta)"),
    (4, "AAAA", "cuarteta monorrima"),
    (2, "AA", "pareado"),
    (3, "ABA", "terceto"),
    (3, "AAB", "terceto encadenado"),
    (8, "ABABABCC", "octava real"),
    (10, "ABBAACCDDC", "décima (espinela)"),
];

const ROMANCE: &str = "romance";

static RHYME_WORD_KEEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-záéíóúñü]").unwrap());

// ---------------------------------------------------------------------------
// Endings and schemes
// ---------------------------------------------------------------------------

/// Consonant and assonant signatures of a verse, or `None` when the last
/// word has fewer than two letters.
pub fn rhyme_ending(verse: &str) -> Option<RhymeEnding> {
    let cleaned = strip_verse_punctuation(verse).to_lowercase();
    let last = cleaned.split_whitespace().last()?;
    let word = RHYME_WORD_KEEP_RE.replace_all(last, "");
    if word.chars().count() < HP.rhyme_min_word_letters {
        return None;
    }

    let plain: Vec<char> = strip_accents(&word).chars().collect();
    let consonant: String = tail(&plain, HP.rhyme_consonant_len).iter().collect();
    let assonant: String = tail(&plain, HP.rhyme_assonant_window)
        .iter()
        .filter(|c| "aeiou".contains(**c))
        .collect();

    Some(RhymeEnding {
        consonant,
        assonant,
    })
}

fn tail(chars: &[char], n: usize) -> &[char] {
    &chars[chars.len().saturating_sub(n)..]
}

fn letter_for(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Labels a signature stream first-seen-first-labeled. Empty or missing
/// signatures get `-` and do not consume a letter.
fn label_stream<'a>(signatures: impl Iterator<Item = Option<&'a str>>) -> (String, usize) {
    let mut labels: HashMap<&str, char> = HashMap::new();
    let mut scheme = String::new();
    for sig in signatures {
        match sig {
            Some(s) if !s.is_empty() => {
                let next = labels.len();
                scheme.push(*labels.entry(s).or_insert_with(|| letter_for(next)));
            }
            _ => scheme.push('-'),
        }
    }
    let distinct = labels.values().collect::<HashSet<_>>().len();
    (scheme, distinct)
}

/// Rhyme scheme and type of one stanza.
///
/// Consonant rhyme wins when few distinct consonant endings appear
/// (at most half the verses, minimum one); assonant is tried next; else
/// the verse is free and the consonant labels are reported.
pub fn scheme_for_stanza<S: AsRef<str>>(verses: &[S]) -> StanzaScheme {
    if verses.is_empty() {
        return StanzaScheme {
            scheme: String::new(),
            rhyme_type: None,
            consonant_scheme: String::new(),
            assonant_scheme: String::new(),
        };
    }

    let endings: Vec<Option<RhymeEnding>> =
        verses.iter().map(|v| rhyme_ending(v.as_ref())).collect();
    let (consonant_scheme, consonant_distinct) =
        label_stream(endings.iter().map(|e| e.as_ref().map(|e| e.consonant.as_str())));
    let (assonant_scheme, assonant_distinct) =
        label_stream(endings.iter().map(|e| e.as_ref().map(|e| e.assonant.as_str())));

    let limit = (verses.len() / 2).max(1);
    let (rhyme_type, scheme) = if consonant_distinct <= limit {
        (RhymeType::Consonant, consonant_scheme.clone())
    } else if assonant_distinct <= limit {
        (RhymeType::Assonant, assonant_scheme.clone())
    } else {
        (RhymeType::Free, consonant_scheme.clone())
    };

    StanzaScheme {
        scheme,
        rhyme_type: Some(rhyme_type),
        consonant_scheme,
        assonant_scheme,
    }
}

/// Named strophic form for a scheme, by exact lookup, falling back to the
/// romance pattern (even verses share one rhyme, odd verses vary).
pub fn match_strophic_form(scheme: &str, verse_count: usize) -> Option<&'static str> {
    if let Some(&(_, _, name)) = STROPHIC_FORMS
        .iter()
        .find(|(n, pattern, _)| *n == verse_count && *pattern == scheme)
    {
        return Some(name);
    }
    let letters: Vec<char> = scheme.chars().collect();
    if verse_count >= HP.romance_min_verses && letters.len() >= HP.romance_min_verses {
        let even: HashSet<char> = letters.iter().skip(1).step_by(2).copied().collect();
        let odd: HashSet<char> = letters.iter().step_by(2).copied().collect();
        if even.len() == 1 && odd.len() > 1 {
            return Some(ROMANCE);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Lyric-level summary
// ---------------------------------------------------------------------------

/// Rhyme analysis stanza by stanza, plus the predominant scheme and type.
/// Verses of three characters or fewer are ignored; stanzas left with a
/// single verse are skipped.
pub fn analyze_rhyme(stanzas: &[Vec<String>]) -> RhymeSummary {
    let mut results = Vec::new();
    for stanza in stanzas {
        let verses: Vec<&str> = stanza
            .iter()
            .map(String::as_str)
            .filter(|v| char_len(v) > HP.rhyme_min_verse_chars)
            .collect();
        if verses.len() < HP.rhyme_min_stanza_verses {
            continue;
        }
        let rhyme = scheme_for_stanza(&verses);
        let form = match_strophic_form(&rhyme.scheme, verses.len());
        results.push(StanzaRhyme {
            n_versos: verses.len(),
            scheme: rhyme.scheme,
            rhyme_type: rhyme.rhyme_type,
            form,
        });
    }

    let schemes: Tally<String> = results.iter().map(|r| r.scheme.clone()).collect();
    let types: Tally<RhymeType> = results.iter().filter_map(|r| r.rhyme_type).collect();

    RhymeSummary {
        predominant_scheme: schemes.mode().cloned(),
        predominant_type: types.mode().copied(),
        stanzas: results,
    }
}

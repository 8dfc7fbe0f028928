//! Spanish metrical syllable counting.
//!
//! Counting follows the rules of Spanish prosody closely enough for
//! Carnival verse: diphthongs collapse, hiatus splits, sinalefa merges
//! vowels across word boundaries, and the final count is shifted by the
//! stress of the last word (oxytone +1, proparoxytone -1). Stress comes
//! from suffix tables, not phonology, so some words are misclassified;
//! the tables are kept as they are so counts stay comparable with the
//! catalog's stored analyses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::normalize::strip_accents;

// ---------------------------------------------------------------------------
// Phonetic tables
// ---------------------------------------------------------------------------

/// Vowel pairs that form one syllable, accent-stripped. Rising pairs
/// (weak + strong) first, then falling pairs (strong + weak).
static DIPHTHONGS: &[&str] = &[
    "ia", "ie", "io", "ua", "ue", "uo", //
    "ai", "au", "ei", "eu", "oi", "ou",
];

const PLAIN_VOWELS: &str = "aeiou";
const VOWELS: &str = "aeiouáéíóú";
const ACCENTED_VOWELS: &str = "áéíóú";

static VERSE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[¿¡!?.,;:"'«»()\-_]"#).unwrap());

static NON_ASCII_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z]").unwrap());

static SINALEFA_KEEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-záéíóúü]").unwrap());

static LAST_WORD_KEEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-záéíóúñü]").unwrap());

static OXYTONE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(ad|al|an|ar|az|ed|el|en|er|ez|id|il|in|ir|iz|od|ol|on|or|oz|ud|ul|un|ur|uz|ión|ón)$",
    )
    .unwrap()
});

static PROPAROXYTONE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(ísimo|ísima|ísimos|ísimas|ábamos|íamos|éramos|ábais|íais|érais)$").unwrap()
});

static OPEN_ENDING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiounsáéíóú]$").unwrap());

// ---------------------------------------------------------------------------
// Stress
// ---------------------------------------------------------------------------

/// Position of the stressed syllable in a verse's last word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stress {
    /// Aguda: stressed on the last syllable.
    Oxytone,
    /// Llana: stressed on the penultimate syllable.
    Paroxytone,
    /// Esdrújula: stressed on the antepenultimate syllable.
    Proparoxytone,
}

impl Stress {
    /// Syllables added to (or removed from) the phonetic count.
    pub fn adjustment(self) -> i32 {
        match self {
            Stress::Oxytone => 1,
            Stress::Paroxytone => 0,
            Stress::Proparoxytone => -1,
        }
    }
}

fn has_graphic_accent(word: &str) -> bool {
    word.chars().any(|c| ACCENTED_VOWELS.contains(c))
}

/// Classifies a single word by its ending. Non-letters are ignored; an
/// empty word is treated as paroxytone.
pub fn stress_of(word: &str) -> Stress {
    let word = LAST_WORD_KEEP_RE
        .replace_all(&word.to_lowercase(), "")
        .into_owned();
    if word.is_empty() {
        return Stress::Paroxytone;
    }
    if PROPAROXYTONE_SUFFIX_RE.is_match(&word) {
        return Stress::Proparoxytone;
    }
    if OXYTONE_SUFFIX_RE.is_match(&word)
        && !has_graphic_accent(&word)
        && !OPEN_ENDING_RE.is_match(&word)
    {
        return Stress::Oxytone;
    }
    if word
        .chars()
        .last()
        .is_some_and(|c| ACCENTED_VOWELS.contains(c))
    {
        return Stress::Oxytone;
    }
    Stress::Paroxytone
}

/// Stress class of the last whitespace-separated token of a verse.
pub fn verse_stress(verse: &str) -> Stress {
    verse
        .split_whitespace()
        .last()
        .map(stress_of)
        .unwrap_or(Stress::Paroxytone)
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

fn is_diphthong(a: char, b: char) -> bool {
    DIPHTHONGS.iter().any(|d| {
        let mut it = d.chars();
        it.next() == Some(a) && it.next() == Some(b)
    })
}

/// Phonetic syllables of one word.
///
/// Returns 0 when nothing alphabetic is left after stripping accents and
/// non-letters, and at least 1 otherwise (even for vowel-less tokens such
/// as "y").
pub fn count_word_syllables(word: &str) -> u32 {
    let plain = strip_accents(&word.to_lowercase());
    let plain = NON_ASCII_LETTER_RE.replace_all(&plain, "");
    let chars: Vec<char> = plain.chars().collect();
    if chars.is_empty() {
        return 0;
    }

    let mut syllables = 0u32;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if PLAIN_VOWELS.contains(c) {
            syllables += 1;
            match chars.get(i + 1) {
                Some(&next) if PLAIN_VOWELS.contains(next) && is_diphthong(c, next) => i += 2,
                _ => i += 1,
            }
        } else {
            i += 1;
        }
    }
    syllables.max(1)
}

/// Removes the punctuation that never counts toward meter or rhyme.
pub(crate) fn strip_verse_punctuation(verse: &str) -> String {
    VERSE_PUNCT_RE.replace_all(verse, "").trim().to_string()
}

fn sinalefa_core(word: &str) -> String {
    SINALEFA_KEEP_RE
        .replace_all(&word.to_lowercase(), "")
        .into_owned()
}

/// Number of word boundaries where a final vowel meets an initial vowel.
/// Each boundary is judged on its own; merges are not chained.
pub fn count_sinalefas(words: &[&str]) -> u32 {
    let cores: Vec<String> = words.iter().map(|w| sinalefa_core(w)).collect();
    cores
        .windows(2)
        .filter(|pair| {
            let ends_vowel = pair[0].chars().last().is_some_and(|c| VOWELS.contains(c));
            let starts_vowel = pair[1].chars().next().is_some_and(|c| VOWELS.contains(c));
            ends_vowel && starts_vowel
        })
        .count() as u32
}

/// Metrical syllables of a verse: per-word sum, minus sinalefas, shifted by
/// the stress of the last word. Never below 1.
pub fn count_verse_syllables(verse: &str) -> u32 {
    let cleaned = strip_verse_punctuation(verse);
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return 1;
    }

    let base: u32 = words.iter().map(|w| count_word_syllables(w)).sum();
    let merged = base as i64 - count_sinalefas(&words) as i64;
    let adjusted = merged + verse_stress(verse).adjustment() as i64;
    adjusted.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_counts_with_diphthongs_and_hiatus() {
        assert_eq!(count_word_syllables("casa"), 2);
        assert_eq!(count_word_syllables("cielo"), 2); // ie
        assert_eq!(count_word_syllables("aire"), 2); // ai
        assert_eq!(count_word_syllables("poeta"), 3); // o-e hiatus
        assert_eq!(count_word_syllables("gaditano"), 4);
        assert_eq!(count_word_syllables("Cádiz"), 2);
    }

    #[test]
    fn word_count_floors() {
        assert_eq!(count_word_syllables(""), 0);
        assert_eq!(count_word_syllables("¡¿,.!"), 0);
        assert_eq!(count_word_syllables("123"), 0);
        assert_eq!(count_word_syllables("y"), 1);
    }

    #[test]
    fn sinalefa_merges_exactly_one() {
        let words = ["la", "amiga"];
        let per_word: u32 = words.iter().map(|w| count_word_syllables(w)).sum();
        assert_eq!(per_word, 4);
        assert_eq!(count_sinalefas(&words), 1);
        // "amiga" is paroxytone, so only the sinalefa shifts the total.
        assert_eq!(count_verse_syllables("la amiga"), per_word - 1);
    }

    #[test]
    fn sinalefa_checked_per_boundary() {
        assert_eq!(count_sinalefas(&["canta", "a", "esa", "ola"]), 3);
        assert_eq!(count_sinalefas(&["la", "hora"]), 0);
    }

    #[test]
    fn stress_classes() {
        assert_eq!(stress_of("salero"), Stress::Paroxytone);
        assert_eq!(stress_of("verdad"), Stress::Oxytone);
        assert_eq!(stress_of("cantar"), Stress::Oxytone);
        assert_eq!(stress_of("corazón"), Stress::Paroxytone);
        assert_eq!(stress_of("café"), Stress::Oxytone);
        assert_eq!(stress_of("grandísimo"), Stress::Proparoxytone);
        assert_eq!(stress_of("cantábamos"), Stress::Proparoxytone);
        assert_eq!(stress_of("—"), Stress::Paroxytone);
    }

    #[test]
    fn stress_adjusts_verse_total() {
        // mi-ra-el-mar: 4 phonetic, -1 sinalefa, +1 oxytone "mar".
        assert_eq!(count_verse_syllables("mira el mar"), 4);
        // can-ta-ba-mos: -1 for the esdrújula ending.
        assert_eq!(count_verse_syllables("cantábamos"), 3);
    }

    #[test]
    fn verse_count_is_at_least_one() {
        for verse in ["", "...", "¡!", "y", "a", "de"] {
            assert!(count_verse_syllables(verse) >= 1, "verse {verse:?}");
        }
    }

    #[test]
    fn octosyllable_from_the_carnival() {
        assert_eq!(count_verse_syllables("como canta un gaditano"), 8);
        assert_eq!(count_verse_syllables("Quiero cantarle a Cádiz"), 8);
        // "y" is not a vowel for sinalefa purposes.
        assert_eq!(count_verse_syllables("con la gracia y el salero"), 9);
    }
}

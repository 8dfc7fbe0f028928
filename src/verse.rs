use serde::Serialize;

use crate::normalize::{normalize_text, segment_stanzas};
use crate::rhyme::{rhyme_ending, RhymeEnding};
use crate::syllables::{count_verse_syllables, strip_verse_punctuation, verse_stress, Stress};

/// Scansion of a single verse.
#[derive(Debug, Clone, Serialize)]
pub struct Verse {
    #[serde(rename = "verso")]
    pub text: String,
    #[serde(rename = "limpio")]
    pub cleaned: String,
    #[serde(rename = "silabas")]
    pub syllables: u32,
    #[serde(rename = "acento")]
    pub stress: Stress,
    #[serde(rename = "rima")]
    pub ending: Option<RhymeEnding>,
}

impl Verse {
    pub fn scan(text: &str) -> Self {
        let text = text.trim();
        Self {
            text: text.to_string(),
            cleaned: strip_verse_punctuation(text),
            syllables: count_verse_syllables(text),
            stress: verse_stress(text),
            ending: rhyme_ending(text),
        }
    }
}

/// Scansion of every verse in a lyric, stanza boundaries dropped.
pub fn scan_lyric(content: &str) -> Vec<Verse> {
    let text = normalize_text(content);
    segment_stanzas(&text)
        .iter()
        .flatten()
        .map(|v| Verse::scan(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_a_verse() {
        let v = Verse::scan("  ¡Mira el mar!  ");
        assert_eq!(v.text, "¡Mira el mar!");
        assert_eq!(v.cleaned, "Mira el mar");
        assert_eq!(v.syllables, 4);
        assert_eq!(v.stress, Stress::Oxytone);
        let ending = v.ending.unwrap();
        assert_eq!(ending.consonant, "mar");
        assert_eq!(ending.assonant, "a");
    }

    #[test]
    fn scans_every_line() {
        let verses = scan_lyric("la vida\nla partida\n\nel mar");
        assert_eq!(verses.len(), 3);
        assert!(verses.iter().all(|v| v.syllables >= 1));
    }
}

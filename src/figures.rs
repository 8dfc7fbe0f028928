use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::lexicon::content_words;
use crate::normalize::strip_accents;
use crate::params::HP;
use crate::tally::Tally;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Which end of the verse a shared run is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Two consecutive verses sharing an opening (anaphora) or a closing
/// (epiphora). The shared words serialize as `inicio` or `final`.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedWords {
    pub verses: [String; 2],
    pub words: String,
    pub edge: Edge,
}

impl Serialize for SharedWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SharedWords", 2)?;
        state.serialize_field("versos", &self.verses)?;
        let key = match self.edge {
            Edge::Start => "inicio",
            Edge::End => "final",
        };
        state.serialize_field(key, &self.words)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    #[serde(rename = "palabra")]
    pub word: String,
    #[serde(rename = "frecuencia")]
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "figura")]
pub enum Figure {
    #[serde(rename = "Anáfora")]
    Anaphora {
        count: usize,
        #[serde(rename = "ejemplos")]
        examples: Vec<SharedWords>,
    },
    #[serde(rename = "Epífora")]
    Epiphora {
        count: usize,
        #[serde(rename = "ejemplos")]
        examples: Vec<SharedWords>,
    },
    #[serde(rename = "Enumeración")]
    Enumeration { count: usize },
    #[serde(rename = "Interrogación retórica")]
    Interrogation { count: usize },
    #[serde(rename = "Exclamación")]
    Exclamation { count: usize },
    #[serde(rename = "Palabras clave recurrentes")]
    RepeatedKeyword {
        #[serde(rename = "palabras")]
        words: Vec<KeywordCount>,
    },
}

impl Figure {
    pub fn label(&self) -> &'static str {
        match self {
            Figure::Anaphora { .. } => "Anáfora",
            Figure::Epiphora { .. } => "Epífora",
            Figure::Enumeration { .. } => "Enumeración",
            Figure::Interrogation { .. } => "Interrogación retórica",
            Figure::Exclamation { .. } => "Exclamación",
            Figure::RepeatedKeyword { .. } => "Palabras clave recurrentes",
        }
    }
}

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

fn lower_words(verse: &str) -> Vec<String> {
    verse
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn same_word(a: &str, b: &str) -> bool {
    strip_accents(a) == strip_accents(b)
}

/// Consecutive verse pairs whose words match from one end, up to
/// `figure_min_shared_words` words.
fn shared_runs(verses: &[&str], edge: Edge) -> Vec<SharedWords> {
    let from_end = edge == Edge::End;
    let want = HP.figure_min_shared_words;
    let mut found = Vec::new();
    for pair in verses.windows(2) {
        let a = lower_words(pair[0]);
        let b = lower_words(pair[1]);
        if a.is_empty() || b.is_empty() {
            continue;
        }
        let span = want.min(a.len()).min(b.len());
        let matched = (0..span)
            .take_while(|&j| {
                if from_end {
                    same_word(&a[a.len() - 1 - j], &b[b.len() - 1 - j])
                } else {
                    same_word(&a[j], &b[j])
                }
            })
            .count();
        if matched >= want {
            let words = if from_end {
                a[a.len() - matched..].join(" ")
            } else {
                a[..matched].join(" ")
            };
            found.push(SharedWords {
                verses: [pair[0].trim().to_string(), pair[1].trim().to_string()],
                words,
                edge,
            });
        }
    }
    found
}

pub fn detect_anaphora(verses: &[&str]) -> Vec<SharedWords> {
    shared_runs(verses, Edge::Start)
}

pub fn detect_epiphora(verses: &[&str]) -> Vec<SharedWords> {
    shared_runs(verses, Edge::End)
}

/// A verse listing three or more comma-separated items.
pub fn is_enumeration(verse: &str) -> bool {
    verse.split(',').filter(|p| !p.trim().is_empty()).count() >= HP.enumeration_min_items
}

pub fn is_interrogation(verse: &str) -> bool {
    verse.contains(['¿', '?'])
}

pub fn is_exclamation(verse: &str) -> bool {
    verse.contains(['¡', '!'])
}

/// Content words repeated often enough to read as emphasis: at least
/// `keyword_min_freq` occurrences and `keyword_min_share` of all content
/// words, in lyrics with enough content words to judge.
pub fn detect_repeated_keywords(verses: &[&str]) -> Vec<KeywordCount> {
    let words: Vec<String> = verses.iter().flat_map(|v| content_words(v)).collect();
    let total = words.len();
    if total < HP.keyword_min_tokens {
        return vec![];
    }

    let threshold = (HP.keyword_min_freq as f64).max(total as f64 * HP.keyword_min_share);
    let tally: Tally<String> = words.into_iter().collect();
    tally
        .most_common(Some(HP.keyword_top))
        .into_iter()
        .filter(|(_, f)| *f as f64 >= threshold)
        .map(|(word, frequency)| KeywordCount { word, frequency })
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rhetorical figures found across a lyric's verses, in a fixed order.
/// Figures that do not occur are simply absent.
pub fn detect_figures<S: AsRef<str>>(verses: &[S]) -> Vec<Figure> {
    let verses: Vec<&str> = verses.iter().map(AsRef::as_ref).collect();
    let mut figures = Vec::new();

    let anaphora = detect_anaphora(&verses);
    if !anaphora.is_empty() {
        figures.push(Figure::Anaphora {
            count: anaphora.len(),
            examples: anaphora.into_iter().take(HP.figure_example_cap).collect(),
        });
    }

    let epiphora = detect_epiphora(&verses);
    if !epiphora.is_empty() {
        figures.push(Figure::Epiphora {
            count: epiphora.len(),
            examples: epiphora.into_iter().take(HP.figure_example_cap).collect(),
        });
    }

    let count_of = |pred: fn(&str) -> bool| verses.iter().filter(|v| pred(v)).count();

    let enumerations = count_of(is_enumeration);
    if enumerations > 0 {
        figures.push(Figure::Enumeration {
            count: enumerations,
        });
    }

    let questions = count_of(is_interrogation);
    if questions > 0 {
        figures.push(Figure::Interrogation { count: questions });
    }

    let exclamations = count_of(is_exclamation);
    if exclamations > 0 {
        figures.push(Figure::Exclamation {
            count: exclamations,
        });
    }

    let keywords = detect_repeated_keywords(&verses);
    if !keywords.is_empty() {
        figures.push(Figure::RepeatedKeyword { words: keywords });
    }

    figures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anaphora_needs_two_leading_words() {
        let verses = ["Cádiz que canta", "cadiz que llora", "Cádiz sola"];
        let found = detect_anaphora(&verses);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].words, "cádiz que");
        assert_eq!(found[0].verses[1], "cadiz que llora");
    }

    #[test]
    fn epiphora_matches_trailing_words() {
        let verses = ["yo te quiero, mi vida", "por ti canto, mi vida"];
        let found = detect_epiphora(&verses);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].words, "mi vida");
        assert_eq!(found[0].edge, Edge::End);
    }

    #[test]
    fn shared_runs_serialize_with_their_edge_key() {
        let openings = detect_anaphora(&["Cádiz que canta", "Cádiz que llora"]);
        let json = serde_json::to_value(&openings[0]).unwrap();
        assert_eq!(json["inicio"], "cádiz que");
        assert_eq!(json["versos"][0], "Cádiz que canta");
        assert!(json.get("final").is_none());

        let closings = detect_epiphora(&["yo te quiero, mi vida", "por ti canto, mi vida"]);
        let json = serde_json::to_value(&closings[0]).unwrap();
        assert_eq!(json["final"], "mi vida");
        assert!(json.get("inicio").is_none());
    }

    #[test]
    fn keyword_threshold_scales_with_long_lyrics() {
        // 100 content words: the bar is 4% of them, so three repeats are
        // not enough.
        let mut words: Vec<String> = (0..92).map(|i| format!("palabra{}", alpha(i))).collect();
        words.extend(std::iter::repeat("carnaval".to_string()).take(4));
        words.extend(std::iter::repeat("levante".to_string()).take(3));
        words.push("comparsa".to_string());
        let text = words.join(" ");
        let found = detect_repeated_keywords(&[text.as_str()]);
        assert_eq!(
            found,
            vec![KeywordCount {
                word: "carnaval".to_string(),
                frequency: 4
            }]
        );
    }

    fn alpha(mut n: usize) -> String {
        let mut out = String::new();
        loop {
            out.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                return out;
            }
        }
    }

    #[test]
    fn punctuation_breaks_word_matches() {
        let verses = ["mi Cádiz, tan bella", "mi Cádiz tan bella"];
        assert!(detect_anaphora(&verses).is_empty());
    }

    #[test]
    fn enumeration_and_punctuation_figures() {
        assert!(is_enumeration("la sal, el sol, la mar"));
        assert!(!is_enumeration("la sal, el sol"));
        assert!(!is_enumeration("uno, , dos"));
        assert!(is_interrogation("¿dónde estás"));
        assert!(is_exclamation("olé!"));
        assert!(!is_exclamation("tranquila"));
    }

    #[test]
    fn repeated_keywords_need_enough_tokens() {
        let few = ["carnaval carnaval carnaval"];
        assert!(detect_repeated_keywords(&few).is_empty());

        let verses = [
            "carnaval de mi tierra querida",
            "carnaval que me llama cantando",
            "carnaval de la bahía dorada",
            "tierra de coplas",
        ];
        let found = detect_repeated_keywords(&verses);
        assert_eq!(
            found,
            vec![KeywordCount {
                word: "carnaval".to_string(),
                frequency: 3
            }]
        );
    }

    #[test]
    fn figures_in_fixed_order_without_negatives() {
        let verses = ["¡Ay, mi Cádiz!", "¿Quién te canta?", "la sal, el sol, la mar"];
        let labels: Vec<&str> = detect_figures(&verses).iter().map(Figure::label).collect();
        assert_eq!(
            labels,
            vec!["Enumeración", "Interrogación retórica", "Exclamación"]
        );
        assert!(detect_figures(&["nada que ver aqui"]).is_empty());
    }

    #[test]
    fn figure_serializes_with_tag() {
        let json = serde_json::to_value(Figure::Exclamation { count: 2 }).unwrap();
        assert_eq!(json["figura"], "Exclamación");
        assert_eq!(json["count"], 2);
    }
}

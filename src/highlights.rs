use crate::lexicon::{content_words, in_regional_lexicon, words_min4};
use crate::params::HP;
use crate::tally::Tally;

fn has_emphasis(verse: &str) -> bool {
    verse.contains(['¡', '!', '¿', '?'])
}

/// Salience of one trimmed verse given the lyric's content-word counts.
fn verse_score(verse: &str, frequencies: &Tally<String>) -> u32 {
    let len = verse.chars().count();
    let mut score = 0;

    if (HP.highlight_ideal_min..=HP.highlight_ideal_max).contains(&len) {
        score += HP.highlight_ideal_points;
    } else if len > HP.highlight_ideal_max {
        score += HP.highlight_long_points;
    }

    if has_emphasis(verse) {
        score += HP.highlight_emphasis_points;
    }

    for word in content_words(verse) {
        if frequencies.get(&word) >= HP.highlight_repeat_min {
            score += 1;
        }
    }

    if words_min4(verse).iter().any(|w| in_regional_lexicon(w)) {
        score += HP.highlight_lexicon_points;
    }
    score
}

/// The `n` most salient verses, best first; equal scores keep verse order.
pub fn extract_highlights<S: AsRef<str>>(verses: &[S], n: usize) -> Vec<String> {
    let frequencies: Tally<String> = verses
        .iter()
        .flat_map(|v| content_words(v.as_ref()))
        .collect();

    let mut scored: Vec<(u32, &str)> = verses
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| v.chars().count() >= HP.highlight_min_chars)
        .map(|v| (verse_score(v, &frequencies), v))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(n)
        .map(|(_, v)| v.to_string())
        .collect()
}

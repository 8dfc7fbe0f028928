//! Quality of a stored lyric text, independent of its poetics: whether it
//! looks like a complete, cleanly transcribed lyric or like scraped page
//! residue.

const WEB_RESIDUE: &[&str] = &["http", "www.", "publicado por", "enviar por correo"];

const MAX_UPPERCASE_RATIO: f64 = 0.3;

/// Scores a stored text from 0 to 100 in five 20-point criteria: line
/// count, length, absence of web residue, stanza structure and moderate
/// capitalization.
pub fn content_quality(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let mut points = 0;

    let lines = text.trim().split('\n').filter(|l| !l.trim().is_empty()).count();
    if lines >= 5 {
        points += 20;
    } else if lines >= 2 {
        points += 10;
    }

    let chars = text.chars().count();
    if chars > 500 {
        points += 20;
    } else if chars > 200 {
        points += 10;
    }

    let lower = text.to_lowercase();
    if !WEB_RESIDUE.iter().any(|r| lower.contains(r)) {
        points += 20;
    }

    if text.split("\n\n").count() >= 2 {
        points += 20;
    }

    let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
    if (uppercase as f64 / chars.max(1) as f64) < MAX_UPPERCASE_RATIO {
        points += 20;
    }

    points.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(content_quality(""), 0);
    }

    #[test]
    fn clean_structured_lyric_scores_high() {
        let stanza = "la mar de Cádiz canta\ncon su brisa de levante\ny el sol que la levanta\nbrilla siempre por delante\n";
        let text = [stanza; 6].join("\n");
        assert_eq!(content_quality(&text), 100);
    }

    #[test]
    fn scraped_residue_and_shouting_cost_points() {
        let text = "VISITA WWW.BLOG.COM\nPUBLICADO POR ALGUIEN";
        // two lines (+10), short, residue, one block, all caps
        assert_eq!(content_quality(text), 10);
    }
}

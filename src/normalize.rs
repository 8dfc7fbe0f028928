use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static DOUBLE_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{201C}\u{201D}\u{00AB}\u{00BB}]").unwrap());

static SINGLE_QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{2018}\u{2019}]").unwrap());

static ELLIPSIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}|\u{2026}").unwrap());

static INLINE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static STANZA_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Letras Desde el Para[ií]so",
        r"Carnaval de C[aá]diz",
        r"www\..*\.com",
        r"http\S+",
        r"Publicado por.*",
        r"Enviar por correo.*",
        r"Compartir con.*",
        r"Etiquetas:.*",
        r"No hay comentarios.*",
        r"Entrada m[aá]s reciente.*",
        r"Entrada antigua.*",
        r"P[aá]gina principal.*",
        r"Suscribirse a:.*",
        r"\d+ comentarios?:?",
        r"Publicar un comentario.*",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect()
});

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Canonicalizes a stored lyric before analysis.
///
/// Composes to NFC, folds typographic quotes to ASCII, turns any run of two
/// or more dots (or `…`) into `...`, collapses inline whitespace per line and
/// keeps at most one blank line between stanzas. Line structure survives:
/// stanza segmentation depends on it.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text: String = raw.nfc().collect();
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = DOUBLE_QUOTE_RE.replace_all(&text, "\"");
    let text = SINGLE_QUOTE_RE.replace_all(&text, "'");
    let text = ELLIPSIS_RE.replace_all(&text, "...");

    let lines: Vec<String> = text
        .split('\n')
        .map(|line| INLINE_SPACE_RE.replace_all(line.trim(), " ").into_owned())
        .collect();
    let joined = lines.join("\n");
    BLANK_RUN_RE.replace_all(&joined, "\n\n").trim().to_string()
}

/// Removes diacritics: NFD, then drops combining marks (`ñ` -> `n`).
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Removes residue left by the lyric blogs the catalog was scraped from
/// (headers, links, share buttons, comment counters), then re-normalizes.
pub fn strip_boilerplate(text: &str) -> String {
    let mut cleaned = normalize_text(text);
    for pat in BOILERPLATE_PATTERNS.iter() {
        cleaned = pat.replace_all(&cleaned, "").into_owned();
    }
    normalize_text(&cleaned)
}

/// Splits a lyric into stanzas on blank lines; each stanza keeps its
/// non-blank lines in order.
pub fn segment_stanzas(text: &str) -> Vec<Vec<String>> {
    STANZA_SPLIT_RE
        .split(text.trim())
        .map(|block| {
            block
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|stanza| !stanza.is_empty())
        .collect()
}

/// Character length of the trimmed text, as the length gates measure it.
pub(crate) fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_quotes_and_ellipses() {
        let out = normalize_text("\u{201C}Ay, Cádiz\u{201D}\u{2026} y \u{2018}olé\u{2019}....");
        assert_eq!(out, "\"Ay, Cádiz\"... y 'olé'...");
    }

    #[test]
    fn collapses_inline_space_but_keeps_stanzas() {
        let out = normalize_text("  la   mar\t\tsalada  \n\n\n\n  y el   viento ");
        assert_eq!(out, "la mar salada\n\ny el viento");
    }

    #[test]
    fn composes_decomposed_accents() {
        let out = normalize_text("Ca\u{0301}diz");
        assert_eq!(out, "Cádiz");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \n  "), "");
    }

    #[test]
    fn strips_accents_and_tilde() {
        assert_eq!(strip_accents("canción pingüino año"), "cancion pinguino ano");
    }

    #[test]
    fn removes_blog_residue() {
        let raw = "Publicado por Manolo a las 10:00\nla bahía de plata\nhttp://ejemplo.blogspot.com\n3 comentarios:";
        assert_eq!(strip_boilerplate(raw), "la bahía de plata");
    }

    #[test]
    fn segments_on_blank_lines() {
        let stanzas = segment_stanzas("uno\ndos\n  \ntres\n\n\ncuatro\n");
        assert_eq!(
            stanzas,
            vec![
                vec!["uno".to_string(), "dos".to_string()],
                vec!["tres".to_string()],
                vec!["cuatro".to_string()],
            ]
        );
    }
}

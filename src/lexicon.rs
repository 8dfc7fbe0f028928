use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::strip_accents;

// ---------------------------------------------------------------------------
// Stopwords
// ---------------------------------------------------------------------------

/// Basic Spanish function words. Lookups use the token as given: accented
/// and unaccented spellings are listed separately where both matter.
pub(crate) static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "de", "la", "el", "en", "y", "a", "los", "que", "se", "del", "las", "un", "por", "con",
        "una", "su", "para", "es", "al", "lo", "como", "mas", "o", "pero", "sus", "le", "ya",
        "ha", "si", "me", "mi", "te", "tu", "no", "ni", "fue", "ser", "he", "hay", "tan", "bien",
        "vez", "cuando", "hasta", "sobre", "sin", "son", "entre", "yo", "era", "muy", "todo",
        "esta", "este", "ese", "eso", "esa", "nos", "les", "dos", "tres", "más", "él", "ella",
        "nuestro", "nuestra", "nuestros", "nuestras", "vuestro", "vuestra", "también", "así",
        "donde", "quien", "porque", "aunque", "solo", "sólo", "ahí", "allí", "aquí", "ahora",
        "siempre", "nunca", "cada", "otro", "otra", "unos", "unas", "tanto", "tanta", "poco",
        "mucho", "algo", "nada", "toda", "todos", "todas", "mismo", "misma",
    ]
    .into_iter()
    .collect()
});

// ---------------------------------------------------------------------------
// Regional and Carnival lexicon
// ---------------------------------------------------------------------------

static REGIONAL_LEXICON_RAW: &[&str] = &[
    // Habla gaditana
    "arsa", "jaleo", "olé", "ole", "venga", "anda", "coña", "coñas", "tio", "tia", "chaval",
    "chavala", "mira", "oye", "vamos", "bueno", "joer", "joder", "ostia", "ostias", "hombre",
    "mujer", "niño", "niña", "peaso", "pedazo", "guiri", "gaditano", "gaditana", "gaditanos",
    "callejuela", "barrio", "la viña", "viña", "santa maria", "el pópulo", "pópulo", "populo",
    "almadraba", "pesquero", "pescaito", "pescao", "fritura", "menudo", "papas", "patatas",
    "chicharrones",
    // Carnaval
    "carnaval", "chirigota", "comparsa", "coro", "cuarteto", "agrupacion", "agrupación",
    "pasodoble", "cuplé", "cuple", "popurri", "popurrí", "tango", "estribillo", "parodia",
    "presentacion", "presentación", "concurso", "falla", "teatro", "gran teatro", "antifaz",
    "disfraz", "careta", "mascaras", "mascara", "carnavalero", "carnavalera", "carnavaleros",
    "carnavaleras", "autor", "directora", "director", "tipo", "letra", "musica", "música",
    "ensayo", "actuacion", "actuación", "pregon", "pregón", "pregonero",
    // Mar y Cádiz
    "bahia", "bahía", "océano", "mar", "playa", "marisma", "caño", "levante", "poniente",
    "vendaval", "brisa", "marea", "ola", "olas", "barco", "barca", "barcas", "velero",
    "marinero", "marinera", "cádiz", "cadiz", "gaditan", "gaditanas",
    // Expresiones populares
    "duende", "gracia", "salero", "salera", "jaleos", "copla", "coplas", "cantaor", "bailaor",
];

/// Dialectal and Carnival-themed vocabulary, accent-stripped so lookups are
/// accent-insensitive.
pub(crate) static REGIONAL_LEXICON: Lazy<HashSet<String>> =
    Lazy::new(|| REGIONAL_LEXICON_RAW.iter().map(|w| strip_accents(w)).collect());

/// Case- and accent-insensitive membership test.
pub(crate) fn in_regional_lexicon(word: &str) -> bool {
    REGIONAL_LEXICON.contains(&strip_accents(&word.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Tokenizers
// ---------------------------------------------------------------------------

static WORD3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-záéíóúñü]{3,}\b").unwrap());

static WORD4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-záéíóúñü]{4,}\b").unwrap());

/// Words of at least three letters in the lowercased text, accents kept.
pub(crate) fn words_min3(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD3_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Words of at least four letters in the lowercased text, accents kept.
pub(crate) fn words_min4(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD4_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Accent-stripped content words (four letters or more, stopwords
/// removed). Shared by the keyword-repetition figure and the highlighter.
pub(crate) fn content_words(text: &str) -> Vec<String> {
    words_min4(text)
        .into_iter()
        .filter(|w| !STOPWORDS.contains(w.as_str()))
        .map(|w| strip_accents(&w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_lookup_ignores_case_and_accents() {
        assert!(in_regional_lexicon("Cádiz"));
        assert!(in_regional_lexicon("CHIRIGOTA"));
        assert!(in_regional_lexicon("cadiz"));
        assert!(in_regional_lexicon("bahia"));
        assert!(in_regional_lexicon("pregón"));
        assert!(!in_regional_lexicon("ordenador"));
    }

    #[test]
    fn tokenizer_respects_length_and_letters() {
        assert_eq!(words_min3("¡Ay, mi Cádiz querida!"), vec!["cádiz", "querida"]);
        assert_eq!(words_min4("la mar y la niña"), vec!["niña"]);
    }

    #[test]
    fn content_words_drop_stopwords_before_stripping() {
        // "también" is listed accented; "nuestro" is plain.
        assert_eq!(
            content_words("también nuestro pregón"),
            vec!["pregon".to_string()]
        );
    }
}

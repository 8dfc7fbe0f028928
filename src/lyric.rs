use serde::Serialize;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::figures::{detect_figures, Figure};
use crate::highlights::extract_highlights;
use crate::meter::{classify_meter, MeterDistribution};
use crate::normalize::{char_len, normalize_text, segment_stanzas};
use crate::params::{AnalysisOptions, HP};
use crate::quality::content_quality;
use crate::rhyme::{analyze_rhyme, RhymeSummary};
use crate::vocabulary::{analyze_vocabulary, round1, VocabularyProfile};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Full poetic analysis of one lyric. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct LyricAnalysis {
    pub n_estrofas: usize,
    pub n_versos: usize,
    #[serde(rename = "longitud_media_verso")]
    pub mean_verse_len: f64,
    #[serde(rename = "metrica")]
    pub meter: MeterDistribution,
    #[serde(rename = "rima")]
    pub rhyme: RhymeSummary,
    #[serde(rename = "figuras_retoricas")]
    pub figures: Vec<Figure>,
    #[serde(rename = "vocabulario")]
    pub vocabulary: VocabularyProfile,
    #[serde(rename = "versos_destacados")]
    pub highlights: Vec<String>,
    #[serde(rename = "score_poetico")]
    pub score: u32,
    #[serde(rename = "calidad")]
    pub quality: u32,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Composite 0-100 score: meter coherence, rhyme, figure variety, lexical
/// density and stanza structure.
fn poetic_score(
    meter: &MeterDistribution,
    rhyme: &RhymeSummary,
    figures: &[Figure],
    vocabulary: &VocabularyProfile,
    stanzas: usize,
) -> u32 {
    let mut score = 0.0f64;
    score += (meter.coherence_pct as f64 * HP.score_coherence_weight).min(HP.score_coherence_cap);
    if rhyme.predominant_type.is_some_and(|t| t.is_rhymed()) {
        score += HP.score_rhyme_points;
    }
    score += (figures.len() as f64 * HP.score_figure_points).min(HP.score_figure_cap);
    if vocabulary.lexical_density > HP.score_density_min {
        score += HP.score_density_points;
    }
    if stanzas >= HP.score_stanza_min {
        score += HP.score_stanza_points;
    }
    (score.round_ties_even() as u32).clamp(HP.score_min, HP.score_max)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_lyric(content: &str) -> Result<LyricAnalysis> {
    analyze_lyric_with(content, &AnalysisOptions::default())
}

/// Runs the whole pipeline over one lyric.
///
/// The text is normalized and must keep at least 20 characters; it is then
/// split into blank-line separated stanzas and every sub-analysis runs on
/// the same verse list.
pub fn analyze_lyric_with(content: &str, options: &AnalysisOptions) -> Result<LyricAnalysis> {
    let text = normalize_text(content);
    let len = char_len(&text);
    if len < HP.min_lyric_chars {
        return Err(AnalysisError::InsufficientContent { len });
    }

    let stanzas = segment_stanzas(&text);
    let verses: Vec<&str> = stanzas.iter().flatten().map(String::as_str).collect();
    if verses.is_empty() {
        return Err(AnalysisError::NoVersesFound);
    }
    debug!(
        stanzas = stanzas.len(),
        verses = verses.len(),
        "segmented lyric"
    );

    let meter = classify_meter(&verses);
    let rhyme = analyze_rhyme(&stanzas);
    let figures = detect_figures(&verses);
    let vocabulary = analyze_vocabulary(&verses);
    let highlights = extract_highlights(&verses, options.highlight_count);

    let total_len: usize = verses.iter().map(|v| v.chars().count()).sum();
    let mean_verse_len = round1(total_len as f64 / verses.len() as f64);
    let score = poetic_score(&meter, &rhyme, &figures, &vocabulary, stanzas.len());

    debug!(
        meter = ?meter.dominant_name,
        rhyme = ?rhyme.predominant_type,
        figures = figures.len(),
        score,
        "analyzed lyric"
    );

    Ok(LyricAnalysis {
        n_estrofas: stanzas.len(),
        n_versos: verses.len(),
        mean_verse_len,
        meter,
        rhyme,
        figures,
        vocabulary,
        highlights,
        score,
        quality: content_quality(content),
    })
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

pub(crate) struct Hyperparameters {
    // Lyric gate
    pub min_lyric_chars: usize,
    pub min_corpus_lyric_chars: usize,
    // Meter
    pub meter_min_verse_chars: usize,
    pub meter_min_syllables: u32,
    pub meter_max_syllables: u32,
    pub meter_coherence_tolerance: u32,
    // Rhyme
    pub rhyme_consonant_len: usize,
    pub rhyme_assonant_window: usize,
    pub rhyme_min_word_letters: usize,
    pub rhyme_min_verse_chars: usize,
    pub rhyme_min_stanza_verses: usize,
    pub romance_min_verses: usize,
    // Figures
    pub figure_min_shared_words: usize,
    pub figure_example_cap: usize,
    pub enumeration_min_items: usize,
    pub keyword_min_tokens: usize,
    pub keyword_min_freq: usize,
    pub keyword_min_share: f64,
    pub keyword_top: usize,
    // Vocabulary
    pub vocab_min_len: usize,
    pub vocab_keyword_top: usize,
    pub richness_high: f64,
    pub richness_medium: f64,
    // Highlights
    pub highlight_default_count: usize,
    pub highlight_min_chars: usize,
    pub highlight_ideal_min: usize,
    pub highlight_ideal_max: usize,
    pub highlight_ideal_points: u32,
    pub highlight_long_points: u32,
    pub highlight_emphasis_points: u32,
    pub highlight_repeat_min: usize,
    pub highlight_lexicon_points: u32,
    // Poetic score
    pub score_coherence_weight: f64,
    pub score_coherence_cap: f64,
    pub score_rhyme_points: f64,
    pub score_figure_points: f64,
    pub score_figure_cap: f64,
    pub score_density_min: f64,
    pub score_density_points: f64,
    pub score_stanza_min: usize,
    pub score_stanza_points: f64,
    pub score_min: u32,
    pub score_max: u32,
    // Corpus rankings
    pub corpus_top_meters: usize,
    pub corpus_top_schemes: usize,
    pub corpus_top_figures: usize,
    pub corpus_top_lexicon: usize,
    pub corpus_top_keywords: usize,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    min_lyric_chars: 20,
    min_corpus_lyric_chars: 30,
    meter_min_verse_chars: 3,
    meter_min_syllables: 2,
    meter_max_syllables: 20,
    meter_coherence_tolerance: 1,
    rhyme_consonant_len: 3,
    rhyme_assonant_window: 4,
    rhyme_min_word_letters: 2,
    rhyme_min_verse_chars: 3,
    rhyme_min_stanza_verses: 2,
    romance_min_verses: 4,
    figure_min_shared_words: 2,
    figure_example_cap: 3,
    enumeration_min_items: 3,
    keyword_min_tokens: 10,
    keyword_min_freq: 3,
    keyword_min_share: 0.04,
    keyword_top: 10,
    vocab_min_len: 3,
    vocab_keyword_top: 15,
    richness_high: 60.0,
    richness_medium: 40.0,
    highlight_default_count: 3,
    highlight_min_chars: 15,
    highlight_ideal_min: 20,
    highlight_ideal_max: 60,
    highlight_ideal_points: 3,
    highlight_long_points: 1,
    highlight_emphasis_points: 2,
    highlight_repeat_min: 2,
    highlight_lexicon_points: 2,
    score_coherence_weight: 0.3,
    score_coherence_cap: 30.0,
    score_rhyme_points: 25.0,
    score_figure_points: 5.0,
    score_figure_cap: 20.0,
    score_density_min: 40.0,
    score_density_points: 15.0,
    score_stanza_min: 2,
    score_stanza_points: 10.0,
    score_min: 0,
    score_max: 100,
    corpus_top_meters: 8,
    corpus_top_schemes: 10,
    corpus_top_figures: 8,
    corpus_top_lexicon: 20,
    corpus_top_keywords: 25,
};

/// Caller-tunable knobs for a single lyric analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// How many highlighted verses the report keeps.
    pub highlight_count: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            highlight_count: HP.highlight_default_count,
        }
    }
}

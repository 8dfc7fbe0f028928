//! Poetic analysis of Cádiz Carnival lyrics.
//!
//! Takes the raw text of a lyric ("letra") and measures it the way a
//! Carnival critic would: syllable counts with sinalefa and stress, the
//! dominant meter, rhyme schemes and strophic forms, rhetorical figures,
//! vocabulary and regional lexicon, the most quotable verses, and a
//! composite 0-100 score. [`analyze_corpus`] rolls the same pipeline up
//! over a whole catalog.
//!
//! Every function is pure; analyses can run concurrently without locking.

pub mod corpus;
pub mod error;
pub mod figures;
pub mod highlights;
mod lexicon;
pub mod lyric;
pub mod meter;
pub mod normalize;
mod params;
pub mod quality;
pub mod rhyme;
pub mod syllables;
mod tally;
pub mod verse;
pub mod vocabulary;

pub use corpus::{analyze_corpus, analyze_corpus_in_pool, CorpusReport, LyricRecord};
pub use error::{AnalysisError, Result};
pub use figures::Figure;
pub use lyric::{analyze_lyric, analyze_lyric_with, LyricAnalysis};
pub use meter::{classify_meter, MeterDistribution};
pub use normalize::{normalize_text, strip_boilerplate};
pub use params::AnalysisOptions;
pub use rhyme::{match_strophic_form, rhyme_ending, scheme_for_stanza, RhymeType};
pub use syllables::{count_verse_syllables, count_word_syllables, Stress};
pub use verse::{scan_lyric, Verse};

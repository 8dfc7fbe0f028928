use thiserror::Error;

/// Reasons a lyric (or a corpus run) cannot produce an analysis.
///
/// Per-lyric variants are recoverable: the corpus aggregator logs them and
/// skips the lyric instead of aborting the batch.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The normalized text is shorter than the minimum analyzable length.
    #[error("Contenido insuficiente para analizar ({len} caracteres)")]
    InsufficientContent { len: usize },

    /// Segmentation produced no non-blank line.
    #[error("No se encontraron versos")]
    NoVersesFound,

    /// The dedicated corpus worker pool could not be built.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

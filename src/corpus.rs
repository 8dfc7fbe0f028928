use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::lyric::{analyze_lyric, LyricAnalysis};
use crate::normalize::char_len;
use crate::params::HP;
use crate::tally::Tally;
use crate::vocabulary::round1;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// One catalog row as handed over by the storage layer. Extra columns are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricRecord {
    #[serde(alias = "contenido", default)]
    pub content: String,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub modalidad: Option<String>,
    #[serde(default, deserialize_with = "year_as_string")]
    pub anio: Option<String>,
}

/// Catalog dumps store the year either as text or as a number.
fn year_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }
    Ok(Option::<Year>::deserialize(deserializer)?.map(|y| match y {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    }))
}

/// What a corpus ranking counts. Each list keeps the key names of the
/// catalog's JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Meter,
    RhymeType,
    Scheme,
    Figure,
    Lexicon,
    Keyword,
}

impl Ranking {
    fn keys(self) -> (&'static str, &'static str) {
        match self {
            Ranking::Meter => ("metro", "count"),
            Ranking::RhymeType => ("tipo", "count"),
            Ranking::Scheme => ("esquema", "count"),
            Ranking::Figure => ("figura", "count"),
            Ranking::Lexicon => ("palabra", "apariciones"),
            Ranking::Keyword => ("palabra", "frecuencia"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCount {
    pub kind: Ranking,
    pub value: String,
    pub count: usize,
}

impl Serialize for RankedCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (value_key, count_key) = self.kind.keys();
        let mut state = serializer.serialize_struct("RankedCount", 2)?;
        state.serialize_field(value_key, &self.value)?;
        state.serialize_field(count_key, &self.count)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    #[serde(rename = "grupo")]
    pub group: String,
    #[serde(rename = "letras")]
    pub lyrics: usize,
    #[serde(rename = "score_medio")]
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    pub total_analizadas: usize,
    pub score_medio: f64,
    pub metros_dominantes: Vec<RankedCount>,
    pub tipos_rima: Vec<RankedCount>,
    pub esquemas_frecuentes: Vec<RankedCount>,
    pub figuras_frecuentes: Vec<RankedCount>,
    pub lexico_gaditano_top: Vec<RankedCount>,
    pub palabras_clave_corpus: Vec<RankedCount>,
    pub por_modalidad: Vec<GroupStats>,
    pub por_anio: Vec<GroupStats>,
}

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

const NO_MODALIDAD: &str = "sin_modalidad";
const NO_ANIO: &str = "sin_anio";

fn mean(total: u64, n: usize) -> f64 {
    round1(total as f64 / n.max(1) as f64)
}

/// Running score sum and lyric count per group, in first-seen order.
struct Groups {
    lyrics: Tally<String>,
    scores: Tally<String>,
}

impl Groups {
    fn new() -> Self {
        Self {
            lyrics: Tally::new(),
            scores: Tally::new(),
        }
    }

    fn add(&mut self, key: String, score: u32) {
        self.lyrics.inc(key.clone());
        self.scores.add(key, score as usize);
    }

    fn into_stats(self) -> Vec<GroupStats> {
        self.lyrics
            .most_common(None)
            .into_iter()
            .map(|(group, lyrics)| GroupStats {
                mean_score: mean(self.scores.get(&group) as u64, lyrics),
                group,
                lyrics,
            })
            .collect()
    }
}

#[derive(Default)]
struct CorpusTallies {
    scores: Vec<u32>,
    meters: Tally<String>,
    rhyme_types: Tally<String>,
    schemes: Tally<String>,
    figures: Tally<String>,
    lexicon: Tally<String>,
    keywords: Tally<String>,
}

fn ranked(tally: &Tally<String>, kind: Ranking, limit: Option<usize>) -> Vec<RankedCount> {
    tally
        .most_common(limit)
        .into_iter()
        .map(|(value, count)| RankedCount { kind, value, count })
        .collect()
}

impl CorpusTallies {
    fn absorb(&mut self, analysis: &LyricAnalysis) {
        self.scores.push(analysis.score);
        if let Some(name) = &analysis.meter.dominant_name {
            self.meters.inc(name.clone());
        }
        if let Some(t) = analysis.rhyme.predominant_type {
            self.rhyme_types.inc(t.label().to_string());
        }
        if let Some(scheme) = &analysis.rhyme.predominant_scheme {
            if !scheme.is_empty() {
                self.schemes.inc(scheme.clone());
            }
        }
        for figure in &analysis.figures {
            self.figures.inc(figure.label().to_string());
        }
        for term in &analysis.vocabulary.regional_terms {
            self.lexicon.inc(term.clone());
        }
        for keyword in &analysis.vocabulary.keywords {
            self.keywords.add(keyword.word.clone(), keyword.frequency);
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn analyze_record(record: &LyricRecord) -> Option<LyricAnalysis> {
    if char_len(&record.content) < HP.min_corpus_lyric_chars {
        debug!(titulo = ?record.titulo, "skipping short lyric");
        return None;
    }
    match analyze_lyric(&record.content) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            warn!(titulo = ?record.titulo, error = %e, "skipping lyric");
            None
        }
    }
}

fn reduce(records: &[LyricRecord], analyses: Vec<Option<LyricAnalysis>>) -> CorpusReport {
    let mut tallies = CorpusTallies::default();
    let mut by_modalidad = Groups::new();
    let mut by_anio = Groups::new();

    for (record, analysis) in records.iter().zip(analyses) {
        let Some(analysis) = analysis else {
            continue;
        };
        tallies.absorb(&analysis);
        let modalidad = record
            .modalidad
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| NO_MODALIDAD.to_string());
        let anio = record
            .anio
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANIO.to_string());
        by_modalidad.add(modalidad, analysis.score);
        by_anio.add(anio, analysis.score);
    }

    let total = tallies.scores.len();
    let score_sum: u64 = tallies.scores.iter().map(|&s| s as u64).sum();
    info!(
        lyrics = records.len(),
        analyzed = total,
        "corpus analysis complete"
    );

    CorpusReport {
        total_analizadas: total,
        score_medio: mean(score_sum, total),
        metros_dominantes: ranked(&tallies.meters, Ranking::Meter, Some(HP.corpus_top_meters)),
        tipos_rima: ranked(&tallies.rhyme_types, Ranking::RhymeType, None),
        esquemas_frecuentes: ranked(&tallies.schemes, Ranking::Scheme, Some(HP.corpus_top_schemes)),
        figuras_frecuentes: ranked(&tallies.figures, Ranking::Figure, Some(HP.corpus_top_figures)),
        lexico_gaditano_top: ranked(&tallies.lexicon, Ranking::Lexicon, Some(HP.corpus_top_lexicon)),
        palabras_clave_corpus: ranked(&tallies.keywords, Ranking::Keyword, Some(HP.corpus_top_keywords)),
        por_modalidad: by_modalidad.into_stats(),
        por_anio: by_anio.into_stats(),
    }
}

/// Analyzes every record and aggregates the results.
///
/// Lyric analyses run in parallel on the global rayon pool; results are
/// collected in input order and reduced sequentially, so rankings do not
/// depend on scheduling. Short or failing lyrics are skipped and left out
/// of every denominator.
pub fn analyze_corpus(records: &[LyricRecord]) -> CorpusReport {
    let analyses: Vec<Option<LyricAnalysis>> = records.par_iter().map(analyze_record).collect();
    reduce(records, analyses)
}

/// Same as [`analyze_corpus`] on a dedicated pool of `threads` workers.
pub fn analyze_corpus_in_pool(records: &[LyricRecord], threads: usize) -> Result<CorpusReport> {
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(pool.install(|| analyze_corpus(records)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content: &str, modalidad: Option<&str>) -> LyricRecord {
        LyricRecord {
            content: content.to_string(),
            modalidad: modalidad.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn skips_short_lyrics() {
        let records = vec![
            record("demasiado corto aqui", None),
            record("", None),
        ];
        let report = analyze_corpus(&records);
        assert_eq!(report.total_analizadas, 0);
        assert_eq!(report.score_medio, 0.0);
        assert!(report.metros_dominantes.is_empty());
        assert!(report.por_modalidad.is_empty());
    }

    #[test]
    fn groups_by_modalidad() {
        let text = "la vida que yo canto\nla partida de mi barco\n\nla avenida de la mar\nla salida del puerto";
        let records = vec![
            record(text, Some("Chirigota")),
            record(text, Some("Comparsa")),
            record(text, Some("Chirigota")),
            record(text, None),
        ];
        let report = analyze_corpus(&records);
        assert_eq!(report.total_analizadas, 4);
        let groups: Vec<(&str, usize)> = report
            .por_modalidad
            .iter()
            .map(|g| (g.group.as_str(), g.lyrics))
            .collect();
        assert_eq!(
            groups,
            vec![("Chirigota", 2), ("Comparsa", 1), ("sin_modalidad", 1)]
        );
        assert_eq!(report.por_anio.len(), 1);
        assert_eq!(report.por_anio[0].group, "sin_anio");
    }

    #[test]
    fn rankings_serialize_with_catalog_keys() {
        let text = "¡Ay Cádiz de mi vida!\n¿quién te canta como yo?\n\nla gracia de tu bahía\nla sal de tu corazón";
        let report = analyze_corpus(&[record(text, None)]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["figuras_frecuentes"][0].get("figura").is_some());
        assert_eq!(json["figuras_frecuentes"][0]["count"], 1);
        assert!(json["metros_dominantes"][0].get("metro").is_some());
        let lexicon = &json["lexico_gaditano_top"][0];
        assert!(lexicon.get("palabra").is_some());
        assert!(lexicon.get("apariciones").is_some());

        let keyword = RankedCount {
            kind: Ranking::Keyword,
            value: "carnaval".to_string(),
            count: 4,
        };
        assert_eq!(
            serde_json::to_value(&keyword).unwrap(),
            serde_json::json!({"palabra": "carnaval", "frecuencia": 4})
        );
    }

    #[test]
    fn mean_score_rounds_half_to_even() {
        assert_eq!(mean(249, 4), 62.2);
        assert_eq!(mean(251, 4), 62.8);
        assert_eq!(mean(0, 0), 0.0);
    }

    #[test]
    fn record_accepts_catalog_field_names() {
        let json = r#"[{"contenido": "texto", "anio": 2019, "modalidad": "Coro", "id": 7},
                       {"content": "otro", "anio": "2020"}]"#;
        let records: Vec<LyricRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].content, "texto");
        assert_eq!(records[0].anio.as_deref(), Some("2019"));
        assert_eq!(records[1].anio.as_deref(), Some("2020"));
        assert!(records[1].modalidad.is_none());
    }

    #[test]
    fn dedicated_pool_matches_global_pool() {
        let text = "¡Ay Cádiz de mi vida!\n¿quién te canta como yo?\n\nla gracia de tu bahía\nla sal de tu corazón";
        let records = vec![record(text, Some("Coro")); 3];
        let pooled = analyze_corpus_in_pool(&records, 2).unwrap();
        assert_eq!(pooled, analyze_corpus(&records));
    }
}

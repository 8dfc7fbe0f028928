use serde::Serialize;

use crate::normalize::char_len;
use crate::params::HP;
use crate::syllables::count_verse_syllables;
use crate::tally::Tally;

#[derive(Debug, Clone, Serialize)]
pub struct MeterCount {
    #[serde(rename = "silabas")]
    pub syllables: u32,
    #[serde(rename = "metro")]
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeterDistribution {
    #[serde(rename = "metro_dominante")]
    pub dominant: Option<u32>,
    #[serde(rename = "nombre_metro")]
    pub dominant_name: Option<String>,
    /// Share of measured verses within one syllable of the dominant meter.
    #[serde(rename = "coherencia_pct")]
    pub coherence_pct: u32,
    /// Syllables of each measured verse, in verse order.
    #[serde(rename = "medidas")]
    pub measures: Vec<u32>,
    /// Histogram ordered by syllable count.
    #[serde(rename = "distribucion")]
    pub distribution: Vec<MeterCount>,
}

/// Traditional name of a verse length.
pub fn meter_name(syllables: u32) -> String {
    let name = match syllables {
        2 => "bisílabo",
        3 => "trisílabo",
        4 => "tetrasílabo",
        5 => "pentasílabo",
        6 => "hexasílabo",
        7 => "heptasílabo",
        8 => "octosílabo",
        9 => "eneasílabo",
        10 => "decasílabo",
        11 => "endecasílabo",
        12 => "dodecasílabo",
        14 => "alejandrino",
        n => return format!("{n} sílabas"),
    };
    name.to_string()
}

/// Measures every verse and summarizes the lyric's meter.
///
/// Verses under three characters, and counts outside 2..=20, are treated
/// as noise and left out of both the histogram and the coherence base.
pub fn classify_meter<S: AsRef<str>>(verses: &[S]) -> MeterDistribution {
    let mut tally: Tally<u32> = Tally::new();
    let mut measures = Vec::new();
    for verse in verses {
        let verse = verse.as_ref().trim();
        if char_len(verse) < HP.meter_min_verse_chars {
            continue;
        }
        let n = count_verse_syllables(verse);
        if (HP.meter_min_syllables..=HP.meter_max_syllables).contains(&n) {
            tally.inc(n);
            measures.push(n);
        }
    }

    let Some(&dominant) = tally.mode() else {
        return MeterDistribution {
            dominant: None,
            dominant_name: None,
            coherence_pct: 0,
            measures,
            distribution: Vec::new(),
        };
    };

    let coherent: usize = tally
        .iter()
        .filter(|(n, _)| n.abs_diff(dominant) <= HP.meter_coherence_tolerance)
        .map(|(_, c)| c)
        .sum();
    let coherence_pct = (coherent as f64 / measures.len() as f64 * 100.0).round_ties_even() as u32;

    let mut distribution: Vec<MeterCount> = tally
        .iter()
        .map(|&(syllables, count)| MeterCount {
            syllables,
            name: meter_name(syllables),
            count,
        })
        .collect();
    distribution.sort_by_key(|m| m.syllables);

    MeterDistribution {
        dominant: Some(dominant),
        dominant_name: Some(meter_name(dominant)),
        coherence_pct,
        measures,
        distribution,
    }
}

use std::io::Read;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carnaval_poetics::{
    analyze_corpus, analyze_corpus_in_pool, analyze_lyric_with, scan_lyric, strip_boilerplate,
    AnalysisOptions, LyricRecord,
};

#[derive(Parser)]
#[command(
    name = "carnaval-poetics",
    about = "Metrical, rhyme and rhetorical analysis of Carnival lyrics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full poetic analysis of each file (reads stdin if none provided)
    Analyze {
        files: Vec<String>,
        /// Number of highlighted verses to keep
        #[arg(long, default_value_t = AnalysisOptions::default().highlight_count)]
        highlights: usize,
        /// Remove scraped-blog residue before analyzing
        #[arg(long)]
        strip_boilerplate: bool,
    },
    /// Per-verse scansion: syllables, stress and rhyme ending
    Scan { files: Vec<String> },
    /// Aggregate statistics over a JSON array of lyric records
    Corpus {
        file: String,
        /// Size of a dedicated worker pool (defaults to the global pool)
        #[arg(long)]
        threads: Option<usize>,
    },
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
}

fn read_inputs(files: &[String]) -> Vec<(String, String)> {
    if files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .unwrap_or_else(|e| fail(&format!("Error reading stdin: {e}")));
        return vec![("<stdin>".to_string(), input)];
    }
    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")));
            (path.clone(), text)
        })
        .collect()
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(&format!("Error serializing output: {e}")),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            files,
            highlights,
            strip_boilerplate: strip,
        } => {
            let options = AnalysisOptions {
                highlight_count: highlights,
            };
            for (name, text) in read_inputs(&files) {
                debug!(input = %name, "analyzing");
                let text = if strip { strip_boilerplate(&text) } else { text };
                match analyze_lyric_with(&text, &options) {
                    Ok(analysis) => print_json(&analysis),
                    Err(e) => print_json(&ErrorReport {
                        error: e.to_string(),
                    }),
                }
            }
        }
        Command::Scan { files } => {
            for (_, text) in read_inputs(&files) {
                print_json(&scan_lyric(&text));
            }
        }
        Command::Corpus { file, threads } => {
            let raw = std::fs::read_to_string(&file)
                .unwrap_or_else(|e| fail(&format!("Error reading {file}: {e}")));
            let records: Vec<LyricRecord> = serde_json::from_str(&raw)
                .unwrap_or_else(|e| fail(&format!("Error parsing {file}: {e}")));
            let report = match threads {
                Some(n) => analyze_corpus_in_pool(&records, n)
                    .unwrap_or_else(|e| fail(&e.to_string())),
                None => analyze_corpus(&records),
            };
            print_json(&report);
        }
    }
}

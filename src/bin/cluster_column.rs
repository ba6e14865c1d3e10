use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use serde::Serialize;

use keycollide::config::subsystems::processor::parse_level_filter;
use keycollide::{
    Cluster,
    CsvColumnSource,
    Error,
    FingerprintKeyBuilder,
    KeyBuilder,
    KeyCollideConfig,
    KeyCollision,
    KeyMethod,
    NGramKeyBuilder,
    Result,
    StandardNormalizer,
};

const DEFAULT_CONFIG: &str = "keycollide.ini";

/// Cluster near-duplicate values of CSV columns by key collision
#[derive(Debug, Parser)]
#[command(name = "cluster_column", version)]
struct Args {
    /// INI configuration file (defaults to ./keycollide.ini when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input CSV file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Column to cluster, may be repeated
    #[arg(short = 'k', long = "column")]
    columns: Vec<String>,

    /// Key method: fingerprint or ngram
    #[arg(short, long, default_value = "fingerprint")]
    method: String,

    /// N-gram size, required for the ngram method
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    ngram_size: Option<i64>,

    /// Keep tokens in their original order
    #[arg(long)]
    no_sort: bool,

    /// Keep repeated tokens
    #[arg(long)]
    keep_duplicates: bool,

    /// Field delimiter of the input file
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Input file has no header row; columns are addressed by index
    #[arg(long)]
    no_headers: bool,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level: none, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, conflicts_with = "log_file")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ColumnClusters<'a> {
    column: &'a str,
    clusters: &'a [Cluster],
}

#[derive(Debug, Serialize)]
struct ClusterRow<'a> {
    column: &'a str,
    value: &'a str,
    count: u64,
    key: &'a str,
}

fn load_config(args: &Args) -> Result<KeyCollideConfig> {
    let mut config = match &args.config {
        Some(path) => KeyCollideConfig::from_ini(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => KeyCollideConfig::from_ini(DEFAULT_CONFIG)?,
        None => KeyCollideConfig::default(),
    };

    // Command line wins over the config file
    if let Some(input) = &args.input {
        config.input.path = Some(input.clone());
    }
    if !args.columns.is_empty() {
        config.input.columns = args.columns.clone();
    }
    if let Some(delimiter) = args.delimiter {
        if !delimiter.is_ascii() {
            return Err(Error::invalid_argument(format!("Delimiter must be ASCII: {:?}", delimiter)));
        }
        config.input.delimiter = delimiter as u8;
    }
    if args.no_headers {
        config.input.has_headers = false;
    }
    if args.no_sort {
        config.fingerprint.sort_tokens = false;
    }
    if args.keep_duplicates {
        config.fingerprint.remove_duplicates = false;
    }
    if let Some(level) = &args.log_level {
        if parse_level_filter(level).is_none() {
            return Err(Error::invalid_argument(format!("Invalid log level: {}", level)));
        }
        config.processor.log_level = level.trim().to_lowercase();
    }

    Ok(config)
}

fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter(None, level);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn key_builder(method: KeyMethod, args: &Args, config: &KeyCollideConfig) -> Result<Box<dyn KeyBuilder>> {
    let builder: Box<dyn KeyBuilder> = match method {
        KeyMethod::Fingerprint => Box::new(FingerprintKeyBuilder::new(config.fingerprint)),
        KeyMethod::NGram => match args.ngram_size {
            Some(size) => Box::new(NGramKeyBuilder::from_signed(size)?),
            None => Box::new(NGramKeyBuilder::new(config.ngram.require_size()?)?),
        },
    };
    Ok(builder)
}

fn write_results(format: &str, results: &[(String, Vec<Cluster>)], out: &mut dyn Write) -> Result<()> {
    match format {
        "json" => {
            let records: Vec<ColumnClusters> = results
                .iter()
                .map(|(column, clusters)| ColumnClusters { column, clusters })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        },
        "csv" => {
            let mut writer = csv::Writer::from_writer(out);
            for (column, clusters) in results {
                for cluster in clusters {
                    writer.serialize(ClusterRow {
                        column,
                        value: &cluster.value,
                        count: cluster.count,
                        key: &cluster.key,
                    })?;
                }
            }
            writer.flush()?;
        },
        other => {
            return Err(Error::invalid_argument(format!("Unknown output format: {}", other)));
        }
    }
    Ok(())
}

fn log_path(args: &Args) -> Option<PathBuf> {
    match (&args.log_file, &args.log_dir) {
        (Some(file), _) => Some(file.clone()),
        (None, Some(dir)) => {
            let timestamp = Local::now().format("%m_%d_%H_%M");
            Some(dir.join(format!("cluster_{}.log", timestamp)))
        },
        (None, None) => None,
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    init_logging(config.processor.get_log_level(), log_path(&args).as_deref())?;
    info!("Starting key collision clustering");
    info!("Normalizer: {}", config.normalizer.describe());
    info!("{}", config.processor.describe());

    let method = KeyMethod::from_str(&args.method).ok_or_else(|| {
        Error::invalid_argument(format!("Unknown method '{}' (expected fingerprint or ngram)", args.method))
    })?;
    let builder = key_builder(method, &args, &config)?;

    if config.input.columns.is_empty() {
        return Err(Error::invalid_argument("At least one --column is required"));
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {pos} rows read ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(120));

    let source = CsvColumnSource::from_config(&config.input)?.with_progress(progress.clone());
    let collision = KeyCollision::new(
        StandardNormalizer::new(config.normalizer.clone()),
        config.processor.clone(),
    )?;

    let results = collision.cluster_columns(&source, &config.input.columns, builder.as_ref())?;
    progress.finish_and_clear();

    for (column, clusters) in &results {
        let multi = clusters.iter().filter(|c| c.count > 1).count();
        info!("Column '{}': {} clusters ({} with more than one occurrence)", column, clusters.len(), multi);
    }

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            write_results(&args.format, &results, &mut file)?;
            info!("Wrote {} results to {:?}", method.as_str(), path);
        },
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_results(&args.format, &results, &mut handle)?;
        }
    }

    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(error) = run(args) {
        warn!("Clustering failed: {}", error);
        eprintln!("Error: {}", error);
        return Err(error.into());
    }

    Ok(())
}

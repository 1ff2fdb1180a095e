//! arxprep CLI
//!
//! Clean and reshape arXiv metadata dumps into CSV tables for clustering

mod config;
mod progress;

use anyhow::{Context, Result};
use arxprep_core::{concatenate_columns, DedupKeep, Pipeline};
use arxprep_filters::CleaningRules;
use arxprep_formats::{count_lines, open_dataset, sample_csv, WriteMode, DEFAULT_SAMPLE_ROWS};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::RunConfig;
use progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "arxprep")]
#[command(version, about = "Clean and reshape arXiv metadata into CSV", long_about = None)]
#[command(author = "arxprep")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

/// Which duplicate to keep within a chunk
#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeepArg {
    First,
    Last,
}

impl From<KeepArg> for DedupKeep {
    fn from(keep: KeepArg) -> Self {
        match keep {
            KeepArg::First => DedupKeep::First,
            KeepArg::Last => DedupKeep::Last,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, deduplicate and convert NDJSON metadata to CSV
    Preprocess {
        /// Input file (NDJSON, optionally gzipped)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run config file (YAML or TOML); flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Records per chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Which duplicate to keep within a chunk
        #[arg(long, value_enum)]
        keep: Option<KeepArg>,

        /// Keep records whose cleaned text is empty
        #[arg(long)]
        keep_empty: bool,

        /// Write the source id as the first column
        #[arg(long)]
        include_id: bool,

        /// Append to an existing output file instead of truncating it
        #[arg(long)]
        append: bool,

        /// Write the effective run configuration to this file and exit
        #[arg(long, value_name = "FILE")]
        save_config: Option<PathBuf>,

        /// Skip the line-counting pass; progress shows a counter instead of a bar
        #[arg(long)]
        no_count: bool,
    },

    /// Copy the header and the first N rows of a CSV file
    Sample {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of data rows to keep
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        rows: usize,
    },

    /// Replace title and abstract columns with their concatenation
    Concat {
        /// Input CSV file (id,title,abstract,categories,update_date)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Inspect a dataset file
    Inspect {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count records in a dataset
    Count {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Count non-blank lines without parsing them
        #[arg(long)]
        lines: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Preprocess {
            input,
            output,
            config,
            chunk_size,
            keep,
            keep_empty,
            include_id,
            append,
            save_config,
            no_count,
        } => {
            let overrides = RunConfig {
                input,
                output,
                chunk_size,
                dedup_keep: keep.map(DedupKeep::from),
                drop_empty: keep_empty.then_some(false),
                include_id: include_id.then_some(true),
                write_mode: append.then_some(WriteMode::Append),
            };
            preprocess(config, overrides, save_config, !no_count, cli.json)?;
        }
        Commands::Sample {
            input,
            output,
            rows,
        } => {
            sample(input, output, rows, cli.json)?;
        }
        Commands::Concat { input, output } => {
            concat(input, output, cli.json)?;
        }
        Commands::Inspect { input, limit } => {
            inspect_dataset(input, limit)?;
        }
        Commands::Count { input, lines } => {
            count_dataset(input, lines, cli.json)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn preprocess(
    config_path: Option<PathBuf>,
    overrides: RunConfig,
    save_config: Option<PathBuf>,
    count_first: bool,
    json_output: bool,
) -> Result<()> {
    let base = match &config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let run_config = base.merge(overrides);

    if let Some(path) = save_config {
        run_config.save(&path)?;
        info!("Run configuration written to {:?}", path);
        return Ok(());
    }

    let run = run_config.resolve()?;

    info!("Starting preprocessing");
    info!("  Input: {:?}", run.input);
    info!("  Output: {:?}", run.output);
    if let Some(path) = &config_path {
        info!("  Config: {:?}", path);
    }
    info!("  Chunk size: {}", run.pipeline.chunk_size);
    info!("  Keep duplicate: {:?}", run.pipeline.dedup_keep);
    info!("  Drop empty: {}", run.pipeline.drop_empty);
    info!("  Write mode: {:?}", run.pipeline.write_mode);

    let pipeline = Pipeline::new(run.pipeline, CleaningRules::scientific_english())?;

    let total = if count_first {
        let total = count_lines(&run.input)
            .with_context(|| format!("Failed to count records in {}", run.input.display()))?;
        info!("  Records: {}", total);
        Some(total)
    } else {
        None
    };

    let progress = ProgressReporter::new(total);
    let result = pipeline.run(&run.input, &run.output, &progress);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    let stats = result.with_context(|| format!("Preprocessing {} failed", run.input.display()))?;

    if json_output {
        let report = serde_json::json!({
            "input": run.input.to_string_lossy().to_string(),
            "output": run.output.to_string_lossy().to_string(),
            "records_read": stats.records_read,
            "chunks": stats.chunks_processed,
            "duplicates_removed": stats.duplicates_dropped,
            "empty_dropped": stats.empty_dropped,
            "rows_written": stats.rows_written,
            "deduplication_rate": stats.deduplication_rate(),
            "config": run.pipeline,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_summary_report(&run.input, &run.output, &stats);
    }

    Ok(())
}

fn sample(input: PathBuf, output: PathBuf, rows: usize, json_output: bool) -> Result<()> {
    info!("Sampling {} rows from {:?} into {:?}", rows, input, output);

    let copied = sample_csv(&input, &output, rows)
        .with_context(|| format!("Sampling {} failed", input.display()))?;

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "output": output.to_string_lossy().to_string(),
            "rows_requested": rows,
            "rows_written": copied,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Copied {} rows to {}", copied, output.display());
    }

    Ok(())
}

fn concat(input: PathBuf, output: PathBuf, json_output: bool) -> Result<()> {
    info!("Concatenating title and abstract of {:?} into {:?}", input, output);

    let rows = concatenate_columns(&input, &output)
        .with_context(|| format!("Concatenating {} failed", input.display()))?;

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "output": output.to_string_lossy().to_string(),
            "rows_written": rows,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Wrote {} rows to {}", rows, output.display());
    }

    Ok(())
}

fn inspect_dataset(input: PathBuf, limit: usize) -> Result<()> {
    info!("Inspecting dataset: {:?}", input);

    let mut reader = open_dataset(&input)?;
    let mut count = 0;

    while count < limit {
        let Some(result) = reader.next() else {
            break;
        };
        let record = result?;
        println!(
            "Record #{}: {}",
            record.source_line,
            serde_json::to_string_pretty(&record.data)?
        );
        count += 1;
    }

    info!(
        "Processed {} records ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

fn count_dataset(input: PathBuf, lines_only: bool, json_output: bool) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    info!("Counting records in: {:?}", input);

    let count = if lines_only {
        count_lines(&input)?
    } else {
        let mut reader = open_dataset(&input)?;

        let pb = if let Some(total) = reader.total_bytes() {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut count = 0u64;
        while let Some(result) = reader.next() {
            let _record = result?;
            count += 1;

            if let Some(ref pb) = pb {
                pb.set_position(reader.bytes_processed());
            }

            if count % 100_000 == 0 {
                info!("Processed {} records...", count);
            }
        }

        if let Some(pb) = pb {
            pb.finish();
        }
        info!("Processed {} bytes", reader.bytes_processed());
        count
    };

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "records": count,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Total records: {}", count);
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_preprocess_flags() {
        let cli = Cli::parse_from([
            "arxprep",
            "preprocess",
            "-i",
            "in.json",
            "-o",
            "out.csv",
            "--chunk-size",
            "500",
            "--keep",
            "last",
            "--keep-empty",
            "--append",
        ]);

        match cli.command {
            Commands::Preprocess {
                input,
                chunk_size,
                keep,
                keep_empty,
                include_id,
                append,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(chunk_size, Some(500));
                assert!(matches!(keep, Some(KeepArg::Last)));
                assert!(keep_empty);
                assert!(!include_id);
                assert!(append);
            }
            _ => panic!("expected preprocess"),
        }
    }

    #[test]
    fn test_preprocess_counts_by_default() {
        let cli = Cli::parse_from(["arxprep", "preprocess", "-i", "in.json", "-o", "out.csv"]);
        assert!(matches!(cli.command, Commands::Preprocess { no_count: false, .. }));

        let cli = Cli::parse_from(["arxprep", "preprocess", "-c", "run.yaml", "--no-count"]);
        assert!(matches!(cli.command, Commands::Preprocess { no_count: true, .. }));
    }

    #[test]
    fn test_preprocess_failure_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arxiv.json");
        std::fs::write(&input, "{\"title\": \"Neutron stars\", \"update_date\": \"soon\"}\n").unwrap();

        let overrides = RunConfig {
            input: Some(input),
            output: Some(dir.path().join("out.csv")),
            ..Default::default()
        };
        let err = preprocess(None, overrides, None, true, false).unwrap_err();
        assert!(err.to_string().contains("Preprocessing"));
    }

    #[test]
    fn test_sample_default_rows() {
        let cli = Cli::parse_from(["arxprep", "sample", "-i", "a.csv", "-o", "b.csv"]);
        match cli.command {
            Commands::Sample { rows, .. } => assert_eq!(rows, DEFAULT_SAMPLE_ROWS),
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn test_preprocess_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("arxiv.json");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "{\"title\": \"Neutron stars\", \"categories\": \"astro-ph\", \"update_date\": \"2019-07-08\"}\n",
        )
        .unwrap();

        let overrides = RunConfig {
            input: Some(input),
            output: Some(output.clone()),
            ..Default::default()
        };
        preprocess(None, overrides, None, true, true).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "text,categories,update_date\nneutron star,astro-ph,2019-07-08\n"
        );
    }

    #[test]
    fn test_save_config_writes_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("run.yaml");
        let overrides = RunConfig {
            chunk_size: Some(42),
            ..Default::default()
        };

        preprocess(None, overrides, Some(saved.clone()), true, false).unwrap();

        let loaded = RunConfig::load(&saved).unwrap();
        assert_eq!(loaded.chunk_size, Some(42));
        assert!(loaded.input.is_none());
    }
}

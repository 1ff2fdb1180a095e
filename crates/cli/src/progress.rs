//! Progress reporting and visualization for CLI

use std::path::Path;

use arxprep_core::{PipelineStats, ProgressObserver};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Record-based progress reporter for the preprocessing pipeline
pub struct ProgressReporter {
    _multi: MultiProgress,
    main_bar: ProgressBar,
    stats_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter; with no known total the bar becomes a counter.
    pub fn new(total_records: Option<u64>) -> Self {
        let multi = MultiProgress::new();

        let main_bar = match total_records {
            Some(total) => {
                let bar = multi.add(ProgressBar::new(total));
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec}) {msg}")
                        .unwrap()
                        .progress_chars("█▓▒░-"),
                );
                bar
            }
            None => {
                let bar = multi.add(ProgressBar::new_spinner());
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("[{elapsed_precise}] {spinner} {human_pos} records ({per_sec}) {msg}")
                        .unwrap(),
                );
                bar
            }
        };

        let stats_bar = multi.add(ProgressBar::new(0));
        stats_bar.set_style(
            ProgressStyle::default_bar()
                .template("Stats: {msg}")
                .unwrap(),
        );

        Self {
            _multi: multi,
            main_bar,
            stats_bar,
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.main_bar.finish_with_message("Complete!");
        self.stats_bar.finish();
    }

    /// Stop drawing after a failed run, leaving the last state visible
    pub fn abandon(&self) {
        self.main_bar.abandon_with_message("Failed");
        self.stats_bar.abandon();
    }

    fn stats_message(stats: &PipelineStats) -> String {
        let mut msg = format!(
            "{} chunks | {} written",
            stats.chunks_processed,
            Self::format_number(stats.rows_written)
        );
        if stats.duplicates_dropped > 0 {
            msg.push_str(&format!(
                " | {} duplicates ({:.1}%)",
                Self::format_number(stats.duplicates_dropped),
                stats.deduplication_rate()
            ));
        }
        if stats.empty_dropped > 0 {
            msg.push_str(&format!(" | {} empty", Self::format_number(stats.empty_dropped)));
        }
        msg
    }

    /// Format large numbers with thousand separators
    fn format_number(n: usize) -> String {
        if n >= 1_000_000 {
            format!("{:.1}M", n as f64 / 1_000_000.0)
        } else if n >= 1_000 {
            format!("{:.1}K", n as f64 / 1_000.0)
        } else {
            n.to_string()
        }
    }
}

impl ProgressObserver for ProgressReporter {
    fn chunk_processed(&self, records: usize, stats: &PipelineStats) {
        self.main_bar.inc(records as u64);
        self.main_bar.set_message("Processing...");
        self.stats_bar.set_message(Self::stats_message(stats));
    }
}

/// Print a formatted summary report
pub fn print_summary_report(input: &Path, output: &Path, stats: &PipelineStats) {
    println!("\n{}", "═".repeat(60));
    println!("Preprocessing Complete");
    println!("{}", "═".repeat(60));
    println!("Input:              {}", input.display());
    println!("Output:             {}", output.display());
    println!("Records read:       {}", format_with_commas(stats.records_read));
    println!("Chunks:             {}", format_with_commas(stats.chunks_processed));

    if stats.duplicates_dropped > 0 {
        println!(
            "Duplicates removed: {} ({:.1}%)",
            format_with_commas(stats.duplicates_dropped),
            stats.deduplication_rate()
        );
    }

    if stats.empty_dropped > 0 {
        println!(
            "Empty text dropped: {}",
            format_with_commas(stats.empty_dropped)
        );
    }

    println!(
        "Rows written:       {} ({:.1}%)",
        format_with_commas(stats.rows_written),
        stats.retention_rate()
    );

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

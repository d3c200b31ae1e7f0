//! # CLI Module
//!
//! Command-line interface for the histogram pairing engine.
//!
//! ## Usage
//! ```bash
//! # Pair a directory and copy the ranked sequence
//! luma-pairs pair ~/Photos --output ~/Photos-paired
//!
//! # Preview the naming without copying
//! luma-pairs pair ~/Photos --dry-run
//!
//! # Score a single pair with another algorithm
//! luma-pairs compare a.jpg b.jpg --scorer ratio
//!
//! # Dump histograms for gnuplot
//! luma-pairs histogram a.jpg b.jpg --out-dir /tmp/hist
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use luma_pairs::core::comparator::PairwiseComparator;
use luma_pairs::core::histogram::{dat_path_for, Histogram, JpegDecoder};
use luma_pairs::core::pipeline::{Pipeline, PipelineResult};
use luma_pairs::core::scorer::{ScorerConfig, ScorerKind};
use luma_pairs::error::Result;
use luma_pairs::events::{CompareEvent, Event, EventChannel, PipelineEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Luma Pairs - Pair similar photos by luminance histogram
#[derive(Parser, Debug)]
#[command(name = "luma-pairs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pair every image of a directory and copy the ranked sequence
    Pair {
        /// Directory holding the JPEG files
        directory: PathBuf,

        /// Directory receiving the numbered copies
        #[arg(short, long, required_unless_present = "dry_run")]
        output: Option<PathBuf>,

        /// Similarity algorithm
        #[arg(short, long, default_value = "correlation")]
        scorer: Scorer,

        /// Worker threads (defaults to the number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Decode images once per pair instead of once per run
        #[arg(long)]
        no_cache: bool,

        /// Show the planned names without copying anything
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Score a single pair of images
    Compare {
        first: PathBuf,
        second: PathBuf,

        /// Similarity algorithm
        #[arg(short, long, default_value = "correlation")]
        scorer: Scorer,
    },

    /// Write the `.dat` histogram dump of each image
    Histogram {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the dumps (defaults to next to each image)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scorer {
    /// Cross-correlation of the histograms (default)
    Correlation,
    /// Normalized sum of absolute bin differences
    Difference,
    /// Mean ratio of matching bins
    Ratio,
}

impl From<Scorer> for ScorerKind {
    fn from(scorer: Scorer) -> Self {
        match scorer {
            Scorer::Correlation => ScorerKind::Correlation,
            Scorer::Difference => ScorerKind::AbsoluteDifference,
            Scorer::Ratio => ScorerKind::BinRatio,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (one ranked pair per line)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    luma_pairs::init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Pair {
            directory,
            output,
            scorer,
            jobs,
            no_cache,
            dry_run,
            format,
        } => run_pair(
            directory,
            output,
            scorer.into(),
            jobs,
            !no_cache,
            dry_run,
            format,
        ),
        Commands::Compare {
            first,
            second,
            scorer,
        } => run_compare(&first, &second, scorer.into()),
        Commands::Histogram { files, out_dir } => run_histogram(&files, out_dir.as_deref()),
    }
}

fn run_pair(
    directory: PathBuf,
    output: Option<PathBuf>,
    scorer: ScorerKind,
    jobs: Option<usize>,
    use_cache: bool,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(format, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Luma Pairs").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let mut builder = Pipeline::builder()
        .source_dir(directory)
        .scorer(scorer)
        .use_cache(use_cache)
        .threads(jobs)
        .dry_run(dry_run);
    if let Some(output) = output {
        builder = builder.output_dir(output);
    }
    let pipeline = builder.build()?;

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress_clone else {
            for _ in receiver.iter() {}
            return;
        };
        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Scan(ScanEvent::Completed { total_photos, .. }) => {
                    pb.set_message(format!("{} photos", total_photos));
                }
                Event::Compare(CompareEvent::Started {
                    total_comparisons, ..
                }) => {
                    pb.set_length(total_comparisons as u64);
                    pb.set_position(0);
                }
                Event::Compare(CompareEvent::Progress(p)) => {
                    pb.set_position(p.comparisons_completed as u64);
                }
                Event::Compare(CompareEvent::PairSkipped {
                    reference,
                    candidate,
                    message,
                }) => {
                    pb.println(format!(
                        "  {} skipped {} / {}: {}",
                        style("!").yellow(),
                        display_path(&reference),
                        display_path(&candidate),
                        message
                    ));
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let result = result?;

    match format {
        OutputFormat::Pretty => print_pretty_results(&term, &result, dry_run),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult, dry_run: bool) {
    term.write_line(&format!("{} Pairing Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} photos compared in {:.1}s",
        style(result.photos.len()).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} pairs scored, {} skipped",
        style(result.comparison.comparisons).cyan(),
        style(result.comparison.failures.len()).yellow()
    ))
    .ok();
    if result.comparison.cache_hits > 0 {
        term.write_line(&format!(
            "  {} cache hits",
            style(result.comparison.cache_hits).dim()
        ))
        .ok();
    }
    term.write_line("").ok();

    if result.ranked.is_empty() {
        term.write_line("  No pairs to rank.").ok();
        return;
    }

    term.write_line(&format!("{}", style("Ranked Pairs:").bold().underlined()))
        .ok();
    for (k, pair) in result.ranked.iter().enumerate() {
        term.write_line(&format!(
            "  {:>3}. {}  {}  {}",
            k,
            style(format!("{:>9.6}", pair.rank)).yellow(),
            display_path(&pair.image_a),
            display_path(&pair.image_b)
        ))
        .ok();
    }
    term.write_line("").ok();

    let verb = if dry_run { "Would copy" } else { "Copied" };
    term.write_line(&format!(
        "{} {} files into {}",
        style(verb).bold(),
        result.plan.len(),
        display_path(&result.plan.destination)
    ))
    .ok();
    for op in &result.plan.operations {
        let name = op
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        term.write_line(&format!(
            "    {} {} {}",
            style(name).cyan(),
            style("<-").dim(),
            display_path(&op.source)
        ))
        .ok();
    }
}

fn print_minimal_results(result: &PipelineResult) {
    for pair in &result.ranked {
        println!(
            "{}\t{}\t{}",
            pair.rank,
            pair.image_a.display(),
            pair.image_b.display()
        );
    }
}

fn run_compare(first: &Path, second: &Path, scorer: ScorerKind) -> Result<()> {
    let decoder = JpegDecoder::new();
    let scorer = ScorerConfig::new().kind(scorer).build()?;
    let comparator = PairwiseComparator::new(&decoder, scorer.as_ref());

    match comparator.compare_pair(first, second)? {
        Some(value) => println!("{}", value),
        None => println!("undefined"),
    }
    Ok(())
}

fn run_histogram(files: &[PathBuf], out_dir: Option<&Path>) -> Result<()> {
    let decoder = JpegDecoder::new();

    for file in files {
        let histogram = Histogram::from_file(&decoder, file)?;
        let dat = dat_path_for(file, out_dir);
        histogram.write_dat(&dat)?;
        println!("{}", dat.display());
    }
    Ok(())
}

/// Show paths under the home directory as `~/...`
fn display_path(path: &Path) -> String {
    let relative = dirs::home_dir().and_then(|home| {
        path.strip_prefix(&home)
            .ok()
            .map(|rest| format!("~/{}", rest.display()))
    });
    relative.unwrap_or_else(|| path.display().to_string())
}

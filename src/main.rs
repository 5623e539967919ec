use clap::{Parser, Subcommand};
use proofsheet::analyze::{self, AnalyzedPhoto, Manifest};
use proofsheet::{brief, insights, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Shared flags for commands that run the analysis batch.
#[derive(clap::Args, Clone)]
struct AnalyzeArgs {
    /// Image files or directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Where to write the analysis manifest
    #[arg(long, default_value = "proofsheet.json")]
    manifest: PathBuf,

    /// Worker threads (capped at available cores)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser)]
#[command(name = "proofsheet")]
#[command(about = "Batch photo quality scoring and gallery insights")]
#[command(long_about = "\
Batch photo quality scoring and gallery insights

Point proofsheet at a shoot and it scores every frame on objective metrics
(brightness, contrast, saturation, sharpness, clipping, entropy), tags each
one, and checks the gallery against a client brief.

Typical flow:

  proofsheet gen-brief > brief.toml        # edit to taste
  proofsheet report shoot/ --brief brief.toml

Per-photo records land in a JSON manifest (sorted by descending score), so
insights can be recomputed later without re-reading pixels:

  proofsheet analyze shoot/ --manifest shoot.json
  proofsheet insights --manifest shoot.json --brief brief.toml

Files that fail to decode are reported and skipped; a bad frame never aborts
the batch.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a batch of photos and write the analysis manifest
    Analyze(AnalyzeArgs),
    /// Analyze, then print insights and the score histogram in one run
    Report {
        #[command(flatten)]
        analyze: AnalyzeArgs,

        /// Client brief TOML (defaults to an open brief)
        #[arg(long)]
        brief: Option<PathBuf>,
    },
    /// Recompute insights and the histogram from a saved manifest
    Insights {
        /// Analysis manifest from a previous run
        #[arg(long, default_value = "proofsheet.json")]
        manifest: PathBuf,

        /// Client brief TOML (defaults to an open brief)
        #[arg(long)]
        brief: Option<PathBuf>,
    },
    /// Print a stock brief.toml with all options documented
    GenBrief,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => {
            run_analysis(&args)?;
        }
        Command::Report {
            analyze: args,
            brief: brief_path,
        } => {
            let photos = run_analysis(&args)?;
            let brief = load_brief(brief_path.as_deref())?;
            println!();
            output::print_insights(&insights::generate_insights(&photos, &brief));
            println!();
            output::print_histogram(&insights::build_histogram(&photos));
        }
        Command::Insights {
            manifest,
            brief: brief_path,
        } => {
            let content = std::fs::read_to_string(&manifest)?;
            let manifest: Manifest = serde_json::from_str(&content)?;
            let brief = load_brief(brief_path.as_deref())?;
            output::print_insights(&insights::generate_insights(&manifest.photos, &brief));
            println!();
            output::print_histogram(&insights::build_histogram(&manifest.photos));
        }
        Command::GenBrief => {
            print!("{}", brief::stock_brief_toml());
        }
    }

    Ok(())
}

fn load_brief(path: Option<&std::path::Path>) -> Result<brief::ClientBrief, brief::BriefError> {
    match path {
        Some(p) => brief::load_brief(p),
        None => Ok(brief::ClientBrief::default()),
    }
}

/// Discover inputs, run the batch with live progress, write the manifest,
/// and print the gallery listing. Records come back sorted by descending
/// score (name breaks ties, keeping output deterministic).
fn run_analysis(args: &AnalyzeArgs) -> Result<Vec<AnalyzedPhoto>, Box<dyn std::error::Error>> {
    let files = scan::collect_inputs(&args.paths)?;
    if files.is_empty() {
        return Err("no image files found in the given paths".into());
    }
    init_thread_pool(args.threads);

    println!("==> Analyzing {} files", files.len());
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_progress_event(&event));
        }
    });
    let result = analyze::analyze_batch(&files, Some(tx));
    printer.join().unwrap();

    if result.photos.is_empty() {
        return Err(format!("all {} input files failed to analyze", result.failures.len()).into());
    }

    let mut photos = result.photos;
    photos.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let manifest = Manifest {
        photos: photos.clone(),
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&args.manifest, json)?;

    println!();
    output::print_gallery(&photos, &result.failures);
    println!();
    println!("Manifest: {}", args.manifest.display());

    Ok(photos)
}

/// Initialize the rayon thread pool.
///
/// Caps at the number of available CPU cores — the flag can constrain down,
/// not up.
fn init_thread_pool(threads: Option<usize>) {
    let Some(requested) = threads else {
        return; // rayon's default already uses every core
    };
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(requested.clamp(1, available))
        .build_global()
        .ok();
}

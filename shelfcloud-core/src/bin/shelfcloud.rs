//! Command-line front end for the catalog and column word clouds.
//!
//! ```bash
//! # List classification codes with record counts
//! shelfcloud codes --data physical_usage.csv
//!
//! # Clean a subject heading
//! shelfcloud clean "United States -- History -- Civil War, 1861-1865; Slavery."
//!
//! # Render the cloud for one code
//! shelfcloud render --code M --out music.png
//!
//! # Render one column of an arbitrary CSV (V2 cleaning)
//! shelfcloud column titles.csv --column Title --out titles.png
//! ```

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use shelfcloud_core::analyzer::{StopWords, TextNormalizer};
use shelfcloud_core::config::{load_from, AppConfig};
use shelfcloud_core::dataset::{Dataset, DatasetError};
use shelfcloud_core::error::AppError;
use shelfcloud_core::render::{RenderedCloud, TileCloudRenderer};
use shelfcloud_core::view::{CloudPanel, ColumnCloud, SubjectCloud};
use shelfcloud_types::{ColumnSelector, NormalizerVersion};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt};

#[derive(Debug, Parser)]
#[command(
    name = "shelfcloud",
    version,
    about = "Word clouds from library catalog subject headings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
    /// Configuration file layered above `config/shelfcloud.*`.
    #[arg(global = true, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List classification codes with their record counts.
    Codes(DataArgs),
    /// Clean text with one of the normalizer variants.
    Clean(CleanArgs),
    /// Render the word cloud for one classification code.
    Render(RenderArgs),
    /// Render the word cloud for one column of any CSV file.
    Column(ColumnArgs),
}

#[derive(Debug, Args)]
struct DataArgs {
    /// Catalog CSV; overrides `data.path` from configuration.
    #[arg(long, value_name = "CSV")]
    data: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CleanArgs {
    /// Normalizer variant (v1 or v2).
    #[arg(long, default_value = "v1")]
    variant: NormalizerVersion,
    /// Text to clean; lines are read from stdin when omitted.
    text: Option<String>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// PNG output path.
    #[arg(long, value_name = "PNG", default_value = "wordcloud.png")]
    out: PathBuf,
    /// Print a `data:image/png;base64,...` URI instead of writing a file.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Classification code; the first code is used when omitted.
    #[arg(long)]
    code: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ColumnArgs {
    /// CSV file with a header row.
    file: PathBuf,
    /// Column header name.
    #[arg(long, required_unless_present = "index", conflicts_with = "index")]
    column: Option<String>,
    /// Zero-based column position.
    #[arg(long)]
    index: Option<usize>,
    /// Number of rows to preview before rendering.
    #[arg(long, default_value_t = 5)]
    preview: usize,
    /// Normalizer variant (v1 or v2).
    #[arg(long, default_value = "v2")]
    variant: NormalizerVersion,
    #[command(flatten)]
    output: OutputArgs,
}

impl ColumnArgs {
    fn selector(&self) -> ColumnSelector {
        match (&self.column, self.index) {
            (Some(name), _) => ColumnSelector::from(name.as_str()),
            (None, Some(index)) => ColumnSelector::from(index),
            (None, None) => ColumnSelector::from(0usize),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose));

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = load_from(cli.config.as_deref())?;
    let stop_words = StopWords::default();

    match cli.command {
        Commands::Codes(args) => {
            let dataset = load_dataset(&cfg, &args, &stop_words);
            for option in dataset.code_options() {
                println!("{option}");
            }
        }
        Commands::Clean(args) => {
            let normalizer = TextNormalizer::new(args.variant, &stop_words);
            match args.text {
                Some(text) => println!("{}", normalizer.normalize(Some(&text))),
                None => {
                    for line in io::stdin().lock().lines() {
                        println!("{}", normalizer.normalize(Some(&line?)));
                    }
                }
            }
        }
        Commands::Render(args) => {
            let dataset = load_dataset(&cfg, &args.data, &stop_words);
            let renderer = TileCloudRenderer::new(cfg.render.clone());
            let view = SubjectCloud::with_view_config(&dataset, renderer, cfg.view.clone());

            let code = args.code.as_deref().or_else(|| view.default_selection());
            let panel = view.update(code);
            emit_panel(&panel, &args.output)?;
            for line in panel.top_subjects() {
                println!("{line}");
            }
        }
        Commands::Column(args) => {
            let normalizer = TextNormalizer::new(args.variant, &stop_words);
            let renderer = TileCloudRenderer::new(cfg.render.clone());
            let mut view = ColumnCloud::new(normalizer, renderer);

            let file = fs::File::open(&args.file).map_err(|source| DatasetError::Io {
                path: args.file.clone(),
                source,
            })?;
            view.upload(file)?;

            println!("{}", view.columns().join(","));
            for row in view.preview(args.preview) {
                println!("{}", row.iter().collect::<Vec<_>>().join(","));
            }

            let panel = view.generate(&args.selector());
            emit_panel(&panel, &args.output)?;
        }
    }

    Ok(())
}

fn load_dataset(cfg: &AppConfig, args: &DataArgs, stop_words: &StopWords) -> Dataset {
    let path = args.data.as_deref().unwrap_or(&cfg.data.path);
    let normalizer = TextNormalizer::new(cfg.data.normalizer, stop_words);
    Dataset::load(path, &cfg.data.columns, &normalizer)
}

fn emit_panel(panel: &CloudPanel, output: &OutputArgs) -> Result<(), AppError> {
    match panel {
        CloudPanel::Message(message) => println!("{message}"),
        CloudPanel::Rendered { image, .. } if output.data_uri => println!("{}", image.data_uri()),
        CloudPanel::Rendered { image, .. } => write_png(image, &output.out)?,
    }
    Ok(())
}

fn write_png(image: &RenderedCloud, path: &Path) -> Result<(), AppError> {
    fs::write(path, &image.png_data).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "wrote word cloud"
    );
    Ok(())
}

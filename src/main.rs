use clap::{Parser, ValueEnum};
use linknizer::links::LinkStyle;
use linknizer::output;
use linknizer::pipeline::{self, BuildOptions};
use linknizer::tree::{EntryOrder, TraverseOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "linknizer")]
#[command(about = "Generate a browsable static HTML index of a directory")]
#[command(long_about = "\
Generate a browsable static HTML index of a directory

The directory is scanned into a keyed tree and written as
website_resource/listing.json next to a rendered index.html.

Site inputs, read from the working directory (see --work-dir):

  metadata.json                    # heading and colors (all four keys required)
  template.html                    # page shell, $$__HEADING__$$ placeholder
  website_resource/                # copied into the scanned directory
  └── css/style.css                # color placeholders

metadata.json:

  {
    \"heading\": \"\",                # empty → Index
    \"background_color\": \"\",       # empty → aliceblue
    \"folder_color\": \"\",           # empty → #00b894
    \"file_color\": \"\"              # empty → #ff5252
  }")]
#[command(version)]
struct Cli {
    /// Directory to index
    #[arg(long)]
    dir: PathBuf,

    /// Directory holding metadata.json, template.html and website_resource/
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// Order of entries within each folder
    #[arg(long, value_enum, default_value = "filesystem")]
    order: EntryOrder,

    /// How file links are derived from the scanned directory
    #[arg(long, value_enum, default_value = "relative")]
    links: LinkStyle,

    /// Print the indexed tree
    #[arg(long)]
    tree: bool,

    #[arg(long, short, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    debug!("Parsed CLI arguments: {cli:?}");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Program is exiting...");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), pipeline::BuildError> {
    let options = BuildOptions {
        root: cli.dir.clone(),
        work_dir: cli.work_dir.clone(),
        traverse: TraverseOptions {
            order: cli.order,
            links: cli.links,
        },
    };

    println!("==> Indexing {}", cli.dir.display());
    let report = pipeline::build(&options)?;
    output::print_build_output(&report);
    if cli.tree {
        output::print_tree_output(&report.tree);
    }
    println!("Done.");
    Ok(())
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

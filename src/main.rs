//! # Folio CLI
//!
//! Usage:
//!   folio faction -o faction.pdf
//!   folio lazy-dm --config style.json
//!   folio all --out-dir templates/

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::warn;

use folio::{FolioError, Style, TemplateKind};

/// Generate printable session-prep PDF templates for the reMarkable 2.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Which template to generate.
    #[arg(value_enum)]
    template: Which,

    /// Output file (defaults to the template's own file name).
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory to write into when generating every template.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON file overriding layout settings (margin, line heights, colors, device).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Which {
    Faction,
    LazyDm,
    All,
}

impl Which {
    fn kinds(self) -> Vec<TemplateKind> {
        match self {
            Which::Faction => vec![TemplateKind::Faction],
            Which::LazyDm => vec![TemplateKind::LazyDm],
            Which::All => TemplateKind::ALL.to_vec(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), FolioError> {
    let style = match &args.config {
        Some(path) => Style::from_json_file(path)?,
        None => Style::default(),
    };

    let kinds = args.template.kinds();
    let single = kinds.len() == 1;
    if !single && args.output.is_some() {
        warn!("--output is ignored when generating every template; use --out-dir");
    }
    for kind in kinds {
        let path = match (&args.output, &args.out_dir) {
            (Some(output), _) if single => output.clone(),
            (_, Some(dir)) => dir.join(kind.default_file_name()),
            _ => PathBuf::from(kind.default_file_name()),
        };
        let summary = folio::write_template(kind, &path, &style)?;
        println!("{}", summary);
    }
    Ok(())
}

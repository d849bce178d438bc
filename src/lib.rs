//! relayout: one-shot restructuring of a recommender web project's tree.
//!
//! A single run, in order:
//!
//! - lowercases the top-level `Algorithms`, `Datasets`, `Instance` and
//!   `Website_Results` directories
//! - moves `Frontend/Templates` to `templates` and `Frontend/Static` to
//!   `static`, then drops the empty `Frontend`
//! - normalizes `static/Css`, `static/Images` and `static/JS Files`
//! - rewrites path references in `app.py`, `original_lightgcn.py` and every
//!   `*.html` under `templates`
//!
//! Every stage is a no-op when its inputs are missing, so running twice
//! leaves the same tree as running once.
//!
//! ```bash
//! # Restructure the current directory
//! relayout
//!
//! # Restructure another checkout and print a JSON report
//! relayout --dir ../recsys --format json
//! ```

pub mod core;

use crate::core::{error, pipeline, report::RunReport, tui};

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "relayout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Normalize a project's directory layout and rewrite path references"
)]
struct Cli {
    /// Project root to restructure (defaults to current working directory).
    #[clap(short, long)]
    dir: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

pub fn run() -> Result<(), error::RelayoutError> {
    let cli = Cli::parse();
    let root = match cli.dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(error::RelayoutError::PathError(format!(
            "project root is not a directory: {}",
            root.display()
        )));
    }

    let echo = cli.format == OutputFormat::Text;
    let mut report = RunReport::new(&root, echo);

    if echo {
        tui::render_box(
            "🚀 RESTRUCTURING PROJECT",
            &root.display().to_string(),
            tui::BoxStyle::Info,
        );
    }

    pipeline::run_stages(&root, &mut report)?;

    if echo {
        println!();
        tui::render_box(
            "✨ RESTRUCTURE COMPLETE",
            &format!("{} change(s) applied", report.actions.len()),
            tui::BoxStyle::Success,
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

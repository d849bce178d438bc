//! The restructuring pipeline.
//!
//! Five stages run strictly in order against the project root. Each stage
//! checks for its own inputs and does nothing when they are absent, which is
//! what makes a second run a no-op. The first error aborts the run; stages
//! that already finished are not rolled back.

use crate::core::error::RelayoutError;
use crate::core::layout;
use crate::core::relocate;
use crate::core::rename;
use crate::core::report::{Action, RunReport, display_path};
use crate::core::rewrite;
use crate::core::tui;
use std::path::Path;

/// One step of the restructuring.
pub struct Stage {
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    pub run: fn(&Path, &mut RunReport) -> Result<(), RelayoutError>,
}

/// All stages in execution order
pub fn all_stages() -> Vec<Stage> {
    vec![
        Stage {
            name: "normalize-top-level",
            description: "Lowercase top-level directories",
            run: normalize_top_level,
        },
        Stage {
            name: "relocate-assets",
            description: "Move templates and static assets out of Frontend",
            run: relocate_assets,
        },
        Stage {
            name: "normalize-static",
            description: "Normalize static asset folder names",
            run: normalize_static,
        },
        Stage {
            name: "rewrite-sources",
            description: "Update path references in source files",
            run: rewrite_sources,
        },
        Stage {
            name: "rewrite-templates",
            description: "Update asset URLs in templates",
            run: rewrite_templates,
        },
    ]
}

/// Run every stage against `root`, stopping at the first error.
pub fn run_stages(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    for stage in all_stages() {
        if report.echo() {
            tui::print_section(stage.description);
        }
        let before = report.actions.len();
        (stage.run)(root, report)?;
        let recorded = report.actions.len() - before;
        report.finish_stage(stage.name, recorded);
    }
    Ok(())
}

fn record_rename(
    root: &Path,
    report: &mut RunReport,
    old: &str,
    new: &str,
) -> Result<(), RelayoutError> {
    if let Some(done) = rename::safe_rename(&root.join(old), &root.join(new))? {
        report.record(Action::Renamed {
            from: display_path(root, &done.from),
            to: display_path(root, &done.to),
        });
    }
    Ok(())
}

pub fn normalize_top_level(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    for dir in layout::TOP_LEVEL_DIRS {
        record_rename(root, report, dir, &dir.to_lowercase())?;
    }
    Ok(())
}

pub fn relocate_assets(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    let container = root.join(layout::CONTAINER_DIR);
    if !container.exists() {
        return Ok(());
    }

    for (from, to) in layout::RELOCATIONS {
        if let Some(moved) = relocate::relocate(&root.join(from), &root.join(to))? {
            report.record(Action::Moved {
                from: display_path(root, &moved.from),
                to: display_path(root, &moved.to),
                replaced: moved.replaced,
            });
        }
    }

    if relocate::remove_container(&container) {
        report.record(Action::Removed {
            path: layout::CONTAINER_DIR.to_string(),
        });
    }
    Ok(())
}

pub fn normalize_static(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    if !root.join(layout::STATIC_DIR).is_dir() {
        return Ok(());
    }
    for (old, new) in layout::STATIC_RENAMES {
        record_rename(root, report, old, new)?;
    }
    Ok(())
}

pub fn rewrite_sources(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    let rules = rewrite::source_rules();
    for file in layout::SOURCE_FILES {
        let path = root.join(file);
        if !path.is_file() {
            continue;
        }
        let changed = rewrite::rewrite_file(&path, &rules)?;
        report.record(Action::Rewritten {
            path: display_path(root, &path),
            changed,
        });
    }
    Ok(())
}

pub fn rewrite_templates(root: &Path, report: &mut RunReport) -> Result<(), RelayoutError> {
    let rules = rewrite::markup_rules();
    let templates = root.join(layout::TEMPLATES_DIR);
    for path in rewrite::collect_files_with_suffix(&templates, layout::MARKUP_SUFFIX)? {
        let changed = rewrite::rewrite_file(&path, &rules)?;
        report.record(Action::Rewritten {
            path: display_path(root, &path),
            changed,
        });
    }
    Ok(())
}

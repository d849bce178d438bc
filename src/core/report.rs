//! Run report: what each stage actually did.
//!
//! No-ops are never recorded. In text mode every recorded action is echoed to
//! the terminal as it happens; in JSON mode the whole report is printed at the end.

use crate::core::tui::{self, ItemStatus};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Renamed {
        from: String,
        to: String,
    },
    Moved {
        from: String,
        to: String,
        replaced: bool,
    },
    Removed {
        path: String,
    },
    Rewritten {
        path: String,
        changed: bool,
    },
}

impl Action {
    fn status(&self) -> ItemStatus {
        match self {
            Action::Renamed { .. } => ItemStatus::Renamed,
            Action::Moved { replaced: true, .. } => ItemStatus::Replaced,
            Action::Moved { .. } => ItemStatus::Moved,
            Action::Removed { .. } => ItemStatus::Removed,
            Action::Rewritten { changed: true, .. } => ItemStatus::Updated,
            Action::Rewritten { .. } => ItemStatus::Unchanged,
        }
    }

    fn describe(&self) -> String {
        match self {
            Action::Renamed { from, to } => format!("{} -> {}", from, to),
            Action::Moved { from, to, replaced } => {
                if *replaced {
                    format!("{} -> {} (replaced existing)", from, to)
                } else {
                    format!("{} -> {}", from, to)
                }
            }
            Action::Removed { path } => format!("removed {}", path),
            Action::Rewritten { path, changed } => {
                if *changed {
                    format!("updated {}", path)
                } else {
                    format!("{} (no references)", path)
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StageSummary {
    pub name: &'static str,
    pub actions: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub root: String,
    pub stages: Vec<StageSummary>,
    pub actions: Vec<Action>,
    #[serde(skip)]
    echo: bool,
}

impl RunReport {
    pub fn new(root: &Path, echo: bool) -> Self {
        RunReport {
            root: root.display().to_string(),
            stages: Vec::new(),
            actions: Vec::new(),
            echo,
        }
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn record(&mut self, action: Action) {
        if self.echo {
            tui::print_item(&action.describe(), action.status());
        }
        self.actions.push(action);
    }

    pub fn finish_stage(&mut self, name: &'static str, actions: usize) {
        self.stages.push(StageSummary { name, actions });
    }
}

/// Render `path` relative to `root` with forward slashes, for display.
pub fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

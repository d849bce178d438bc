//! Core modules for relayout.
//!
//! Layout tables, filesystem primitives, the rewrite rules and the pipeline
//! that strings them together.

pub mod error;
pub mod layout;
pub mod pipeline;
pub mod relocate;
pub mod rename;
pub mod report;
pub mod rewrite;
pub mod tui;

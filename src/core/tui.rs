use std::env;

const MIN_BOX_WIDTH: usize = 40;
const MAX_BOX_WIDTH: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxStyle {
    Info,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemStatus {
    Renamed,
    Moved,
    Replaced,
    Removed,
    Updated,
    Unchanged,
}

impl ItemStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ItemStatus::Renamed => "✅",
            ItemStatus::Moved => "📦",
            ItemStatus::Replaced => "♻️",
            ItemStatus::Removed => "🗑",
            ItemStatus::Updated => "🎨",
            ItemStatus::Unchanged => "➖",
        }
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color;
        match self {
            ItemStatus::Renamed | ItemStatus::Moved => Color::BrightGreen,
            ItemStatus::Replaced | ItemStatus::Updated => Color::BrightYellow,
            ItemStatus::Removed | ItemStatus::Unchanged => Color::BrightBlack,
        }
    }
}

/// Columns available, from `TERM_WIDTH` or `COLUMNS`, else 80.
fn terminal_width() -> usize {
    ["TERM_WIDTH", "COLUMNS"]
        .iter()
        .find_map(|key| env::var(key).ok()?.parse().ok())
        .unwrap_or(80)
}

fn effective_width() -> usize {
    terminal_width().clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH)
}

fn indent() -> usize {
    terminal_width().saturating_sub(effective_width()) / 2
}

fn bounded(width: usize) -> usize {
    width.max(MIN_BOX_WIDTH).min(effective_width())
}

fn box_edge(left: char, right: char, width: usize) -> String {
    format!("{}{}{}", left, "═".repeat(bounded(width) - 2), right)
}

pub fn box_top(width: usize) -> String {
    box_edge('╔', '╗', width)
}

pub fn box_bottom(width: usize) -> String {
    box_edge('╚', '╝', width)
}

/// Center `content` between `left` and `right` in a row of `width` columns.
pub fn box_row(left: &str, content: &str, right: &str, width: usize) -> String {
    let padding = bounded(width)
        .saturating_sub(2)
        .saturating_sub(content.chars().count());
    let before = padding / 2;
    format!(
        "{left}{}{content}{}{right}",
        " ".repeat(before),
        " ".repeat(padding - before)
    )
}

pub fn render_box(title: &str, subtitle: &str, style: BoxStyle) {
    use colored::{Color, Colorize};

    let (accent, soft) = match style {
        BoxStyle::Info => (Color::BrightCyan, Color::Cyan),
        BoxStyle::Success => (Color::BrightGreen, Color::Green),
    };
    let width = effective_width();
    let pad = " ".repeat(indent());

    println!("{}{}", pad, box_top(width).color(accent));
    println!("{}{}", pad, box_row("║", title, "║", width).color(accent).bold());
    if !subtitle.is_empty() {
        println!("{}{}", pad, box_row("║", subtitle, "║", width).color(soft));
    }
    println!("{}{}", pad, box_bottom(width).color(accent));
}

pub fn print_item(item: &str, status: ItemStatus) {
    use colored::Colorize;

    println!(
        "{} {} {}",
        " ".repeat(indent() + 2),
        status.icon().color(status.color()),
        item.bright_white()
    );
}

pub fn print_section(title: &str) {
    use colored::Colorize;
    let indent_s = " ".repeat(indent() + 2);
    println!();
    println!("{}{}", indent_s, title.bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_row_pads_to_width() {
        let row = box_row("║", "hello", "║", MIN_BOX_WIDTH);
        assert_eq!(row.chars().count(), MIN_BOX_WIDTH);
        assert!(row.contains("hello"));
    }

    #[test]
    fn test_unchanged_items_are_dimmed() {
        assert_eq!(ItemStatus::Unchanged.color(), colored::Color::BrightBlack);
        assert_eq!(ItemStatus::Renamed.color(), colored::Color::BrightGreen);
    }

    #[test]
    fn test_box_edges_match_row_width() {
        assert_eq!(box_top(MIN_BOX_WIDTH).chars().count(), MIN_BOX_WIDTH);
        assert_eq!(box_bottom(MIN_BOX_WIDTH).chars().count(), MIN_BOX_WIDTH);
    }
}

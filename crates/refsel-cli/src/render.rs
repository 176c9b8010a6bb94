use colored::Colorize;
use refsel_core::present::NO_REFS_TEXT;
use refsel_core::{PaginatorControls, RefDropdown, SelectorView};
use refsel_types::RefType;

pub fn button(dropdown: &RefDropdown) -> String {
    let label = dropdown.label();
    let label = if label.is_empty() { "(nothing selected)".dimmed() } else { label.bold() };
    let marker = if dropdown.is_open() { "▾" } else { "▸" };
    format!("{marker} {label}")
}

fn tabs(ref_type: RefType) -> String {
    let (branches, tags) = ("Branches", "Tags");
    match ref_type {
        RefType::Tag => format!("  {}  {}", branches.dimmed(), tags.bold().underline()),
        RefType::Branch | RefType::Commit => format!("  {}  {}", branches.bold().underline(), tags.dimmed()),
    }
}

fn controls(controls: &PaginatorControls) -> Option<String> {
    let mut parts = Vec::new();
    if controls.reset {
        parts.push("reset".cyan().to_string());
    }
    if let Some(cursor) = &controls.next {
        parts.push(format!("{} (after {})", "next".cyan(), cursor));
    }
    (!parts.is_empty()).then(|| format!("  {}", parts.join("  ")))
}

pub fn view(view: &SelectorView) -> Vec<String> {
    let mut lines = Vec::new();
    match view {
        SelectorView::Loading { ref_type, show_tabs } => {
            if *show_tabs {
                lines.push(tabs(*ref_type));
            }
            lines.push(format!("  {}", "Loading...".dimmed()));
        }
        SelectorView::Error {
            ref_type,
            show_tabs,
            message,
        } => {
            if *show_tabs {
                lines.push(tabs(*ref_type));
            }
            lines.push(format!("  {} {}", "error:".red().bold(), message));
        }
        SelectorView::Listing {
            ref_type,
            show_tabs,
            placeholder,
            rows,
            controls: paging,
        } => {
            if *show_tabs {
                lines.push(tabs(*ref_type));
            }
            lines.push(format!("  [{}]", placeholder.dimmed()));
            if rows.is_empty() {
                lines.push(format!("  {}", NO_REFS_TEXT.dimmed()));
            }
            for (i, row) in rows.iter().enumerate() {
                let name = if row.is_selected {
                    format!("{} {}", "✓".green(), row.target.id().green().bold())
                } else {
                    format!("  {}", row.target.id())
                };
                let mut line = format!("  {:>3} {}", i + 1, name);
                if let Some(commit) = &row.commit {
                    line.push_str(&format!(" {}", commit.dimmed()));
                }
                if row.is_default {
                    line.push_str(&format!(" {}", "default".yellow()));
                }
                if row.can_drill {
                    line.push_str(&format!(" {}", "›".dimmed()));
                }
                lines.push(line);
            }
            lines.extend(controls(paging));
        }
        SelectorView::Drilldown { branch, rows } => {
            lines.push(format!("  {} {}", "Commits on".dimmed(), branch.yellow().bold()));
            for (i, row) in rows.iter().enumerate() {
                let line = match &row.short_id {
                    Some(short) => format!("  {:>3}   {} {}", i + 1, short.yellow(), row.text),
                    None => format!("  {:>3}   {}", i + 1, row.text.italic()),
                };
                lines.push(line);
            }
        }
        SelectorView::Finished(reference) => {
            lines.push(format!("  {} {}", "✓".green().bold(), reference));
        }
    }
    lines
}

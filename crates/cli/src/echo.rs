//! Progress output for `--verbose`. Everything goes to stderr so stdout only
//! ever carries the extracted article.

use owo_colors::OwoColorize;
use readability_core::ExtractedContent;

use crate::VERSION;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Success,
    Info,
    Warning,
}

pub fn print_banner() {
    eprintln!("\n{} {}", "readability".bold().bright_blue(), format!("v{}", VERSION).dimmed());
    eprintln!("{}", "Pull the main article out of an HTML page\n".dimmed());
}

/// `[step/total] message`
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_status(level: Level, message: &str) {
    match level {
        Level::Success => eprintln!("{} {}", "✓".green(), message.bright_green()),
        Level::Info => eprintln!("{} {}", "ℹ".blue(), message.bright_blue()),
        Level::Warning => eprintln!("{} {}", "⚠".yellow(), message.bright_yellow()),
    }
}

/// Label/value pairs describing how the article was produced.
pub fn extraction_rows(extracted: &ExtractedContent) -> Vec<(&'static str, String)> {
    let mut rows = match extracted.special_case {
        Some(case) => vec![("Special case", case.to_string())],
        None => vec![
            ("Top score", format!("{:.1}", extracted.top_score)),
            ("Elements", extracted.element_count.to_string()),
        ],
    };

    rows.push(("Retried", if extracted.retried { "yes" } else { "no" }.to_string()));
    rows.push(("Output", format_size(extracted.content.len())));
    rows
}

pub fn print_extraction_details(extracted: &ExtractedContent) {
    let rule = "═".repeat(RULE_WIDTH);
    eprintln!("\n{}\n{}\n{}", rule.dimmed(), "Extraction Details".bold().cyan(), rule.dimmed());

    let rows = extraction_rows(extracted);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or_default() + 1;
    for (label, value) in rows {
        eprintln!("  {} {}", format!("{:<width$}", format!("{}:", label)).dimmed(), value.bright_white());
    }
    eprintln!();
}

/// Human-readable byte count in B, KB or MB.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    let kb = bytes as f64 / KB as f64;

    match bytes {
        b if b < KB => format!("{} B", b),
        b if b < KB * KB => format!("{:.1} KB", kb),
        _ => format!("{:.1} MB", kb / KB as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readability_core::SpecialCase;

    fn extracted(special_case: Option<SpecialCase>) -> ExtractedContent {
        ExtractedContent {
            content: "<div><p>body</p></div>".to_string(),
            top_score: 42.0,
            element_count: 3,
            special_case,
            retried: true,
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_rows_for_heuristic_extraction() {
        let rows = extraction_rows(&extracted(None));
        let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();

        assert_eq!(labels, ["Top score", "Elements", "Retried", "Output"]);
        assert_eq!(rows[0].1, "42.0");
        assert_eq!(rows[2].1, "yes");
    }

    #[test]
    fn test_rows_for_special_case_skip_scores() {
        let rows = extraction_rows(&extracted(Some(SpecialCase::Vimeo)));
        assert_eq!(rows[0], ("Special case", "vimeo".to_string()));
        assert!(rows.iter().all(|(label, _)| *label != "Top score"));
    }
}

//! Terminal rendering for analysis results: ANSI-highlighted text and a
//! per-error detail list.

use educheck_core::{AnalysisResult, ErrorKind};
use educheck_grammar::highlight;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn kind_color(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Spelling => YELLOW,
        ErrorKind::Grammar => RED,
        ErrorKind::Style => BLUE,
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Spelling => "spelling",
        ErrorKind::Grammar => "grammar",
        ErrorKind::Style => "style",
    }
}

/// Render the extracted text with each error span colored by kind, or
/// bracketed when `color` is off.
pub fn annotated_text(text: &str, result: &AnalysisResult, color: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in highlight(text, &result.errors) {
        match segment.error {
            Some(err) if color => {
                out.push_str(kind_color(err.kind));
                out.push_str(segment.text);
                out.push_str(RESET);
            }
            Some(_) => {
                out.push('[');
                out.push_str(segment.text);
                out.push(']');
            }
            None => out.push_str(segment.text),
        }
    }
    out
}

/// Print the full report: score line, annotated text, error details.
pub fn print_result(text: &str, result: &AnalysisResult) {
    let color = supports_color();

    let score_color = if !color {
        ""
    } else if result.score >= 8.0 {
        GREEN
    } else if result.score >= 6.0 {
        YELLOW
    } else {
        RED
    };
    let reset = if color { RESET } else { "" };
    let bold = if color { BOLD } else { "" };
    let dim = if color { DIM } else { "" };

    println!();
    println!(
        "{bold}Score:{reset} {score_color}{:.1}/10{reset}",
        result.score
    );
    println!(
        "{bold}Language:{reset} {}   {bold}Confidence:{reset} {:.0}%{}",
        result.language,
        result.confidence * 100.0,
        if result.fallback {
            format!("   {dim}(fallback data){reset}")
        } else {
            String::new()
        }
    );
    println!();
    println!("{}", annotated_text(text, result, color));
    println!();

    if result.errors.is_empty() {
        println!("{bold}No errors found.{reset}");
        return;
    }

    println!("{bold}Errors ({}):{reset}", result.errors.len());
    for (i, err) in result.errors.iter().enumerate() {
        let c = if color { kind_color(err.kind) } else { "" };
        println!(
            "  {}. {c}{}{reset} [{}] → {} {dim}({}){reset}",
            i + 1,
            err.text,
            kind_label(err.kind),
            err.correction,
            err.description,
        );
        if err.corrections.len() > 1 {
            println!(
                "     {dim}also: {}{reset}",
                err.corrections[1..].join(", ")
            );
        }
    }
}

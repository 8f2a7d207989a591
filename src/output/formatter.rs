use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{PointsResult, RuleContribution};

/// A scored receipt file for display
pub struct ScoredReceipt<'a> {
    pub source: &'a str, // file path the receipt was loaded from
    pub result: &'a PointsResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points; an aborted calculation gets an asterisk to mark it as unscored
pub fn format_points(points: u64, aborted: bool) -> String {
    if aborted {
        format!("{}*", points)
    } else {
        points.to_string()
    }
}

/// Format one scored receipt with its per-rule breakdown
///
/// ```text
/// receipts/target.json: 28 points
///   Retailer name          +6  6 alphanumeric characters in 'Target'
///   Round dollar           +0  total 35.35
/// ```
pub fn format_breakdown(scored: &ScoredReceipt, use_colors: bool) -> String {
    let points = format_points(scored.result.points, scored.result.aborted);
    let header = if use_colors {
        format!("{}: {} points", scored.source.underline(), points.bold())
    } else {
        format!("{}: {} points", scored.source, points)
    };

    if scored.result.aborted {
        return format!("{}\n  total could not be parsed, no rules applied", header);
    }

    let lines = scored
        .result
        .breakdown
        .contributions
        .iter()
        .map(|c| format_contribution(c, use_colors));

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_contribution(contribution: &RuleContribution, use_colors: bool) -> String {
    let label = format!("{:<20}", contribution.rule.label());
    let points = format!("{:>+5}", contribution.points);

    if !use_colors {
        return format!("  {} {}  {}", label, points, contribution.description);
    }

    if contribution.points == 0 {
        format!(
            "  {} {}  {}",
            label.dimmed(),
            points.dimmed(),
            contribution.description.dimmed()
        )
    } else {
        format!(
            "  {} {}  {}",
            label,
            points.green(),
            contribution.description
        )
    }
}

/// Format a receipt that failed to load or validate
pub fn format_rejection(source: &str, reason: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}: {} {}", source.underline(), "rejected".red().bold(), reason)
    } else {
        format!("{}: rejected {}", source, reason)
    }
}

/// Format scored receipts as tab-separated values for scripting
/// Columns: points, source (no headers, no colors)
pub fn format_tsv(receipts: &[ScoredReceipt]) -> String {
    receipts
        .iter()
        .map(|scored| format!("{}\t{}", scored.result.points, scored.source))
        .collect::<Vec<_>>()
        .join("\n")
}

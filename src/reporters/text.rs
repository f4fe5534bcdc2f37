//! Text (terminal) reporter: score, tier and one gauge per sub-score

use crate::models::{DevMeterResult, DevMeterTier};
use anyhow::Result;

/// Tier colors (ANSI escape codes)
fn tier_color(tier: DevMeterTier) -> &'static str {
    match tier {
        DevMeterTier::Cracked => "\x1b[35m", // Magenta
        DevMeterTier::Master => "\x1b[32m",  // Green
        DevMeterTier::Elite => "\x1b[92m",   // Light green
        DevMeterTier::Adept => "\x1b[33m",   // Yellow
        DevMeterTier::Novice => "\x1b[91m",  // Light red
        DevMeterTier::Amateur => "\x1b[90m", // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GAUGE_WIDTH: usize = 20;

/// Render result as a terminal dashboard
pub fn render(result: &DevMeterResult) -> Result<String> {
    let mut out = String::new();
    let tier_c = tier_color(result.dev_meter_tier);

    // Header
    out.push_str(&format!("\n{BOLD}DevMeter{RESET}  {}\n", result.username));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/100{RESET}  Tier: {tier_c}{BOLD}{}{RESET}\n",
        result.dev_meter_score, result.dev_meter_tier
    ));
    out.push_str(&format!(
        "{DIM}Window: {} to {}  Calculated: {}{RESET}\n\n",
        result.date_range_start.format("%Y-%m-%d"),
        result.date_range_end.format("%Y-%m-%d"),
        result.last_calculated.format("%Y-%m-%d %H:%M UTC"),
    ));

    out.push_str(&format!("{BOLD}SCORES{RESET}\n"));
    for (label, score) in [
        ("Seniority", result.seniority_score),
        ("Productivity", result.productivity_score),
        ("Code Quality", result.code_quality_score),
        ("Versatility", result.versatility_score),
        ("Community", result.community_impact_score),
    ] {
        out.push_str(&format!("  {:<13}{} {:>3}\n", label, gauge(score), score));
    }
    out.push('\n');

    out.push_str(&format!("{BOLD}ACTIVITY{RESET}\n"));
    out.push_str(&format!(
        "  Reviews: {}  Review/PR ratio: {:.2}  Account age: {:.1} years\n",
        result.review_count, result.review_to_pr_ratio, result.account_age_in_years
    ));
    out.push_str(&format!(
        "  Active days: {}  Contributions/week: {:.1}\n",
        result.active_days, result.contribution_frequency
    ));
    out.push_str(&format!(
        "  PR merge ratio: {:.0}%  Revisions/PR: {:.1}  Stars: {}\n",
        result.pr_merge_ratio * 100.0,
        result.pr_revisions,
        result.star_count
    ));
    out.push_str(&format!(
        "  Diversity: languages {:.2}  contribution types {:.2}  repositories {:.2}\n",
        result.language_diversity, result.contribution_type_diversity, result.repository_diversity
    ));
    if !result.languages.is_empty() {
        out.push_str(&format!("  Languages: {}\n", result.languages.join(", ")));
    }
    out.push('\n');

    // Line counts are fixed multiples of one repository's commit count
    out.push_str(&format!("{BOLD}COMMITS{RESET} {DIM}(sampled, estimated){RESET}\n"));
    out.push_str(&format!(
        "  Commits: {}  Lines: ~+{} / ~-{}  Avg size: ~{:.0}\n",
        result.commit_frequency,
        result.lines_of_code_added,
        result.lines_of_code_deleted,
        result.average_commit_size
    ));
    if !result.repositories_analyzed.is_empty() {
        out.push_str(&format!(
            "  {DIM}Repositories: {}{RESET}\n",
            summarize_list(&result.repositories_analyzed, 5)
        ));
    }

    Ok(out)
}

/// Fixed-width bar for a 0-100 score
fn gauge(score: u8) -> String {
    let filled = (usize::from(score.min(100)) * GAUGE_WIDTH + 50) / 100;
    format!(
        "{}{DIM}{}{RESET}",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled)
    )
}

/// First `max` items, then "+N more"
fn summarize_list(items: &[String], max: usize) -> String {
    if items.len() <= max {
        return items.join(", ");
    }
    format!("{}, +{} more", items[..max].join(", "), items.len() - max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_result;

    #[test]
    fn test_text_render_has_sections() {
        let out = render(&test_result()).expect("render text");
        assert!(out.contains("octocat"));
        assert!(out.contains("67/100"));
        assert!(out.contains("Elite"));
        assert!(out.contains("SCORES"));
        assert!(out.contains("estimated"));
        assert!(out.contains("Rust, TypeScript"));
    }

    #[test]
    fn test_gauge_bounds() {
        assert_eq!(gauge(0).matches('█').count(), 0);
        assert_eq!(gauge(100).matches('█').count(), GAUGE_WIDTH);
        assert_eq!(gauge(50).matches('█').count(), GAUGE_WIDTH / 2);
    }

    #[test]
    fn test_summarize_list() {
        let items: Vec<String> = (1..=7).map(|i| format!("r{}", i)).collect();
        assert_eq!(summarize_list(&items, 5), "r1, r2, r3, r4, r5, +2 more");
        assert_eq!(summarize_list(&items[..2], 5), "r1, r2");
    }
}

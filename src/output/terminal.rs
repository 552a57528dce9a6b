// Colored terminal output for analysis results, dataset reports, and the
// user dashboard. main.rs delegates all display work here.

use colored::Colorize;

use crate::dataset::stats::DatasetReport;
use crate::db::models::{Analysis, User, UserStats};
use crate::pipeline::analyze::AnalysisOutcome;
use crate::sentiment::{Distribution, SentimentLabel, SentimentResult};

/// Dataset rows listed in the terminal report.
const DATASET_PREVIEW_ROWS: usize = 10;

/// Display a single classified review.
pub fn display_result(result: &SentimentResult) {
    println!("\n{}", "=== Review Sentiment ===".bold());
    println!("  Review:       {}", result.review.dimmed());
    println!("  Sentiment:    {}", colorize_label(result.sentiment));
    println!("  Polarity:     {:+.3}", result.polarity);
    println!("  Subjectivity: {:.3}", result.subjectivity);
}

/// Display every result of a batch followed by the label distribution.
pub fn display_batch(outcome: &AnalysisOutcome) {
    if outcome.results.is_empty() {
        println!("No reviews analyzed.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Batch Results ({} reviews) ===", outcome.results.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<10} {:>8}  {:>6}  {}",
        "#".dimmed(),
        "Sentiment".dimmed(),
        "Polarity".dimmed(),
        "Subj".dimmed(),
        "Review".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, result) in outcome.results.iter().enumerate() {
        println!(
            "  {:>4}. {:<10} {:>+8.3}  {:>6.3}  {}",
            i + 1,
            colorize_label(result.sentiment),
            result.polarity,
            result.subjectivity,
            super::truncate_chars(&result.review, 60),
        );
    }

    display_distribution(&outcome.distribution);
}

/// Display a label distribution with counts and percentages.
pub fn display_distribution(dist: &Distribution) {
    println!();
    for label in SentimentLabel::ALL {
        println!(
            "  {:<10} {:>5}  ({:.1}%)",
            colorize_label(label),
            dist.get(label),
            dist.percentage(label),
        );
    }
}

/// Display the dataset analysis summary and a preview of the rows.
pub fn display_dataset_report(report: &DatasetReport) {
    println!(
        "\n{}",
        format!("=== Dataset Report ({} reviews) ===", report.total_reviews).bold()
    );
    println!("  Accuracy:         {:.2}%", report.accuracy);
    println!("  Average polarity: {:+.3}", report.avg_polarity);
    println!("  Generated:        {}", report.generated_at.dimmed());

    display_distribution(&report.distribution);

    if !report.top_aspects.is_empty() {
        println!("\n  {}", "Top aspects:".bold());
        for (aspect, count) in &report.top_aspects {
            println!("    {:<28} {:>5}", aspect, count);
        }
    }

    if report.results.is_empty() {
        return;
    }

    println!(
        "\n  {}",
        format!("First {} reviews:", report.results.len().min(DATASET_PREVIEW_ROWS)).bold()
    );
    for row in report.results.iter().take(DATASET_PREVIEW_ROWS) {
        let id = row
            .review_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let actual = row.actual_sentiment.as_deref().unwrap_or("?");
        println!(
            "    {:>6}  {:<10} (actual: {:<8}) {}",
            id,
            colorize_label(row.result.sentiment),
            actual,
            super::truncate_chars(&row.result.review, 50).dimmed(),
        );
    }
}

/// Display a user's totals and most recent analyses.
pub fn display_dashboard(user: &User, stats: &UserStats, recent: &[Analysis]) {
    println!(
        "\n{}",
        format!("=== Dashboard for {} ===", user.username).bold()
    );
    println!("  Total analyses: {}", stats.total);
    display_distribution(&stats.distribution);

    if recent.is_empty() {
        println!("\nNo analyses yet. Run `concierge analyze` to get started.");
        return;
    }

    println!("\n  {}", "Recent analyses:".bold());
    for analysis in recent {
        let label = SentimentLabel::parse_or_neutral(&analysis.sentiment);
        println!(
            "    {:<20} {:<10} {:>+7.3}  {}",
            analysis.created_at.dimmed(),
            colorize_label(label),
            analysis.polarity,
            super::truncate_chars(&analysis.review_text, 50),
        );
    }
}

fn colorize_label(label: SentimentLabel) -> colored::ColoredString {
    match label {
        SentimentLabel::Positive => label.as_str().green().bold(),
        SentimentLabel::Negative => label.as_str().red().bold(),
        SentimentLabel::Neutral => label.as_str().yellow(),
    }
}

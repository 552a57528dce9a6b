// Dataset report — CSV rows through classification to accuracy, aspects
// and average polarity.

use std::path::PathBuf;

use concierge::dataset::build_report;
use concierge::dataset::loader::{load_dataset, load_from_reader};
use concierge::dataset::stats::{accuracy, average_polarity, top_aspects, TOP_ASPECTS};
use concierge::sentiment::lexicon::LexiconScorer;
use concierge::sentiment::{SentimentLabel, SentimentResult};

const DATASET: &str = "\
Review ID,Cleaned Text (Lowercased),Sentiment,Primary Aspect
10,the room was clean and the staff was wonderful,Positive,Cleanliness & Staff
11,,Neutral,Location
12,terrible dirty room never again,Negative,Cleanliness
13,ok,Mixed,Location & Staff
14,great breakfast but slow checkin,Negative,Food & Service &
";

fn temp_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("concierge_{}_{name}.csv", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

// ============================================================
// Report assembly
// ============================================================

#[test]
fn blank_rows_are_dropped_but_rows_keep_their_own_labels() {
    let rows = load_from_reader(DATASET.as_bytes()).unwrap();
    assert_eq!(rows.len(), 5);

    let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();
    assert_eq!(report.total_reviews, 4);

    let ids: Vec<Option<i64>> = report.results.iter().map(|r| r.review_id).collect();
    assert_eq!(ids, vec![Some(10), Some(12), Some(13), Some(14)]);

    // Row 12 must carry its own ground truth, not row 11's
    assert_eq!(report.results[1].actual_sentiment.as_deref(), Some("Negative"));
    assert_eq!(report.results[1].result.sentiment, SentimentLabel::Negative);
}

#[test]
fn accuracy_counts_mixed_as_neutral() {
    let rows = load_from_reader(DATASET.as_bytes()).unwrap();
    let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();

    // 10 positive/positive, 12 negative/negative, 13 neutral/mixed are right;
    // 14 is labelled negative but "great ... slow" leans positive.
    assert_eq!(report.results[3].result.sentiment, SentimentLabel::Positive);
    assert_eq!(report.accuracy, 75.0);
}

#[test]
fn report_totals_are_consistent() {
    let rows = load_from_reader(DATASET.as_bytes()).unwrap();
    let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();

    assert_eq!(report.distribution.total(), report.total_reviews as u64);
    assert!(report.avg_polarity > -1.0 && report.avg_polarity < 1.0);
    assert!(!report.generated_at.is_empty());
}

#[test]
fn aspects_are_counted_over_every_row() {
    let rows = load_from_reader(DATASET.as_bytes()).unwrap();
    let report = build_report(&LexiconScorer::builtin(), &rows).unwrap();

    assert_eq!(
        report.top_aspects,
        vec![
            ("Cleanliness".to_string(), 2),
            ("Staff".to_string(), 2),
            ("Location".to_string(), 2),
            ("Food".to_string(), 1),
            ("Service".to_string(), 1),
        ]
    );
}

// ============================================================
// Aggregates
// ============================================================

#[test]
fn accuracy_of_nothing_is_zero() {
    assert_eq!(accuracy(std::iter::empty::<(&str, SentimentLabel)>()), 0.0);
}

#[test]
fn accuracy_rounds_to_two_decimals() {
    let pairs = [
        ("positive", SentimentLabel::Positive),
        ("negative", SentimentLabel::Positive),
        ("neutral", SentimentLabel::Neutral),
    ];
    assert_eq!(accuracy(pairs), 66.67);
}

#[test]
fn average_polarity_rounds_to_three_decimals() {
    let results: Vec<SentimentResult> = [0.1, 0.2, 0.25]
        .iter()
        .map(|&p| SentimentResult {
            sentiment: SentimentLabel::from_polarity(p),
            polarity: p,
            subjectivity: 0.0,
            review: String::new(),
        })
        .collect();
    assert_eq!(average_polarity(&results), 0.183);
    assert_eq!(average_polarity(&[]), 0.0);
}

#[test]
fn top_aspects_caps_at_ten() {
    let cells: Vec<String> = (0..15).map(|i| format!("Aspect{i}")).collect();
    let top = top_aspects(cells.iter().map(String::as_str), TOP_ASPECTS);
    assert_eq!(top.len(), TOP_ASPECTS);
    assert_eq!(top[0].0, "Aspect0");
}

// ============================================================
// Files
// ============================================================

#[test]
fn load_dataset_reads_from_disk() {
    let path = temp_csv("load", DATASET);
    let rows = load_dataset(&path).unwrap();
    assert_eq!(rows.len(), 5);
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_dataset_is_reported() {
    let err = load_dataset(std::path::Path::new("/no/such/reviews.csv")).unwrap_err();
    assert!(err.to_string().starts_with("Dataset file not found"));
}

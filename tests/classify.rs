//! Tests for edge label classification and stroke styles.
mod common;
use common::*;
use callflow::prelude::*;

#[test]
fn test_yes_and_no() {
    assert_eq!(classify_label(Some("Yes")), Category::Positive);
    assert_eq!(classify_label(Some("No")), Category::Negative);
    assert_eq!(classify_label(Some("  YES!  ")), Category::Positive);
    assert_eq!(classify_label(Some("no.")), Category::Negative);
}

#[test]
fn test_empty_and_missing_labels_are_neutral() {
    assert_eq!(classify_label(None), Category::Neutral);
    assert_eq!(classify_label(Some("")), Category::Neutral);
    assert_eq!(classify_label(Some("   ")), Category::Neutral);
    assert_eq!(classify_label(Some("Then")), Category::Neutral);
}

#[test]
fn test_positive_vocabulary_wins_over_negative() {
    // "interested" is positive and checked first.
    assert_eq!(classify_label(Some("Not Interested")), Category::Positive);
    assert_eq!(classify_label(Some("No, but confirmed")), Category::Positive);
}

#[test]
fn test_stems_match_word_prefixes() {
    assert_eq!(classify_label(Some("Qualified")), Category::Positive);
    assert_eq!(classify_label(Some("Success")), Category::Positive);
    assert_eq!(classify_label(Some("Confirmation sent")), Category::Positive);
    assert_eq!(classify_label(Some("Rejected")), Category::Negative);
    assert_eq!(classify_label(Some("Payment failed")), Category::Negative);
    assert_eq!(classify_label(Some("Caller is busy")), Category::Negative);
}

#[test]
fn test_words_are_matched_whole() {
    // "know" starts with "no" but is not the word "no".
    assert_eq!(classify_label(Some("Don't know")), Category::Neutral);
    assert_eq!(classify_label(Some("Nobody home")), Category::Neutral);
}

#[test]
fn test_strokes_per_category() {
    assert_eq!(
        Category::Positive.stroke(),
        Stroke {
            width: 2.5,
            dashed: false
        }
    );
    assert_eq!(
        Category::Negative.stroke(),
        Stroke {
            width: 2.0,
            dashed: true
        }
    );
    assert_eq!(
        Category::Neutral.stroke(),
        Stroke {
            width: 1.5,
            dashed: false
        }
    );
}

#[test]
fn test_classify_edges_tags_the_graph() {
    let graph = graph_of(homeowner_flow());
    let categories: Vec<_> = graph.edges().iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Neutral,
            Category::Positive,
            Category::Neutral,
            Category::Negative,
        ]
    );
    for edge in graph.edges() {
        assert_eq!(classify(edge), edge.category);
    }
}

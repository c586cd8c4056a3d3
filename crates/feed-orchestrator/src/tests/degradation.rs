//! Summary degradation and short-circuit behavior.

use super::harness::{article, orchestrator, page_of, MockFeedSource};
use crate::{FALLBACK_SUMMARY, PLACEHOLDER_DESCRIPTION};
use news_types::PreferenceSet;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn summarization_failure_degrades_to_fallback() {
    let source = MockFeedSource::new();
    source.fail_summarize.store(true, Ordering::SeqCst);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    assert!(!result.articles.is_empty());
    for article in &result.articles {
        assert_eq!(article.summary.as_deref(), Some(FALLBACK_SUMMARY));
    }
}

#[tokio::test]
async fn short_summary_batch_pads_with_fallback() {
    let source = MockFeedSource::new();
    source.script_page(page_of(vec![
        article("a1", "First description"),
        article("a2", "Second description"),
    ]));
    source.script_summaries(&["S1"]);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    // Result size always equals stage one's article count.
    assert_eq!(result.articles.len(), 2);
    assert_eq!(result.articles[0].summary.as_deref(), Some("S1"));
    assert_eq!(result.articles[1].summary.as_deref(), Some(FALLBACK_SUMMARY));
}

#[tokio::test]
async fn empty_summary_text_degrades_to_fallback() {
    let source = MockFeedSource::new();
    source.script_page(page_of(vec![article("a1", "Description")]));
    source.script_summaries(&[""]);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    assert_eq!(result.articles[0].summary.as_deref(), Some(FALLBACK_SUMMARY));
}

#[tokio::test]
async fn empty_page_short_circuits_without_stage_two() {
    let source = MockFeedSource::new();
    source.articles_per_page.store(0, Ordering::SeqCst);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    assert!(result.articles.is_empty());
    assert_eq!(result.total_pages, 0);
    assert_eq!(result.total, 0);
    assert_eq!(source.summarize_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn placeholder_description_is_summarized_from_title() {
    let source = MockFeedSource::new();

    let mut placeholder = article("1", PLACEHOLDER_DESCRIPTION);
    placeholder.title = "T1".to_string();
    let mut described = article("2", "D2");
    described.title = "T2".to_string();

    source.script_page(page_of(vec![placeholder, described]));
    source.script_summaries(&["S1", "S2"]);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    // Article 1's summarization input was its title, not the placeholder.
    let captured = source.captured_texts.lock().unwrap();
    assert_eq!(captured.as_slice(), &[vec!["T1".to_string(), "D2".to_string()]]);

    assert_eq!(result.articles[0].id, "1");
    assert_eq!(result.articles[0].summary.as_deref(), Some("S1"));
    assert_eq!(result.articles[1].id, "2");
    assert_eq!(result.articles[1].summary.as_deref(), Some("S2"));
}

#[tokio::test]
async fn summaries_attach_by_position() {
    let source = MockFeedSource::new();
    source.script_page(page_of(vec![
        article("a", "Alpha"),
        article("b", "Beta"),
        article("c", "Gamma"),
    ]));
    source.script_summaries(&["SA", "SB", "SC"]);
    let orch = orchestrator(source.clone());

    let result = orch.get_feed(&PreferenceSet::new(), 1).await.unwrap();

    let summaries: Vec<&str> = result
        .articles
        .iter()
        .map(|a| a.summary.as_deref().unwrap())
        .collect();
    assert_eq!(summaries, vec!["SA", "SB", "SC"]);
}

//! Pre-summarization relevance pass. When a section is oversupplied, the
//! backend scores every candidate and low scorers are trimmed before the
//! expensive summarization call. Reranking is an optimization, never a
//! required step: on any failure the input comes back untouched.

use awd_core::{Result, SectionConfig, VerifiedArticle};
use awd_llm::{parse, ChatRequest, GenerationClient};
use tracing::{info, warn};

use crate::truncate_chars;

/// The reranker tolerates one more transient failure than the summarizer.
const RERANK_MAX_ATTEMPTS: u32 = 3;

const SNIPPET_CHARS: usize = 2000;

const RERANK_SYSTEM: &str = "You are a relevance-scoring assistant. You will receive a section topic and a \
numbered list of article titles and snippets. For EACH article, return a JSON \
array of objects with keys: {\"index\": <int>, \"score\": <1-10>}.\n\
Score meaning:\n\
  1-3: Off-topic, clickbait, rumors, or very low relevance\n\
  4-5: Tangentially related or old news being reposted\n\
  6-7: Relevant and recent\n\
  8-10: Highly relevant, empirical results, or official announcements";

fn build_prompt(section_name: &str, articles: &[VerifiedArticle]) -> String {
    let mut lines = vec![format!("Section topic: {section_name}\n\nArticles:")];
    for (i, article) in articles.iter().enumerate() {
        let body = if article.content.is_empty() {
            &article.snippet
        } else {
            &article.content
        };
        let snippet = truncate_chars(body, SNIPPET_CHARS).replace('\n', " ");
        lines.push(format!(
            "{}. Title: {}\n   Date: {}\n   Snippet: {}...",
            i + 1,
            article.title,
            article.resolved_date(),
            snippet
        ));
    }
    lines.join("\n")
}

async fn score_articles(
    client: &GenerationClient,
    articles: &[VerifiedArticle],
    section: &SectionConfig,
    model: &str,
) -> Result<Vec<i64>> {
    let request = ChatRequest::new(RERANK_SYSTEM, build_prompt(&section.name, articles), model);
    let raw = client.generate_with_budget(request, RERANK_MAX_ATTEMPTS).await?;
    parse::parse_scores(&raw, articles.len())
}

/// Score and filter a candidate set against the section's relevance
/// threshold, then sort by score descending (stable, so ties keep their
/// original order). Skipped entirely when the section is not oversupplied.
pub async fn rerank(
    client: &GenerationClient,
    articles: Vec<VerifiedArticle>,
    section: &SectionConfig,
    model: &str,
) -> Vec<VerifiedArticle> {
    if articles.len() <= section.limit {
        return articles;
    }

    let scores = match score_articles(client, &articles, section, model).await {
        Ok(scores) => scores,
        Err(e) => {
            warn!("Reranking failed, returning articles unchanged: {e}");
            return articles;
        }
    };

    let before = articles.len();
    let mut scored: Vec<(VerifiedArticle, i64)> = articles
        .into_iter()
        .zip(scores)
        .filter(|(_, score)| *score >= section.relevance_threshold as i64)
        .collect();
    scored.sort_by_key(|(_, score)| std::cmp::Reverse(*score));

    let result: Vec<VerifiedArticle> = scored.into_iter().map(|(a, _)| a).collect();
    info!(
        "Reranked {} → {} articles for '{}' (threshold={})",
        before,
        result.len(),
        section.name,
        section.relevance_threshold
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{article, MockBackend, Reply};
    use awd_core::sections::section_config;

    fn small_section() -> SectionConfig {
        let mut section = section_config("trending");
        section.limit = 2;
        section
    }

    #[tokio::test]
    async fn undersupplied_section_short_circuits_without_a_call() {
        let backend = MockBackend::always(Reply::Transient);
        let section = section_config("trending"); // limit 5
        let articles = vec![article("A"), article("B"), article("C")];

        let result = rerank(&backend.client(), articles.clone(), &section, "m").await;

        assert_eq!(backend.call_count(), 0);
        let titles: Vec<_> = result.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn filters_below_threshold_and_sorts_descending() {
        let scores = r#"[{"index": 1, "score": 7}, {"index": 2, "score": 9}, {"index": 3, "score": 4}]"#;
        let backend = MockBackend::scripted(vec![Reply::Text(scores.to_string())]);
        // 4th article gets the default score 5, below threshold 6
        let articles = vec![article("A"), article("B"), article("C"), article("D")];

        let result = rerank(&backend.client(), articles, &small_section(), "m").await;

        let titles: Vec<_> = result.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn equal_scores_keep_original_order() {
        let scores = r#"[{"index": 1, "score": 8}, {"index": 2, "score": 8}, {"index": 3, "score": 8}]"#;
        let backend = MockBackend::scripted(vec![Reply::Text(scores.to_string())]);
        let articles = vec![article("A"), article("B"), article("C")];

        let result = rerank(&backend.client(), articles, &small_section(), "m").await;

        let titles: Vec<_> = result.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn backend_failure_returns_input_unchanged_after_three_attempts() {
        let backend = MockBackend::always(Reply::Transient);
        let articles = vec![article("A"), article("B"), article("C")];

        let result = rerank(&backend.client(), articles, &small_section(), "m").await;

        assert_eq!(backend.call_count(), RERANK_MAX_ATTEMPTS);
        let titles: Vec<_> = result.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn malformed_scores_return_input_unchanged() {
        let backend = MockBackend::scripted(vec![Reply::Text("not json".to_string())]);
        let articles = vec![article("A"), article("B"), article("C")];

        let result = rerank(&backend.client(), articles, &small_section(), "m").await;

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn prompt_carries_indices_dates_and_flattened_snippets() {
        let mut a = article("Multi Line");
        a.content = "line one\nline two".to_string();
        a.scraped_published_date = Some("2026-08-25".to_string());
        let prompt = build_prompt("Trending AI", &[a]);

        assert!(prompt.starts_with("Section topic: Trending AI"));
        assert!(prompt.contains("1. Title: Multi Line"));
        // scraped date wins over the stated published date
        assert!(prompt.contains("Date: 2026-08-25"));
        assert!(prompt.contains("line one line two"));
    }
}

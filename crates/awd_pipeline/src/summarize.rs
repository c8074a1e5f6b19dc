//! Turns verified articles into structured newsletter entries via the
//! generation backend. A section whose response is unusable yields an empty
//! list; a backend outage propagates so the run stops instead of silently
//! shipping an empty newsletter.

use awd_core::locale::prompt_directive;
use awd_core::{Result, SectionConfig, SummaryItem, VerifiedArticle};
use awd_llm::{parse, ChatRequest, GenerationClient};
use serde_json::Value;
use tracing::warn;

use crate::truncate_chars;

const CONTENT_CHARS: usize = 4000;

const SYSTEM_PROMPT_BASE: &str = r#"You are the senior editorial analyst for "AI Weekly Digest,"
a trusted weekly AI briefing read by Indian professionals and public servants.

VOICE & TONE:
- Authoritative but approachable — like a smart colleague briefing you over coffee.
- Write for a Deputy Minister who has 3 minutes. Be razor-sharp.
- No hype, no sales language, no "groundbreaking" or "revolutionary."
- Plain language first; define technical terms in parentheses if unavoidable.

OUTPUT FORMAT:
- Output ONLY a valid JSON array (no prose) of objects with these keys:
  "Headline", "Summary_Text", "Live_Link", "Relevance", "Date", "Source"
- "Headline": max 12 words. Punchy. Lead with the IMPACT, not the organization.
  BAD: "OpenAI Releases New Model"
  GOOD: "New GPT-5 Scores 92% on Federal Policy Benchmarks"
- "Summary_Text": exactly 2 sentences. Sentence 1 = what happened.
  Sentence 2 = why an Indian professional or public servant should care (operational impact,
  policy implication, or learning opportunity).
- "Date": article's publication date in YYYY-MM-DD format from the Published
  field provided. If unavailable, give best estimate but never omit.
- "Relevance": integer 1-10. Score 8-10 for: Indian market, government, and tech ecosystem impact,
  policy changes, AI tools usable in public service, security/privacy implications
  for government data. Score 5-7 for: general industry news with indirect relevance.
  Score 1-4 for: old news, generic explainers, or content with no public-sector angle.
- "Source": short label for where this article comes from (e.g. "Reuters",
  "arXiv", "TBS", "OECD", "Hacker News", "OpenAI Blog"). Use the domain or
  organization name — keep it under 3 words.

LINK INTEGRITY:
- Preserve URLs EXACTLY as provided — use the specific article URL, never a homepage.
- Do not fabricate or modify URLs.

QUALITY GATES — SKIP articles that are:
- Clearly outdated (mentioning past dates as "recent")
- Generic explainers ("What is AI?", Wikipedia-style content)
- Press releases with no substantive news
- Paywalled with no useful snippet
- Homepage URLs rather than specific articles"#;

pub(crate) fn build_system_prompt(section: &SectionConfig, lang: &str) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT_BASE);
    prompt.push_str(section.prompt_rules);
    if let Some(directive) = prompt_directive(lang) {
        prompt.push_str(directive);
    }
    prompt
}

fn build_user_prompt(section: &SectionConfig, articles: &[VerifiedArticle]) -> String {
    let blocks: Vec<String> = articles
        .iter()
        .map(|article| {
            let published_line = article
                .published
                .as_deref()
                .map(|p| format!("\nPublished: {p}"))
                .unwrap_or_default();
            format!(
                "Title: {}\nURL: {}{}\nSnippet: {}\nContent: {}",
                article.title,
                article.url,
                published_line,
                article.snippet,
                truncate_chars(&article.content, CONTENT_CHARS)
            )
        })
        .collect();
    format!(
        "Section: {}\nToday's date: {}\nSummarize the following verified articles:\n{}",
        section.name,
        chrono::Local::now().format("%Y-%m-%d"),
        blocks.join("\n\n")
    )
}

fn trimmed(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

fn item_from_value(obj: &Value, relevance_threshold: u8) -> Option<SummaryItem> {
    // Absent or malformed relevance defaults to neutral rather than losing
    // the item.
    let relevance = obj
        .get("Relevance")
        .and_then(Value::as_i64)
        .unwrap_or(parse::NEUTRAL_SCORE);
    if relevance < relevance_threshold as i64 {
        return None;
    }

    let date = Some(trimmed(obj, "Date")).filter(|s| !s.is_empty());
    let source = Some(trimmed(obj, "Source")).filter(|s| !s.is_empty());
    Some(SummaryItem {
        headline: trimmed(obj, "Headline"),
        summary_text: trimmed(obj, "Summary_Text"),
        live_link: trimmed(obj, "Live_Link"),
        date,
        relevance: relevance.clamp(1, 10) as u8,
        source,
    })
}

/// Summarize a section's articles into [`SummaryItem`]s, discarding anything
/// scored below the section threshold. Empty input means no backend call.
pub async fn summarize(
    client: &GenerationClient,
    section: &SectionConfig,
    articles: &[VerifiedArticle],
    model: &str,
    lang: &str,
) -> Result<Vec<SummaryItem>> {
    if articles.is_empty() {
        return Ok(Vec::new());
    }

    let request = ChatRequest::new(
        build_system_prompt(section, lang),
        build_user_prompt(section, articles),
        model,
    );
    let raw = client.generate(request).await?;

    let entries = match parse::parse_array(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Backend returned invalid JSON for section '{}', skipping it: {e}", section.name);
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .iter()
        .filter_map(|obj| item_from_value(obj, section.relevance_threshold))
        .collect())
}

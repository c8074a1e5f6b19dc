//! Cross-section executive summary. The TL;DR is decorative: any failure at
//! all degrades to an empty list and never blocks the newsletter.

use awd_core::{Result, SummaryItem};
use awd_llm::{parse, ChatRequest, GenerationClient};
use serde_json::Value;
use tracing::warn;

/// Bullets requested from the backend; the result is capped here regardless.
const BULLET_COUNT: usize = 3;

/// Items fed to the prompt, assumed already relevance-sorted by the caller.
const MAX_PROMPT_ITEMS: usize = 6;

const TLDR_SYSTEM: &str = "You produce a 3-bullet executive summary for a weekly AI briefing\n\
read by Indian professionals and public servants.\n\
\n\
Rules:\n\
- Output ONLY a valid JSON array of exactly 3 strings.\n\
- Each string is one punchy sentence (max 25 words).\n\
- Lead each bullet with a strong verb or the key impact.\n\
- Cover the 3 most important stories from the items provided.\n\
- Write for a Deputy Minister scanning on their phone.";

async fn request_bullets(
    client: &GenerationClient,
    top_items: &[SummaryItem],
    model: &str,
    lang: &str,
) -> Result<Vec<String>> {
    let items_text: Vec<String> = top_items
        .iter()
        .take(MAX_PROMPT_ITEMS)
        .map(|it| format!("- {}: {}", it.headline, it.summary_text))
        .collect();
    let user_prompt = format!(
        "Pick the 3 most important and produce 3 bullets:\n{}",
        items_text.join("\n")
    );

    let mut system_prompt = String::from(TLDR_SYSTEM);
    if let Some(directive) = awd_core::locale::prompt_directive(lang) {
        system_prompt.push_str(directive);
    }

    let raw = client.generate(ChatRequest::new(system_prompt, user_prompt, model)).await?;
    let bullets = parse::parse_array(&raw)?;
    Ok(bullets
        .iter()
        .take(BULLET_COUNT)
        .map(|v| match v {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
        .collect())
}

/// Produce up to three short bullets from the highest-relevance items. Empty
/// input means no backend call; every failure recovers to an empty list.
pub async fn generate_tldr(
    client: &GenerationClient,
    top_items: &[SummaryItem],
    model: &str,
    lang: &str,
) -> Vec<String> {
    if top_items.is_empty() {
        return Vec::new();
    }
    match request_bullets(client, top_items, model, lang).await {
        Ok(bullets) => bullets,
        Err(e) => {
            warn!("TL;DR generation failed, continuing without it: {e}");
            Vec::new()
        }
    }
}

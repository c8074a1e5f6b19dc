pub mod assemble;
pub mod rerank;
pub mod summarize;
pub mod tldr;

use std::collections::HashMap;
use std::sync::Arc;

use awd_core::sections::section_config;
use awd_core::{Newsletter, Result, SummaryItem, VerifiedArticle};
use awd_llm::{GenerationBackend, GenerationClient};
use tracing::info;

pub use assemble::assemble;
pub use rerank::rerank;
pub use summarize::summarize;
pub use tldr::generate_tldr;

pub mod prelude {
    pub use super::DigestPipeline;
    pub use awd_core::{Newsletter, Result, SummaryItem, VerifiedArticle};
}

/// How many of the top-relevance items feed the TL;DR prompt.
const TLDR_CANDIDATES: usize = 6;

/// Sequential curation pipeline: rerank oversupplied sections, summarize each
/// one, generate the TL;DR from the best items, assemble the final document.
/// Sections are processed one at a time so a degraded section never affects
/// its neighbors.
#[derive(Debug, Clone)]
pub struct DigestPipeline {
    client: GenerationClient,
    model: String,
    lang: String,
    tldr_enabled: bool,
}

impl DigestPipeline {
    pub fn new(backend: Arc<dyn GenerationBackend>, model: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::with_client(GenerationClient::new(backend), model, lang)
    }

    pub fn with_client(client: GenerationClient, model: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            lang: lang.into(),
            tldr_enabled: true,
        }
    }

    pub fn with_tldr(mut self, enabled: bool) -> Self {
        self.tldr_enabled = enabled;
        self
    }

    /// Run the full pipeline over per-section article batches. Reranker and
    /// TL;DR failures degrade silently; a summarizer backend failure aborts
    /// the run so a systemic outage never ships an empty newsletter.
    pub async fn run(
        &self,
        batches: Vec<(String, Vec<VerifiedArticle>)>,
        run_date: Option<String>,
    ) -> Result<Newsletter> {
        let mut sections: HashMap<String, Vec<SummaryItem>> = HashMap::new();

        for (key, articles) in batches {
            let section = section_config(&key);
            info!("📰 Curating section '{}' ({} candidates)", section.name, articles.len());

            let articles = rerank(&self.client, articles, &section, &self.model).await;
            let items = summarize(&self.client, &section, &articles, &self.model, &self.lang).await?;
            info!("✨ Section '{}' produced {} items", section.name, items.len());
            sections.insert(key, items);
        }

        let tldr = if self.tldr_enabled {
            let top = top_items(&sections);
            generate_tldr(&self.client, &top, &self.model, &self.lang).await
        } else {
            Vec::new()
        };

        Ok(assemble(sections, run_date, tldr, &self.lang))
    }
}

/// The highest-relevance items across all sections, stably ordered by score
/// descending.
fn top_items(sections: &HashMap<String, Vec<SummaryItem>>) -> Vec<SummaryItem> {
    let mut all: Vec<SummaryItem> = sections.values().flatten().cloned().collect();
    all.sort_by_key(|item| std::cmp::Reverse(item.relevance));
    all.truncate(TLDR_CANDIDATES);
    all
}

/// Character-boundary-safe prefix, since prompt budgets are counted in
/// characters and article text is routinely multibyte.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

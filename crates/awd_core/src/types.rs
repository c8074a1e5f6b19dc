use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::locale::UiStrings;

/// An article that already passed upstream verification and deduplication.
/// Immutable for the lifetime of one newsletter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedArticle {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub scraped_published_date: Option<String>,
}

impl VerifiedArticle {
    /// Best available publication date for prompts: the date observed during
    /// scraping wins over the one the source claims.
    pub fn resolved_date(&self) -> &str {
        self.scraped_published_date
            .as_deref()
            .or(self.published.as_deref())
            .unwrap_or("Unknown")
    }
}

fn default_relevance() -> u8 {
    5
}

/// One summarized newsletter entry. Field names follow the JSON contract the
/// generation backend is instructed to emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryItem {
    #[serde(rename = "Headline")]
    pub headline: String,
    #[serde(rename = "Summary_Text")]
    pub summary_text: String,
    #[serde(rename = "Live_Link")]
    pub live_link: String,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Relevance", default = "default_relevance")]
    pub relevance: u8,
    #[serde(rename = "Source", default)]
    pub source: Option<String>,
}

/// The render-ready document handed to the external renderer. Built once by
/// the assembler and not mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Newsletter {
    pub run_date: String,
    pub sections: HashMap<String, Vec<SummaryItem>>,
    pub section_labels: HashMap<String, String>,
    pub section_descriptions: HashMap<String, String>,
    pub tldr: Vec<String>,
    pub lang: String,
    pub ui: UiStrings,
}

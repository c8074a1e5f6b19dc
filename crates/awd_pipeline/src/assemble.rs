//! Final document assembly: date-sort the events section, instrument outbound
//! links with tracking parameters, resolve language tables, and freeze
//! everything into a render-ready [`Newsletter`].

use std::collections::HashMap;

use awd_core::locale::{description_for, label_for, locale};
use awd_core::{Newsletter, SummaryItem};
use url::Url;

const UTM_SOURCE: &str = "ai_this_week";
const UTM_MEDIUM: &str = "email";

/// Append the four tracking parameters to a link without disturbing any it
/// already carries (first-write-wins). A link that is already fully
/// instrumented comes back byte-identical; anything unparseable comes back
/// unmodified.
pub fn instrument_link(link: &str, section_key: &str, run_date: &str) -> String {
    if link.is_empty() {
        return link.to_string();
    }
    let mut parsed = match Url::parse(link) {
        Ok(url) => url,
        Err(_) => return link.to_string(),
    };

    let tracking = [
        ("utm_source", UTM_SOURCE),
        ("utm_medium", UTM_MEDIUM),
        ("utm_campaign", run_date),
        ("utm_content", section_key),
    ];
    let existing: Vec<String> = parsed.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let missing: Vec<(&str, &str)> = tracking
        .into_iter()
        .filter(|(key, _)| !existing.iter().any(|e| e == key))
        .collect();
    if missing.is_empty() {
        return link.to_string();
    }

    parsed.query_pairs_mut().extend_pairs(missing);
    parsed.to_string()
}

/// Merge per-section item lists into the final document model.
///
/// `run_date` defaults to today's local date. The `events` section is the
/// only one re-sorted here (ascending by date string, undated items first);
/// every other section keeps the relevance order it arrived in.
pub fn assemble(
    mut sections: HashMap<String, Vec<SummaryItem>>,
    run_date: Option<String>,
    tldr: Vec<String>,
    lang: &str,
) -> Newsletter {
    let run_date =
        run_date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    if let Some(events) = sections.get_mut("events") {
        events.sort_by(|a, b| {
            a.date
                .as_deref()
                .unwrap_or("")
                .cmp(b.date.as_deref().unwrap_or(""))
        });
    }

    for (key, items) in sections.iter_mut() {
        for item in items.iter_mut() {
            if !item.live_link.is_empty() {
                item.live_link = instrument_link(&item.live_link, key, &run_date);
            }
        }
    }

    let mut section_labels = HashMap::new();
    let mut section_descriptions = HashMap::new();
    for key in sections.keys() {
        let label = label_for(lang, key);
        // sections outside the built-in registry display their key as-is
        section_labels.insert(
            key.clone(),
            if label.is_empty() { key.clone() } else { label.to_string() },
        );
        section_descriptions.insert(key.clone(), description_for(lang, key).to_string());
    }

    Newsletter {
        run_date,
        sections,
        section_labels,
        section_descriptions,
        tldr,
        lang: lang.to_string(),
        ui: locale(lang).ui,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item;

    fn dated_item(date: &str) -> SummaryItem {
        let mut it = item(&format!("On {date}"), 7);
        it.date = if date.is_empty() { None } else { Some(date.to_string()) };
        it
    }

    #[test]
    fn adds_all_four_tracking_parameters() {
        let link = instrument_link("https://example.com/story", "trending", "2026-08-28");
        assert!(link.contains("utm_source=ai_this_week"));
        assert!(link.contains("utm_medium=email"));
        assert!(link.contains("utm_campaign=2026-08-28"));
        assert!(link.contains("utm_content=trending"));
    }

    #[test]
    fn instrumentation_is_idempotent() {
        let once = instrument_link("https://example.com/story?x=1", "trending", "2026-08-28");
        let twice = instrument_link(&once, "trending", "2026-08-28");
        assert_eq!(once, twice);
    }

    #[test]
    fn existing_tracking_parameters_win() {
        let link = instrument_link(
            "https://example.com/story?utm_source=partner",
            "trending",
            "2026-08-28",
        );
        assert!(link.contains("utm_source=partner"));
        assert!(!link.contains("utm_source=ai_this_week"));
        assert!(link.contains("utm_medium=email"));
    }

    #[test]
    fn malformed_and_empty_links_pass_through() {
        assert_eq!(instrument_link("not a url", "trending", "d"), "not a url");
        assert_eq!(instrument_link("", "trending", "d"), "");
    }

    #[test]
    fn events_sort_ascending_with_undated_items_first() {
        let mut sections = HashMap::new();
        sections.insert(
            "events".to_string(),
            vec![dated_item("2024-03-01"), dated_item(""), dated_item("2024-01-15")],
        );
        let newsletter = assemble(sections, Some("2026-08-28".to_string()), Vec::new(), "en");

        let dates: Vec<_> = newsletter.sections["events"]
            .iter()
            .map(|i| i.date.clone().unwrap_or_default())
            .collect();
        assert_eq!(dates, vec!["", "2024-01-15", "2024-03-01"]);
    }

    #[test]
    fn non_event_sections_keep_incoming_order() {
        let mut sections = HashMap::new();
        sections.insert(
            "trending".to_string(),
            vec![dated_item("2024-03-01"), dated_item("2024-01-15")],
        );
        let newsletter = assemble(sections, Some("2026-08-28".to_string()), Vec::new(), "en");

        let dates: Vec<_> = newsletter.sections["trending"]
            .iter()
            .map(|i| i.date.clone().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-15"]);
    }

    #[test]
    fn unsupported_language_resolves_english_tables() {
        let mut sections = HashMap::new();
        sections.insert("trending".to_string(), vec![item("A", 8)]);
        let newsletter = assemble(sections, Some("2026-08-28".to_string()), Vec::new(), "xx");

        assert_eq!(newsletter.section_labels["trending"], "Trending AI");
        assert_eq!(newsletter.ui.title, "AI This Week");
        assert_eq!(newsletter.lang, "xx");
    }

    #[test]
    fn french_tables_resolve_for_supported_language() {
        let mut sections = HashMap::new();
        sections.insert("events".to_string(), Vec::new());
        let newsletter = assemble(sections, Some("2026-08-28".to_string()), Vec::new(), "fr");

        assert_eq!(newsletter.section_labels["events"], "Événements");
        assert!(newsletter.section_descriptions["events"].contains("Conférences"));
    }

    #[test]
    fn unknown_section_key_labels_fall_back_to_the_key() {
        let mut sections = HashMap::new();
        sections.insert("misc".to_string(), Vec::new());
        let newsletter = assemble(sections, Some("2026-08-28".to_string()), Vec::new(), "en");

        assert_eq!(newsletter.section_labels["misc"], "misc");
    }

    #[test]
    fn run_date_defaults_to_today() {
        let newsletter = assemble(HashMap::new(), None, Vec::new(), "en");
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(newsletter.run_date, today);
    }
}

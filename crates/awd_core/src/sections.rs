/// Static per-section configuration. Owned by configuration, read-only to the
/// pipeline.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    pub key: String,
    pub name: String,
    /// Maximum number of items the section should carry. Always >= 1.
    pub limit: usize,
    /// Items scoring below this are dropped. Always in 1..=10.
    pub relevance_threshold: u8,
    /// Section-specific prompt fragment appended to the editorial system
    /// prompt. Empty for sections without special rules.
    pub prompt_rules: &'static str,
}

impl SectionConfig {
    fn new(
        key: &str,
        name: &str,
        limit: usize,
        relevance_threshold: u8,
        prompt_rules: &'static str,
    ) -> Self {
        debug_assert!(limit >= 1);
        debug_assert!((1..=10).contains(&relevance_threshold));
        Self {
            key: key.to_string(),
            name: name.to_string(),
            limit,
            relevance_threshold,
            prompt_rules,
        }
    }
}

const TRENDING_RULES: &str = "\n- Capture the biggest AI stories of the week that everyone is talking about.\n- Sentence 2: why this matters beyond the tech — workforce, policy, or service delivery implications.";

const INDIAN_RULES: &str = "\n- Prioritize: federal policy announcements, state AI strategies, Indian AI company milestones.\n- Always mention which level of government (federal/state/municipal) or which department is involved.";

const GLOBAL_RULES: &str = "\n- Focus on AI governance, regulation, and workforce policy from G7/OECD/EU/US that could influence Indian federal policy.\n- Sentence 2: note any direct relevance to India's AI strategy or existing GC directives.";

const EVENTS_RULES: &str = "\n- Format: What event → When (date) → Who it's for → How to register (if URL available).\n- Prioritize free/government-accessible events. Flag cost if applicable.";

const AI_PROGRESS_RULES: &str = "\n- Lead with the benchmark name and the improvement metric (e.g., '12% accuracy gain on…').\n- Sentence 2: one concrete implication for government operations (e.g., 'could reduce manual document review time by…').";

const RESEARCH_PLAIN_RULES: &str = "\n- Translate academic findings into plain language a non-technical executive can act on. Replace jargon with everyday equivalents.\n- Sentence 2 MUST answer: 'How could this change how we deliver services or make policy decisions?'";

const DEEP_DIVE_RULES: &str = "\n- These are long-form reports. Summarize the single most important finding or recommendation.\n- Sentence 2: what action or awareness shift this demands from an Indian federal policy lens.";

/// The built-in section registry, in render order.
pub fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("trending", "Trending AI", 5, 6, TRENDING_RULES),
        SectionConfig::new("indian", "Indian News", 5, 6, INDIAN_RULES),
        SectionConfig::new("global", "Global News", 5, 6, GLOBAL_RULES),
        SectionConfig::new("events", "Events", 5, 5, EVENTS_RULES),
        SectionConfig::new("ai_progress", "AI Progress", 5, 6, AI_PROGRESS_RULES),
        SectionConfig::new("research_plain", "AI Research", 4, 6, RESEARCH_PLAIN_RULES),
        SectionConfig::new("deep_dive", "Deep Dive", 3, 6, DEEP_DIVE_RULES),
    ]
}

/// Resolve a section key to its configuration. Unknown keys get a neutral
/// fallback named after the key so a stale caller never aborts the run.
pub fn section_config(key: &str) -> SectionConfig {
    default_sections()
        .into_iter()
        .find(|s| s.key == key)
        .unwrap_or_else(|| SectionConfig {
            key: key.to_string(),
            name: key.to_string(),
            limit: 5,
            relevance_threshold: 6,
            prompt_rules: "",
        })
}

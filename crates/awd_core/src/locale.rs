//! Per-language static tables: section labels, section descriptions, and the
//! UI chrome strings the renderer consumes. English is the universal fallback
//! for unsupported language codes and for keys missing from a translation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UiStrings {
    pub title: &'static str,
    pub date_label: &'static str,
    pub tldr_title: &'static str,
    pub top_story: &'static str,
    pub read_more: &'static str,
    pub footer_line1: &'static str,
    pub footer_line2: &'static str,
}

pub struct Locale {
    pub code: &'static str,
    pub labels: &'static [(&'static str, &'static str)],
    pub descriptions: &'static [(&'static str, &'static str)],
    pub ui: UiStrings,
    /// Instruction appended to system prompts so the backend writes its
    /// output text in this language. None for the default language.
    pub prompt_directive: Option<&'static str>,
}

pub const SUPPORTED_LANGUAGES: [&str; 7] = ["en", "fr", "hi", "es", "de", "zh", "ja"];

static EN: Locale = Locale {
    code: "en",
    labels: &[
        ("trending", "Trending AI"),
        ("indian", "Indian News"),
        ("global", "Global News"),
        ("events", "Events"),
        ("ai_progress", "AI Progress"),
        ("research_plain", "AI Research"),
        ("deep_dive", "Deep Dive"),
    ],
    descriptions: &[
        ("trending", "The biggest AI stories everyone is talking about this week."),
        ("indian", "AI developments affecting Indian federal and state policy."),
        ("global", "International AI governance, regulation, and workforce policy."),
        ("events", "Upcoming AI conferences, summits, and workshops."),
        ("ai_progress", "Notable benchmark results and technical capability milestones."),
        ("research_plain", "Cutting-edge AI research and breakthroughs."),
        ("deep_dive", "In-depth reports and analyses from leading AI organizations."),
    ],
    ui: UiStrings {
        title: "AI This Week",
        date_label: "Date:",
        tldr_title: "⚡ TL;DR — This Week's Top 3",
        top_story: "🔥 Top Story",
        read_more: "Read more →",
        footer_line1: "AI This Week",
        footer_line2: "Automated Briefing System",
    },
    prompt_directive: None,
};

static FR: Locale = Locale {
    code: "fr",
    labels: &[
        ("trending", "IA en vedette"),
        ("indian", "Nouvelles indiennes"),
        ("global", "Nouvelles internationales"),
        ("events", "Événements"),
        ("ai_progress", "Progrès en IA"),
        ("research_plain", "Recherche en IA"),
        ("deep_dive", "Analyse approfondie"),
    ],
    descriptions: &[
        ("trending", "Les plus grandes nouvelles en IA dont tout le monde parle cette semaine."),
        ("indian", "Développements en IA touchant directement les politiques fédérales et étatiques indiennes."),
        ("global", "Gouvernance, réglementation et politiques internationales en matière d'IA."),
        ("events", "Conférences, sommets et ateliers en IA à venir."),
        ("ai_progress", "Résultats de référence et jalons techniques notables."),
        ("research_plain", "Recherche de pointe et percées en IA."),
        ("deep_dive", "Rapports et analyses approfondis des grandes organisations en IA."),
    ],
    ui: UiStrings {
        title: "IA cette semaine",
        date_label: "Date :",
        tldr_title: "⚡ En bref — Les 3 faits saillants",
        top_story: "🔥 À la une",
        read_more: "Lire la suite →",
        footer_line1: "🇮🇳 IA cette semaine — Bulletin automatisé sur l'IA.",
        footer_line2: "Sélectionné avec soin. Propulsé par l'intelligence ouverte.",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional French."),
};

static HI: Locale = Locale {
    code: "hi",
    labels: &[
        ("trending", "ट्रेंडिंग AI"),
        ("indian", "भारतीय समाचार"),
        ("global", "वैश्विक समाचार"),
        ("events", "कार्यक्रम"),
        ("ai_progress", "AI प्रगति"),
        ("research_plain", "AI अनुसंधान"),
        ("deep_dive", "गहन विश्लेषण"),
    ],
    descriptions: &[
        ("trending", "इस सप्ताह की सबसे बड़ी AI खबरें जिनकी हर कोई बात कर रहा है।"),
        ("indian", "भारतीय संघीय और राज्य नीति को प्रभावित करने वाले AI विकास।"),
        ("global", "अंतर्राष्ट्रीय AI शासन, नियमन और कार्यबल नीति।"),
        ("events", "आगामी AI सम्मेलन, शिखर सम्मेलन और कार्यशालाएं।"),
        ("ai_progress", "उल्लेखनीय बेंचमार्क परिणाम और तकनीकी क्षमता मील के पत्थर।"),
        ("research_plain", "अत्याधुनिक AI अनुसंधान और सफलताएं।"),
        ("deep_dive", "प्रमुख AI संगठनों से गहन रिपोर्ट और विश्लेषण।"),
    ],
    ui: UiStrings {
        title: "इस सप्ताह AI",
        date_label: "दिनांक:",
        tldr_title: "⚡ संक्षिप्त विवरण — इस सप्ताह की शीर्ष 3 खबरें",
        top_story: "🔥 प्रमुख खबर",
        read_more: "और पढ़ें →",
        footer_line1: "इस सप्ताह AI — स्वचालित ब्रीफिंग प्रणाली।",
        footer_line2: "सावधानीपूर्वक चयनित। ओपन इंटेलिजेंस द्वारा संचालित।",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional Hindi (Devanagari script)."),
};

static ES: Locale = Locale {
    code: "es",
    labels: &[
        ("trending", "IA en Tendencia"),
        ("indian", "Noticias Indias"),
        ("global", "Noticias Globales"),
        ("events", "Eventos"),
        ("ai_progress", "Progreso en IA"),
        ("research_plain", "Investigación en IA"),
        ("deep_dive", "Análisis Profundo"),
    ],
    descriptions: &[
        ("trending", "Las noticias de IA más importantes de las que todos hablan esta semana."),
        ("indian", "Desarrollos de IA que afectan las políticas federales y estatales de India."),
        ("global", "Gobernanza internacional de IA, regulación y políticas laborales."),
        ("events", "Próximas conferencias, cumbres y talleres sobre IA."),
        ("ai_progress", "Resultados de evaluación notables e hitos de capacidad técnica."),
        ("research_plain", "Investigación y avances pioneros en IA."),
        ("deep_dive", "Informes y análisis en profundidad de organizaciones líderes en IA."),
    ],
    ui: UiStrings {
        title: "IA Esta Semana",
        date_label: "Fecha:",
        tldr_title: "⚡ En Resumen — Las 3 mejores de esta semana",
        top_story: "🔥 Noticia Principal",
        read_more: "Leer más →",
        footer_line1: "IA Esta Semana — Sistema de Sesiones Informativas Automatizadas.",
        footer_line2: "Seleccionado cuidadosamente. Impulsado por inteligencia abierta.",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional Spanish."),
};

static DE: Locale = Locale {
    code: "de",
    labels: &[
        ("trending", "KI im Trend"),
        ("indian", "Indische Nachrichten"),
        ("global", "Globale Nachrichten"),
        ("events", "Veranstaltungen"),
        ("ai_progress", "KI Fortschritt"),
        ("research_plain", "KI Forschung"),
        ("deep_dive", "Tiefgreifende Analyse"),
    ],
    descriptions: &[
        ("trending", "Die größten KI-Nachrichten, über die diese Woche alle sprechen."),
        ("indian", "KI-Entwicklungen, die die indische Bundes- und Landespolitik beeinflussen."),
        ("global", "Internationale KI-Governance, Regulierung und Arbeitsmarktpolitik."),
        ("events", "Anstehende KI-Konferenzen, Gipfeltreffen und Workshops."),
        ("ai_progress", "Bemerkenswerte Benchmark-Ergebnisse und Meilensteine technischer Fähigkeiten."),
        ("research_plain", "Bahnbrechende KI-Forschung und Durchbrüche."),
        ("deep_dive", "Ausführliche Berichte und Analysen von führenden KI-Organisationen."),
    ],
    ui: UiStrings {
        title: "KI diese Woche",
        date_label: "Datum:",
        tldr_title: "⚡ Zusammenfassung — Top 3 der Woche",
        top_story: "🔥 Top-Story",
        read_more: "Weiterlesen →",
        footer_line1: "KI diese Woche — Automatisiertes Briefing-System.",
        footer_line2: "Sorgfältig ausgewählt. Angetrieben von Open Intelligence.",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional German."),
};

static ZH: Locale = Locale {
    code: "zh",
    labels: &[
        ("trending", "热门AI"),
        ("indian", "印度新闻"),
        ("global", "全球新闻"),
        ("events", "活动"),
        ("ai_progress", "AI进展"),
        ("research_plain", "AI研究"),
        ("deep_dive", "深度分析"),
    ],
    descriptions: &[
        ("trending", "本周大家都在谈论的最重大的AI新闻。"),
        ("indian", "影响印度联邦和邦政策的AI发展。"),
        ("global", "国际AI治理、监管和劳动力政策。"),
        ("events", "即将举行的AI会议、峰会和研讨会。"),
        ("ai_progress", "显著的基准测试结果和技术能力里程碑。"),
        ("research_plain", "前沿的AI研究和突破。"),
        ("deep_dive", "来自领先AI组织的深度报告和分析。"),
    ],
    ui: UiStrings {
        title: "本周AI",
        date_label: "日期:",
        tldr_title: "⚡ 摘要 — 本周三大新闻",
        top_story: "🔥 头条新闻",
        read_more: "阅读更多 →",
        footer_line1: "本周AI — 自动简报系统。",
        footer_line2: "精心挑选。由人工智能提供支持。",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional Simplified Chinese."),
};

static JA: Locale = Locale {
    code: "ja",
    labels: &[
        ("trending", "トレンドAI"),
        ("indian", "インドのニュース"),
        ("global", "グローバルニュース"),
        ("events", "イベント"),
        ("ai_progress", "AIの進歩"),
        ("research_plain", "AI研究"),
        ("deep_dive", "詳細分析"),
    ],
    descriptions: &[
        ("trending", "今週誰もが話している最大のAIニュース。"),
        ("indian", "インドの連邦および州の政策に影響を与えるAI開発。"),
        ("global", "国際的なAIガバナンス、規制、および労働政策。"),
        ("events", "開催予定のAI会議、サミット、およびワークショップ。"),
        ("ai_progress", "注目すべきベンチマーク結果と技術的能力のマイルストーン。"),
        ("research_plain", "最先端のAI研究と画期的な進歩。"),
        ("deep_dive", "主要なAI組織による詳細なレポートと分析。"),
    ],
    ui: UiStrings {
        title: "今週のAI",
        date_label: "日付:",
        tldr_title: "⚡ 要約 — 今週のトップ3",
        top_story: "🔥 トップニュース",
        read_more: "続きを読む →",
        footer_line1: "今週のAI — 自動ブリーフィングシステム。",
        footer_line2: "厳選。オープンインテリジェンスを搭載。",
    },
    prompt_directive: Some("\n- Write ALL output in fluent, professional Japanese."),
};

/// Resolve a language code to its table set, falling back to English for
/// anything unsupported.
pub fn locale(lang: &str) -> &'static Locale {
    match lang {
        "fr" => &FR,
        "hi" => &HI,
        "es" => &ES,
        "de" => &DE,
        "zh" => &ZH,
        "ja" => &JA,
        _ => &EN,
    }
}

/// Language directive for system prompts. None for English and for anything
/// that falls back to it.
pub fn prompt_directive(lang: &str) -> Option<&'static str> {
    locale(lang).prompt_directive
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Section label in the given language, falling back to English, then to the
/// key itself so the renderer never sees a hole.
pub fn label_for(lang: &str, key: &str) -> &'static str {
    lookup(locale(lang).labels, key).or_else(|| lookup(EN.labels, key)).unwrap_or("")
}

pub fn description_for(lang: &str, key: &str) -> &'static str {
    lookup(locale(lang).descriptions, key)
        .or_else(|| lookup(EN.descriptions, key))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let l = locale("xx");
        assert_eq!(l.code, "en");
        assert_eq!(l.ui.title, "AI This Week");
        assert!(prompt_directive("xx").is_none());
    }

    #[test]
    fn every_language_covers_every_section_key() {
        for lang in SUPPORTED_LANGUAGES {
            let l = locale(lang);
            for (key, _) in EN.labels {
                assert!(
                    lookup(l.labels, key).is_some(),
                    "missing label for {key} in {lang}"
                );
                assert!(
                    lookup(l.descriptions, key).is_some(),
                    "missing description for {key} in {lang}"
                );
            }
        }
    }

    #[test]
    fn label_lookup_falls_back_per_key() {
        assert_eq!(label_for("fr", "events"), "Événements");
        assert_eq!(label_for("xx", "events"), "Events");
        assert_eq!(label_for("fr", "nonexistent"), "");
    }

    #[test]
    fn non_default_languages_carry_a_directive() {
        for lang in SUPPORTED_LANGUAGES.iter().filter(|l| **l != "en") {
            assert!(prompt_directive(lang).is_some(), "no directive for {lang}");
        }
    }
}

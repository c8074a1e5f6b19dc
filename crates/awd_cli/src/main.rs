use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use awd_core::sections::default_sections;
use awd_core::VerifiedArticle;
use awd_llm::GroqBackend;
use awd_pipeline::DigestPipeline;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI Weekly Digest curation pipeline", long_about = None)]
struct Cli {
    /// Groq API key. Falls back to the GROQ_API_KEY environment variable.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the curation pipeline over verified article batches.
    Generate {
        /// JSON file mapping section keys to arrays of verified articles.
        #[arg(long)]
        input: PathBuf,
        /// Model identifier. Legacy aliases are rewritten to the canonical one.
        #[arg(long, default_value = awd_llm::client::CANONICAL_MODEL)]
        model: String,
        /// Output language code (en, fr, hi, es, de, zh, ja).
        #[arg(long, default_value = "en")]
        lang: String,
        /// Run date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Where to write the assembled document. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Skip the executive summary.
        #[arg(long)]
        no_tldr: bool,
    },
    /// List the built-in section registry.
    Sections,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            model,
            lang,
            date,
            output,
            no_tldr,
        } => {
            let api_key = match cli.api_key.or_else(|| std::env::var("GROQ_API_KEY").ok()) {
                Some(key) => key,
                None => bail!("no API key: pass --api-key or set GROQ_API_KEY"),
            };

            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let batches: HashMap<String, Vec<VerifiedArticle>> =
                serde_json::from_str(&raw).context("parsing input batches")?;
            // Process in registry order so log output and TL;DR input are stable
            // across runs; unknown keys go last.
            let mut ordered: Vec<(String, Vec<VerifiedArticle>)> = Vec::new();
            let mut batches = batches;
            for section in default_sections() {
                if let Some(articles) = batches.remove(&section.key) {
                    ordered.push((section.key, articles));
                }
            }
            let mut rest: Vec<_> = batches.into_iter().collect();
            rest.sort_by(|(a, _), (b, _)| a.cmp(b));
            ordered.extend(rest);

            let total: usize = ordered.iter().map(|(_, a)| a.len()).sum();
            info!("📨 Generating digest from {} articles across {} sections", total, ordered.len());

            let backend = Arc::new(GroqBackend::new(api_key));
            let pipeline = DigestPipeline::new(backend, model, lang).with_tldr(!no_tldr);
            let newsletter = pipeline.run(ordered, date).await?;

            let json = serde_json::to_string_pretty(&newsletter)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("✅ Digest written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Sections => {
            for section in default_sections() {
                println!(
                    "{:<16} {} (limit {}, threshold {})",
                    section.key, section.name, section.limit, section.relevance_threshold
                );
            }
        }
    }

    Ok(())
}

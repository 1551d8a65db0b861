use anyhow::Context;
use clap::Parser;
use resume_match::cli::{Cli, Commands, RunArgs};
use resume_match::config::Config;
use resume_match::matcher::ErrorPolicy;
use resume_match::pipeline::{self, MatchRun, RunOptions};
use resume_match::recommender::{Recommendation, Recommender};
use resume_match::scanner::{self, ScanOptions};
use resume_match::summary::{Bucket, MatchSummary};
use resume_match_common::{KeywordHitCount, PRESET_NAMES};
use serde::Serialize;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchReport<'a> {
    generated_at: chrono::DateTime<chrono::Local>,
    summary: &'a MatchSummary,
    hit_count: &'a KeywordHitCount,
    outcome: &'a resume_match::matcher::MatchOutcome,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendReport<'a> {
    generated_at: chrono::DateTime<chrono::Local>,
    recommendation: &'a Recommendation,
    hit_count: &'a KeywordHitCount,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_match={0},resume_match_common={0}", default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_options(run: &RunArgs, config: &Config) -> RunOptions {
    let mut options = RunOptions::from_config(config);
    options.catalog = run.catalog.clone();
    if let Some(preset) = &run.preset {
        options.preset = preset.clone();
    }
    if let Some(tier) = run.tier {
        options.tier_filter = tier;
    }
    if let Some(mode) = run.mode {
        options.mode = mode;
    }
    if run.abort_on_error {
        options.policy = ErrorPolicy::AbortOnFirstError;
    }
    if let Some(extension) = &run.extension {
        options.scan.extension = extension.clone();
    }
    options.scan.recursive |= run.recursive;
    options.scan.show_progress = true;
    options
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("✔ Saved: {}", path.display());
    Ok(())
}

fn print_run_header(run: &MatchRun) {
    let sets = &run.outcome.match_sets;
    println!(
        "✔ {} resumes, {} catalog entries ({} organizations)",
        run.documents.len(),
        run.catalog.len(),
        run.catalog.names().len()
    );
    if !run.outcome.skipped.is_empty() {
        println!("⚠ {} resumes skipped", run.outcome.skipped.len());
    }
    if !run.outcome.diagnostics.is_empty() {
        println!("⚠ {} keyword patterns ignored", run.outcome.diagnostics.len());
        for d in &run.outcome.diagnostics {
            println!("  {} / {}: {}", d.entry_name, d.pattern, d.message.lines().last().unwrap_or(""));
        }
    }
    println!(
        "Gold {} / Silver {} / Unmatched {}",
        sets.count(resume_match_common::Tier::Gold),
        sets.count(resume_match_common::Tier::Silver),
        sets.count(resume_match_common::Tier::Unmatched),
    );
}

fn bucket_label(bucket: &Bucket) -> String {
    match bucket {
        Bucket::Exactly(n) => n.to_string(),
        Bucket::Overflow => format!("> {}", resume_match::summary::HISTOGRAM_LIMIT),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Match { run } => {
            println!("resume-match - match\n");

            let options = run_options(&run, &config);
            let result = pipeline::run(&run.folder, &options)?;
            print_run_header(&result);

            let summary = MatchSummary::from_match_sets(&result.catalog, &result.outcome.match_sets);

            println!("\nKeyword hits ({}, {} resumes):", result.hits.tier_filter, result.hits.population);
            for (keyword, count) in result.hits.ranked() {
                println!("  {:>4}  {}", count, keyword);
            }

            println!("\nComplete matches per entry:");
            for entry in &summary.entries {
                println!("  {:>4}  {}  {}", entry.complete, entry.name, entry.description);
            }

            println!("\nGold resumes by entries with required hits:");
            for (bucket, count) in &summary.gold_histogram {
                println!("  {} with {}", count, bucket_label(bucket));
            }
            println!("Silver resumes by matched entries:");
            for (bucket, count) in &summary.silver_histogram {
                println!("  {} with {}", count, bucket_label(bucket));
            }

            if let Some(output) = &run.output {
                let report = MatchReport {
                    generated_at: chrono::Local::now(),
                    summary: &summary,
                    hit_count: &result.hits,
                    outcome: &result.outcome,
                };
                write_json(output, &report)?;
            }

            println!("\n✅ Done");
        }

        Commands::Recommend { run, organizations } => {
            println!("resume-match - recommend\n");

            let options = run_options(&run, &config);
            let result = pipeline::run(&run.folder, &options)?;
            print_run_header(&result);

            let recommender = Recommender::from_catalog(&result.catalog).with_tier_filter(options.tier_filter);
            if recommender.predicates().is_empty() {
                warn!("catalog has no shortlist predicates");
            }
            for organization in &organizations {
                if !result.catalog.contains_name(organization) {
                    warn!(%organization, "organization not in catalog");
                } else if result.catalog.predicate_for(organization).is_none() {
                    warn!(%organization, "organization has no shortlist predicate");
                }
            }

            let recommendation = if organizations.is_empty() {
                recommender.recommend(&result.outcome.match_sets, &result.hits)
            } else {
                recommender.recommend_for(&organizations, &result.outcome.match_sets, &result.hits)
            };

            for shortlist in recommendation.shortlists.values() {
                println!(
                    "\n{} ({} resumes, {} candidate matches)",
                    shortlist.organization,
                    shortlist.documents.len(),
                    shortlist.candidate_pairs
                );
                for (keyword, count) in &shortlist.keyword_counts {
                    println!("    {:>4}  {}", count, keyword);
                }
                for id in &shortlist.documents {
                    let contacts = result
                        .documents
                        .iter()
                        .find(|d| &d.identifier == id)
                        .map(|d| (d.companion_pdf(), d.contacts.iter().cloned().collect::<Vec<_>>().join(" ")))
                        .unwrap_or_default();
                    println!("  {} {} {}", id, contacts.0, contacts.1);
                }
            }

            println!(
                "\nShortlisted {} of {} matched resumes",
                recommendation.combined.len(),
                recommendation.total_matched
            );

            if let Some(output) = &run.output {
                let report = RecommendReport {
                    generated_at: chrono::Local::now(),
                    recommendation: &recommendation,
                    hit_count: &result.hits,
                };
                write_json(output, &report)?;
            }

            println!("\n✅ Done");
        }

        Commands::Lookup { folder, email, recursive } => {
            let options = ScanOptions {
                extension: config.extension.clone(),
                recursive: recursive || config.recursive,
                show_progress: false,
            };
            let documents: Vec<_> = scanner::read_documents(&folder, &options)?
                .into_iter()
                .filter_map(|doc| doc.map_err(|e| warn!(error = %e, "resume skipped")).ok())
                .collect();

            let found = scanner::find_by_contact(&documents, &email);
            if found.is_empty() {
                println!("No resume mentions {}", email);
            }
            for doc in found {
                let others: Vec<&str> = doc.contacts.iter().map(|c| c.as_str()).collect();
                println!("<{}> matches {} ({}) {}", email, doc.identifier, doc.companion_pdf(), others.join(" "));
            }
        }

        Commands::Config { show, set_preset } => {
            let mut config = config;

            if let Some(preset) = set_preset {
                config.set_default_preset(preset)?;
                println!("✔ Default preset saved");
            }

            if show {
                println!("Settings ({}):", Config::config_path()?.display());
                println!("  Default preset: {}", config.default_preset);
                println!("  Extension: {}", config.extension);
                println!("  Tier filter: {}", config.tier_filter);
                println!("  Mode: {:?}", config.mode);
                println!("  Error policy: {:?}", config.error_policy);
                println!("  Recursive: {}", config.recursive);
                println!("  Presets: {}", PRESET_NAMES.join(", "));
            }
        }
    }

    Ok(())
}

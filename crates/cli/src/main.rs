use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use corpus_loader::{collect_skills, CorpusLoader};
use corpus_protocol::{AuditRules, CorpusSnapshot, MetadataIssue};
use corpus_report::{evaluate, AuditReport};
use corpus_tokens::counter_for_rules;
use std::path::PathBuf;
use std::process::ExitCode;

mod output;

use output::{AuditOutput, ResolveOutput, SearchOutput};

/// Exit code for runs with hard findings or soft findings past thresholds.
const EXIT_FINDINGS: u8 = 1;
/// Exit code for usage problems or an empty corpus.
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "corpus-audit", version, about = "Static audit over a documentation corpus")]
struct Cli {
    /// Corpus root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Audit rules file (default: <root>/audit-rules.toml when present)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full audit: reference graph plus token budgets
    Audit,
    /// Token budget reports, for one document or the whole corpus
    Tokens {
        /// Corpus-relative document path; all documents when omitted
        path: Option<String>,
    },
    /// Ranked keyword search over skills
    Search { query: String },
    /// List skills in a category (exact, case-insensitive)
    Category { name: String },
    /// Resolve the transitive dependency plan for skills
    Resolve {
        #[arg(required = true)]
        slugs: Vec<String>,
    },
    /// Recommended skills for a product type
    Recommend { product_type: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let rules = match &cli.rules {
        Some(path) => {
            AuditRules::load(path).with_context(|| format!("loading rules {}", path.display()))?
        }
        None => AuditRules::load_or_default(&cli.root).context("loading audit rules")?,
    };

    let loader = CorpusLoader::new(&cli.root)?;
    let snapshot = loader.load()?;

    match cli.command {
        Commands::Audit => audit(&snapshot, &rules, cli.json),
        Commands::Tokens { path } => tokens(&snapshot, &rules, path.as_deref(), cli.json),
        Commands::Search { query } => search(&snapshot, &rules, &query, cli.json),
        Commands::Category { name } => category(&snapshot, &rules, &name, cli.json),
        Commands::Resolve { slugs } => resolve(&snapshot, &rules, &slugs, cli.json),
        Commands::Recommend { product_type } => {
            recommend(&snapshot, &rules, &product_type, cli.json)
        }
    }
}

fn audit(snapshot: &CorpusSnapshot, rules: &AuditRules, json: bool) -> Result<u8> {
    if snapshot.documents.is_empty() {
        eprintln!("no documents found in corpus");
        return Ok(EXIT_USAGE);
    }

    let graph = corpus_graph::build_graph(snapshot, rules)?;
    let counter = counter_for_rules(rules);
    let token_reports = corpus_tokens::count_corpus(snapshot, &rules.token_limits, counter.as_ref());

    let (_, skill_issues) = collect_skills(snapshot, &rules.description_bounds);
    let mut metadata_issues: Vec<MetadataIssue> = snapshot.metadata_issues.clone();
    metadata_issues.extend(skill_issues);

    let report = AuditReport::new(graph, token_reports);
    let verdict = evaluate(&report, rules);

    let out = AuditOutput {
        report,
        verdict,
        metadata_issues,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        output::print_audit(&out);
    }

    Ok(if out.verdict.passed { 0 } else { EXIT_FINDINGS })
}

fn tokens(
    snapshot: &CorpusSnapshot,
    rules: &AuditRules,
    path: Option<&str>,
    json: bool,
) -> Result<u8> {
    let counter = counter_for_rules(rules);
    let reports = match path {
        Some(path) => {
            let doc = snapshot
                .document(path)
                .with_context(|| format!("no such document: {path}"))?;
            let report = corpus_tokens::count_tokens(&doc.raw_text, &rules.token_limits, counter.as_ref());
            std::iter::once((path.to_string(), report)).collect()
        }
        None => corpus_tokens::count_corpus(snapshot, &rules.token_limits, counter.as_ref()),
    };

    let violations: usize = reports.values().map(|r| r.violations.len()).sum();
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        output::print_token_reports(&reports);
    }

    Ok(if violations > 0 { EXIT_FINDINGS } else { 0 })
}

fn search(snapshot: &CorpusSnapshot, rules: &AuditRules, query: &str, json: bool) -> Result<u8> {
    let index = build_index(snapshot, rules);
    let hits = index.search(query);

    let out = SearchOutput {
        query: query.to_string(),
        count: hits.len(),
        hits,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        output::print_search(&out, &index);
    }
    Ok(0)
}

fn category(snapshot: &CorpusSnapshot, rules: &AuditRules, name: &str, json: bool) -> Result<u8> {
    let index = build_index(snapshot, rules);
    let records = index.filter_by_category(name);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("skills in category '{name}': {}", records.len());
        for record in records {
            println!("  {} - {}", record.slug, record.description);
        }
    }
    Ok(0)
}

fn resolve(
    snapshot: &CorpusSnapshot,
    rules: &AuditRules,
    slugs: &[String],
    json: bool,
) -> Result<u8> {
    let index = build_index(snapshot, rules);

    match corpus_resolver::resolve(slugs, &index) {
        Ok(plan) => {
            let out = ResolveOutput {
                load_command: plan.load_command(),
                plan,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                output::print_plan(&out);
            }
            Ok(0)
        }
        Err(cycle) => {
            eprintln!("{cycle}");
            Ok(EXIT_FINDINGS)
        }
    }
}

fn recommend(
    snapshot: &CorpusSnapshot,
    rules: &AuditRules,
    product_type: &str,
    json: bool,
) -> Result<u8> {
    let index = build_index(snapshot, rules);
    let rec = corpus_index::recommend_for_product(product_type, &rules.product_skill_map, &index);

    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        println!("recommended skills for '{product_type}': {}", rec.slugs.len());
        for slug in &rec.slugs {
            println!("  {slug}");
        }
        for unknown in &rec.unknown {
            println!("  warning: unknown slug {}", unknown.slug);
        }
    }
    Ok(0)
}

fn build_index(snapshot: &CorpusSnapshot, rules: &AuditRules) -> corpus_index::SkillIndex {
    let (records, issues) = collect_skills(snapshot, &rules.description_bounds);
    for issue in &issues {
        log::warn!("skipping skill {}: {}", issue.path, issue.reason);
    }
    corpus_index::SkillIndex::build(records)
}

mod parser;
mod pdf;
mod progress;
mod quiz;
mod record;
mod settings;
mod store;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use progress::CompletionSet;
use record::{Difficulty, QuestionRecord};
use settings::Settings;
use store::Bank;

#[derive(Parser)]
#[command(name = "sat_ela", about = "SAT ELA question bank parser and practice quiz")]
struct Cli {
    /// Question bank PDF (overrides SAT_ELA_PDF_PATH)
    #[arg(long, global = true)]
    pdf: Option<PathBuf>,
    /// Processed question store (overrides SAT_ELA_QUESTIONS_PATH)
    #[arg(long, global = true)]
    questions: Option<PathBuf>,
    /// Completed-question ids (overrides SAT_ELA_PROGRESS_PATH)
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the question bank into the JSON store
    Parse {
        /// Rebuild even if the store already exists
        #[arg(short, long)]
        force: bool,
        /// Source file: a PDF, or text already extracted from one
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Run a practice session over uncompleted questions
    Quiz {
        /// Number of questions (prompted for when omitted)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Fixed shuffle seed
        #[arg(long)]
        seed: Option<u64>,
        /// Show the rationale after each answer
        #[arg(short, long)]
        explain: bool,
    },
    /// Show question bank and progress statistics
    Stats,
    /// Questions overview table
    List {
        /// Filter by difficulty (Easy, Medium, Hard)
        #[arg(short, long)]
        difficulty: Option<String>,
        /// Filter by domain (substring, case-insensitive)
        #[arg(long)]
        domain: Option<String>,
        /// Only questions not yet completed
        #[arg(short, long)]
        pending: bool,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Dump the raw extracted PDF text for debugging
    Extract {
        #[arg(short, long, default_value = "extracted_full_text_for_debugging.txt")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?.with_overrides(cli.pdf, cli.questions, cli.progress);

    let result = match cli.command {
        Commands::Parse { force, input } => {
            let source = input.unwrap_or_else(|| settings.pdf_path.clone());
            let bank = open_bank(&settings, &source, force)?;
            match &bank {
                Bank::Stored(_) => println!(
                    "Question store {} already has {} questions (use --force to rebuild).",
                    settings.questions_path.display(),
                    bank.records().len()
                ),
                Bank::Parsed(report) => {
                    println!(
                        "Parsed {} of {} question blocks ({} skipped).",
                        report.accepted(),
                        report.segments_seen,
                        report.rejected()
                    );
                    if report.accepted() > 0 {
                        println!("Saved to {}", settings.questions_path.display());
                    }
                }
            }
            Ok(())
        }
        Commands::Quiz { count, seed, explain } => run_quiz(&settings, count, seed, explain),
        Commands::Stats => {
            let records = open_bank(&settings, &settings.pdf_path, false)?.into_records();
            let done = CompletionSet::load(&settings.progress_path)?;
            print_stats(&records, &done);
            Ok(())
        }
        Commands::List { difficulty, domain, pending, limit } => {
            let records = open_bank(&settings, &settings.pdf_path, false)?.into_records();
            let done = CompletionSet::load(&settings.progress_path)?;
            let difficulty = difficulty.as_deref().map(Difficulty::parse);
            let domain = domain.map(|d| d.to_lowercase());

            let rows: Vec<&QuestionRecord> = records
                .iter()
                .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
                .filter(|r| {
                    domain
                        .as_deref()
                        .map_or(true, |d| r.category_path.domain.to_lowercase().contains(d))
                })
                .filter(|r| !pending || !done.contains(&r.id))
                .take(limit)
                .collect();
            if rows.is_empty() {
                println!("No questions found.");
                return Ok(());
            }
            print_table(&rows, &done);
            Ok(())
        }
        Commands::Extract { output } => {
            let text = pdf::load_source_text(&settings.pdf_path)?;
            std::fs::write(&output, &text)
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Extracted {} characters from {} to {}",
                text.chars().count(),
                settings.pdf_path.display(),
                output.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Load the store or parse `source` into it, with a progress bar over the
/// question blocks.
fn open_bank(settings: &Settings, source: &Path, force: bool) -> anyhow::Result<Bank> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let bank = store::load_or_build(settings, source, force, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();
    let bank = bank?;

    if let Bank::Parsed(report) = &bank {
        for rejection in &report.rejections {
            warn!("skipped question block {}", rejection);
        }
        info!(
            segments = report.segments_seen,
            accepted = report.accepted(),
            rejected = report.rejected(),
            "parse complete"
        );
    }
    Ok(bank)
}

fn run_quiz(settings: &Settings, count: Option<usize>, seed: Option<u64>, explain: bool) -> anyhow::Result<()> {
    let records = open_bank(settings, &settings.pdf_path, false)?.into_records();
    if records.is_empty() {
        println!("No questions available to run the test.");
        return Ok(());
    }
    let mut done = CompletionSet::load(&settings.progress_path)?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = quiz::run_session(
        quiz::available(&records, &done),
        quiz::QuizOptions { count, explain },
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut rng,
    )?;

    if summary.answered.is_empty() {
        return Ok(());
    }
    let answered = summary.answered.len();
    done.extend(summary.answered);
    done.save(&settings.progress_path)?;

    if summary.ended_early {
        println!("\n\nInput closed; ending the session early.");
    }
    println!("\n--- Test Complete ---");
    println!("Your progress has been saved.");
    println!(
        "You completed {} questions in this session ({} correct).",
        answered, summary.correct
    );
    println!("Total questions completed: {}.", done.len());
    Ok(())
}

fn print_stats(records: &[QuestionRecord], done: &CompletionSet) {
    let completed = records.iter().filter(|r| done.contains(&r.id)).count();
    println!("Questions: {}", records.len());
    println!("Completed: {}", completed);
    println!("Remaining: {}", records.len() - completed);

    let mut by_difficulty: BTreeMap<Difficulty, (usize, usize)> = BTreeMap::new();
    let mut by_domain: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for r in records {
        let finished = usize::from(done.contains(&r.id));
        let e = by_difficulty.entry(r.difficulty).or_default();
        e.0 += 1;
        e.1 += finished;
        let e = by_domain.entry(r.category_path.domain.as_str()).or_default();
        e.0 += 1;
        e.1 += finished;
    }

    println!("\n--- By difficulty ---");
    for (d, (total, finished)) in &by_difficulty {
        println!("  {:<8} {:>5} ({} done)", d.as_str(), total, finished);
    }
    println!("\n--- By domain ---");
    for (d, (total, finished)) in &by_domain {
        println!("  {:<36} {:>5} ({} done)", truncate(d, 36), total, finished);
    }
}

fn print_table(rows: &[&QuestionRecord], done: &CompletionSet) {
    println!(
        "{:>3} | {:<10} | {:<6} | {:<24} | {:<20} | {:<4} | {:<40}",
        "#", "ID", "Level", "Domain", "Skill", "Done", "Question"
    );
    println!("{}", "-".repeat(125));

    for (i, r) in rows.iter().enumerate() {
        let question = truncate(&r.question_text.replace('\n', " "), 40);
        println!(
            "{:>3} | {:<10} | {:<6} | {:<24} | {:<20} | {:<4} | {:<40}",
            i + 1,
            truncate(&r.id, 10),
            r.difficulty.as_str(),
            truncate(&r.category_path.domain, 24),
            truncate(&r.category_path.skill, 20),
            if done.contains(&r.id) { "yes" } else { "" },
            question
        );
    }

    println!("\n{} questions", rows.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

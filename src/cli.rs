//! Command-line front end.
//!
//! ```text
//! # Check logs the way the upload form does
//! laqp validate w5abc.log k1xyz.log
//!
//! # Score a single log
//! laqp score w5abc.log --format json
//!
//! # Score a folder of logs, write rejected ones' reports and the results
//! laqp process incoming/ --problems-dir problems/ --output results.json
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use laqp_lib::config::{Contest, ContestConfig};
use laqp_lib::pipeline::{aggregate, check_submission, process_log, BatchReport, LogOutcome};
use laqp_lib::reference::ReferenceData;
use laqp_lib::scoring::ScoreRecord;

#[derive(Parser)]
#[command(name = "laqp")]
#[command(version)]
#[command(about = "Validate, prepare and score Louisiana QSO Party Cabrillo logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Contest configuration (JSON); LAQP defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Parish list, one code per line (la_parishes.txt)
    #[arg(long, global = true, requires = "states_provinces")]
    pub parishes: Option<PathBuf>,

    /// State and province list, one code per line (wve_abbrevs.txt)
    #[arg(long, global = true, requires = "parishes")]
    pub states_provinces: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check logs against the submission rules without scoring
    Validate(ValidateArgs),

    /// Score one log
    Score(ScoreArgs),

    /// Score a batch of logs and build standings and statistics
    Process(ProcessArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Cabrillo log files
    #[arg(required = true)]
    pub logs: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Cabrillo log file
    pub log: PathBuf,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Log files or directories of log files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write `<stem>_errors.txt` here for every log that was not scored
    #[arg(long)]
    pub problems_dir: Option<PathBuf>,

    /// Write the full batch report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Contest settings and reference tables for this run
    pub fn load_contest(&self) -> anyhow::Result<Contest> {
        let config = match &self.config {
            Some(path) => ContestConfig::from_json_file(path)?,
            None => ContestConfig::default(),
        };
        let reference = match (&self.parishes, &self.states_provinces) {
            (Some(parishes), Some(states)) => ReferenceData::from_files(parishes, states)?,
            _ => ReferenceData::builtin(),
        };
        Ok(Contest::new(config, reference))
    }
}

async fn read_log(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Expand directories into their files, sorted by name
async fn collect_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if tokio::fs::metadata(input)
            .await
            .with_context(|| format!("cannot access {}", input.display()))?
            .is_dir()
        {
            let mut dir_files = Vec::new();
            let mut entries = tokio::fs::read_dir(input).await?;
            while let Some(entry) = entries.next_entry().await? {
                if entry.file_type().await?.is_file() {
                    dir_files.push(entry.path());
                }
            }
            dir_files.sort();
            files.extend(dir_files);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

pub async fn run_validate(args: ValidateArgs, format: OutputFormat, contest: &Contest) -> anyhow::Result<()> {
    let mut checks = Vec::with_capacity(args.logs.len());
    for path in &args.logs {
        let text = read_log(path).await?;
        let check = check_submission(&text, contest);
        log::info!(
            "{}: {}",
            display_name(path),
            if check.accepted { "accepted" } else { "rejected" }
        );
        checks.push((display_name(path), check));
    }

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = checks
                .iter()
                .map(|(name, check)| serde_json::json!({ "file": name, "check": check }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            for (name, check) in &checks {
                println!(
                    "{}: {} ({})",
                    name,
                    if check.accepted { "ACCEPTED" } else { "REJECTED" },
                    check.callsign.as_deref().unwrap_or("no callsign")
                );
                for error in &check.errors {
                    println!("  error: {}", error);
                }
                for warning in &check.warnings {
                    println!("  warning: {}", warning);
                }
            }
        }
    }
    Ok(())
}

pub async fn run_score(args: ScoreArgs, format: OutputFormat, contest: Contest) -> anyhow::Result<()> {
    let text = read_log(&args.log).await?;
    let name = display_name(&args.log);
    let outcome = tokio::task::spawn_blocking(move || process_log(&name, &text, &contest)).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => match &outcome {
            LogOutcome::Scored { score, .. } => print_score(score),
            other => {
                if let Some(report) = other.problem_report() {
                    print!("{}", report);
                }
            }
        },
    }
    Ok(())
}

fn print_score(score: &ScoreRecord) {
    let categories: Vec<String> = score.categories.ids().iter().map(|c| c.short_id()).collect();
    println!("Callsign:    {}", score.callsign);
    println!("Location:    {}", score.classification.location_type.as_str());
    println!("Categories:  {}", categories.join(", "));
    if let Some(overlay) = &score.categories.overlay {
        println!("Overlay:     {}", overlay.kind.display_name());
    }
    println!(
        "QSOs:        {} ({} duplicates)",
        score.valid_qso_count(),
        score.duplicate_count()
    );
    println!("QSO points:  {}", score.qso_points);
    println!("Multipliers: {}", score.multiplier_count());
    for bonus in &score.bonuses {
        println!("Bonus:       {:?} +{}", bonus.source, bonus.points);
    }
    println!("Score:       {}", score.final_score);
}

pub async fn run_process(args: ProcessArgs, format: OutputFormat, contest: Contest) -> anyhow::Result<()> {
    let files = collect_inputs(&args.inputs).await?;
    log::info!("Processing {} logs", files.len());

    let contest = Arc::new(contest);
    let tasks: Vec<_> = files
        .into_iter()
        .map(|path| tokio::spawn(load_and_process(path, Arc::clone(&contest))))
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        outcomes.push(task.await??);
    }
    let report = aggregate(outcomes, &contest);

    if let Some(dir) = &args.problems_dir {
        write_problem_reports(&report, dir).await?;
    }

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(output, json)
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
        log::info!("Wrote results to {}", output.display());
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "standings": report.standings,
                    "statistics": report.statistics,
                }))?
            );
        }
        OutputFormat::Text => print_summary(&report),
    }
    Ok(())
}

/// Read and score one file. A read failure becomes that file's outcome.
async fn load_and_process(path: PathBuf, contest: Arc<Contest>) -> anyhow::Result<LogOutcome> {
    let name = display_name(&path);
    let text = match read_log(&path).await {
        Ok(text) => text,
        Err(err) => {
            log::warn!("{}: {:#}", name, err);
            return Ok(LogOutcome::Unreadable {
                name,
                error: format!("{:#}", err),
            });
        }
    };
    let outcome = tokio::task::spawn_blocking(move || process_log(&name, &text, &contest)).await?;
    Ok(outcome)
}

async fn write_problem_reports(report: &BatchReport, dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;
    for outcome in &report.outcomes {
        if let Some(text) = outcome.problem_report() {
            let stem = Path::new(outcome.name())
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| outcome.name().to_string());
            let path = dir.join(format!("{}_errors.txt", stem));
            tokio::fs::write(&path, text)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::debug!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(report: &BatchReport) {
    println!(
        "{} logs: {} scored, {} problems",
        report.outcomes.len(),
        report.scored().count(),
        report.problem_count()
    );
    println!();
    println!("Overall");
    for placement in &report.standings.overall {
        println!(
            "  {:>3}. {:<12} {:>8}  ({} QSOs)",
            placement.rank, placement.callsign, placement.score, placement.valid_qsos
        );
    }
    for category in &report.standings.by_category {
        println!();
        println!("{} [{}]", category.display_name, category.category);
        for placement in &category.placements {
            println!(
                "  {:>3}. {:<12} {:>8}",
                placement.rank, placement.callsign, placement.score
            );
        }
    }
    let stats = &report.statistics;
    println!();
    println!(
        "{} QSOs; {} parishes active ({} operated from, {} worked)",
        stats.total_qsos, stats.parishes_active, stats.parishes_operated, stats.parishes_worked
    );
    if !stats.inactive_parishes.is_empty() {
        println!("Inactive parishes: {}", stats.inactive_parishes.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
START-OF-LOG: 3.0
CALLSIGN: W5ABC
CATEGORY-OPERATOR: SINGLE-OP
CATEGORY-POWER: LOW
CATEGORY-STATION: FIXED
EMAIL: w5abc@example.com
QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA
END-OF-LOG:
";

    #[tokio::test]
    async fn test_unreadable_file_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("w5abc.log");
        std::fs::write(&good, GOOD).unwrap();
        let missing = dir.path().join("gone.log");

        let contest = Arc::new(Contest::default());
        let lost = load_and_process(missing, Arc::clone(&contest)).await.unwrap();
        let scored = load_and_process(good, Arc::clone(&contest)).await.unwrap();

        assert!(matches!(&lost, LogOutcome::Unreadable { name, .. } if name == "gone.log"));
        assert!(lost.problem_report().unwrap().contains("Status: UNREADABLE"));
        assert_eq!(scored.score().map(|s| s.final_score), Some(4));

        let report = aggregate(vec![lost, scored], &contest);
        assert_eq!(report.problem_count(), 1);
        assert_eq!(report.standings.overall.len(), 1);
    }

    #[tokio::test]
    async fn test_problem_reports_written_per_log() {
        let dir = tempfile::tempdir().unwrap();
        let contest = Contest::default();
        let outcomes = vec![
            LogOutcome::Unreadable {
                name: "gone.log".to_string(),
                error: "failed to read gone.log".to_string(),
            },
            process_log("w5abc.log", GOOD, &contest),
        ];
        let report = aggregate(outcomes, &contest);
        write_problem_reports(&report, dir.path()).await.unwrap();

        assert!(dir.path().join("gone_errors.txt").exists());
        assert!(!dir.path().join("w5abc_errors.txt").exists());
    }
}

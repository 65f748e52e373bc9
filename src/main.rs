mod day;
mod problem;
mod runner;
mod scaffold;
mod settings;
mod templates;
mod watch;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use day::{Day, PuzzleId};
use problem::fetch::Fetcher;
use problem::render::{fallback_document, render};
use runner::{exit_code, Runner};
use scaffold::{DayFile, Workspace};
use settings::Settings;

#[derive(Parser)]
#[command(name = "aoc", version, about = "Advent of Code scaffolding and task runner")]
struct Cli {
    /// Puzzle year (default: AOC_YEAR / aoc.toml / latest event)
    #[arg(short, long, global = true)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new day scaffold
    New {
        /// Day number (1-25)
        day: Day,
        /// Write the placeholder problem.md without fetching
        #[arg(long)]
        no_fetch: bool,
    },
    /// Fetch the problem statement into problem.md
    Fetch {
        /// Day number (1-25)
        day: Day,
    },
    /// Run solution for a specific day or all days
    Run {
        /// Day number (1-25)
        day: Option<Day>,
    },
    /// Run tests for a specific day or all days
    Test {
        /// Day number (1-25)
        day: Option<Day>,
        /// Re-run on file changes
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load().context("failed to load configuration")?;
    if let Some(year) = cli.year {
        settings.year = year;
    }

    let workspace = Workspace::new(&settings.root);
    let runner = Runner::new(&settings.runner, &settings.root);

    match cli.command {
        Commands::New { day, no_fetch } => {
            new_day(&settings, &workspace, day, !no_fetch).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fetch { day } => {
            if !workspace.day_dir(day).is_dir() {
                bail!("Day {} not found! Run `aoc new {}` first.", day.padded(), day);
            }
            let markdown = fetch_markdown(&settings, day).await?;
            let path = workspace.write(day, DayFile::Problem, &markdown)?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { day: Some(day) } => {
            if !workspace.exists(day, DayFile::Solution) {
                bail!("Solution for day {} not found!", day.padded());
            }
            println!("Running solution for day {}...\n", day.padded());
            let status = runner.run_solution(&workspace.relative(day, DayFile::Solution))?;
            Ok(ExitCode::from(exit_code(status)))
        }
        Commands::Run { day: None } => run_all(&workspace, &runner),
        Commands::Test { day, watch } => run_tests(&workspace, &runner, day, watch),
    }
}

async fn new_day(settings: &Settings, workspace: &Workspace, day: Day, fetch: bool) -> Result<()> {
    let dir = workspace.create_day(day)?;

    let markdown = if fetch {
        match fetch_markdown(settings, day).await {
            Ok(md) => md,
            Err(e) => {
                warn!("Could not fetch problem statement, writing template instead: {:#}", e);
                render(&fallback_document(day))
            }
        }
    } else {
        render(&fallback_document(day))
    };
    workspace.write(day, DayFile::Problem, &markdown)?;

    let padded = day.padded();
    println!("Created scaffold for day {} in {}", padded, dir.display());
    println!("Add your puzzle input to src/day{}/input.txt", padded);
    println!("Read the puzzle:   src/day{}/problem.md", padded);
    println!("Run solution:      aoc run {}", day);
    println!("Run tests:         aoc test {}", day);
    Ok(())
}

/// Fetch, extract and render one problem page.
async fn fetch_markdown(settings: &Settings, day: Day) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;
    let fetcher =
        Fetcher::new(client, &settings.base_url).with_session(settings.session.clone());
    let id = PuzzleId {
        day,
        year: settings.year,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {}", fetcher.problem_url(id)));
    pb.enable_steady_tick(Duration::from_millis(100));
    let doc = problem::fetch_problem(&fetcher, id).await;
    pb.finish_and_clear();

    let doc = doc?;
    info!(title = %doc.title, examples = doc.examples.len(), "Fetched problem");
    Ok(render(&doc))
}

fn run_all(workspace: &Workspace, runner: &Runner) -> Result<ExitCode> {
    let days = workspace.days_with(DayFile::Solution);
    if days.is_empty() {
        println!("No solutions found under {}", workspace.src_dir().display());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Running all implemented solutions...\n");
    let t0 = Instant::now();
    let mut failed = Vec::new();
    for day in days {
        println!("\nDay {}:", day.padded());
        let started = Instant::now();
        let status = runner.run_solution(&workspace.relative(day, DayFile::Solution))?;
        if !status.success() {
            warn!("Day {} exited with {}", day.padded(), status);
            failed.push(day.padded());
        }
        info!("Day {} finished in {}", day.padded(), format_duration(started.elapsed()));
    }

    println!("\nDone in {}", format_duration(t0.elapsed()));
    if failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Failed: {}", failed.join(", "));
        Ok(ExitCode::FAILURE)
    }
}

fn run_tests(
    workspace: &Workspace,
    runner: &Runner,
    day: Option<Day>,
    watch: bool,
) -> Result<ExitCode> {
    let target = match day {
        Some(day) => {
            if !workspace.exists(day, DayFile::Test) {
                bail!("Tests for day {} not found!", day.padded());
            }
            println!("Running tests for day {}...\n", day.padded());
            Some(workspace.relative(day, DayFile::Test))
        }
        None => {
            println!("Running all tests...\n");
            None
        }
    };

    let status = runner.run_tests(target.as_deref())?;
    if !watch {
        return Ok(ExitCode::from(exit_code(status)));
    }

    let watch_dir = match day {
        Some(day) => workspace.day_dir(day),
        None => workspace.src_dir(),
    };
    watch::watch_and_rerun(&watch_dir, || {
        let status = runner.run_tests(target.as_deref())?;
        if !status.success() {
            warn!("Tests exited with {}", status);
        }
        Ok(())
    })?;
    Ok(ExitCode::SUCCESS)
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

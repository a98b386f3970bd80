//! Command-line front end for the progress store.
//!
//! # Responsibility
//! - Load config, open the store and print funding/roadmap/task views.
//! - Persist completions given with `--complete` when a database is configured.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use smallecon_core::catalog::default_tasks;
use smallecon_core::db::DbLocation;
use smallecon_core::{
    current_phase, init_logging, init_stderr_logging, roadmap, AppConfig, FundingReport,
    NextMilestone, PersistenceService, Persona, Store, TaskCategory, TaskId, TaskService,
    Transition,
};
use std::path::PathBuf;

/// Small Economy Works progress dashboard
#[derive(Parser, Debug)]
#[command(name = "smallecon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a smallecon.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show funding progress, optionally completing tasks first
    Summary {
        /// Task id to mark completed (repeatable)
        #[arg(long = "complete")]
        complete: Vec<String>,

        /// Task id to mark pending again (repeatable)
        #[arg(long = "reset")]
        reset: Vec<String>,
    },
    /// Show the five-phase roadmap
    Roadmap {
        /// individual | community_builder | entrepreneur
        #[arg(long)]
        persona: Option<String>,
    },
    /// List catalog tasks
    Tasks {
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    match &config.logging.dir {
        Some(dir) => init_logging(&config.logging.level, &dir.to_string_lossy()),
        None => init_stderr_logging(&config.logging.level),
    }
    .map_err(anyhow::Error::msg)
    .context("failed to initialize logging")?;

    let persistence =
        PersistenceService::open(&DbLocation::from_optional_path(config.storage.db_path.as_deref()))
            .context("failed to open database")?;
    let mut store = Store::new(default_tasks());
    persistence
        .load_into(&mut store)
        .await
        .context("failed to load saved progress")?;

    match cli.command {
        Command::Summary { complete, reset } => {
            run_summary(&config, &persistence, &mut store, complete, reset).await
        }
        Command::Roadmap { persona } => {
            let persona = match persona {
                Some(value) => value.parse::<Persona>()?,
                None => config.roadmap.persona,
            };
            print_roadmap(&store, persona);
            Ok(())
        }
        Command::Tasks { category } => {
            let category = category
                .map(|value| value.parse::<TaskCategory>())
                .transpose()?;
            print_tasks(&store, category);
            Ok(())
        }
    }
}

async fn run_summary(
    config: &AppConfig,
    persistence: &PersistenceService,
    store: &mut Store,
    complete: Vec<String>,
    reset: Vec<String>,
) -> anyhow::Result<()> {
    let ladder = &config.funding.milestones;
    let mut service = TaskService::new(store, ladder, config.funding.unlock_rule);
    let mut changed = false;

    for raw in complete {
        let id = TaskId::parse(&raw)?;
        let outcome = service.complete_task(id);
        changed |= outcome.transition == Transition::Changed;
        for milestone in outcome.newly_reached {
            println!(
                "Milestone reached: ${} ({} tasks)",
                milestone.amount, milestone.required_tasks
            );
        }
    }
    for raw in reset {
        let id = TaskId::parse(&raw)?;
        changed |= service.reset_task(id) == Transition::Changed;
    }

    print_report(&service.funding_report());

    if changed && config.storage.db_path.is_some() {
        let revision = persistence.save(store).await?;
        info!("event=cli_save module=cli status=ok revision={revision}");
        println!("Progress saved.");
    }
    Ok(())
}

fn print_report(report: &FundingReport) {
    println!(
        "Tasks completed: {}/{} ({}%)",
        report.completed_count, report.total_count, report.percent_complete
    );
    println!(
        "Funding unlocked: ${} of ${} [{}]",
        report.unlocked,
        report.potential,
        report.rule.as_str()
    );
    match report.next {
        NextMilestone::Pending(milestone) => println!(
            "Next milestone: ${} at {} tasks",
            milestone.amount, milestone.required_tasks
        ),
        NextMilestone::AllReached { total } => {
            println!("All milestones reached: ${total}")
        }
    }
}

fn print_roadmap(store: &Store, persona: Persona) {
    let buckets = roadmap(persona, &store.progress());
    println!("Roadmap for {persona}:");
    for bucket in &buckets {
        println!(
            "  {:<10} {:>3}%  ({}/{})",
            bucket.phase.as_str(),
            bucket.percent,
            bucket.completed_count,
            bucket.tasks.len()
        );
        for task in &bucket.tasks {
            let mark = if store.completed_task_ids().contains(&task.id) {
                "x"
            } else {
                " "
            };
            println!("    [{mark}] {} ({})", task.title, task.id);
        }
    }
    match current_phase(&buckets) {
        Some(phase) => println!("Current phase: {phase}"),
        None => println!("Every phase complete."),
    }
}

fn print_tasks(store: &Store, category: Option<TaskCategory>) {
    let progress = store.progress();
    let tasks = match category {
        Some(category) => progress.tasks_by_category(category),
        None => progress.tasks().iter().collect(),
    };
    for task in tasks {
        let mark = if progress.is_completed(&task.id) {
            "x"
        } else {
            " "
        };
        println!(
            "[{mark}] {:<22} {:<10} ${:>4}  {}",
            task.id.as_str(),
            task.category.as_str(),
            task.funding_amount,
            task.title
        );
    }
}

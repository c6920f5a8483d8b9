//! Build a day's schedule from tasks given on the command line or in a file.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use dayslot_core::export::{rows_from_slots, ExportRow};
use dayslot_core::scheduler::parse_clock;
use dayslot_core::storage::{schedule_file, task_file};
use dayslot_core::{validate, Allocator, Config, SchedulerConfig, Task};

#[derive(Args)]
pub struct PlanArgs {
    /// Task list (.json or .toml)
    #[arg(long)]
    tasks: Option<PathBuf>,
    /// Inline task as name:hours:priority[:category] (repeatable)
    #[arg(long = "task", value_name = "SPEC")]
    inline: Vec<String>,
    /// Day to plan (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Start of work (HH:MM)
    #[arg(long)]
    start: Option<String>,
    /// End of work (HH:MM)
    #[arg(long)]
    end: Option<String>,
    /// Break length in minutes (0 disables breaks)
    #[arg(long)]
    break_minutes: Option<i64>,
    /// Insert a break after every N tasks (0 disables breaks)
    #[arg(long)]
    break_every: Option<u32>,
    /// Print the schedule as JSON
    #[arg(long)]
    json: bool,
    /// Save the schedule for `dayslot export` / `dayslot sync`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = match &args.tasks {
        Some(path) => task_file::load_tasks(path)?,
        None => Vec::new(),
    };
    for spec in &args.inline {
        tasks.push(Task::parse_spec(spec)?);
    }

    tracing::debug!("planning {} task(s)", tasks.len());

    let stored = Config::load()?;
    let config = scheduler_config(&stored, &args)?;
    validate(&tasks, &config)?;

    for task in &tasks {
        if !stored.categories.names.contains(&task.category) {
            eprintln!(
                "warning: task '{}' has unknown category '{}'",
                task.name, task.category
            );
        }
    }

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let allocation = Allocator::with_config(config).allocate(&tasks, date);

    if let Some(overflow) = &allocation.overflow {
        eprintln!("warning: {overflow}");
        eprintln!("not scheduled: {}", allocation.unscheduled.join(", "));
    }

    let rows = rows_from_slots(&allocation.for_date(date));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("Nothing scheduled for {date}");
    } else {
        print_table(&rows);
    }

    if let Some(path) = &args.output {
        schedule_file::save_rows(path, &rows)?;
        eprintln!("Schedule saved to {}", path.display());
    }
    Ok(())
}

/// Stored settings with command-line overrides applied.
fn scheduler_config(
    stored: &Config,
    args: &PlanArgs,
) -> Result<SchedulerConfig, Box<dyn std::error::Error>> {
    let mut config = stored.scheduler_config()?;

    if let Some(start) = &args.start {
        config.work_start =
            parse_clock(start).ok_or_else(|| format!("invalid --start '{start}', expected HH:MM"))?;
    }
    if let Some(end) = &args.end {
        config.work_end =
            parse_clock(end).ok_or_else(|| format!("invalid --end '{end}', expected HH:MM"))?;
    }
    if let Some(minutes) = args.break_minutes {
        config.break_minutes = minutes;
    }
    if let Some(every) = args.break_every {
        config.break_frequency = every;
    }
    Ok(config)
}

fn print_table(rows: &[ExportRow]) {
    let width = rows.iter().map(|r| r.task.chars().count()).max().unwrap_or(0).max(4);
    println!(
        "{:<width$}  {:<5}  {:<5}  {:>5}  {:<8}  CATEGORY",
        "TASK", "START", "END", "HOURS", "PRIORITY"
    );
    for row in rows {
        println!(
            "{:<width$}  {:<5}  {:<5}  {:>5.2}  {:<8}  {}",
            row.task,
            row.start,
            row.end,
            row.duration,
            row.priority_label(),
            row.category,
        );
    }
}

//! Upload a saved schedule to Google Calendar.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use dayslot_core::integrations::GoogleAuth;
use dayslot_core::storage::schedule_file;
use dayslot_core::sync::{check_timezone, rows_to_events};
use dayslot_core::{upload_schedule, Config, GoogleCalendarClient};

#[derive(Args)]
pub struct SyncArgs {
    /// Schedule written by `dayslot plan --output`
    #[arg(long)]
    schedule: PathBuf,
    /// Date used for rows without one (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// IANA timezone for the events (default from config)
    #[arg(long)]
    timezone: Option<String>,
    /// Target calendar (default from config)
    #[arg(long)]
    calendar_id: Option<String>,
    /// Print the event payloads instead of uploading them
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = schedule_file::load_rows(&args.schedule)?;
    let config = Config::load()?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let timezone = args.timezone.unwrap_or(config.calendar.timezone);
    let calendar_id = args.calendar_id.unwrap_or(config.calendar.calendar_id);

    if args.dry_run {
        let timezone = check_timezone(&timezone)?;
        let (events, failures) = rows_to_events(&rows, date, timezone);
        for failure in &failures {
            eprintln!("error: {failure}");
        }
        let payloads: Vec<_> = events.iter().map(|e| &e.payload).collect();
        println!("{}", serde_json::to_string_pretty(&payloads)?);
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async {
        let token = GoogleAuth::new().access_token().await?;
        let client = GoogleCalendarClient::new(token);
        let report = upload_schedule(&client, &calendar_id, &rows, date, &timezone).await?;
        Ok::<_, Box<dyn std::error::Error>>(report)
    })?;

    // conversion failures were already logged by the upload
    if !report.is_clean() {
        eprintln!("{} row(s) skipped", report.failures.len());
    }
    println!(
        "Tasks uploaded to Google Calendar successfully! ({} events)",
        report.created.len()
    );
    Ok(())
}

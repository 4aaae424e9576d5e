use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use road_noise::client::NoiseEntryClient;
use road_noise::config::Config;
use road_noise::model::{NoiseEntry, NoiseLevel};
use road_noise::reminder::{
    handle_action, reminder_actions, start_reminder_scheduler, ActionOutcome, ReminderSchedule,
    REMINDER_TITLE,
};
use road_noise::settings::Settings;
use road_noise::store::{EntryStore, Snapshot};

#[derive(Parser)]
#[command(name = "road-noise")]
#[command(about = "Log how loud the road is, alongside the weather", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the history grouped by day (default)
    List,
    /// Fetch the history and report how much there is
    Refresh,
    /// Record a rating: 0 what noise?, 1 it's fine, 2 need headphones, 3 just awful
    Submit {
        level: NoiseLevel,
    },
    /// Store the credential used for submissions
    SetKey {
        key: String,
    },
    /// Prompt for a rating on the reminder schedule until interrupted
    Remind,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,road_noise=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!("Loaded config: {:?}", config);

    let mut settings = Settings::load(&config.settings_path)?;

    let key = config
        .key_override
        .clone()
        .unwrap_or_else(|| settings.key.clone());
    let client = NoiseEntryClient::new(config.service_url.clone(), key);
    let store = Arc::new(EntryStore::new(client));

    match cli.command.unwrap_or(Command::List) {
        Command::List => {
            store.refresh().await;
            print_history(&store.snapshot());
        }
        Command::Refresh => {
            store.refresh().await;
            let snapshot = store.snapshot();
            println!(
                "{} entries across {} days",
                snapshot.entries.len(),
                snapshot.index.day_count()
            );
        }
        Command::Submit { level } => match store.submit(level).await {
            Some(entry) => print_entry(&entry),
            None => println!("Nothing recorded"),
        },
        Command::SetKey { key } => {
            settings.key = key.trim().to_string();
            settings.save(&config.settings_path)?;
            println!("Key saved to {}", config.settings_path.display());
        }
        Command::Remind => {
            let stored = settings
                .reminder_hours
                .clone()
                .and_then(|hours| ReminderSchedule::new(hours).ok());
            let schedule = config
                .reminder_hours
                .clone()
                .or(stored)
                .unwrap_or_default();
            run_reminders(store, schedule).await?;
        }
    }

    Ok(())
}

#[instrument(skip(store), fields(schedule = %schedule))]
async fn run_reminders(
    store: Arc<EntryStore>,
    schedule: ReminderSchedule,
) -> Result<(), Box<dyn std::error::Error>> {
    store.refresh().await;

    let mut updates = store.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            info!(
                "History now has {} entries across {} days",
                snapshot.entries.len(),
                snapshot.index.day_count()
            );
        }
    });

    let (tx, mut fired) = mpsc::channel(1);
    tokio::spawn(start_reminder_scheduler(schedule.clone(), tx));
    println!("Reminding at {schedule}. Ctrl-C to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(at) = fired.recv().await {
        println!("\n[{}] {}", at.format("%H:%M"), REMINDER_TITLE);
        for action in reminder_actions() {
            println!("  {}  {}", action.identifier, action.title);
        }

        loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };
            match handle_action(&*store, &line).await {
                ActionOutcome::Recorded(entry) => {
                    print_entry(&entry);
                    break;
                }
                ActionOutcome::NoEffect => {
                    println!("Nothing recorded");
                    break;
                }
                ActionOutcome::OpenPicker => {
                    println!("Pick a rating from 0 to 3");
                }
            }
        }
    }

    Ok(())
}

fn print_history(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("No entries");
        return;
    }
    for (day, entries) in snapshot.index.buckets() {
        println!("{}", day.format("%B %-d, %Y"));
        for entry in entries {
            print_entry(entry);
        }
        println!();
    }
}

fn print_entry(entry: &NoiseEntry) {
    let weather = &entry.weather;
    let local = entry.date.with_timezone(&chrono::Local);
    println!(
        "  {} {}  [{}] {:<16} {:>3.0}°F {:>3.0} mph {:>3.0}% {} mbar",
        local.format("%H:%M"),
        weather.condition.symbol(),
        entry.noise_level,
        entry.noise_level.label(),
        weather.temp,
        weather.wind.speed,
        weather.humidity,
        weather.pressure,
    );
}

//! Recurring prompts to record a rating, and translation of the prompt's
//! actions into submissions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, error, info, instrument};

use crate::model::{NoiseEntry, NoiseLevel};
use crate::store::EntryStore;

pub const REMINDER_TITLE: &str = "How's the road noise?";
pub const REMINDER_CATEGORY: &str = "REQUEST_NOISE_LEVEL";

const DEFAULT_HOURS: [u32; 3] = [7, 13, 21];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("reminder schedule needs at least one hour")]
    Empty,
    #[error("invalid reminder hour '{0}', expected 0-23")]
    Hour(String),
}

/// Hours of the local day at which to prompt, sorted and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    hours: Vec<u32>,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            hours: DEFAULT_HOURS.to_vec(),
        }
    }
}

impl ReminderSchedule {
    pub fn new(mut hours: Vec<u32>) -> Result<Self, ScheduleError> {
        if hours.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if let Some(bad) = hours.iter().find(|h| **h > 23) {
            return Err(ScheduleError::Hour(bad.to_string()));
        }
        hours.sort_unstable();
        hours.dedup();
        Ok(Self { hours })
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// First scheduled instant strictly after `now`, in `now`'s time zone.
    ///
    /// Hours skipped by a daylight saving jump are passed over; an hour that
    /// occurs twice fires on its first occurrence.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let today = now.date_naive();

        for offset in 0..=7 {
            let day = today + chrono::Days::new(offset);
            for hour in &self.hours {
                let Some(time) = NaiveTime::from_hms_opt(*hour, 0, 0) else {
                    continue;
                };
                let candidate = tz.from_local_datetime(&day.and_time(time)).earliest();
                if let Some(candidate) = candidate {
                    if candidate > *now {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

impl FromStr for ReminderSchedule {
    type Err = ScheduleError;

    /// Comma separated hours, e.g. `7,13,21`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| ScheduleError::Hour(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(hours)
    }
}

impl fmt::Display for ReminderSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.hours.iter().map(|h| format!("{h:02}:00")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// A button offered on the reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderAction {
    pub identifier: String,
    pub title: &'static str,
}

/// One action per rating; the identifier is the rating's raw value.
pub fn reminder_actions() -> Vec<ReminderAction> {
    NoiseLevel::ALL
        .iter()
        .map(|level| ReminderAction {
            identifier: level.to_string(),
            title: level.label(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Recorded(NoiseEntry),
    /// A rating was chosen but the submission failed
    NoEffect,
    /// The reminder itself was opened rather than one of its rating actions
    OpenPicker,
}

/// Respond to a reminder interaction. Identifiers naming a rating are
/// submitted straight away.
#[instrument(skip(store))]
pub async fn handle_action<Tz: TimeZone>(
    store: &EntryStore<Tz>,
    identifier: &str,
) -> ActionOutcome {
    let Ok(level) = identifier.trim().parse::<NoiseLevel>() else {
        debug!("Action does not carry a rating, opening picker");
        return ActionOutcome::OpenPicker;
    };

    match store.submit(level).await {
        Some(entry) => ActionOutcome::Recorded(entry),
        None => ActionOutcome::NoEffect,
    }
}

/// Send the fire time of every scheduled reminder to `fired`. Returns when the
/// receiving side goes away.
#[instrument(skip(schedule, fired), fields(schedule = %schedule))]
pub async fn start_reminder_scheduler(
    schedule: ReminderSchedule,
    fired: mpsc::Sender<DateTime<Local>>,
) {
    info!("Reminder scheduler started");
    let mut last_fired: Option<DateTime<Local>> = None;

    loop {
        let now = match last_fired {
            Some(last) => Local::now().max(last),
            None => Local::now(),
        };
        let Some(next) = schedule.next_after(&now) else {
            error!("No upcoming reminder time, stopping scheduler");
            return;
        };

        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        debug!("Next reminder at {} (in {:?})", next, wait);
        time::sleep(wait).await;

        if fired.send(next).await.is_err() {
            info!("Reminder receiver closed, stopping scheduler");
            return;
        }
        last_fired = Some(next);
    }
}

//! The hourly due-sweep and the nightly rearm-sweep
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Configurable notify policy, concurrent sends with per-task failure isolation
//! - 1.0.0: Initial release

use anyhow::Result;
use log::{error, info, warn};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

use super::notifier::Notifier;
use crate::database::{BirthdayFilter, BirthdayUpdate, Database};
use crate::features::birthdays::DayWindow;

/// What the due-sweep does with an entry after reminding its owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Leave the entry armed; the owner is reminded every hour until they acknowledge
    #[default]
    RepeatUntilAcknowledged,
    /// Mark the entry notified after one successful send
    SingleNotify,
}

#[derive(Debug, Error)]
#[error("unknown notify policy '{0}', expected 'repeat' or 'once'")]
pub struct ParsePolicyError(String);

impl FromStr for NotifyPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "repeat" | "repeat_until_acknowledged" => Ok(NotifyPolicy::RepeatUntilAcknowledged),
            "once" | "single" | "single_notify" => Ok(NotifyPolicy::SingleNotify),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Settings shared by every sweep
#[derive(Debug, Clone)]
pub struct ReminderSettings {
    pub policy: NotifyPolicy,
    /// Prefix shown in the "type ok" hint
    pub command_prefix: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            policy: NotifyPolicy::default(),
            command_prefix: "!".to_string(),
        }
    }
}

/// Outcome of one due-sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
}

pub fn reminder_text(label: &str, command_prefix: &str) -> String {
    format!("🎉 It's {label}'s birthday today! Type {command_prefix}ok to acknowledge.")
}

/// Remind owners of every unacknowledged birthday falling on `day`
///
/// Sends run concurrently and are all awaited before the report is returned.
/// A failed send is logged and counted; it never stops the other sends.
pub async fn run_due_sweep(
    database: &Database,
    notifier: Arc<dyn Notifier>,
    settings: &ReminderSettings,
    day: DayWindow,
) -> Result<SweepReport> {
    let due = database
        .find_birthdays(&BirthdayFilter::on_day(day).notified(false))
        .await?;

    let mut report = SweepReport {
        due: due.len(),
        ..SweepReport::default()
    };
    if due.is_empty() {
        return Ok(report);
    }

    let mut sends = JoinSet::new();
    for entry in due {
        let notifier = Arc::clone(&notifier);
        let database = database.clone();
        let text = reminder_text(&entry.label, &settings.command_prefix);
        let policy = settings.policy;

        sends.spawn(async move {
            if let Err(e) = notifier.send_text(&entry.owner_key, &text).await {
                warn!(
                    "Failed to send birthday reminder for '{}' to {}: {e}",
                    entry.label, entry.owner_key
                );
                return false;
            }

            if policy == NotifyPolicy::SingleNotify {
                let filter = BirthdayFilter::with_id(entry.id).notified(false);
                if let Err(e) = database
                    .update_birthdays(&filter, BirthdayUpdate::set_notified(true))
                    .await
                {
                    error!("Sent reminder {} but could not mark it notified: {e}", entry.id);
                }
            }
            true
        });
    }

    while let Some(joined) = sends.join_next().await {
        match joined {
            Ok(true) => report.sent += 1,
            Ok(false) => report.failed += 1,
            Err(e) => {
                error!("Reminder send task aborted: {e}");
                report.failed += 1;
            }
        }
    }

    info!(
        "Due-sweep for {}: {} due, {} sent, {} failed",
        day.today(),
        report.due,
        report.sent,
        report.failed
    );
    Ok(report)
}

/// Re-arm every birthday falling on `day`, whatever its current flag
pub async fn run_rearm_sweep(database: &Database, day: DayWindow) -> Result<usize> {
    let rearmed = database
        .update_birthdays(&BirthdayFilter::on_day(day), BirthdayUpdate::set_notified(false))
        .await?;
    info!("Rearm-sweep for {}: {rearmed} entries re-armed", day.today());
    Ok(rearmed)
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;
    use crate::features::acknowledgment::acknowledge;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn may_10() -> DayWindow {
        DayWindow::new(date(2026, 5, 10))
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("repeat".parse::<NotifyPolicy>().unwrap(), NotifyPolicy::RepeatUntilAcknowledged);
        assert_eq!("ONCE".parse::<NotifyPolicy>().unwrap(), NotifyPolicy::SingleNotify);
        assert!("never".parse::<NotifyPolicy>().is_err());
    }

    #[test]
    fn test_reminder_text() {
        assert_eq!(
            reminder_text("Alice", "!"),
            "🎉 It's Alice's birthday today! Type !ok to acknowledge."
        );
    }

    #[tokio::test]
    async fn test_due_sweep_notifies_unacknowledged_today() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();
        db.upsert_birthday("1", "Bob", date(2024, 5, 11)).await.unwrap();
        db.upsert_birthday("2", "Carol", date(1980, 5, 10)).await.unwrap();

        let notifier = Arc::new(RecordingNotifier::default());
        let report = run_due_sweep(&db, notifier.clone(), &ReminderSettings::default(), may_10())
            .await
            .unwrap();

        assert_eq!(report, SweepReport { due: 2, sent: 2, failed: 0 });
        assert_eq!(
            notifier.sent().await,
            vec![
                ("1".to_string(), reminder_text("Alice", "!")),
                ("2".to_string(), reminder_text("Carol", "!")),
            ]
        );
    }

    #[tokio::test]
    async fn test_due_sweep_skips_notified_entries() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();
        acknowledge(&db, "1").await.unwrap();

        let notifier = Arc::new(RecordingNotifier::default());
        let report = run_due_sweep(&db, notifier.clone(), &ReminderSettings::default(), may_10())
            .await
            .unwrap();

        assert_eq!(report, SweepReport::default());
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_policy_leaves_flag_and_renotifies() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();

        let notifier = Arc::new(RecordingNotifier::default());
        let settings = ReminderSettings::default();
        run_due_sweep(&db, notifier.clone(), &settings, may_10()).await.unwrap();
        run_due_sweep(&db, notifier.clone(), &settings, may_10()).await.unwrap();

        assert_eq!(notifier.sent().await.len(), 2);
        let entries = db.find_birthdays(&BirthdayFilter::owned_by("1")).await.unwrap();
        assert!(!entries[0].notified);
    }

    #[tokio::test]
    async fn test_single_policy_marks_only_delivered_entries() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();
        db.upsert_birthday("2", "Bob", date(2024, 5, 10)).await.unwrap();

        let notifier = Arc::new(RecordingNotifier::failing_for(&["2"]));
        let settings = ReminderSettings {
            policy: NotifyPolicy::SingleNotify,
            ..ReminderSettings::default()
        };
        let report = run_due_sweep(&db, notifier.clone(), &settings, may_10()).await.unwrap();
        assert_eq!(report, SweepReport { due: 2, sent: 1, failed: 1 });

        let alice = db.find_birthdays(&BirthdayFilter::owned_by("1")).await.unwrap();
        let bob = db.find_birthdays(&BirthdayFilter::owned_by("2")).await.unwrap();
        assert!(alice[0].notified);
        assert!(!bob[0].notified);

        let again = run_due_sweep(&db, notifier.clone(), &settings, may_10()).await.unwrap();
        assert_eq!(again.due, 1);
    }

    #[tokio::test]
    async fn test_failed_send_does_not_block_others() {
        let db = Database::open_in_memory().unwrap();
        for (owner, label) in [("1", "A"), ("2", "B"), ("3", "C")] {
            db.upsert_birthday(owner, label, date(2000, 5, 10)).await.unwrap();
        }

        let notifier = Arc::new(RecordingNotifier::failing_for(&["2"]));
        let report = run_due_sweep(&db, notifier.clone(), &ReminderSettings::default(), may_10())
            .await
            .unwrap();

        assert_eq!(report, SweepReport { due: 3, sent: 2, failed: 1 });
        let owners: Vec<_> = notifier.sent().await.into_iter().map(|(o, _)| o).collect();
        assert_eq!(owners, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_rearm_resets_only_today() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();
        db.upsert_birthday("1", "Bob", date(2024, 5, 11)).await.unwrap();
        db.upsert_birthday("2", "Carol", date(1999, 5, 10)).await.unwrap();
        acknowledge(&db, "1").await.unwrap();

        let rearmed = run_rearm_sweep(&db, may_10()).await.unwrap();
        assert_eq!(rearmed, 2);

        let entries = db.find_birthdays(&BirthdayFilter::owned_by("1")).await.unwrap();
        let alice = entries.iter().find(|e| e.label == "Alice").unwrap();
        let bob = entries.iter().find(|e| e.label == "Bob").unwrap();
        assert!(!alice.notified);
        assert!(bob.notified);
    }

    #[tokio::test]
    async fn test_full_cycle() {
        let db = Database::open_in_memory().unwrap();
        db.upsert_birthday("1", "Alice", date(2024, 5, 10)).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = ReminderSettings::default();

        // Next year's 10 May: reminded, flag untouched
        let day = DayWindow::new(date(2025, 5, 10));
        let report = run_due_sweep(&db, notifier.clone(), &settings, day).await.unwrap();
        assert_eq!(report.sent, 1);
        let entry = &db.find_birthdays(&BirthdayFilter::default()).await.unwrap()[0];
        assert!(!entry.notified);

        // Acknowledged: silent for the rest of the day
        acknowledge(&db, "1").await.unwrap();
        let report = run_due_sweep(&db, notifier.clone(), &settings, day).await.unwrap();
        assert_eq!(report.due, 0);

        // A year later the midnight rearm makes it due again
        let next_year = DayWindow::new(date(2026, 5, 10));
        run_rearm_sweep(&db, next_year).await.unwrap();
        let report = run_due_sweep(&db, notifier.clone(), &settings, next_year).await.unwrap();
        assert_eq!(report.sent, 1);
        assert_eq!(notifier.sent().await.len(), 2);
    }
}

//! Wall-clock driver for the reminder sweeps
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Owned background task with explicit shutdown; rearm runs before the midnight due-sweep
//! - 1.0.0: Initial release

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::notifier::Notifier;
use super::sweep::{run_due_sweep, run_rearm_sweep, ReminderSettings};
use crate::database::Database;
use crate::features::birthdays::DayWindow;

/// First top-of-the-hour strictly after `now`
pub fn next_top_of_hour(now: NaiveDateTime) -> NaiveDateTime {
    let hour_start = now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now);
    hour_start + Duration::hours(1)
}

/// Next slot to fire, never at or before the last slot fired
///
/// The wall clock can read slightly earlier than the slot the timer just
/// fired for; counting from `last_fired` keeps that slot from repeating.
pub fn next_slot(now: NaiveDateTime, last_fired: Option<NaiveDateTime>) -> NaiveDateTime {
    let base = last_fired.map_or(now, |last| now.max(last));
    next_top_of_hour(base)
}

/// Runs the due-sweep every hour on the hour and the rearm-sweep at midnight
pub struct ReminderScheduler {
    database: Database,
    notifier: Arc<dyn Notifier>,
    settings: ReminderSettings,
}

impl ReminderScheduler {
    pub fn new(database: Database, notifier: Arc<dyn Notifier>, settings: ReminderSettings) -> Self {
        Self {
            database,
            notifier,
            settings,
        }
    }

    /// Start the scheduler on the current runtime
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "⏰ Reminder scheduler started (policy: {:?})",
            self.settings.policy
        );
        let mut last_tick: Option<NaiveDateTime> = None;

        loop {
            let now = Local::now().naive_local();
            let next = next_slot(now, last_tick);
            let wait = (next - now).to_std().unwrap_or_default();

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    self.tick(next).await;
                    last_tick = Some(next);
                }
                _ = shutdown.changed() => {
                    info!("Reminder scheduler stopping");
                    break;
                }
            }
        }
    }

    /// Run the sweeps due at `fired_at`
    ///
    /// At midnight the rearm-sweep goes first so the day's birthdays are
    /// reminded in the same tick.
    pub async fn tick(&self, fired_at: NaiveDateTime) {
        let day = DayWindow::containing(fired_at);

        if fired_at.hour() == 0 {
            if let Err(e) = run_rearm_sweep(&self.database, day).await {
                error!("Error resetting notifications for {}: {e}", day.today());
            }
        }

        if let Err(e) = run_due_sweep(
            &self.database,
            Arc::clone(&self.notifier),
            &self.settings,
            day,
        )
        .await
        {
            error!("Error retrieving birthdays for {}: {e}", day.today());
        }
    }
}

/// Owner of a running scheduler task
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop scheduling new sweeps and wait for any in-flight sweep to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Reminder scheduler task ended abnormally: {e}");
        }
    }
}

//! Fixed-time recurring runs.
//!
//! Each run happens inside its own task, so a run that panics is logged and
//! the next trigger is still honoured. Runs never overlap: the next trigger is
//! computed only after the current run has finished.

use core::{future::Future, str::FromStr};

use chrono::{DateTime, Local, TimeZone};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Schedule(cron::Schedule);

impl Schedule {
    /// Parses a seconds-resolution cron expression.
    pub fn parse(expr: &str) -> Result<Self> {
        cron::Schedule::from_str(expr)
            .map(Self)
            .map_err(|e| Error::Schedule(expr.to_owned(), e))
    }

    /// First trigger strictly after `time`.
    pub fn next_after<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.0.after(time).next()
    }
}

pub struct Scheduler {
    schedule: Schedule,
}

impl Scheduler {
    pub const fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }

    /// Runs `job` at every trigger, in local time, until the runtime shuts down.
    pub fn spawn<F, Fut>(self, job: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move {
            loop {
                let now = Local::now();
                let Some(next) = self.schedule.next_after(&now) else {
                    tracing::warn!(target: "schedule", "no upcoming trigger, stopping");
                    return;
                };
                tracing::info!(target: "schedule", "next run at {}", next.to_rfc3339());

                let wait = (next - now).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;

                if let Err(e) = tokio::spawn(job()).await {
                    tracing::error!(target: "schedule", "\x1b[31mrun failed: {e}\x1b[0m");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use core::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use std::sync::Arc;

    use chrono::{Timelike, Utc};

    use super::*;
    use crate::config::constants::SCHEDULE;

    #[test]
    fn test_parse_default_schedule() {
        assert!(Schedule::parse(SCHEDULE).is_ok());
    }

    #[test]
    fn test_parse_malformed() {
        let err = Schedule::parse("32 8,12,16,20 * * * * * *").unwrap_err();
        assert!(matches!(err, Error::Schedule(ref expr, _) if expr.starts_with("32 8")));
        assert!(Schedule::parse("not a schedule").is_err());
    }

    #[test]
    fn test_four_triggers_a_day() {
        let schedule = Schedule::parse(SCHEDULE).unwrap();
        let mut time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let mut hours = Vec::new();
        for _ in 0..5 {
            time = schedule.next_after(&time).unwrap();
            assert_eq!((time.minute(), time.second()), (32, 0));
            hours.push(time.hour());
        }

        assert_eq!(hours, [8, 12, 16, 20, 8]);
        assert_eq!(time, Utc.with_ymd_and_hms(2024, 1, 2, 8, 32, 0).unwrap());
    }

    #[test]
    fn test_next_after_is_strict() {
        let schedule = Schedule::parse(SCHEDULE).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 32, 0).unwrap();
        assert_eq!(
            schedule.next_after(&at),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 16, 32, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_panicking_run_does_not_stop_schedule() {
        let schedule = Schedule::parse("* * * * * *").unwrap();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        let handle = Scheduler::new(schedule).spawn(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("first run fails");
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle.abort();

        assert!(runs.load(Ordering::SeqCst) >= 2);
    }
}

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use crate::{config, log};

pub mod world_time;

use world_time::{SyncError, TimeService};

pub type ZonedTime = DateTime<FixedOffset>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    NotDue,
    Synced,
    Failed,
}

/// The only mutable state of the clock face.
///
/// `current_time` is what gets displayed. It moves forward one step per tick
/// and only jumps when a network resync succeeds. `last_sync_time` marks the
/// last resync *attempt*, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub current_time: ZonedTime,
    pub last_sync_time: ZonedTime,
}

pub fn now() -> ZonedTime {
    Utc::now().with_timezone(&config::ZONE)
}

pub fn advance(time: ZonedTime) -> ZonedTime {
    time + TimeDelta::seconds(1)
}

pub fn resync_due(now: ZonedTime, last_sync_time: ZonedTime) -> bool {
    now - last_sync_time >= resync_interval()
}

fn resync_interval() -> TimeDelta {
    TimeDelta::seconds(config::RESYNC_INTERVAL.as_secs() as i64)
}

impl ClockState {
    /// Starts from the local wall clock; the first network attempt waits a full interval.
    pub fn new(now: ZonedTime) -> Self {
        Self {
            current_time: now,
            last_sync_time: now,
        }
    }

    pub fn advance(&mut self) {
        self.current_time = advance(self.current_time);
    }

    /// Overwrites `current_time` from `service` once the resync interval has passed.
    ///
    /// Failures are logged here and go no further; the clock keeps running on
    /// local time. Every attempt counts, so a dead network is asked at most once
    /// per interval.
    pub async fn maybe_resync<S: TimeService>(
        &mut self,
        now: ZonedTime,
        service: &S,
    ) -> SyncOutcome {
        if !resync_due(now, self.last_sync_time) {
            return SyncOutcome::NotDue;
        }

        self.last_sync_time = now;

        match fetch_with_timeout(service).await {
            Ok(fetched) => {
                println!(
                    "{} Resynced {} -> {}",
                    log::SYNC,
                    self.current_time.format("%H:%M:%S"),
                    fetched.format("%H:%M:%S")
                );
                self.current_time = fetched;
                SyncOutcome::Synced
            }
            Err(err) => {
                println!("{} Error fetching time: {}", log::ERROR, err);
                SyncOutcome::Failed
            }
        }
    }

    pub fn time_text(&self) -> String {
        self.current_time.format("%H:%M:%S").to_string()
    }

    pub fn date_text(&self) -> String {
        self.current_time.format("%d %b %Y").to_string()
    }
}

async fn fetch_with_timeout<S: TimeService>(service: &S) -> Result<ZonedTime, SyncError> {
    tokio::time::timeout(config::HTTP_TIMEOUT, service.fetch())
        .await
        .map_err(|_| SyncError::Timeout(config::HTTP_TIMEOUT))?
}

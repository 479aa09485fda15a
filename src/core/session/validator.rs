use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, error, info, warn};

use crate::{
    core::api::{ApiClient, ClientError},
    view::{Notice, View},
};

use super::SessionStore;

pub const DEFAULT_CHECK_INTERVAL_SECS: i64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// last check is too recent
    Throttled,
    NotLogged,
    Valid,
    /// server rejected the session, it has been cleared
    Invalidated,
    /// no usable answer, stored session left untouched
    Unconfirmed,
}

/// Re-validates the stored session with the server at most once per interval.
pub struct SessionValidator<'a> {
    store: &'a SessionStore,
    api: &'a ApiClient,
    interval: TimeDelta,
}

impl<'a> SessionValidator<'a> {
    pub fn new(store: &'a SessionStore, api: &'a ApiClient) -> Self {
        Self {
            store,
            api,
            interval: TimeDelta::seconds(DEFAULT_CHECK_INTERVAL_SECS),
        }
    }

    pub fn with_interval(mut self, interval: TimeDelta) -> Self {
        self.interval = interval;
        self
    }

    pub async fn check(&self, view: &dyn View) -> ValidationOutcome {
        self.check_at(Utc::now(), view).await
    }

    pub async fn check_at(&self, now: DateTime<Utc>, view: &dyn View) -> ValidationOutcome {
        match self.store.last_check().await {
            Ok(Some(last)) if now - last <= self.interval => {
                debug!(
                    "skipping session check, last one {}s ago",
                    (now - last).num_seconds()
                );
                return ValidationOutcome::Throttled;
            }
            Err(e) => {
                error!("cannot read last session check: {e}");
                return ValidationOutcome::Unconfirmed;
            }
            _ => {}
        }

        let session = match self.store.get().await {
            Ok(s) => s,
            Err(e) => {
                error!("cannot read stored session: {e}");
                return ValidationOutcome::Unconfirmed;
            }
        };

        if !session.is_logged() {
            return ValidationOutcome::NotLogged;
        }

        debug!("about to check session ...");

        let check = match self.api.check_session(&session).await {
            Ok(c) => c,
            Err(ClientError::Api(e)) => {
                warn!("check session error, response: {e}");
                return ValidationOutcome::Unconfirmed;
            }
            Err(e) => {
                warn!("check session error: {e}");
                return ValidationOutcome::Unconfirmed;
            }
        };

        debug!("check session answered: {}", check.message);

        if let Err(e) = self.store.record_check(now).await {
            error!("cannot record session check: {e}");
        }

        if check.is_valid() {
            info!("session of {} is valid", session.username);
            return ValidationOutcome::Valid;
        }

        warn!("session of {} is not valid anymore", session.username);

        if let Err(e) = self.store.clear().await {
            error!("cannot clear invalid session: {e}");
            return ValidationOutcome::Unconfirmed;
        }

        view.notify(&Notice::info("Session", "Must login!!"));

        ValidationOutcome::Invalidated
    }
}

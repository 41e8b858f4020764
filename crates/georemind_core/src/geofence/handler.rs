//! Enter-transition handling: look up reminders and notify the user.

use crate::datasource::{Outcome, ReminderDataSource};
use crate::geofence::monitor::GeofenceTransition;
use crate::model::reminder::Reminder;
use log::{info, warn};
use std::sync::Arc;

/// Delivery capability of the platform notification service.
pub trait ReminderNotifier: Send + Sync {
    fn send_notification(&self, reminder: &Reminder);
}

pub struct GeofenceTransitionHandler<D: ReminderDataSource, N: ReminderNotifier> {
    data_source: Arc<D>,
    notifier: Arc<N>,
}

impl<D: ReminderDataSource, N: ReminderNotifier> GeofenceTransitionHandler<D, N> {
    pub fn new(data_source: Arc<D>, notifier: Arc<N>) -> Self {
        Self {
            data_source,
            notifier,
        }
    }

    /// Notifies once per triggering reminder that can still be found.
    ///
    /// Returns the number of notifications sent. Lookup failures are logged
    /// and skipped.
    pub async fn handle(&self, transition: &GeofenceTransition) -> usize {
        self.on_enter(&transition.request_ids).await
    }

    pub async fn on_enter(&self, request_ids: &[String]) -> usize {
        let mut sent = 0;
        for request_id in request_ids {
            match self.data_source.get_reminder(request_id).await {
                Outcome::Success(reminder) => {
                    self.notifier.send_notification(&reminder);
                    sent += 1;
                }
                Outcome::Error { message, .. } => {
                    warn!(
                        "event=geofence_notify module=geofence status=error request_id={} error={}",
                        request_id, message
                    );
                }
            }
        }
        info!(
            "event=geofence_notify module=geofence status=ok triggered={} sent={}",
            request_ids.len(),
            sent
        );
        sent
    }
}

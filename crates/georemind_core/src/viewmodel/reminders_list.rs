//! View-model backing the reminder list screen.
//!
//! # Invariants
//! - `show_loading` is true only while a load is in flight.
//! - `show_no_data` is recomputed after every load, success or not.

use crate::datasource::{Outcome, ReminderDataSource};
use crate::model::reminder::Reminder;
use crate::viewmodel::observable::Observable;
use log::{info, warn};
use std::sync::Arc;

pub struct RemindersListViewModel<D: ReminderDataSource> {
    data_source: Arc<D>,
    pub reminders_list: Observable<Vec<Reminder>>,
    pub show_loading: Observable<bool>,
    /// Transient error text for a snackbar.
    pub show_snackbar: Observable<Option<String>>,
    pub show_no_data: Observable<bool>,
}

impl<D: ReminderDataSource> RemindersListViewModel<D> {
    pub fn new(data_source: Arc<D>) -> Self {
        Self {
            data_source,
            reminders_list: Observable::new(Vec::new()),
            show_loading: Observable::new(false),
            show_snackbar: Observable::new(None),
            show_no_data: Observable::new(false),
        }
    }

    /// Loads all reminders into `reminders_list`.
    ///
    /// On error the previous list is kept and the message goes to
    /// `show_snackbar`.
    pub async fn load_reminders(&self) {
        self.show_loading.set(true);

        match self.data_source.get_reminders().await {
            Outcome::Success(reminders) => {
                info!(
                    "event=reminders_load module=viewmodel status=ok count={}",
                    reminders.len()
                );
                self.reminders_list.set(reminders);
            }
            Outcome::Error { message, .. } => {
                warn!("event=reminders_load module=viewmodel status=error error={message}");
                self.show_snackbar.set(Some(message));
            }
        }

        self.invalidate_show_no_data();
        self.show_loading.set(false);
    }

    fn invalidate_show_no_data(&self) {
        let empty = self.reminders_list.get().is_empty();
        self.show_no_data.set(empty);
    }
}

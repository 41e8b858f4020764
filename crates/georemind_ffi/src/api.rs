//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reminder list/save/get/clear and geofence calls to Dart via FRB.
//! - Route writes through `ReminderService` so saves register geofences.
//! - Flatten core results into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Lookup misses keep the `Reminder not found!` message verbatim.
//! - One geofence registry is shared by every call in the process.

use georemind_core::db::open_db;
use georemind_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, GeofenceMonitor, GeofenceTransition, GeofenceTransitionHandler, Outcome, Reminder,
    ReminderDataSource, ReminderNotifier, ReminderService, ReminderServiceError,
    RemindersLocalRepository, TransitionType, REMINDER_SAVED,
};
use log::warn;
use once_cell::sync::OnceCell;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::runtime::{Builder, Runtime};

static RUNTIME: OnceCell<Runtime> = OnceCell::new();
static CONFIG: OnceCell<CoreConfig> = OnceCell::new();
static GEOFENCES: OnceCell<Arc<GeofenceMonitor>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Reminder fields as seen by Dart.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderItem {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// List response envelope, also used for geofence notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderListResponse {
    pub ok: bool,
    /// Reminders in insertion or notification order; empty on failure.
    pub items: Vec<ReminderItem>,
    pub message: String,
}

impl ReminderListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Single-reminder response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderActionResponse {
    pub ok: bool,
    pub item: Option<ReminderItem>,
    pub message: String,
}

impl ReminderActionResponse {
    fn success(message: impl Into<String>, item: Option<ReminderItem>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// Lists all stored reminders.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list() -> ReminderListResponse {
    match with_repository(|repo| async move { repo.get_reminders().await }) {
        Ok(Outcome::Success(reminders)) => {
            let items = reminders.into_iter().map(to_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No reminders.".to_string()
            } else {
                format!("Found {} reminder(s).", items.len())
            };
            ReminderListResponse {
                ok: true,
                items,
                message,
            }
        }
        Ok(Outcome::Error { message, .. }) | Err(message) => {
            ReminderListResponse::failure(format!("reminders_list failed: {message}"))
        }
    }
}

/// Validates, saves and geofences a reminder.
///
/// Passing an existing `id` overwrites that reminder; `None` creates a new one.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Invalid input is rejected before anything is written.
/// - A saved reminder whose region cannot be registered still reports
///   `ok=true`; the message says the geofence was not added.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_save(
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> ReminderActionResponse {
    let reminder = match id.map(|value| value.trim().to_string()) {
        Some(id) if !id.is_empty() => {
            Reminder::with_id(id, title, description, location, latitude, longitude)
        }
        _ => Reminder::new(title, description, location, latitude, longitude),
    };

    let item = to_item(reminder.clone());
    let result = with_reminder_service(move |service| async move {
        service.save_and_register(reminder).await
    });
    match result {
        Ok(Ok(_)) => ReminderActionResponse::success(REMINDER_SAVED, Some(item)),
        Ok(Err(ReminderServiceError::Validation(err))) => {
            ReminderActionResponse::failure(format!("reminder_save rejected: {err}"))
        }
        Ok(Err(ReminderServiceError::Geofence(err))) => ReminderActionResponse::success(
            format!("{REMINDER_SAVED} Geofence not added: {err}"),
            Some(item),
        ),
        Ok(Err(ReminderServiceError::Store(message))) | Err(message) => {
            ReminderActionResponse::failure(format!("reminder_save failed: {message}"))
        }
    }
}

/// Fetches one reminder by id.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_get(id: String) -> ReminderActionResponse {
    let id = id.trim().to_string();
    match with_repository(move |repo| async move { repo.get_reminder(&id).await }) {
        Ok(Outcome::Success(reminder)) => {
            ReminderActionResponse::success("Reminder found.", Some(to_item(reminder)))
        }
        Ok(Outcome::Error { message, .. }) | Err(message) => {
            ReminderActionResponse::failure(message)
        }
    }
}

/// Deletes every stored reminder and unregisters every geofence.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_clear() -> ReminderActionResponse {
    match with_reminder_service(|service| async move { service.clear_all().await }) {
        Ok(Ok(())) => ReminderActionResponse::success("Reminders cleared.", None),
        Ok(Err(err)) => {
            ReminderActionResponse::failure(format!("reminders_clear failed: {err}"))
        }
        Err(message) => {
            ReminderActionResponse::failure(format!("reminders_clear failed: {message}"))
        }
    }
}

/// Resolves the reminders behind a platform geofence-enter callback.
///
/// Returns the reminders to notify about; unknown ids are skipped.
#[flutter_rust_bridge::frb(sync)]
pub fn geofence_entered(request_ids: Vec<String>) -> ReminderListResponse {
    notify_transition(GeofenceTransition {
        transition: TransitionType::Enter,
        request_ids,
    })
}

/// Feeds a device location into the in-process geofence registry.
///
/// Returns the reminders whose regions were entered by this update.
#[flutter_rust_bridge::frb(sync)]
pub fn geofence_location_changed(latitude: f64, longitude: f64) -> ReminderListResponse {
    match geofences().update_location(latitude, longitude) {
        Ok(Some(transition)) => notify_transition(transition),
        Ok(None) => ReminderListResponse {
            ok: true,
            items: Vec::new(),
            message: "No geofence entered.".to_string(),
        },
        Err(err) => {
            ReminderListResponse::failure(format!("geofence_location_changed failed: {err}"))
        }
    }
}

/// Collects notified reminders so they can be returned to Dart.
#[derive(Default)]
struct CollectingNotifier {
    items: Mutex<Vec<ReminderItem>>,
}

impl CollectingNotifier {
    fn take_items(&self) -> Vec<ReminderItem> {
        self.items
            .lock()
            .map(|mut items| std::mem::take(&mut *items))
            .unwrap_or_default()
    }
}

impl ReminderNotifier for CollectingNotifier {
    fn send_notification(&self, reminder: &Reminder) {
        if let Ok(mut items) = self.items.lock() {
            items.push(to_item(reminder.clone()));
        }
    }
}

fn notify_transition(transition: GeofenceTransition) -> ReminderListResponse {
    let notifier = Arc::new(CollectingNotifier::default());
    let handler_notifier = Arc::clone(&notifier);
    let result = with_repository(move |repo| async move {
        GeofenceTransitionHandler::new(Arc::new(repo), handler_notifier)
            .handle(&transition)
            .await
    });
    notified_response(result, &notifier)
}

fn notified_response(
    result: Result<usize, String>,
    notifier: &CollectingNotifier,
) -> ReminderListResponse {
    match result {
        Ok(sent) => ReminderListResponse {
            ok: true,
            items: notifier.take_items(),
            message: format!("Notified {sent} reminder(s)."),
        },
        Err(message) => {
            warn!("event=geofence_notify module=ffi status=error error={message}");
            ReminderListResponse::failure(format!("geofence notification failed: {message}"))
        }
    }
}

fn resolve_config() -> Result<&'static CoreConfig, String> {
    CONFIG
        .get_or_try_init(CoreConfig::from_env)
        .map_err(|err| format!("config error: {err}"))
}

fn runtime() -> Result<&'static Runtime, String> {
    RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("georemind-io")
            .enable_all()
            .build()
            .map_err(|err| format!("runtime init failed: {err}"))
    })
}

fn geofences() -> Arc<GeofenceMonitor> {
    Arc::clone(GEOFENCES.get_or_init(|| Arc::new(GeofenceMonitor::new())))
}

fn open_repository(
    config: &CoreConfig,
    runtime: &Runtime,
) -> Result<RemindersLocalRepository, String> {
    let conn = open_db(&config.db_path).map_err(|err| format!("reminder DB open failed: {err}"))?;
    Ok(RemindersLocalRepository::new(conn, runtime.handle().clone()))
}

fn with_repository<T, F, Fut>(f: F) -> Result<T, String>
where
    F: FnOnce(RemindersLocalRepository) -> Fut,
    Fut: Future<Output = T>,
{
    let config = resolve_config()?;
    let runtime = runtime()?;
    let repo = open_repository(config, runtime)?;
    Ok(runtime.block_on(f(repo)))
}

fn with_reminder_service<T, F, Fut>(f: F) -> Result<T, String>
where
    F: FnOnce(ReminderService<RemindersLocalRepository, GeofenceMonitor>) -> Fut,
    Fut: Future<Output = T>,
{
    let config = resolve_config()?;
    let runtime = runtime()?;
    let repo = open_repository(config, runtime)?;
    let service = ReminderService::new(Arc::new(repo), geofences(), config.geofence);
    Ok(runtime.block_on(f(service)))
}

fn to_item(reminder: Reminder) -> ReminderItem {
    ReminderItem {
        id: reminder.id,
        title: reminder.title,
        description: reminder.description,
        location: reminder.location,
        latitude: reminder.latitude,
        longitude: reminder.longitude,
    }
}

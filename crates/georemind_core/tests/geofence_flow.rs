use georemind_core::db::open_db_in_memory;
use georemind_core::{
    FakeDataSource, GeofenceError, GeofenceMonitor, GeofenceRegistrar, GeofenceSettings,
    GeofenceTransitionHandler, Reminder, ReminderDataSource, ReminderNotifier, ReminderService,
    ReminderServiceError, RemindersLocalRepository,
};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Reminder>>,
}

impl RecordingNotifier {
    fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|reminder| reminder.title.clone())
            .collect()
    }
}

impl ReminderNotifier for RecordingNotifier {
    fn send_notification(&self, reminder: &Reminder) {
        self.sent.lock().unwrap().push(reminder.clone());
    }
}

fn bakery() -> Reminder {
    Reminder::new(
        Some("Pick up bread".to_string()),
        Some("Sourdough".to_string()),
        Some("Bakery".to_string()),
        Some(51.5007),
        Some(-0.1246),
    )
}

#[tokio::test]
async fn entering_saved_reminder_region_sends_one_notification() {
    let repo = Arc::new(RemindersLocalRepository::new(
        open_db_in_memory().unwrap(),
        Handle::current(),
    ));
    let monitor = Arc::new(GeofenceMonitor::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ReminderService::new(
        Arc::clone(&repo),
        Arc::clone(&monitor),
        GeofenceSettings::default(),
    );
    let handler = GeofenceTransitionHandler::new(Arc::clone(&repo), Arc::clone(&notifier));

    let reminder = bakery();
    let request = service.save_and_register(reminder.clone()).await.unwrap();
    assert_eq!(request.request_id, reminder.id);
    assert_eq!(monitor.registered_ids(), vec![reminder.id.clone()]);

    assert!(monitor.update_location(51.51, -0.10).unwrap().is_none());
    let transition = monitor.update_location(51.5008, -0.1245).unwrap().unwrap();

    assert_eq!(handler.handle(&transition).await, 1);
    assert_eq!(notifier.titles(), vec!["Pick up bread".to_string()]);
}

#[tokio::test]
async fn unknown_ids_are_skipped() {
    let data_source = Arc::new(FakeDataSource::with_reminders(vec![bakery()]));
    let notifier = Arc::new(RecordingNotifier::default());
    let handler = GeofenceTransitionHandler::new(data_source, Arc::clone(&notifier));

    assert_eq!(handler.on_enter(&["missing".to_string()]).await, 0);
    assert!(notifier.titles().is_empty());
}

#[tokio::test]
async fn invalid_reminder_is_neither_saved_nor_registered() {
    let data_source = Arc::new(FakeDataSource::new());
    let monitor = Arc::new(GeofenceMonitor::new());
    let service = ReminderService::new(
        Arc::clone(&data_source),
        Arc::clone(&monitor),
        GeofenceSettings::default(),
    );
    let mut reminder = bakery();
    reminder.title = None;

    let err = service.save_and_register(reminder).await.unwrap_err();

    assert!(matches!(err, ReminderServiceError::Validation(_)));
    assert!(data_source.snapshot().await.is_empty());
    assert!(monitor.registered_ids().is_empty());
}

#[tokio::test]
async fn reminder_without_coordinates_is_saved_but_not_registered() {
    let data_source = Arc::new(FakeDataSource::new());
    let monitor = Arc::new(GeofenceMonitor::new());
    let service = ReminderService::new(
        Arc::clone(&data_source),
        Arc::clone(&monitor),
        GeofenceSettings::default(),
    );
    let mut reminder = bakery();
    reminder.latitude = None;

    let err = service.save_and_register(reminder.clone()).await.unwrap_err();

    assert!(matches!(
        err,
        ReminderServiceError::Geofence(GeofenceError::MissingCoordinates(_))
    ));
    assert_eq!(data_source.snapshot().await, vec![reminder]);
    assert!(monitor.registered_ids().is_empty());
}

#[tokio::test]
async fn clear_all_removes_reminders_and_geofences() {
    let data_source = Arc::new(FakeDataSource::new());
    let monitor = Arc::new(GeofenceMonitor::new());
    let service = ReminderService::new(
        Arc::clone(&data_source),
        Arc::clone(&monitor),
        GeofenceSettings::default(),
    );
    service.save_and_register(bakery()).await.unwrap();

    service.clear_all().await.unwrap();

    assert!(data_source.get_reminders().await.into_result().unwrap().is_empty());
    assert!(monitor.registered_ids().is_empty());
    assert_eq!(monitor.remove_geofences().unwrap(), 0);
}

use georemind_core::{Reminder, ReminderValidationError};

fn valid() -> Reminder {
    Reminder::new(
        Some("title".to_string()),
        Some("description".to_string()),
        Some("location".to_string()),
        Some(1.23),
        Some(3.23),
    )
}

#[test]
fn new_reminders_get_distinct_ids() {
    let a = valid();
    let b = valid();

    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
}

#[test]
fn validation_rejects_null_or_empty_title() {
    let mut reminder = valid();
    reminder.title = None;
    assert_eq!(reminder.validate(), Err(ReminderValidationError::MissingTitle));

    reminder.title = Some(String::new());
    assert_eq!(reminder.validate(), Err(ReminderValidationError::MissingTitle));
}

#[test]
fn validation_rejects_empty_location() {
    let mut reminder = valid();
    reminder.location = Some(String::new());
    assert_eq!(
        reminder.validate(),
        Err(ReminderValidationError::MissingLocation)
    );
    assert_eq!(ReminderValidationError::MissingLocation.code(), 2);
}

#[test]
fn validation_passes_without_description_or_coordinates() {
    let mut reminder = valid();
    reminder.description = None;
    reminder.latitude = None;
    reminder.longitude = None;
    assert_eq!(reminder.validate(), Ok(()));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let reminder = Reminder::with_id(
        "11111111-2222-4333-8444-555555555555",
        Some("title".to_string()),
        None,
        Some("location".to_string()),
        Some(1.343),
        Some(3.4343),
    );

    let json = serde_json::to_value(&reminder).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "title");
    assert!(json["description"].is_null());
    assert_eq!(json["location"], "location");
    assert_eq!(json["latitude"], 1.343);
    assert_eq!(json["longitude"], 3.4343);

    let decoded: Reminder = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, reminder);
}

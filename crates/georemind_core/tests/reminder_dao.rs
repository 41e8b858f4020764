use georemind_core::db::open_db_in_memory;
use georemind_core::{DaoError, Reminder, ReminderDao, SqliteReminderDao};

fn reminder(title: &str, location: &str, latitude: f64, longitude: f64) -> Reminder {
    Reminder::new(
        Some(title.to_string()),
        Some(format!("{title} description")),
        Some(location.to_string()),
        Some(latitude),
        Some(longitude),
    )
}

#[test]
fn insert_reminder_and_get_by_id() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    let saved = reminder("title", "location", 1.343, 3.4343);
    dao.save_reminder(&saved).unwrap();

    let loaded = dao.get_reminder_by_id(&saved.id).unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn saving_same_id_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    let first = reminder("first", "a", 1.0, 1.0);
    let original = reminder("title", "location", 1.343, 3.4343);
    let last = reminder("last", "b", 2.0, 2.0);
    dao.save_reminder(&first).unwrap();
    dao.save_reminder(&original).unwrap();
    dao.save_reminder(&last).unwrap();

    let updated = Reminder::with_id(
        original.id.clone(),
        Some("new title".to_string()),
        None,
        Some("new location".to_string()),
        Some(10.5),
        Some(-20.25),
    );
    dao.save_reminder(&updated).unwrap();

    let loaded = dao.get_reminder_by_id(&original.id).unwrap().unwrap();
    assert_eq!(loaded, updated);

    let all = dao.get_reminders().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1], updated);
    assert_eq!(all[2].id, last.id);
}

#[test]
fn insert_reminders_and_get_all_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    let reminders = vec![
        reminder("title", "location", 1.343, 3.4343),
        reminder("title2", "location2", 0.343, 0.4343),
        reminder("title3", "location3", 0.343, 0.4343),
    ];
    for item in &reminders {
        dao.save_reminder(item).unwrap();
    }

    assert_eq!(dao.get_reminders().unwrap(), reminders);
    assert_eq!(dao.count_reminders().unwrap(), 3);
}

#[test]
fn delete_all_clears_table() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    dao.save_reminder(&reminder("title", "location", 1.343, 3.4343))
        .unwrap();
    dao.save_reminder(&reminder("title2", "location2", 0.343, 0.4343))
        .unwrap();

    assert_eq!(dao.delete_all_reminders().unwrap(), 2);
    assert!(dao.get_reminders().unwrap().is_empty());
    assert_eq!(dao.delete_all_reminders().unwrap(), 0);
}

#[test]
fn missing_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    assert!(dao.get_reminder_by_id("missing").unwrap().is_none());
}

#[test]
fn optional_fields_roundtrip_as_null() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    let sparse = Reminder::with_id("sparse", None, None, None, None, None);
    dao.save_reminder(&sparse).unwrap();

    assert_eq!(dao.get_reminder_by_id("sparse").unwrap().unwrap(), sparse);
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let dao = SqliteReminderDao::new(&conn);

    let mut bad = reminder("title", "location", 1.0, 1.0);
    bad.latitude = Some(f64::INFINITY);

    let err = dao.save_reminder(&bad).unwrap_err();
    assert!(matches!(err, DaoError::InvalidData(_)));
    assert_eq!(dao.count_reminders().unwrap(), 0);
}

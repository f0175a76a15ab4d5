use chrono::NaiveDate;
use eyecare_core::db::open_db_in_memory;
use eyecare_core::{
    AppointmentInput, AppointmentListQuery, AppointmentRepository, AppointmentService,
    DateWindow, NewProfile, OwnerScope, ProfileService, RepoError, SqliteAppointmentRepository,
    SqliteProfileRepository, UserId,
};
use rusqlite::Connection;

fn register(conn: &Connection, email: &str) -> UserId {
    ProfileService::new(SqliteProfileRepository::new(conn))
        .register(&NewProfile {
            full_name: "Patient".to_string(),
            email: email.to_string(),
            password: "open-sesame".to_string(),
            phone_number: None,
        })
        .unwrap()
        .profile
        .id
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn input(next: &str) -> AppointmentInput {
    AppointmentInput {
        last_checkup_date: Some(date("2023-09-01")),
        next_appointment_date: date(next),
        notes: Some("bring drops".to_string()),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let owner = register(&conn, "a@example.com");
    let service = AppointmentService::new(SqliteAppointmentRepository::new(&conn));

    let created = service.create_appointment(owner, &input("2024-03-02")).unwrap();
    assert_eq!(created.owner_id, owner);
    assert_eq!(created.last_checkup_date, Some(date("2023-09-01")));
    assert_eq!(created.next_appointment_date, date("2024-03-02"));
    assert_eq!(created.notes.as_deref(), Some("bring drops"));

    assert_eq!(service.get_appointment(owner, created.id).unwrap(), created);
}

#[test]
fn blank_notes_are_stored_as_null() {
    let conn = open_db_in_memory().unwrap();
    let owner = register(&conn, "a@example.com");
    let service = AppointmentService::new(SqliteAppointmentRepository::new(&conn));

    let mut appointment = input("2024-03-02");
    appointment.notes = Some("  ".to_string());
    appointment.last_checkup_date = None;
    let created = service.create_appointment(owner, &appointment).unwrap();

    assert_eq!(created.notes, None);
    assert_eq!(created.last_checkup_date, None);
}

#[test]
fn list_is_ordered_by_next_date() {
    let conn = open_db_in_memory().unwrap();
    let owner = register(&conn, "a@example.com");
    let service = AppointmentService::new(SqliteAppointmentRepository::new(&conn));

    service.create_appointment(owner, &input("2024-06-01")).unwrap();
    service.create_appointment(owner, &input("2024-03-02")).unwrap();
    service.create_appointment(owner, &input("2024-04-15")).unwrap();

    let dates: Vec<_> = service
        .list_appointments(owner)
        .unwrap()
        .into_iter()
        .map(|appointment| appointment.next_appointment_date)
        .collect();
    assert_eq!(
        dates,
        vec![date("2024-03-02"), date("2024-04-15"), date("2024-06-01")]
    );
}

#[test]
fn window_query_is_inclusive_and_can_span_owners() {
    let conn = open_db_in_memory().unwrap();
    let alice = register(&conn, "alice@example.com");
    let bob = register(&conn, "bob@example.com");
    let repo = SqliteAppointmentRepository::new(&conn);

    repo.create_appointment(alice, &input("2024-02-29")).unwrap();
    repo.create_appointment(alice, &input("2024-03-01")).unwrap();
    repo.create_appointment(bob, &input("2024-03-02")).unwrap();
    repo.create_appointment(bob, &input("2024-03-03")).unwrap();

    let window = DateWindow::days_from(date("2024-03-01"), 1);
    let everyone = repo
        .list_appointments(&AppointmentListQuery {
            scope: OwnerScope::AllUsers,
            window: Some(window),
        })
        .unwrap();
    let dates: Vec<_> = everyone
        .iter()
        .map(|appointment| appointment.next_appointment_date)
        .collect();
    assert_eq!(dates, vec![date("2024-03-01"), date("2024-03-02")]);

    let bob_only = repo
        .list_appointments(&AppointmentListQuery {
            scope: OwnerScope::User(bob),
            window: Some(window),
        })
        .unwrap();
    assert_eq!(bob_only.len(), 1);
    assert_eq!(bob_only[0].owner_id, bob);
}

#[test]
fn update_and_delete_are_owner_scoped() {
    let conn = open_db_in_memory().unwrap();
    let alice = register(&conn, "alice@example.com");
    let mallory = register(&conn, "mallory@example.com");
    let service = AppointmentService::new(SqliteAppointmentRepository::new(&conn));
    let created = service.create_appointment(alice, &input("2024-03-02")).unwrap();

    assert!(matches!(
        service
            .update_appointment(mallory, created.id, &input("2025-01-01"))
            .unwrap_err(),
        RepoError::NotFound { entity: "appointment", .. }
    ));

    let updated = service
        .update_appointment(alice, created.id, &input("2024-04-01"))
        .unwrap();
    assert_eq!(updated.next_appointment_date, date("2024-04-01"));

    service.delete_appointment(alice, created.id).unwrap();
    assert!(matches!(
        service.get_appointment(alice, created.id).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn next_appointment_skips_past_dates() {
    let conn = open_db_in_memory().unwrap();
    let owner = register(&conn, "a@example.com");
    let service = AppointmentService::new(SqliteAppointmentRepository::new(&conn));

    service.create_appointment(owner, &input("2024-01-10")).unwrap();
    let upcoming = service.create_appointment(owner, &input("2024-03-05")).unwrap();
    service.create_appointment(owner, &input("2024-05-05")).unwrap();

    let next = service
        .next_appointment(owner, date("2024-03-01"))
        .unwrap()
        .unwrap();
    assert_eq!(next.id, upcoming.id);

    assert!(service
        .next_appointment(owner, date("2024-06-01"))
        .unwrap()
        .is_none());
}

use chrono::{NaiveDate, NaiveDateTime};
use eyecare_core::db::open_db_in_memory;
use eyecare_core::{
    Appointment, AppointmentInput, AppointmentRepository, DateWindow, MedicationSchedule,
    NewProfile, OwnerScope, ProfileService, RepoError, RepoResult, ReminderCycle,
    ReminderService, ReminderSource, ScheduleInput, ScheduleRepository,
    SqliteAppointmentRepository, SqliteProfileRepository, SqliteReminderSource,
    SqliteScheduleRepository, UserId,
};
use rusqlite::Connection;
use std::cell::RefCell;
use uuid::Uuid;

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Records every load request and filters appointments by window.
#[derive(Default)]
struct RecordingSource {
    schedules: Vec<MedicationSchedule>,
    appointments: Vec<Appointment>,
    calls: RefCell<Vec<(OwnerScope, Option<DateWindow>)>>,
}

impl ReminderSource for RecordingSource {
    fn load_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>> {
        self.calls.borrow_mut().push((scope, None));
        Ok(self.schedules.clone())
    }

    fn load_appointments(
        &self,
        scope: OwnerScope,
        window: DateWindow,
    ) -> RepoResult<Vec<Appointment>> {
        self.calls.borrow_mut().push((scope, Some(window)));
        Ok(self
            .appointments
            .iter()
            .filter(|appointment| window.contains(appointment.next_appointment_date))
            .cloned()
            .collect())
    }
}

struct FailingSource;

impl ReminderSource for FailingSource {
    fn load_schedules(&self, _scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>> {
        Err(RepoError::InvalidData("store unreachable".to_string()))
    }

    fn load_appointments(
        &self,
        _scope: OwnerScope,
        _window: DateWindow,
    ) -> RepoResult<Vec<Appointment>> {
        unreachable!("appointments must not load after schedules fail")
    }
}

#[test]
fn background_cycle_reads_all_users_with_one_day_window() {
    let source = RecordingSource::default();
    let service = ReminderService::new(&source);

    service
        .run(ReminderCycle::Background, at("2024-03-01T08:00"))
        .unwrap();

    let calls = source.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], (OwnerScope::AllUsers, None));
    assert_eq!(
        calls[1],
        (
            OwnerScope::AllUsers,
            Some(DateWindow {
                start: date("2024-03-01"),
                end: date("2024-03-02"),
            })
        )
    );
}

#[test]
fn on_demand_cycle_reads_one_user_with_seven_day_window() {
    let user = Uuid::new_v4();
    let source = RecordingSource::default();
    let service = ReminderService::new(&source);

    service
        .run(ReminderCycle::OnDemand(user), at("2024-03-01T08:00"))
        .unwrap();

    let calls = source.calls.borrow();
    assert_eq!(calls[0].0, OwnerScope::User(user));
    assert_eq!(
        calls[1].1,
        Some(DateWindow {
            start: date("2024-03-01"),
            end: date("2024-03-08"),
        })
    );
}

#[test]
fn failed_load_abandons_the_cycle() {
    let service = ReminderService::new(FailingSource);
    let err = service
        .run(ReminderCycle::Background, at("2024-03-01T08:00"))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

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

fn seed(conn: &Connection, owner: UserId, medication: &str, time: &str, next: &str) {
    SqliteScheduleRepository::new(conn)
        .create_schedule(
            owner,
            &ScheduleInput {
                medication_name: medication.to_string(),
                frequency: 1,
                times_of_day: vec![time.to_string()],
                notes: None,
            },
        )
        .unwrap();
    SqliteAppointmentRepository::new(conn)
        .create_appointment(
            owner,
            &AppointmentInput {
                last_checkup_date: None,
                next_appointment_date: date(next),
                notes: None,
            },
        )
        .unwrap();
}

#[test]
fn sqlite_background_cycle_spans_users() {
    let conn = open_db_in_memory().unwrap();
    let alice = register(&conn, "alice@example.com");
    let bob = register(&conn, "bob@example.com");
    seed(&conn, alice, "Latanoprost", "08:00", "2024-03-02");
    seed(&conn, bob, "Timolol", "08:00", "2024-03-20");

    let service = ReminderService::new(SqliteReminderSource::new(&conn));
    let events = service
        .run(ReminderCycle::Background, at("2024-03-01T08:00"))
        .unwrap();

    let fired: Vec<_> = events
        .iter()
        .map(|event| (event.owner_id, event.message.as_str()))
        .collect();
    assert_eq!(fired.len(), 3);
    assert!(fired.contains(&(alice, "Time to take Latanoprost")));
    assert!(fired.contains(&(bob, "Time to take Timolol")));
    assert!(fired.contains(&(alice, "Eye appointment tomorrow")));
}

#[test]
fn sqlite_on_demand_cycle_only_sees_own_records() {
    let conn = open_db_in_memory().unwrap();
    let alice = register(&conn, "alice@example.com");
    let bob = register(&conn, "bob@example.com");
    seed(&conn, alice, "Latanoprost", "08:00", "2024-03-01");
    seed(&conn, bob, "Timolol", "08:00", "2024-03-01");

    let service = ReminderService::new(SqliteReminderSource::new(&conn));
    let events = service
        .run(ReminderCycle::OnDemand(alice), at("2024-03-01T08:00"))
        .unwrap();

    let messages: Vec<_> = events.iter().map(|event| event.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Time to take Latanoprost", "Eye appointment today"]
    );
    assert!(events.iter().all(|event| event.owner_id == alice));
}

use wastesched_core::{
    DriverRepository, EntityKind, EntityRef, NewDriver, NewResident, NewSchedule, NewStopRequest,
    NewStreet, RepoError, ResidentListQuery, ResidentRepository, ScheduleListQuery,
    ScheduleRepository, StopRequestListQuery, StopRequestRepository, StreetRepository,
    WasteStore,
};

/// Elm St scenario: street 1, resident 1, driver 1, schedule 1, stop request 1.
fn elm_street_scenario(store: &WasteStore) {
    let street = store
        .streets()
        .create_street(&NewStreet::new("Elm St"))
        .expect("street should be created");
    let resident = store
        .residents()
        .create_resident(&NewResident::new("alice", "pw", street.id))
        .expect("resident should be created");
    let driver = store
        .drivers()
        .create_driver(&NewDriver::new("bob", "pw"))
        .expect("driver should be created");
    let schedule = store
        .schedules()
        .create_schedule(&NewSchedule::new(driver.id, street.id, "2024-01-01T08:00"))
        .expect("schedule should be created");
    let request = store
        .stop_requests()
        .create_stop_request(
            &NewStopRequest::new(resident.id, schedule.id).with_note("leave at curb"),
        )
        .expect("stop request should be created");

    assert_eq!(
        (street.id, resident.id, driver.id, schedule.id, request.id),
        (1, 1, 1, 1, 1)
    );
}

fn count_rows(store: &WasteStore, kind: EntityKind) -> i64 {
    store
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {};", kind.table()), [], |row| {
            row.get(0)
        })
        .expect("count query should succeed")
}

#[test]
fn deleting_street_removes_residents_schedules_and_stop_requests_but_keeps_driver() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    let plan = store.streets().delete_street(1).unwrap();

    assert!(store.residents().get_resident(1).unwrap().is_none());
    assert!(store.schedules().get_schedule(1).unwrap().is_none());
    assert!(store.stop_requests().get_stop_request(1).unwrap().is_none());
    assert!(store.drivers().get_driver(1).unwrap().is_some());

    assert_eq!(plan.root, EntityRef::new(EntityKind::Street, 1));
    assert_eq!(plan.count(EntityKind::Resident), 1);
    assert_eq!(plan.count(EntityKind::Schedule), 1);
    assert_eq!(plan.count(EntityKind::StopRequest), 1);
    assert_eq!(plan.count(EntityKind::Driver), 0);
}

#[test]
fn deleting_street_leaves_no_row_referencing_it_transitively() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    // A second street with its own dependents must survive.
    let oak = store
        .streets()
        .create_street(&NewStreet::new("Oak Ave"))
        .unwrap();
    let ben = store
        .residents()
        .create_resident(&NewResident::new("ben", "pw", oak.id))
        .unwrap();
    let oak_schedule = store
        .schedules()
        .create_schedule(&NewSchedule::new(1, oak.id, "Tue 07:00"))
        .unwrap();
    store
        .stop_requests()
        .create_stop_request(&NewStopRequest::new(ben.id, oak_schedule.id))
        .unwrap();
    // Cross-street request: resident on Elm against a schedule on Oak.
    store
        .stop_requests()
        .create_stop_request(&NewStopRequest::new(1, oak_schedule.id))
        .unwrap();

    store.streets().delete_street(1).unwrap();

    let residents = store
        .residents()
        .list_residents(&ResidentListQuery::default())
        .unwrap();
    assert!(residents.iter().all(|resident| resident.street_id != 1));
    assert_eq!(residents.len(), 1);

    let schedules = store
        .schedules()
        .list_schedules(&ScheduleListQuery::default())
        .unwrap();
    assert!(schedules.iter().all(|schedule| schedule.street_id != 1));

    let remaining_requests = store
        .stop_requests()
        .list_stop_requests(&StopRequestListQuery::default())
        .unwrap();
    assert_eq!(remaining_requests.len(), 1);
    assert_eq!(remaining_requests[0].resident_id, ben.id);
}

#[test]
fn deleting_driver_removes_schedules_and_their_stop_requests() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    let plan = store.drivers().delete_driver(1).unwrap();
    assert_eq!(plan.steps.len(), 3);

    assert_eq!(count_rows(&store, EntityKind::Schedule), 0);
    assert_eq!(count_rows(&store, EntityKind::StopRequest), 0);
    assert_eq!(count_rows(&store, EntityKind::Resident), 1);
    assert_eq!(count_rows(&store, EntityKind::Street), 1);
}

#[test]
fn deleting_resident_removes_only_its_stop_requests() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    store.residents().delete_resident(1).unwrap();

    assert_eq!(count_rows(&store, EntityKind::StopRequest), 0);
    assert_eq!(count_rows(&store, EntityKind::Schedule), 1);
    assert_eq!(count_rows(&store, EntityKind::Street), 1);
}

#[test]
fn deleting_schedule_removes_only_its_stop_requests() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    store.schedules().delete_schedule(1).unwrap();

    assert_eq!(count_rows(&store, EntityKind::StopRequest), 0);
    assert_eq!(count_rows(&store, EntityKind::Resident), 1);
    assert_eq!(count_rows(&store, EntityKind::Driver), 1);
}

#[test]
fn deleting_missing_row_fails_with_not_found_and_changes_nothing() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    for kind in EntityKind::ALL {
        let err = store.delete(kind, 999).unwrap_err();
        assert!(
            matches!(err, RepoError::NotFound(target) if target == EntityRef::new(kind, 999)),
            "unexpected error for {kind}: {err}"
        );
    }

    for kind in EntityKind::ALL {
        assert_eq!(count_rows(&store, kind), 1, "{kind} rows changed");
    }
}

#[test]
fn deleting_twice_fails_the_second_time() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    elm_street_scenario(&store);

    store.stop_requests().delete_stop_request(1).unwrap();
    let err = store.stop_requests().delete_stop_request(1).unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn schedule_with_missing_driver_creates_nothing() {
    let store = WasteStore::open_in_memory().expect("in-memory store should open");
    store
        .streets()
        .create_street(&NewStreet::new("Elm St"))
        .unwrap();

    let err = store
        .schedules()
        .create_schedule(&NewSchedule::new(999, 1, "2024-01-01T08:00"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Reference(_)));
    assert!(store
        .schedules()
        .list_schedules(&ScheduleListQuery::default())
        .unwrap()
        .is_empty());
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::{Duration, TimeZone};
use yare::parameterized;

fn new_request(title: &str) -> NewRequest {
    NewRequest::new("Ada", title, "some details")
}

fn ids(requests: &[Request]) -> Vec<i64> {
    requests.iter().map(|r| r.id).collect()
}

/// Two records from the admin listing examples.
fn seed_a_b(db: &Database) -> (Request, Request) {
    let a = db
        .insert_request(&new_request("printer issue").with_category("IT"))
        .unwrap();
    let b = db
        .insert_request(
            &new_request("payroll question")
                .with_status("done")
                .with_category("HR"),
        )
        .unwrap();
    (a, b)
}

#[test]
fn insert_and_get_request() {
    let db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_request(&new_request("Printer jam").with_contact("x101"))
        .unwrap();

    assert!(stored.id > 0);
    let retrieved = db.get_request(stored.id).unwrap();
    assert_eq!(retrieved, stored);
    assert_eq!(retrieved.title, "Printer jam");
    assert_eq!(retrieved.contact.as_deref(), Some("x101"));
    assert_eq!(retrieved.status, "new");
    assert_eq!(retrieved.priority, "normal");
    assert!(retrieved.category.is_none());
}

#[test]
fn insert_assigns_created_at_now() {
    let db = Database::open_in_memory().unwrap();
    let before = Utc::now() - Duration::seconds(1);
    let stored = db.insert_request(&new_request("t")).unwrap();
    assert!(stored.created_at >= before);
    assert!(stored.created_at <= Utc::now() + Duration::seconds(1));
}

#[test]
fn insert_keeps_explicit_created_at() {
    let db = Database::open_in_memory().unwrap();
    let ts = Utc.with_ymd_and_hms(2025, 12, 24, 18, 0, 0).unwrap();
    let stored = db
        .insert_request(&new_request("t").with_created_at(ts))
        .unwrap();
    assert_eq!(stored.created_at, ts);
}

#[test]
fn ids_are_unique_and_increasing() {
    let db = Database::open_in_memory().unwrap();
    let first = db.insert_request(&new_request("one")).unwrap();
    let second = db.insert_request(&new_request("two")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn get_unknown_request_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let err = db.get_request(999).unwrap_err();
    assert!(matches!(err, Error::RequestNotFound(999)));
}

#[parameterized(
    blank_name = { NewRequest::new("", "t", "d"), vec!["name"] },
    whitespace_title = { NewRequest::new("Ada", "   ", "d"), vec!["title"] },
    all_blank = { NewRequest::new(" ", "", "\t"), vec!["name", "title", "details"] },
)]
fn insert_rejects_blank_required_fields(new: NewRequest, missing: Vec<&'static str>) {
    let db = Database::open_in_memory().unwrap();
    let err = db.insert_request(&new).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingFields(ref fields)) if *fields == missing
    ));
    assert_eq!(db.count_requests().unwrap(), 0);
}

#[test]
fn update_status_only_keeps_priority() {
    let db = Database::open_in_memory().unwrap();
    let stored = db
        .insert_request(&new_request("t").with_priority("high"))
        .unwrap();

    let update = RequestUpdate {
        status: Some("done".into()),
        priority: None,
    };
    let updated = db.update_request(stored.id, &update).unwrap();
    assert_eq!(updated.status, "done");
    assert_eq!(updated.priority, "high");
}

#[test]
fn update_both_fields() {
    let db = Database::open_in_memory().unwrap();
    let stored = db.insert_request(&new_request("t")).unwrap();

    let update = RequestUpdate {
        status: Some("in_progress".into()),
        priority: Some("low".into()),
    };
    let updated = db.update_request(stored.id, &update).unwrap();
    assert_eq!(updated.status, "in_progress");
    assert_eq!(updated.priority, "low");
    assert_eq!(updated.created_at, stored.created_at);
}

#[test]
fn empty_update_leaves_record_unchanged() {
    let db = Database::open_in_memory().unwrap();
    let stored = db.insert_request(&new_request("t")).unwrap();

    let updated = db
        .update_request(stored.id, &RequestUpdate::default())
        .unwrap();
    assert_eq!(updated, stored);
    assert_eq!(db.get_request(stored.id).unwrap(), stored);
}

#[test]
fn update_accepts_unknown_values() {
    let db = Database::open_in_memory().unwrap();
    let stored = db.insert_request(&new_request("t")).unwrap();

    let update = RequestUpdate {
        status: Some("wontfix".into()),
        priority: Some(String::new()),
    };
    let updated = db.update_request(stored.id, &update).unwrap();
    assert_eq!(updated.status, "wontfix");
    assert_eq!(updated.priority, "");
}

#[test]
fn empty_update_of_unknown_request_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let err = db.update_request(9999, &RequestUpdate::default()).unwrap_err();
    assert!(matches!(err, Error::RequestNotFound(9999)));
}

#[test]
fn update_unknown_request_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let update = RequestUpdate {
        status: Some("done".into()),
        priority: None,
    };
    assert!(matches!(
        db.update_request(42, &update).unwrap_err(),
        Error::RequestNotFound(42)
    ));
    assert!(matches!(
        db.update_request(42, &RequestUpdate::default()).unwrap_err(),
        Error::RequestNotFound(42)
    ));
}

#[test]
fn list_is_newest_first_with_insertion_tiebreak() {
    let db = Database::open_in_memory().unwrap();
    let r1 = db.insert_request(&new_request("r1")).unwrap();
    let r2 = db.insert_request(&new_request("r2")).unwrap();
    let r3 = db.insert_request(&new_request("r3")).unwrap();

    let all = db.get_all_requests().unwrap();
    assert_eq!(ids(&all), vec![r3.id, r2.id, r1.id]);
}

#[test]
fn list_ties_on_identical_timestamps() {
    let db = Database::open_in_memory().unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let r1 = db
        .insert_request(&new_request("r1").with_created_at(ts))
        .unwrap();
    let r2 = db
        .insert_request(&new_request("r2").with_created_at(ts))
        .unwrap();

    assert_eq!(ids(&db.get_all_requests().unwrap()), vec![r2.id, r1.id]);
}

#[test]
fn list_orders_by_created_at_not_id() {
    let db = Database::open_in_memory().unwrap();
    let late = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let early = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let newer = db
        .insert_request(&new_request("newer").with_created_at(late))
        .unwrap();
    let older = db
        .insert_request(&new_request("older").with_created_at(early))
        .unwrap();

    assert_eq!(ids(&db.get_all_requests().unwrap()), vec![newer.id, older.id]);
}

#[test]
fn list_filter_query_and_status() {
    let db = Database::open_in_memory().unwrap();
    let (a, _b) = seed_a_b(&db);

    let filter = RequestFilter {
        q: "issue".into(),
        status: "new".into(),
        ..Default::default()
    };
    assert_eq!(ids(&db.list_requests(&filter).unwrap()), vec![a.id]);
}

#[test]
fn list_filter_category() {
    let db = Database::open_in_memory().unwrap();
    let (_a, b) = seed_a_b(&db);

    let filter = RequestFilter {
        category: "HR".into(),
        ..Default::default()
    };
    assert_eq!(ids(&db.list_requests(&filter).unwrap()), vec![b.id]);
}

#[test]
fn list_filter_query_is_case_insensitive_across_fields() {
    let db = Database::open_in_memory().unwrap();
    let by_title = db.insert_request(&new_request("VPN down")).unwrap();
    let by_details = db
        .insert_request(&NewRequest::new("Bob", "Access", "cannot reach the vpn"))
        .unwrap();
    let by_name = db
        .insert_request(&NewRequest::new("Vpnson", "Desk", "chair broken"))
        .unwrap();
    db.insert_request(&new_request("unrelated")).unwrap();

    let filter = RequestFilter {
        q: "vPn".into(),
        ..Default::default()
    };
    assert_eq!(
        ids(&db.list_requests(&filter).unwrap()),
        vec![by_name.id, by_details.id, by_title.id]
    );
}

#[test]
fn list_filter_query_folds_non_ascii_case() {
    let db = Database::open_in_memory().unwrap();
    let upper = db.insert_request(&new_request("ÉCOLE heating")).unwrap();
    let lower = db
        .insert_request(&NewRequest::new("Zoë", "Badge", "lost at the école"))
        .unwrap();
    db.insert_request(&new_request("ecole without accent")).unwrap();

    let filter = RequestFilter {
        q: "École".into(),
        ..Default::default()
    };
    assert_eq!(
        ids(&db.list_requests(&filter).unwrap()),
        vec![lower.id, upper.id]
    );

    let filter = RequestFilter {
        q: "ZOË".into(),
        ..Default::default()
    };
    assert_eq!(ids(&db.list_requests(&filter).unwrap()), vec![lower.id]);
}

#[test]
fn list_filter_query_treats_wildcards_literally() {
    let db = Database::open_in_memory().unwrap();
    let literal = db.insert_request(&new_request("disk 100% full")).unwrap();
    db.insert_request(&new_request("disk 1000 full")).unwrap();

    let filter = RequestFilter {
        q: "100%".into(),
        ..Default::default()
    };
    assert_eq!(ids(&db.list_requests(&filter).unwrap()), vec![literal.id]);
}

#[test]
fn list_filter_priority() {
    let db = Database::open_in_memory().unwrap();
    let high = db
        .insert_request(&new_request("a").with_priority("high"))
        .unwrap();
    db.insert_request(&new_request("b")).unwrap();

    let filter = RequestFilter {
        priority: "high".into(),
        ..Default::default()
    };
    assert_eq!(ids(&db.list_requests(&filter).unwrap()), vec![high.id]);
}

#[test]
fn list_filter_no_match() {
    let db = Database::open_in_memory().unwrap();
    seed_a_b(&db);

    let filter = RequestFilter {
        q: "issue".into(),
        category: "HR".into(),
        ..Default::default()
    };
    assert!(db.list_requests(&filter).unwrap().is_empty());
}

#[test]
fn distinct_categories_sorted_and_unfiltered() {
    let db = Database::open_in_memory().unwrap();
    seed_a_b(&db);
    db.insert_request(&new_request("dup").with_category("IT"))
        .unwrap();
    db.insert_request(&new_request("none")).unwrap();
    db.insert_request(&new_request("empty").with_category(""))
        .unwrap();

    assert_eq!(db.distinct_categories().unwrap(), vec!["HR", "IT"]);
}

#[test]
fn count_requests() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.count_requests().unwrap(), 0);
    seed_a_b(&db);
    assert_eq!(db.count_requests().unwrap(), 2);
}

#[test]
fn open_on_disk_creates_parent_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join(DB_FILE_NAME);

    let id = {
        let db = Database::open(&path).unwrap();
        db.insert_request(&new_request("kept")).unwrap().id
    };

    let reopened = Database::open(&path).unwrap();
    assert_eq!(reopened.get_request(id).unwrap().title, "kept");
}

#[test]
fn migrations_are_idempotent() {
    let db = Database::open_in_memory().unwrap();
    run_migrations(&db.conn).unwrap();
    run_migrations(&db.conn).unwrap();
}

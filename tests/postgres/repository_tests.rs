//! Fan-out write, filtered scan, and payload lookup tests against
//! `PostgreSQL`.

use crate::postgres::helpers::{
    PostgresCluster, TestDatabase, clock, january, january_range, make_record, postgres_cluster,
    seed_view, test_runtime,
};
use mockable::{Clock, DefaultClock};
use northstore::audit::{
    domain::{AuditView, MessageStatus, PageRequest, Payload, PayloadId, RecordQuery},
    ports::{AuditRecordRepository, PayloadRepository},
};
use rstest::rstest;

#[rstest]
fn stored_record_round_trips_through_every_view(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let record = make_record(&clock, "alice", "orders", january(10));
    for view in AuditView::ALL {
        rt.block_on(db.records().store(view, &record))
            .expect("store should succeed");
    }

    let queries = [
        RecordQuery::by_interval(january_range(9, 11)),
        RecordQuery::by_user_interval("alice", january_range(9, 11)),
        RecordQuery::by_user_subject_interval("alice", "orders", january_range(9, 11)),
    ];
    for query in &queries {
        let page = rt
            .block_on(db.records().fetch(query, &PageRequest::first()))
            .expect("fetch should succeed");
        assert_eq!(page.content.len(), 1, "view {} should hold the row", query.view());
        let found = &page.content[0];
        assert_eq!(found.id(), record.id());
        assert_eq!(found.user(), "alice");
        assert_eq!(found.subject(), "orders");
        assert_eq!(found.msg_name(), "device_event");
        assert_eq!(found.msg_status(), MessageStatus::Processed);
        assert_eq!(found.payload_id(), record.payload_id());
        assert_eq!(found.occur_time(), record.occur_time());
    }

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn user_filter_excludes_other_users(postgres_cluster: PostgresCluster, clock: DefaultClock) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let view = AuditView::ByUserInterval;
    let alice = make_record(&clock, "alice", "orders", january(5));
    let bob = make_record(&clock, "bob", "orders", january(5));
    rt.block_on(db.records().store(view, &alice)).expect("store alice");
    rt.block_on(db.records().store(view, &bob)).expect("store bob");

    let page = rt
        .block_on(db.records().fetch(
            &RecordQuery::by_user_interval("bob", january_range(4, 6)),
            &PageRequest::first(),
        ))
        .expect("fetch should succeed");

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id(), bob.id());

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn subject_filter_excludes_other_subjects(
    postgres_cluster: PostgresCluster,
    clock: DefaultClock,
) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let view = AuditView::ByUserSubjectInterval;
    let orders = make_record(&clock, "alice", "orders", january(5));
    let payments = make_record(&clock, "alice", "payments", january(5));
    rt.block_on(db.records().store(view, &orders)).expect("store orders");
    rt.block_on(db.records().store(view, &payments))
        .expect("store payments");

    let page = rt
        .block_on(db.records().fetch(
            &RecordQuery::by_user_subject_interval("alice", "payments", january_range(4, 6)),
            &PageRequest::first(),
        ))
        .expect("fetch should succeed");

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id(), payments.id());

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn scan_is_bounded_by_the_time_range(postgres_cluster: PostgresCluster, clock: DefaultClock) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    seed_view(&rt, &db, AuditView::ByInterval, &clock, 3, 2);
    seed_view(&rt, &db, AuditView::ByInterval, &clock, 20, 2);

    let page = rt
        .block_on(db.records().fetch(
            &RecordQuery::by_interval(january_range(1, 10)),
            &PageRequest::first(),
        ))
        .expect("fetch should succeed");

    assert_eq!(page.content.len(), 2);
    assert!(page.content.iter().all(|r| r.occur_time() < january(10)));

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn rows_come_back_in_scan_order(postgres_cluster: PostgresCluster, clock: DefaultClock) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    // Insert out of chronological order; the scan must sort by key.
    let late = make_record(&clock, "alice", "orders", january(20));
    let early = make_record(&clock, "alice", "orders", january(2));
    let middle = make_record(&clock, "alice", "orders", january(11));
    for record in [&late, &early, &middle] {
        rt.block_on(db.records().store(AuditView::ByInterval, record))
            .expect("store should succeed");
    }

    let page = rt
        .block_on(db.records().fetch(
            &RecordQuery::by_interval(january_range(1, 31)),
            &PageRequest::first(),
        ))
        .expect("fetch should succeed");

    let ids: Vec<_> = page.content.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![early.id(), middle.id(), late.id()]);

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn payload_round_trips(postgres_cluster: PostgresCluster, clock: DefaultClock) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let payload = Payload::new(PayloadId::new(), "{\"temp\":21.5}", &clock);
    rt.block_on(db.payloads().store(&payload))
        .expect("store should succeed");

    let found = rt
        .block_on(db.payloads().find_by_id(payload.id()))
        .expect("lookup should succeed")
        .expect("payload should exist");
    assert_eq!(found.msg_payload(), "{\"temp\":21.5}");

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn payload_lookup_misses_cleanly(postgres_cluster: PostgresCluster) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let found = rt
        .block_on(db.payloads().find_by_id(PayloadId::new()))
        .expect("lookup should succeed");
    assert!(found.is_none());

    db.cleanup().expect("cleanup database");
}

#[rstest]
fn stored_at_is_persisted(postgres_cluster: PostgresCluster, clock: DefaultClock) {
    let db = TestDatabase::create(postgres_cluster).expect("database setup");
    let rt = test_runtime().expect("tokio runtime");

    let before = clock.utc();
    let record = make_record(&clock, "alice", "orders", january(5));
    rt.block_on(db.records().store(AuditView::ByInterval, &record))
        .expect("store should succeed");

    let page = rt
        .block_on(db.records().fetch(
            &RecordQuery::by_interval(january_range(4, 6)),
            &PageRequest::first(),
        ))
        .expect("fetch should succeed");

    assert_eq!(page.content.len(), 1);
    assert!(page.content[0].stored_at() >= before - chrono::TimeDelta::seconds(1));

    db.cleanup().expect("cleanup database");
}

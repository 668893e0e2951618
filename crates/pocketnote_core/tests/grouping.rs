use chrono::{DateTime, Duration, TimeZone, Utc};
use pocketnote_core::{bucket_for, group_by_recency, Note, RecencyBucket};
use uuid::Uuid;

fn note_created_at(title: &str, created_at: DateTime<Utc>) -> Note {
    Note::with_id(Uuid::new_v4(), title, created_at)
}

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

#[test]
fn representative_ages_land_in_expected_buckets() {
    let now = reference_now();
    let notes = vec![
        note_created_at("today", now),
        note_created_at("two days", now - Duration::days(2)),
        note_created_at("ten days", now - Duration::days(10)),
        note_created_at("forty days", now - Duration::days(40)),
    ];

    let groups = group_by_recency(&notes, now);
    assert_eq!(groups.len(), 4);

    let titles_of = |bucket: RecencyBucket| -> Vec<&str> {
        groups
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, members)| members.iter().map(|n| n.title.as_str()).collect())
            .unwrap()
    };

    assert_eq!(titles_of(RecencyBucket::Today), ["today"]);
    assert_eq!(titles_of(RecencyBucket::LastSevenDays), ["two days"]);
    assert_eq!(titles_of(RecencyBucket::LastThirtyDays), ["ten days"]);
    assert_eq!(titles_of(RecencyBucket::Older), ["forty days"]);
}

#[test]
fn every_note_lands_in_exactly_one_bucket() {
    let now = reference_now();
    let offsets_in_hours = [0, 3, 25, 100, 200, 500, 900, 2000];
    let notes: Vec<Note> = offsets_in_hours
        .iter()
        .map(|hours| note_created_at("n", now - Duration::hours(*hours)))
        .collect();

    let groups = group_by_recency(&notes, now);
    let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
    assert_eq!(total, notes.len());

    for note in &notes {
        let expected = bucket_for(note.created_at, now);
        let containing: Vec<RecencyBucket> = groups
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m.id == note.id))
            .map(|(bucket, _)| *bucket)
            .collect();
        assert_eq!(containing, [expected]);
    }
}

#[test]
fn partition_is_stable_within_buckets() {
    let now = reference_now();
    let notes = vec![
        note_created_at("first", now - Duration::days(3)),
        note_created_at("second", now - Duration::days(1)),
        note_created_at("third", now - Duration::days(6)),
    ];

    let groups = group_by_recency(&notes, now);
    let seven_days: Vec<&str> = groups[1].1.iter().map(|n| n.title.as_str()).collect();
    // Input order, not date order.
    assert_eq!(seven_days, ["first", "second", "third"]);
}

#[test]
fn empty_buckets_are_still_computed_in_display_order() {
    let now = reference_now();
    let notes = vec![note_created_at("only today", now)];

    let groups = group_by_recency(&notes, now);
    let buckets: Vec<RecencyBucket> = groups.iter().map(|(bucket, _)| *bucket).collect();
    assert_eq!(buckets, RecencyBucket::DISPLAY_ORDER);
    assert_eq!(groups[0].1.len(), 1);
    assert!(groups[1].1.is_empty());
    assert!(groups[2].1.is_empty());
    assert!(groups[3].1.is_empty());
}

#[test]
fn thirty_day_boundary_is_inclusive() {
    let now = reference_now();
    assert_eq!(
        bucket_for(now - Duration::days(30), now),
        RecencyBucket::LastThirtyDays
    );
    assert_eq!(
        bucket_for(now - Duration::days(30) - Duration::seconds(1), now),
        RecencyBucket::Older
    );
}

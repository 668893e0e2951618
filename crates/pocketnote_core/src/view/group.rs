//! Recency grouping for the note list screen.
//!
//! # Responsibility
//! - Partition notes into the four fixed display buckets.
//!
//! # Invariants
//! - Every note lands in exactly one bucket; first matching rule wins.
//! - Partition is stable: input order is preserved within a bucket.
//! - All four buckets are always computed; callers skip empty ones when
//!   rendering.

use crate::model::note::Note;
use chrono::{DateTime, Duration, Utc};

/// One of the four fixed recency groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyBucket {
    /// Same calendar day as the reference instant.
    Today,
    /// Within the last 7 days, not today.
    LastSevenDays,
    /// Within the last 30 days, not in an earlier bucket.
    LastThirtyDays,
    /// Everything else.
    Older,
}

impl RecencyBucket {
    /// Fixed display order of all buckets.
    pub const DISPLAY_ORDER: [RecencyBucket; 4] = [
        RecencyBucket::Today,
        RecencyBucket::LastSevenDays,
        RecencyBucket::LastThirtyDays,
        RecencyBucket::Older,
    ];

    /// Section header text for this bucket.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::LastSevenDays => "Last 7 days",
            Self::LastThirtyDays => "Last 30 days",
            Self::Older => "Older",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Today => 0,
            Self::LastSevenDays => 1,
            Self::LastThirtyDays => 2,
            Self::Older => 3,
        }
    }
}

/// Picks the bucket for one creation instant, evaluating rules in display
/// order so a note belongs to exactly one bucket.
pub fn bucket_for(created_at: DateTime<Utc>, now: DateTime<Utc>) -> RecencyBucket {
    if created_at.date_naive() == now.date_naive() {
        RecencyBucket::Today
    } else if created_at >= now - Duration::days(7) {
        RecencyBucket::LastSevenDays
    } else if created_at >= now - Duration::days(30) {
        RecencyBucket::LastThirtyDays
    } else {
        RecencyBucket::Older
    }
}

/// Stable-partitions notes into all four buckets, in display order.
///
/// Empty buckets stay in the result so callers can decide what to render.
pub fn group_by_recency<'a>(
    notes: &'a [Note],
    now: DateTime<Utc>,
) -> Vec<(RecencyBucket, Vec<&'a Note>)> {
    let mut groups: Vec<(RecencyBucket, Vec<&Note>)> = RecencyBucket::DISPLAY_ORDER
        .iter()
        .map(|bucket| (*bucket, Vec::new()))
        .collect();

    for note in notes {
        let bucket = bucket_for(note.created_at, now);
        groups[bucket.index()].1.push(note);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::{bucket_for, RecencyBucket};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn same_calendar_day_wins_over_seven_day_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        let this_morning = Utc.with_ymd_and_hms(2024, 3, 15, 0, 5, 0).unwrap();
        assert_eq!(bucket_for(this_morning, now), RecencyBucket::Today);
    }

    #[test]
    fn exactly_seven_days_ago_is_still_last_seven_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let boundary = now - Duration::days(7);
        assert_eq!(bucket_for(boundary, now), RecencyBucket::LastSevenDays);
    }

    #[test]
    fn yesterday_is_not_today_even_when_less_than_a_day_ago() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 30, 0).unwrap();
        let late_yesterday = Utc.with_ymd_and_hms(2024, 3, 14, 23, 45, 0).unwrap();
        assert_eq!(
            bucket_for(late_yesterday, now),
            RecencyBucket::LastSevenDays
        );
    }

    #[test]
    fn labels_match_display_order() {
        let labels: Vec<&str> = RecencyBucket::DISPLAY_ORDER
            .iter()
            .map(|bucket| bucket.label())
            .collect();
        assert_eq!(labels, ["Today", "Last 7 days", "Last 30 days", "Older"]);
    }
}

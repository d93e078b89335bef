use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use readmeter_lib::meter::{should_gate, ReadEntry, ReadLog, RETENTION_WINDOW_MS};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
}

fn arb_log() -> impl Strategy<Value = ReadLog> {
    // Ages span both sides of the retention window.
    prop::collection::vec(("[a-f]{1,3}", 0i64..(2 * RETENTION_WINDOW_MS)), 0..12).prop_map(
        |items| {
            let now_ms = now().timestamp_millis();
            ReadLog::from_entries(
                items
                    .into_iter()
                    .map(|(id, age)| ReadEntry::new(id, now_ms - age)),
            )
        },
    )
}

proptest! {
    #[test]
    fn authenticated_is_a_no_op(log in arb_log(), article in "[a-z]{1,4}", limit in 0u32..6) {
        let decision = should_gate(log.clone(), &article, true, limit, now());
        prop_assert!(!decision.blocked);
        prop_assert_eq!(decision.updated_log, log);
    }

    #[test]
    fn limit_distinct_reads_stay_open(limit in 1u32..8) {
        let mut log = ReadLog::new();
        for i in 0..limit {
            let at = now() + Duration::milliseconds(i64::from(i));
            let decision = should_gate(log, &format!("post-{i}"), false, limit, at);
            prop_assert!(!decision.blocked);
            log = decision.updated_log;
        }

        let at = now() + Duration::seconds(1);
        let decision = should_gate(log, "one-too-many", false, limit, at);
        prop_assert!(decision.blocked);
    }

    #[test]
    fn reread_never_changes_count_or_opens_to_blocked(log in arb_log(), limit in 0u32..6) {
        let first = should_gate(log, "repeat", false, limit, now());
        let second = should_gate(
            first.updated_log.clone(),
            "repeat",
            false,
            limit,
            now() + Duration::minutes(5),
        );

        prop_assert!(second.updated_log.len() <= first.updated_log.len());
        if !first.blocked {
            prop_assert!(!second.blocked);
        }
    }

    #[test]
    fn expired_entries_never_survive(log in arb_log(), limit in 0u32..6) {
        let horizon = now().timestamp_millis() - RETENTION_WINDOW_MS;
        let decision = should_gate(log, "fresh", false, limit, now());

        prop_assert!(decision
            .updated_log
            .iter()
            .all(|e| e.observed_at_millis > horizon));
        prop_assert_eq!(decision.blocked, decision.updated_log.len() > limit as usize);
    }

    #[test]
    fn at_most_one_entry_per_article(log in arb_log(), article in "[a-f]{1,3}") {
        let decision = should_gate(log, &article, false, 3, now());
        let mut ids: Vec<_> = decision.updated_log.iter().map(|e| e.article_id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
        prop_assert!(decision.updated_log.contains(&article));
    }
}

use chrono::{DateTime, Duration, TimeZone, Utc};
use readmeter_lib::meter::{
    decode_log, encode_log, should_gate, MeterPolicy, ReadEntry, ReadLog, DEFAULT_FREE_LIMIT,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0).unwrap()
}

fn ms(offset: i64) -> DateTime<Utc> {
    t0() + Duration::milliseconds(offset)
}

fn ids(log: &ReadLog) -> Vec<&str> {
    log.iter().map(|e| e.article_id.as_str()).collect()
}

// ── Walkthrough: three free reads, then the gate closes ──────────────────

#[test]
fn free_limit_walkthrough() {
    let limit = DEFAULT_FREE_LIMIT;
    let mut log = ReadLog::new();

    for (offset, article) in ["A", "B", "C"].iter().enumerate() {
        let decision = should_gate(log, article, false, limit, ms(offset as i64));
        assert!(!decision.blocked, "{article} should be free");
        log = decision.updated_log;
    }
    assert_eq!(log.len(), 3);
    assert_eq!(ids(&log), vec!["C", "B", "A"]);

    let decision = should_gate(log, "D", false, limit, ms(3));
    assert!(decision.blocked, "fourth distinct article is gated");
    assert_eq!(decision.updated_log.len(), 4);
    log = decision.updated_log;

    let decision = should_gate(log, "A", false, limit, ms(4));
    assert!(decision.blocked);
    assert_eq!(decision.updated_log.len(), 4, "re-read does not grow the log");
    assert_eq!(
        decision.updated_log.get("A").map(|e| e.observed_at_millis),
        Some(t0().timestamp_millis()),
        "re-read keeps the first-seen timestamp"
    );
    log = decision.updated_log;

    let decision = should_gate(log, "E", false, limit, t0() + Duration::days(8));
    assert!(!decision.blocked);
    assert_eq!(ids(&decision.updated_log), vec!["E"]);
}

// ── Authenticated visitors are never metered ─────────────────────────────

#[test]
fn authenticated_visitor_passes_log_through() {
    let log = ReadLog::from_entries(vec![
        ReadEntry::new("x", 0),
        ReadEntry::new("y", t0().timestamp_millis()),
    ]);

    let decision = should_gate(log.clone(), "z", true, 0, t0());

    assert!(!decision.blocked);
    assert_eq!(decision.updated_log, log, "expired entry is not pruned either");
}

// ── Re-reads never flip an open gate ─────────────────────────────────────

#[test]
fn rereading_within_limit_stays_open() {
    let first = should_gate(ReadLog::new(), "A", false, 1, ms(0));
    assert!(!first.blocked);

    let again = should_gate(first.updated_log, "A", false, 1, ms(60_000));
    assert!(!again.blocked);
    assert_eq!(again.updated_log.len(), 1);
}

// ── Expiry respects the configured window ────────────────────────────────

#[test]
fn custom_retention_window_expires_sooner() {
    let policy = MeterPolicy::with_free_limit(1).with_retention(Duration::hours(1));
    let first = policy.evaluate(ReadLog::new(), "A", false, ms(0));

    let later = policy.evaluate(first.updated_log, "B", false, t0() + Duration::hours(2));

    assert!(!later.blocked);
    assert_eq!(ids(&later.updated_log), vec!["B"]);
}

#[test]
fn seven_days_minus_one_ms_still_counts() {
    let first = should_gate(ReadLog::new(), "A", false, 1, ms(0));
    let now = t0() + Duration::days(7) - Duration::milliseconds(1);

    let second = should_gate(first.updated_log, "B", false, 1, now);

    assert!(second.blocked);
    assert_eq!(ids(&second.updated_log), vec!["B", "A"]);
}

// ── Malformed stored state decodes as empty ──────────────────────────────

#[test]
fn malformed_stored_state_is_empty() {
    let cases = [
        None,
        Some(""),
        Some("null"),
        Some("\"a string\""),
        Some("{\"id\":\"a\",\"ts\":1}"),
        Some("[not json"),
        Some("[{\"ts\": 5}, {\"id\": \"\", \"ts\": 5}, 7, null]"),
    ];

    for raw in cases {
        assert!(decode_log(raw).is_empty(), "{raw:?} should decode empty");
    }
}

#[test]
fn malformed_state_meters_like_an_empty_log() {
    let from_garbage = should_gate(decode_log(Some("{oops")), "A", false, 0, t0());
    let from_empty = should_gate(ReadLog::new(), "A", false, 0, t0());
    assert_eq!(from_garbage, from_empty);
}

#[test]
fn decode_keeps_valid_entries_and_drops_the_rest() {
    let raw = r#"[
        {"id": "b", "ts": 200},
        {"id": "a"},
        {"id": "c", "ts": 100.75},
        {"id": "b", "ts": 50}
    ]"#;

    let log = decode_log(Some(raw));

    assert_eq!(
        log.entries(),
        &[ReadEntry::new("b", 200), ReadEntry::new("c", 100)]
    );
}

#[test]
fn encoded_log_uses_persisted_layout() {
    let decision = should_gate(ReadLog::new(), "post-9", false, 3, t0());
    let encoded = encode_log(&decision.updated_log).unwrap();

    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": "post-9", "ts": t0().timestamp_millis() }])
    );
    assert_eq!(decode_log(Some(&encoded)), decision.updated_log);
}

#[test]
fn out_of_range_timestamp_drops_only_that_entry() {
    let base = t0().timestamp_millis() - 1000;
    let raw = format!(
        r#"[{{"id":"a","ts":{base}}},{{"id":"b","ts":{}}},{{"id":"c","ts":{}}},{{"id":"x","ts":1e400}}]"#,
        base + 1,
        base + 2
    );

    let log = decode_log(Some(&raw));
    assert_eq!(ids(&log), vec!["a", "b", "c"]);

    let decision = should_gate(log, "d", false, 3, t0());
    assert!(decision.blocked, "earlier reads still count");
    assert_eq!(decision.updated_log.len(), 4);
}

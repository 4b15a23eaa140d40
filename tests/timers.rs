use std::time::{Duration, Instant};

use polo_terminal::timer::{Deferred, Ticker};

const SECOND: Duration = Duration::from_secs(1);

#[test]
fn ticker_counts_whole_periods_after_arming() {
    let start = Instant::now();
    let mut ticker = Ticker::new(SECOND);
    assert_eq!(ticker.poll(start, true), 0);
    assert!(ticker.is_armed());
    assert_eq!(ticker.poll(start + Duration::from_millis(999), true), 0);
    assert_eq!(ticker.poll(start + Duration::from_millis(1000), true), 1);
    assert_eq!(ticker.poll(start + Duration::from_millis(3500), true), 2);
    assert_eq!(ticker.poll(start + Duration::from_millis(4000), true), 1);
}

#[test]
fn ticker_does_not_catch_up_across_a_pause() {
    let start = Instant::now();
    let mut ticker = Ticker::new(SECOND);
    ticker.poll(start, true);
    assert_eq!(ticker.poll(start + Duration::from_millis(1700), true), 1);

    assert_eq!(ticker.poll(start + Duration::from_secs(2), false), 0);
    assert!(!ticker.is_armed());
    assert_eq!(ticker.poll(start + Duration::from_secs(30), false), 0);

    let resume = start + Duration::from_secs(60);
    assert_eq!(ticker.poll(resume, true), 0);
    assert_eq!(ticker.poll(resume + Duration::from_millis(900), true), 0);
    assert_eq!(ticker.poll(resume + SECOND, true), 1);
}

#[test]
fn deferred_items_fire_once_in_deadline_order() {
    let now = Instant::now();
    let mut queue = Deferred::new();
    queue.schedule(now, Duration::from_millis(500), "late");
    queue.schedule(now, Duration::from_millis(100), "early");
    queue.schedule(now + Duration::from_millis(400), Duration::from_millis(100), "tie");
    assert_eq!(queue.len(), 3);

    assert!(queue.due(now + Duration::from_millis(50)).is_empty());
    assert_eq!(queue.due(now + Duration::from_millis(100)), vec!["early"]);
    assert_eq!(queue.due(now + Duration::from_secs(1)), vec!["late", "tie"]);
    assert!(queue.is_empty());
    assert!(queue.due(now + Duration::from_secs(2)).is_empty());
}

#[test]
fn deferred_reports_earliest_deadline() {
    let now = Instant::now();
    let mut queue = Deferred::new();
    assert_eq!(queue.next_deadline(), None);
    queue.schedule(now, SECOND, 'a');
    queue.schedule(now, Duration::from_millis(200), 'b');
    assert_eq!(queue.next_deadline(), Some(now + Duration::from_millis(200)));
    queue.due(now + Duration::from_millis(200));
    assert_eq!(queue.next_deadline(), Some(now + SECOND));
}

#[test]
fn deferred_clear_drops_everything() {
    let now = Instant::now();
    let mut queue = Deferred::new();
    queue.schedule(now, SECOND, 1);
    queue.schedule(now, SECOND, 2);
    queue.clear();
    assert!(queue.due(now + SECOND * 2).is_empty());
}

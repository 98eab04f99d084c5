use std::sync::{Arc, Mutex};

use super::*;

const DELAY: Duration = Duration::from_millis(300);

fn recorder() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn push(log: &Arc<Mutex<Vec<String>>>, value: &str) -> impl Future<Output = ()> + Send + 'static {
    let log = Arc::clone(log);
    let value = value.to_owned();
    async move {
        log.lock().unwrap().push(value);
    }
}

#[tokio::test(start_paused = true)]
async fn fires_after_delay() {
    let log = recorder();
    let mut debouncer = Debouncer::new();
    debouncer.schedule("a", DELAY, push(&log, "a1"));

    tokio::time::sleep(Duration::from_millis(299)).await;
    assert!(log.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(*log.lock().unwrap(), vec!["a1".to_owned()]);
    assert_eq!(debouncer.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn same_key_is_coalesced_to_last() {
    let log = recorder();
    let mut debouncer = Debouncer::new();
    debouncer.schedule("a", DELAY, push(&log, "a1"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    debouncer.schedule("a", DELAY, push(&log, "a2"));
    debouncer.schedule("a", DELAY, push(&log, "a3"));
    assert_eq!(debouncer.pending(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(*log.lock().unwrap(), vec!["a3".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn different_keys_do_not_cancel_each_other() {
    let log = recorder();
    let mut debouncer = Debouncer::new();
    debouncer.schedule("a", DELAY, push(&log, "a"));
    debouncer.schedule("b", DELAY, push(&log, "b"));
    assert_eq!(debouncer.pending(), 2);

    tokio::time::sleep(Duration::from_millis(400)).await;
    let mut fired = log.lock().unwrap().clone();
    fired.sort();
    assert_eq!(fired, vec!["a".to_owned(), "b".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn cancel_and_drop_abort_pending() {
    let log = recorder();
    let mut debouncer = Debouncer::new();
    debouncer.schedule("a", DELAY, push(&log, "a"));
    debouncer.schedule("b", DELAY, push(&log, "b"));
    assert!(debouncer.cancel("a"));
    assert!(!debouncer.cancel("missing"));
    drop(debouncer);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(log.lock().unwrap().is_empty());
}

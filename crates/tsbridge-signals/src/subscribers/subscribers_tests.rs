#![allow(non_snake_case)]

use super::*;
use serde_json::json;

#[test]
fn Subscribers___subscribe___snapshot_first() {
    let mut subscribers = Subscribers::default();

    let mut rx = subscribers.subscribe(json!({"type": "snapshot"}));
    subscribers.notify(&json!({"type": "set"}));

    assert_eq!(rx.try_recv().unwrap(), json!({"type": "snapshot"}));
    assert_eq!(rx.try_recv().unwrap(), json!({"type": "set"}));
}

#[test]
fn Subscribers___notify___reaches_every_subscriber() {
    let mut subscribers = Subscribers::default();
    let mut first = subscribers.subscribe(json!(0));
    let mut second = subscribers.subscribe(json!(0));

    subscribers.notify(&json!(1));

    assert_eq!(first.try_recv().unwrap(), json!(0));
    assert_eq!(first.try_recv().unwrap(), json!(1));
    assert_eq!(second.try_recv().unwrap(), json!(0));
    assert_eq!(second.try_recv().unwrap(), json!(1));
}

#[test]
fn Subscribers___receiver_dropped___pruned() {
    let mut subscribers = Subscribers::default();
    let kept = subscribers.subscribe(json!(0));
    let dropped = subscribers.subscribe(json!(0));

    drop(dropped);
    subscribers.notify(&json!(1));

    assert_eq!(subscribers.len(), 1);
    drop(kept);
}

#[test]
fn Subscribers___receiver_closed___not_counted() {
    let mut subscribers = Subscribers::default();
    let mut rx = subscribers.subscribe(json!(0));

    rx.close();

    assert_eq!(subscribers.len(), 0);
}

#[test]
fn Subscribers___close___ends_streams() {
    let mut subscribers = Subscribers::default();
    let mut rx = subscribers.subscribe(json!(0));

    subscribers.close();

    assert_eq!(rx.try_recv().unwrap(), json!(0));
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::mpsc::error::TryRecvError::Disconnected)
    ));
}

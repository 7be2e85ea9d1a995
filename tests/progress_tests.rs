//! Tests for the progress module functionality.
//!
//! This file contains tests for progress bar styling and for the deliveries
//! the engine reports progress through.

use std::sync::{Arc, Mutex};

use resumable::{
    NoopDelivery, ProgressBarDelivery, ProgressBarOpts, ProgressDelivery, TransferRequest,
};

mod common;
use common::helpers::*;

#[test]
fn test_progress_bar_opts_default() {
    let opts = create_test_progress_opts();
    assert_progress_opts_enabled(&opts);
    assert!(opts.clear());
    let pb = opts.to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));
}

#[test]
fn test_progress_bar_opts_new() {
    let opts = create_custom_progress_opts("{bar} {bytes}", "abc");
    assert_progress_opts_enabled(&opts);
    assert!(!opts.clear());
    let pb = opts.to_progress_bar(50);
    assert_eq!(pb.length(), Some(50));
}

#[test]
fn test_progress_bar_opts_hidden() {
    let opts = ProgressBarOpts::hidden();
    assert_progress_opts_disabled(&opts);
    let pb = opts.to_progress_bar(100);
    assert!(pb.is_hidden());
}

#[test]
fn test_progress_bar_opts_pip_style() {
    let opts = ProgressBarOpts::with_pip_style();
    assert_progress_opts_enabled(&opts);
    assert!(opts.clear());
    let _style = opts.to_progress_style();
}

#[test]
fn test_progress_bar_opts_set_clear() {
    let mut opts = ProgressBarOpts::with_file_style();
    assert!(!opts.clear());
    opts.set_clear(true);
    assert!(opts.clear());
}

#[test]
fn test_progress_bar_delivery_tracks_transfer() {
    let delivery = ProgressBarDelivery::new(ProgressBarOpts::hidden());
    let request = TransferRequest::new(TEST_URL, "downloads/data.bin").unwrap();

    delivery.post_total_length(&request, 1000);
    assert_eq!(delivery.progress_bar().length(), Some(1000));
    assert_eq!(delivery.progress_bar().position(), 0);
    assert_eq!(delivery.progress_bar().message(), "data.bin");

    delivery.post_loading(&request, 600);
    assert_eq!(delivery.progress_bar().position(), 600);

    delivery.post_loading(&request, 1000);
    assert_eq!(delivery.progress_bar().position(), 1000);

    delivery.finish();
    assert!(delivery.progress_bar().is_finished());
}

#[test]
fn test_noop_delivery_ignores_events() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_hook = seen.clone();
    let request = TransferRequest::builder(TEST_URL, "data.bin")
        .on_loading(move |bytes| seen_hook.lock().unwrap().push(bytes))
        .build()
        .unwrap();

    NoopDelivery.post_total_length(&request, 1000);
    NoopDelivery.post_loading(&request, 1000);

    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_bar_delivery_drives_engine() {
    let temp_dir = create_temp_dir();
    let target = temp_dir.path().join("data.bin");
    let content = create_test_content(500);

    let performer = MockPerformer::new(vec![Script::full(500, chunks(&content, &[200, 300]))]);
    let delivery = ProgressBarDelivery::new(ProgressBarOpts::hidden());
    let request = TransferRequest::new(TEST_URL, &target).unwrap();
    let mut engine = create_test_engine(performer, delivery, request);

    assert!(engine.work().await.unwrap().is_success());
    let bar = engine.delivery().progress_bar();
    assert_eq!(bar.length(), Some(500));
    assert_eq!(bar.position(), 500);
}

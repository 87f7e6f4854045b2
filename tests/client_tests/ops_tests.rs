//! Tests for the operation table
//!
//! These tests verify:
//! - Shape validation per response layout
//! - Decoding into typed results
//! - Status tokens other than ok / not_found

use bytes::Bytes;
use ssdb::client::ops::{self, Shape};
use ssdb::protocol::{Response, Status};
use ssdb::SsdbError;

fn frame(items: &[&str]) -> Vec<Bytes> {
    items.iter().map(|s| Bytes::copy_from_slice(s.as_bytes())).collect()
}

fn assert_bad_response<T: std::fmt::Debug>(result: ssdb::Result<T>, command: &str) {
    match result {
        Err(SsdbError::BadResponse { command: c, .. }) => assert_eq!(c, command),
        other => panic!("Expected bad response for {}, got {:?}", command, other),
    }
}

// =============================================================================
// Exact Shape Tests
// =============================================================================

#[test]
fn test_set_accepts_ok_with_one_block() {
    ops::SET.apply(frame(&["ok", "1"])).unwrap();
}

#[test]
fn test_set_rejects_wrong_block_count() {
    assert_bad_response(ops::SET.apply(frame(&["ok"])), "set");
    assert_bad_response(ops::SET.apply(frame(&["ok", "1", "2"])), "set");
}

#[test]
fn test_error_status_is_bad_response() {
    let err = ops::SET.apply(frame(&["error", "disk full"])).unwrap_err();
    assert!(!err.is_fatal());
    assert!(err.to_string().contains("error"));
    assert!(err.to_string().contains("disk full"));

    assert_bad_response(ops::INCR.apply(frame(&["client_error"])), "incr");
    assert_bad_response(ops::DEL.apply(frame(&["fail", "x"])), "del");
}

#[test]
fn test_empty_frame_is_bad_response() {
    assert_bad_response(ops::GET.apply(Vec::new()), "get");
}

#[test]
fn test_int_decoding() {
    assert_eq!(ops::INCR.apply(frame(&["ok", "42"])).unwrap(), 42);
    assert_eq!(ops::DECR.apply(frame(&["ok", "-3"])).unwrap(), -3);
    assert_bad_response(ops::HSIZE.apply(frame(&["ok", "many"])), "hsize");
}

#[test]
fn test_flag_decoding() {
    assert!(ops::HEXISTS.apply(frame(&["ok", "1"])).unwrap());
    assert!(!ops::HEXISTS.apply(frame(&["ok", "0"])).unwrap());
    assert!(ops::ZEXISTS.apply(frame(&["ok", "1"])).unwrap());
    assert!(!ops::ZEXISTS.apply(frame(&["ok", "2"])).unwrap());
    assert!(!ops::HEXISTS.apply(frame(&["ok", "-1"])).unwrap());
}

#[test]
fn test_queue_push_expects_bare_ok() {
    ops::QPUSH_BACK.apply(frame(&["ok"])).unwrap();
    assert_bad_response(ops::QPUSH_FRONT.apply(frame(&["ok", "3"])), "qpush_front");
}

#[test]
fn test_qfront_has_no_not_found() {
    assert_eq!(ops::QFRONT.apply(frame(&["ok", "head"])).unwrap(), &b"head"[..]);
    assert_bad_response(ops::QFRONT.apply(frame(&["not_found"])), "qfront");
}

// =============================================================================
// Optional Shape Tests
// =============================================================================

#[test]
fn test_get_found_and_not_found() {
    assert_eq!(
        ops::GET.apply(frame(&["ok", "value"])).unwrap(),
        Some(Bytes::from_static(b"value"))
    );
    assert_eq!(ops::GET.apply(frame(&["not_found"])).unwrap(), None);
    assert_eq!(ops::GET.apply(frame(&["not_found", "extra"])).unwrap(), None);
}

#[test]
fn test_get_ok_without_value_is_bad_response() {
    assert_bad_response(ops::GET.apply(frame(&["ok"])), "get");
}

#[test]
fn test_zget_decodes_score() {
    assert_eq!(ops::ZGET.apply(frame(&["ok", "17"])).unwrap(), Some(17));
    assert_eq!(ops::ZGET.apply(frame(&["not_found"])).unwrap(), None);
    assert_bad_response(ops::ZGET.apply(frame(&["ok", "1.5"])), "zget");
}

#[test]
fn test_not_found_only_accepted_for_optional_shape() {
    assert_bad_response(ops::INCR.apply(frame(&["not_found"])), "incr");
    assert_bad_response(ops::SCAN.apply(frame(&["not_found"])), "scan");
}

// =============================================================================
// Pairs And List Shape Tests
// =============================================================================

#[test]
fn test_scan_pairs_keep_order() {
    let pairs = ops::SCAN
        .apply(frame(&["ok", "b", "2", "a", "1"]))
        .unwrap();
    assert_eq!(
        pairs,
        vec![
            (Bytes::from_static(b"b"), Bytes::from_static(b"2")),
            (Bytes::from_static(b"a"), Bytes::from_static(b"1")),
        ]
    );
}

#[test]
fn test_pairs_reject_odd_payload() {
    assert_bad_response(ops::SCAN.apply(frame(&["ok", "a"])), "scan");
    assert_bad_response(ops::MULTI_GET.apply(frame(&["ok", "a", "1", "b"])), "multi_get");
}

#[test]
fn test_empty_pairs_result() {
    assert!(ops::HSCAN.apply(frame(&["ok"])).unwrap().is_empty());
    assert!(ops::MULTI_GET.apply(frame(&["ok"])).unwrap().is_empty());
}

#[test]
fn test_multi_get_builds_map() {
    let map = ops::MULTI_GET
        .apply(frame(&["ok", "k1", "v1", "k2", "v2"]))
        .unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map[&Bytes::from_static(b"k2")], &b"v2"[..]);
}

#[test]
fn test_scored_pairs() {
    let scored = ops::ZRANGE
        .apply(frame(&["ok", "alice", "10", "bob", "-2"]))
        .unwrap();
    assert_eq!(
        scored,
        vec![
            (Bytes::from_static(b"alice"), 10),
            (Bytes::from_static(b"bob"), -2),
        ]
    );
    assert_bad_response(ops::ZSCAN.apply(frame(&["ok", "alice", "ten"])), "zscan");

    let map = ops::MULTI_ZGET.apply(frame(&["ok", "m", "5"])).unwrap();
    assert_eq!(map[&Bytes::from_static(b"m")], 5);
}

#[test]
fn test_list_accepts_any_count() {
    assert!(ops::HLIST.apply(frame(&["ok"])).unwrap().is_empty());
    assert_eq!(ops::QSLICE.apply(frame(&["ok", "a", "b", "c"])).unwrap().len(), 3);
    assert_bad_response(ops::ZKEYS.apply(frame(&["error"])), "zkeys");
}

// =============================================================================
// Table Metadata Tests
// =============================================================================

#[test]
fn test_table_entries() {
    assert_eq!(ops::MULTI_HDEL.name(), "multi_hdel");
    assert_eq!(ops::GET.shape(), Shape::Optional);
    assert_eq!(ops::QPUSH_FRONT.shape(), Shape::Exact(0));
    assert_eq!(ops::ZSCAN.shape(), Shape::Pairs);
    assert_eq!(ops::HKEYS.shape(), Shape::List);
}

#[test]
fn test_operation_request_uses_wire_name() {
    let encoded = ops::QPOP_BACK.request().arg("jobs").encode().unwrap();
    assert_eq!(&encoded[..], b"9\nqpop_back\n4\njobs\n\n");
}

// =============================================================================
// Response View Tests
// =============================================================================

#[test]
fn test_response_splits_status_and_payload() {
    let response = Response::from_blocks(frame(&["ok", "a", "b"])).unwrap();
    assert!(response.is_ok());
    assert_eq!(response.payload, frame(&["a", "b"]));

    let response = Response::from_blocks(frame(&["noauth", "login first"])).unwrap();
    assert!(!response.is_ok());
    assert_eq!(response.status, Status::Other(Bytes::from_static(b"noauth")));
    assert_eq!(response.status.to_string(), "noauth");

    assert!(Response::from_blocks(Vec::new()).is_none());
}

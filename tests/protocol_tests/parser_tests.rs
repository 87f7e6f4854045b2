//! Tests for the frame parser
//!
//! These tests verify:
//! - Complete / Incomplete / Corrupt outcomes
//! - Fragmentation at every byte boundary
//! - Heartbeat lines before a frame
//! - Carriage-return tolerant terminators
//! - Buffer consumption only on success

use bytes::Bytes;
use ssdb::protocol::{encode_frame, parse_frame, ParseOutcome, Request, StreamBuffer, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn buffer_with(bytes: &[u8]) -> StreamBuffer {
    let mut buffer = StreamBuffer::new();
    buffer.extend(bytes);
    buffer
}

fn blocks(items: &[&[u8]]) -> Vec<Bytes> {
    items.iter().map(|b| Bytes::copy_from_slice(b)).collect()
}

/// Feed `data` in the given chunk lengths, parsing after each one
fn feed_in_chunks(data: &[u8], cuts: &[usize]) -> (Vec<ParseOutcome>, StreamBuffer) {
    let mut buffer = StreamBuffer::new();
    let mut outcomes = Vec::new();
    let mut start = 0;
    for &cut in cuts.iter().chain(std::iter::once(&data.len())) {
        buffer.extend(&data[start..cut]);
        outcomes.push(parse_frame(&mut buffer));
        start = cut;
    }
    (outcomes, buffer)
}

// =============================================================================
// Complete Frame Tests
// =============================================================================

#[test]
fn test_parse_ok_response() {
    let mut buffer = buffer_with(b"2\nok\n1\n1\n\n");
    let outcome = parse_frame(&mut buffer);

    assert_eq!(outcome, ParseOutcome::Complete(blocks(&[b"ok", b"1"])));
    assert!(buffer.is_empty());
}

#[test]
fn test_parse_crlf_response() {
    let mut buffer = buffer_with(b"2\r\nok\r\n1\r\n1\r\n\r\n");
    let outcome = parse_frame(&mut buffer);

    assert_eq!(outcome, ParseOutcome::Complete(blocks(&[b"ok", b"1"])));
    assert!(buffer.is_empty());
}

#[test]
fn test_parse_crlf_terminator_only() {
    let mut buffer = buffer_with(b"2\nok\n1\n1\n\r\n");
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"ok", b"1"]))
    );
    assert!(buffer.is_empty());
}

#[test]
fn test_parse_empty_block() {
    let mut buffer = buffer_with(b"2\nok\n0\n\n\n");
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"ok", b""]))
    );
}

#[test]
fn test_parse_binary_block_with_newlines() {
    let mut buffer = buffer_with(b"2\nok\n5\na\n\n\rb\n\n");
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"ok", b"a\n\n\rb"]))
    );
}

#[test]
fn test_parse_leaves_following_bytes() {
    let mut buffer = buffer_with(b"2\nok\n\n9\nnot_found\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Complete(blocks(&[b"ok"])));
    assert_eq!(buffer.as_slice(), b"9\nnot_found\n");
}

#[test]
fn test_parse_two_frames_in_sequence() {
    let mut buffer = buffer_with(b"2\nok\n1\na\n\n9\nnot_found\n\n");
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"ok", b"a"]))
    );
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"not_found"]))
    );
    assert!(buffer.is_empty());
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
}

// =============================================================================
// Heartbeat Tests
// =============================================================================

#[test]
fn test_blank_line_alone_is_not_a_frame() {
    let mut buffer = buffer_with(b"\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_many_heartbeats_are_not_a_frame() {
    let mut buffer = buffer_with(b"\n\r\n\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
}

#[test]
fn test_heartbeats_before_frame_are_skipped() {
    let mut buffer = buffer_with(b"\n\r\n\n2\nok\n\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Complete(blocks(&[b"ok"])));
    assert!(buffer.is_empty());
}

#[test]
fn test_heartbeat_then_partial_frame_consumes_nothing() {
    let mut buffer = buffer_with(b"\n2\no");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
    assert_eq!(buffer.as_slice(), b"\n2\no");

    buffer.extend(b"k\n\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Complete(blocks(&[b"ok"])));
    assert!(buffer.is_empty());
}

// =============================================================================
// Incomplete Tests
// =============================================================================

#[test]
fn test_empty_buffer_is_incomplete() {
    let mut buffer = StreamBuffer::new();
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
}

#[test]
fn test_length_line_without_newline_is_incomplete() {
    let mut buffer = buffer_with(b"12");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
}

#[test]
fn test_missing_terminator_is_incomplete() {
    let mut buffer = buffer_with(b"2\nok\n1\n1\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);
    assert_eq!(buffer.len(), 9);
}

#[test]
fn test_body_without_trailer_byte_is_incomplete() {
    // All five payload bytes are here, the trailing newline is not
    let mut buffer = buffer_with(b"5\nhello");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);

    buffer.extend(b"\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);

    buffer.extend(b"\n");
    assert_eq!(
        parse_frame(&mut buffer),
        ParseOutcome::Complete(blocks(&[b"hello"]))
    );
}

#[test]
fn test_body_with_dangling_carriage_return_is_incomplete() {
    let mut buffer = buffer_with(b"2\r\nok\r");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Incomplete);

    buffer.extend(b"\n\r\n");
    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Complete(blocks(&[b"ok"])));
}

// =============================================================================
// Corrupt Tests
// =============================================================================

#[test]
fn test_non_numeric_length_is_corrupt() {
    let mut buffer = buffer_with(b"abc\nok\n\n");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
    assert_eq!(buffer.as_slice(), b"abc\nok\n\n");
}

#[test]
fn test_negative_length_is_corrupt() {
    let mut buffer = buffer_with(b"-1\n\n");
    match parse_frame(&mut buffer) {
        ParseOutcome::Corrupt(reason) => assert!(reason.contains("negative")),
        other => panic!("Expected corrupt outcome, got {:?}", other),
    }
}

#[test]
fn test_signed_and_spaced_lengths_are_corrupt() {
    for bad in [&b"+2\nok\n\n"[..], b" 2\nok\n\n", b"2 \nok\n\n", b"0x2\nok\n\n"] {
        let mut buffer = buffer_with(bad);
        assert!(
            matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)),
            "{:?} should be corrupt",
            String::from_utf8_lossy(bad)
        );
    }
}

#[test]
fn test_overflowing_length_is_corrupt() {
    let mut buffer = buffer_with(b"99999999999999999999999999\nx\n\n");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
}

#[test]
fn test_corrupt_after_valid_block() {
    let mut buffer = buffer_with(b"2\nok\nzz\n\n");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
    assert_eq!(buffer.len(), 9);
}

#[test]
fn test_wrong_trailer_byte_is_corrupt() {
    let mut buffer = buffer_with(b"2\nokX\n");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));

    let mut buffer = buffer_with(b"2\nok\rX");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
}

#[test]
fn test_corrupt_is_stable_across_retries() {
    let mut buffer = buffer_with(b"nope\n");
    for _ in 0..3 {
        assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
    }
}

// =============================================================================
// Fragmentation Tests
// =============================================================================

#[test]
fn test_every_single_split_point() {
    let data = b"\n2\r\nok\n5\nhello\n3\nfoo\r\n0\n\n\r\n";
    let expected = blocks(&[b"ok", b"hello", b"foo", b""]);

    for cut in 0..data.len() {
        let (outcomes, buffer) = feed_in_chunks(data, &[cut]);
        let (last, earlier) = outcomes.split_last().unwrap();

        for outcome in earlier {
            assert_eq!(*outcome, ParseOutcome::Incomplete, "split at {}", cut);
        }
        assert_eq!(*last, ParseOutcome::Complete(expected.clone()), "split at {}", cut);
        assert!(buffer.is_empty());
    }
}

#[test]
fn test_byte_at_a_time() {
    let data = b"2\nok\n5\nab\ncd\n\n";
    let cuts: Vec<usize> = (1..data.len()).collect();
    let (outcomes, buffer) = feed_in_chunks(data, &cuts);

    let (last, earlier) = outcomes.split_last().unwrap();
    assert!(earlier.iter().all(ParseOutcome::is_incomplete));
    assert_eq!(*last, ParseOutcome::Complete(blocks(&[b"ok", b"ab\ncd"])));
    assert!(buffer.is_empty());
}

#[test]
fn test_large_block_over_three_reads() {
    let payload = vec![b'v'; 10_000];
    let mut data = Vec::new();
    data.extend_from_slice(b"2\nok\n10000\n");
    data.extend_from_slice(&payload);
    data.extend_from_slice(b"\n\n");

    let (outcomes, _) = feed_in_chunks(&data, &[4096, 8192]);

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], ParseOutcome::Incomplete);
    assert_eq!(outcomes[1], ParseOutcome::Incomplete);
    match &outcomes[2] {
        ParseOutcome::Complete(frame) => {
            assert_eq!(frame.len(), 2);
            assert_eq!(frame[0], &b"ok"[..]);
            assert_eq!(frame[1], payload);
        }
        other => panic!("Expected complete frame, got {:?}", other),
    }
}

// =============================================================================
// Request Frames Parsed Back
// =============================================================================

#[test]
fn test_encoded_request_parses_back_to_its_blocks() {
    let request = Request::new("mixed")
        .arg("text")
        .arg(&b"raw\n\r\x00"[..])
        .arg(-12i64)
        .arg(2.5f64)
        .arg(true)
        .arg(false)
        .arg(Value::Null);
    let expected = request.to_blocks().unwrap();

    let mut buffer = StreamBuffer::new();
    buffer.extend(&request.encode().unwrap());

    assert_eq!(parse_frame(&mut buffer), ParseOutcome::Complete(expected));
    assert!(buffer.is_empty());
}

#[test]
fn test_encoded_frame_survives_every_split() {
    let frame_blocks = blocks(&[b"set", b"key", b"line1\nline2"]);
    let data = encode_frame(&frame_blocks);

    for cut in 0..data.len() {
        let (outcomes, _) = feed_in_chunks(&data, &[cut]);
        assert_eq!(
            outcomes.last().unwrap(),
            &ParseOutcome::Complete(frame_blocks.clone())
        );
    }
}

// =============================================================================
// Buffer Tests
// =============================================================================

#[test]
fn test_outcome_predicates() {
    let mut buffer = buffer_with(b"2\nok\n");
    let outcome = parse_frame(&mut buffer);
    assert!(outcome.is_incomplete());
    assert!(!outcome.is_complete());

    buffer.extend(b"\n");
    let outcome = parse_frame(&mut buffer);
    assert!(outcome.is_complete());
    assert!(!outcome.is_incomplete());
}

#[test]
fn test_clear_discards_corrupt_bytes() {
    let mut buffer = buffer_with(b"x\n2\nok\n\n");
    assert!(matches!(parse_frame(&mut buffer), ParseOutcome::Corrupt(_)));
    assert_eq!(buffer.len(), 8);

    buffer.clear();
    assert!(buffer.is_empty());

    buffer.extend(b"2\nok\n\n");
    assert!(parse_frame(&mut buffer).is_complete());
    assert!(buffer.is_empty());
}

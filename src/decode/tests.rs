//! Tests for decode module

use super::*;

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_object() {
    let decoder = JsonDecoder::new();
    let body = r#"{"song_id": "S1", "title": "Midnight"}"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["song_id"], "S1");
}

#[test]
fn test_json_decoder_array() {
    let decoder = JsonDecoder::new();
    let body = r#"[{"song_id": "S1"}, {"song_id": "S2"}, {"song_id": "S3"}]"#;

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["song_id"], "S3");
}

#[test]
fn test_json_decoder_invalid() {
    let decoder = JsonDecoder::new();
    assert!(decoder.decode("not json").is_err());
}

// ============================================================================
// JSONL Decoder Tests
// ============================================================================

#[test]
fn test_jsonl_decoder() {
    let decoder = JsonlDecoder::new();
    let body = "{\"page\": \"NextSong\"}\n\n{\"page\": \"Home\"}\n";

    let records = decoder.decode(body).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["page"], "NextSong");
    assert_eq!(records[1]["page"], "Home");
}

#[test]
fn test_jsonl_decoder_reports_line() {
    let decoder = JsonlDecoder::new();
    let body = "{\"ok\": 1}\nbroken\n";

    let err = decoder.decode(body).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

// ============================================================================
// Auto Detection Tests
// ============================================================================

#[test]
fn test_decode_records_single_object() {
    let records = decode_records(r#"{"title": "Alone"}"#).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_decode_records_array() {
    let records = decode_records(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_decode_records_jsonl_fallback() {
    let body = "{\"ts\": 1}\n{\"ts\": 2}\n{\"ts\": 3}";
    let records = decode_records(body).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["ts"], 2);
}

#[test]
fn test_decode_records_garbage() {
    assert!(decode_records("definitely not json").is_err());
}

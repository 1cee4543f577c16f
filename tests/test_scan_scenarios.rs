//! End-to-end scan scenarios over in-memory buffers.

use serde_json::Value;
use stringer::{scan_buffer, Config, Encodings};

fn ascii_only() -> Encodings {
    Encodings {
        ascii: true,
        utf16le: false,
        utf16be: false,
    }
}

fn utf16le_only() -> Encodings {
    Encodings {
        ascii: false,
        utf16le: true,
        utf16be: false,
    }
}

fn scan_json(data: &[u8], cfg: &Config) -> Vec<Value> {
    let cfg = cfg.clone().with_json(true);
    let out = scan_buffer(data, &cfg, Vec::new()).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}

fn wide(text: &str) -> Vec<u8> {
    text.bytes().flat_map(|b| [b, 0]).collect()
}

#[test]
fn test_two_ascii_runs_split_by_junk_byte() {
    let cfg = Config::new(3)
        .with_encodings(ascii_only())
        .with_threads(1);
    let mut hits = scan_json(b"Hell\x01lehoo", &cfg);
    hits.sort_by_key(|h| h["offset"].as_u64());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["offset"], 0);
    assert_eq!(hits[0]["kind"], "ascii");
    assert_eq!(hits[0]["len"], 4);
    assert_eq!(hits[0]["text"], "Hell");
    assert_eq!(hits[1]["offset"], 5);
    assert_eq!(hits[1]["len"], 5);
    assert_eq!(hits[1]["text"], "lehoo");
}

#[test]
fn test_null_only_drops_unterminated_run() {
    let cfg = Config::new(2)
        .with_encodings(ascii_only())
        .with_null_only(true);
    assert!(scan_json(b"CraK", &cfg).is_empty());

    let hits = scan_json(b"CraK\x00", &cfg);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["text"], "CraK");
    assert_eq!(hits[0]["len"], 4);
}

#[test]
fn test_utf16le_run_detected() {
    let cfg = Config::new(6).with_encodings(utf16le_only());
    let hits = scan_json(&wide("Server"), &cfg);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["offset"], 0);
    assert_eq!(hits[0]["kind"], "utf16le");
    assert_eq!(hits[0]["len"], 6);
    assert_eq!(hits[0]["text"], "Server");
}

#[test]
fn test_utf16le_stray_prefix_byte_suppresses_run() {
    let cfg = Config::new(6).with_encodings(utf16le_only());
    let mut data = vec![0xAA];
    data.extend(wide("Server"));
    assert!(scan_json(&data, &cfg).is_empty());
}

#[test]
fn test_capped_ascii_run_reports_cap() {
    let cfg = Config::new(2)
        .with_encodings(ascii_only())
        .with_cap_run_bytes(5);
    let hits = scan_json(b"AAAAAAAAAAAA", &cfg);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["offset"], 0);
    assert_eq!(hits[0]["len"], 5);
    assert_eq!(hits[0]["text"], "AAAAA");
}

#[test]
fn test_thread_count_does_not_change_hits() {
    let data = b"AAAXXX\x01BBBBB\x00CCCCC\x01DDD";
    let base = Config::new(3).with_encodings(ascii_only());

    let run_with = |threads: usize| {
        let cfg = base.clone().with_threads(threads).with_json(true);
        let out = scan_buffer(data, &cfg, Vec::new()).unwrap();
        let mut lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    };

    let serial = run_with(1);
    let parallel = run_with(2);
    assert_eq!(serial.len(), 4);
    assert_eq!(serial, parallel);
}

#[test]
fn test_utf16be_selected_explicitly() {
    let cfg = Config::new(4).with_encodings(Encodings {
        ascii: false,
        utf16le: false,
        utf16be: true,
    });
    let data: Vec<u8> = "Motd".bytes().flat_map(|b| [0, b]).collect();
    let hits = scan_json(&data, &cfg);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["kind"], "utf16be");
    assert_eq!(hits[0]["text"], "Motd");
}

#[test]
fn test_positional_dedup_only() {
    // The same text at two offsets is reported twice; dedup is positional.
    let cfg = Config::new(4).with_encodings(ascii_only());
    let mut hits = scan_json(b"same\x00same\x00", &cfg);
    hits.sort_by_key(|h| h["offset"].as_u64());
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["offset"], 0);
    assert_eq!(hits[1]["offset"], 5);
    assert_eq!(hits[0]["text"], hits[1]["text"]);
}

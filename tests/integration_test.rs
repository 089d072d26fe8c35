//! Integration tests for ini-seek.

#![allow(clippy::expect_used)]

use ini_seek::{
    CaseSensitivity, Error, ErrorKind, MmapStream, SeekableStream, Session, SessionConfig, Stream,
};
use std::io::Cursor;
use tempfile::TempDir;

const DEVICE_INI: &str = "\
; device configuration
hostname = sensor-01
debug = yes

[network]
# static addressing
ip      = 192.168.0.10   ; lab subnet
mask    = 255.255.255.0
mac     = de:ad:be:ef:00:2a
mtu     = 1500
retries = 0x05

[Logging]
level = 3
ratio = 0.75
path  = /var/log/sensor.log
mtu   = 9000
";

/// Helper to write a document to disk.
fn write_document(contents: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("device.ini");
    std::fs::write(&path, contents).expect("Failed to write document");
    (temp_dir, path)
}

/// Helper to wrap text in an in-memory stream.
fn memory_stream(contents: &str) -> SeekableStream<Cursor<Vec<u8>>> {
    SeekableStream::new(Cursor::new(contents.as_bytes().to_vec())).expect("stream")
}

#[test]
fn test_file_lookup_end_to_end() {
    let (_temp, path) = write_document(DEVICE_INI);
    let mut stream = SeekableStream::open(&path).expect("open failed");
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("network").expect("section");

    let mut ip = [0u8; 4];
    let filled = session
        .locate_key("ip", true)
        .expect("ip")
        .get_numeric_byte_array(&mut ip, ".")
        .expect("ip bytes");
    assert_eq!(filled, 4);
    assert_eq!(ip, [192, 168, 0, 10]);

    let mut mac = [0u8; 6];
    session
        .locate_key("mac", true)
        .expect("mac")
        .get_hex_byte_array(&mut mac, ":")
        .expect("mac bytes");
    assert_eq!(mac, [0xde, 0xad, 0xbe, 0xef, 0x00, 0x2a]);

    let retries = session.locate_key("retries", true).expect("retries").get_u8();
    assert_eq!(retries, Ok(5));

    let mtu = session.locate_key("mtu", true).expect("mtu").get_u16();
    assert_eq!(mtu, Ok(1500));
}

#[test]
fn test_mmap_lookup_end_to_end() {
    let (_temp, path) = write_document(DEVICE_INI);
    let mut stream = MmapStream::open(&path).expect("mmap failed");
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("LOGGING").expect("section");
    let ratio = session.locate_key("ratio", true).expect("ratio").get_f64();
    assert_eq!(ratio, Ok(0.75));

    let path = session
        .locate_key("path", true)
        .expect("path")
        .to_string_lossy();
    assert_eq!(path, "/var/log/sensor.log");
}

#[test]
fn test_sectionless_keys() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("").expect("global section");
    assert_eq!(session.cursor(), 0);
    assert_eq!(
        session.locate_key("hostname", true).expect("hostname").as_str(),
        Ok("sensor-01")
    );
    assert_eq!(
        session.locate_key("debug", true).expect("debug").get_bool(),
        Ok(true)
    );
    // Global keys end at the first header.
    assert!(matches!(
        session.locate_key("mtu", true),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_within_section_ignores_later_duplicate() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("network").expect("section");
    assert!(session.locate_key("level", true).is_err());
    assert_eq!(
        session.locate_key("level", false).expect("global scan").get_i32(),
        Ok(3)
    );

    session.locate_section("logging").expect("section");
    assert_eq!(session.locate_key("mtu", true).expect("mtu").get_u32(), Ok(9000));
}

#[test]
fn test_case_policies() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);
    assert!(session.locate_section("NETWORK").is_ok());

    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Sensitive);
    assert!(session.locate_section("NETWORK").is_err());
    assert!(session.locate_section("Logging").is_ok());
    assert!(session.locate_key("LEVEL", true).is_err());
    assert!(session.locate_key("level", true).is_ok());
}

#[test]
fn test_conversion_failure_does_not_block_search() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("network").expect("section");
    let err = session.locate_key("mtu", true).expect("mtu").get_i8();
    assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::ValueTruncated));

    let mask = session.locate_key("mask", true).expect("mask");
    let mut bytes = [0u8; 4];
    assert_eq!(mask.get_numeric_byte_array(&mut bytes, "."), Ok(4));
    assert_eq!(session.last_error(), ErrorKind::NoError);
}

#[test]
fn test_small_buffer_is_fatal() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 16];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    let err = session.locate_section("logging").expect_err("line too long");
    assert!(err.is_fatal());
    assert_eq!(session.last_error(), ErrorKind::BufferTooSmall);
    // The key search refuses to run on top of the failed section lookup.
    assert_eq!(
        session.locate_key("level", true).map(|v| v.len()),
        Err(err)
    );
    assert!(session.validate().is_err());
}

#[test]
fn test_closed_stream_reports_not_open() {
    let mut stream = memory_stream(DEVICE_INI);
    stream.close();
    assert!(!stream.is_open());

    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);
    assert_eq!(session.locate_section("network"), Err(Error::NotOpen));
    assert_eq!(session.last_error(), ErrorKind::NotOpen);
}

#[test]
fn test_final_line_fills_buffer() {
    // "k=1234567" is nine bytes, exactly the buffer, with no newline after it.
    let mut stream = memory_stream("[s]\nk=1234567");
    let mut buffer = [0u8; 9];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("s").expect("section");
    assert_eq!(
        session.locate_key("k", true).expect("key").get_u32(),
        Ok(1_234_567)
    );
    assert!(session.validate().is_ok());
}

#[test]
fn test_mixed_line_endings() {
    let mut stream = memory_stream("[a]\r\nx = 1\n\r[b]\ry = 2\r\n");
    let mut buffer = [0u8; 16];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("b").expect("section");
    assert_eq!(session.locate_key("y", true).expect("y").get_i64(), Ok(2));
    session.locate_section("a").expect("section");
    assert_eq!(session.locate_key("x", true).expect("x").get_i64(), Ok(1));
    assert!(session.locate_key("y", true).is_err());
}

/// Stream that returns at most three bytes per read.
struct TrickleStream {
    data: Vec<u8>,
    pos: usize,
}

impl Stream for TrickleStream {
    fn seek_to(&mut self, offset: u64) -> ini_seek::Result<()> {
        self.pos = usize::try_from(offset).expect("offset").min(self.data.len());
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> ini_seek::Result<usize> {
        let n = buf.len().min(3).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn has_remaining(&mut self) -> ini_seek::Result<bool> {
        Ok(self.pos < self.data.len())
    }
}

#[test]
fn test_lookup_over_short_reads() {
    let mut stream = TrickleStream {
        data: b"[net]\nport=80\n[dns]\nserver = 10.0.0.53".to_vec(),
        pos: 0,
    };
    let mut buffer = [0u8; 32];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

    session.locate_section("net").expect("net");
    assert_eq!(session.locate_key("port", true).expect("port").get_u16(), Ok(80));

    session.locate_section("dns").expect("dns");
    let mut server = [0u8; 4];
    let filled = session
        .locate_key("server", true)
        .expect("server")
        .get_numeric_byte_array(&mut server, ".")
        .expect("bytes");
    assert_eq!(filled, 4);
    assert_eq!(server, [10, 0, 0, 53]);
    assert!(session.validate().is_ok());
}

#[test]
fn test_error_kind_json_round_trip() {
    let mut stream = memory_stream(DEVICE_INI);
    let mut buffer = [0u8; 64];
    let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);
    assert!(session.locate_section("missing").is_err());

    let json = serde_json::to_string(&session.last_error()).expect("serialize");
    assert_eq!(json, r#""section_not_found""#);
    let kind: ErrorKind = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(kind, ErrorKind::SectionNotFound);

    let kind: ErrorKind = serde_json::from_str(r#""no_error""#).expect("deserialize");
    assert_eq!(kind, ErrorKind::default());
}

#[test]
fn test_config_from_json() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"case_sensitivity": "sensitive", "buffer_capacity": 48}"#)
            .expect("config");
    assert_eq!(config.case_sensitivity, CaseSensitivity::Sensitive);

    let mut buffer = config.allocate_buffer().expect("buffer");
    let mut stream = memory_stream(DEVICE_INI);
    let mut session = Session::with_config(&mut stream, &mut buffer, &config);
    assert!(session.locate_section("network").is_ok());
    assert!(session.locate_section("Network").is_err());
}

#[test]
fn test_config_defaults_from_empty_json() {
    let config: SessionConfig = serde_json::from_str("{}").expect("config");
    assert_eq!(config, SessionConfig::default());
}

mod property_tests {
    use super::memory_stream;
    use ini_seek::{CaseSensitivity, Error, Session, Value};
    use proptest::prelude::*;
    use std::fmt::Write;

    /// Sections of distinct lowercase keys with alphanumeric values.
    fn arb_sections() -> impl Strategy<Value = Vec<(String, Vec<(String, String)>)>> {
        prop::collection::btree_map(
            "[a-z]{1,8}",
            prop::collection::btree_map("[a-z]{1,8}", "[A-Za-z0-9.]{0,12}", 1..6),
            1..5,
        )
        .prop_map(|map| {
            map.into_iter()
                .map(|(name, keys)| (name, keys.into_iter().collect()))
                .collect()
        })
    }

    fn render(sections: &[(String, Vec<(String, String)>)]) -> String {
        let mut text = String::new();
        for (name, keys) in sections {
            let _ = writeln!(text, "[{name}]");
            for (i, (key, value)) in keys.iter().enumerate() {
                if i % 2 == 0 {
                    text.push_str("; interleaved comment\n\n");
                }
                let _ = writeln!(text, "  {key} =  {value}  # trailing");
            }
        }
        text
    }

    proptest! {
        #[test]
        fn every_key_is_found_in_its_section(sections in arb_sections()) {
            let text = render(&sections);
            let mut stream = memory_stream(&text);
            let mut buffer = [0u8; 64];
            let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Sensitive);

            for (name, keys) in &sections {
                prop_assert!(session.locate_section(name).is_ok());
                for (key, value) in keys {
                    let found = session.locate_key(key, true).map(|v| v.to_string_lossy());
                    prop_assert_eq!(found, Ok(value.clone()));
                }
            }
        }

        #[test]
        fn within_section_never_leaks_later_keys(sections in arb_sections()) {
            let text = render(&sections);
            let mut stream = memory_stream(&text);
            let mut buffer = [0u8; 64];
            let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Sensitive);

            for (index, (name, keys)) in sections.iter().enumerate() {
                for (_, later_keys) in &sections[index + 1..] {
                    for (key, _) in later_keys {
                        if keys.iter().any(|(k, _)| k == key) {
                            continue;
                        }
                        prop_assert!(session.locate_section(name).is_ok());
                        let is_not_found = matches!(
                            session.locate_key(key, true),
                            Err(Error::KeyNotFound { .. })
                        );
                        prop_assert!(is_not_found);
                    }
                }
            }
        }

        #[test]
        fn u8_narrowing_matches_width(n in any::<u64>()) {
            let text = n.to_string();
            let result = Value::new(text.as_bytes()).get_u8();
            if n <= u64::from(u8::MAX) {
                prop_assert_eq!(result, Ok(u8::try_from(n).unwrap_or_default()));
            } else {
                let is_truncated = matches!(
                    result,
                    Err(Error::ValueTruncated { narrowed, .. }) if narrowed == i128::from(n % 256)
                );
                prop_assert!(is_truncated);
            }
        }

        #[test]
        fn unterminated_last_line_is_read_whole(value in "[a-z0-9]{1,40}") {
            let line = format!("k={value}");
            let text = format!("[s]\n{line}");
            let mut stream = memory_stream(&text);
            let mut buffer = vec![0u8; line.len().max(4)];
            let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);

            prop_assert!(session.locate_section("s").is_ok());
            let found = session.locate_key("k", true).map(|v| v.to_string_lossy());
            prop_assert_eq!(found, Ok(value));
        }
    }
}

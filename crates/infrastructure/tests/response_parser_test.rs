use hickory_proto::op::ResponseCode;
use mailauth_domain::{MxRecord, RecordType};
use mailauth_infrastructure::dns::forwarding::{MessageBuilder, ResponseParser};

mod helpers;
use helpers::{MockRecord, MockZone};

fn answer(zone: &MockZone, name: &str, record_type: RecordType) -> Vec<u8> {
    let query = MessageBuilder::build_query(name, &record_type).unwrap();
    zone.respond(&query, false).unwrap()
}

// ============================================================================
// Answer Decoding Tests
// ============================================================================

#[test]
fn test_parse_txt_keeps_segments_per_record() {
    let zone = MockZone::new()
        .with_record("example.com", MockRecord::txt(&["v=spf1 include:a.example", "~all"]))
        .with_record("example.com", MockRecord::txt(&["site-verification=abc"]));

    let response = ResponseParser::parse(&answer(&zone, "example.com", RecordType::TXT)).unwrap();

    assert_eq!(response.rcode, ResponseCode::NoError);
    assert_eq!(
        response.txt,
        vec![
            vec!["v=spf1 include:a.example".to_string(), "~all".to_string()],
            vec!["site-verification=abc".to_string()],
        ]
    );
    assert!(response.mx.is_empty());
    assert!(!response.is_nodata());
}

#[test]
fn test_parse_mx_strips_root_dot() {
    let zone = MockZone::new()
        .with_record("example.com", MockRecord::mx(10, "mx1.example.com"))
        .with_record("example.com", MockRecord::mx(20, "mx2.example.com"));

    let response = ResponseParser::parse(&answer(&zone, "example.com", RecordType::MX)).unwrap();

    assert_eq!(
        response.mx,
        vec![MxRecord::new(10, "mx1.example.com"), MxRecord::new(20, "mx2.example.com")]
    );
}

#[test]
fn test_parse_cname() {
    let zone = MockZone::new().with_record("www.example.com", MockRecord::cname("example.net"));

    let response =
        ResponseParser::parse(&answer(&zone, "www.example.com", RecordType::CNAME)).unwrap();

    assert_eq!(response.cname, vec!["example.net"]);
}

// ============================================================================
// Response Code Tests
// ============================================================================

#[test]
fn test_parse_nxdomain() {
    let response =
        ResponseParser::parse(&answer(&MockZone::new(), "missing.example", RecordType::TXT))
            .unwrap();

    assert!(response.is_nxdomain());
    assert!(!response.is_server_error());
}

#[test]
fn test_parse_nodata() {
    let zone = MockZone::new().with_record("example.com", MockRecord::mx(10, "mx.example.com"));

    let response = ResponseParser::parse(&answer(&zone, "example.com", RecordType::TXT)).unwrap();

    assert!(response.is_nodata());
    assert!(!response.is_nxdomain());
}

#[test]
fn test_parse_servfail() {
    let zone = MockZone::new().servfail();

    let response = ResponseParser::parse(&answer(&zone, "example.com", RecordType::TXT)).unwrap();

    assert!(response.is_server_error());
    assert_eq!(ResponseParser::rcode_to_status(response.rcode), "SERVFAIL");
}

#[test]
fn test_parse_truncated_flag() {
    let zone = MockZone::new()
        .with_record("example.com", MockRecord::txt(&["v=spf1 -all"]))
        .truncate_udp();

    let response = ResponseParser::parse(&answer(&zone, "example.com", RecordType::TXT)).unwrap();

    assert!(response.truncated);
    assert!(response.txt.is_empty());
}

#[test]
fn test_parse_id_matches_query() {
    let zone = MockZone::new();
    let (id, query) = MessageBuilder::build_query_with_id("example.com", &RecordType::TXT).unwrap();

    let response = ResponseParser::parse(&zone.respond(&query, false).unwrap()).unwrap();

    assert_eq!(response.id, id);
}

#[test]
fn test_parse_garbage_is_an_error() {
    assert!(ResponseParser::parse(&[0x12, 0x34, 0x81]).is_err());
}

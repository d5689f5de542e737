use std::net::{Ipv4Addr, SocketAddrV4};

use super::http::build_announce_url;
use super::*;
use crate::metainfo::InfoHash;
use crate::peer::PeerId;

#[test]
fn parse_compact_peer_list() {
    let data = [
        192, 168, 1, 1, 0x1a, 0xe1, // 192.168.1.1:6881
        10, 0, 0, 1, 0x00, 0x50, // 10.0.0.1:80
    ];

    let peers = parse_compact_peers(&data).unwrap();
    assert_eq!(
        peers,
        vec![
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 1), 6881),
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 80),
        ]
    );
}

#[test]
fn compact_peers_length_must_divide_by_six() {
    assert!(parse_compact_peers(&[1, 2, 3, 4, 5]).is_err());
    assert!(parse_compact_peers(&[]).unwrap().is_empty());
}

#[test]
fn parse_announce_body() {
    // d8:intervali1800e5:peers6:<1 compact peer>e
    let mut body = b"d8:intervali1800e5:peers6:".to_vec();
    body.extend_from_slice(&[127, 0, 0, 1, 0x1a, 0xe1]);
    body.push(b'e');

    let response = parse_announce_response(&body).unwrap();
    assert_eq!(response.interval, 1800);
    assert_eq!(
        response.peers,
        vec![SocketAddrV4::new(Ipv4Addr::LOCALHOST, 6881)]
    );
}

#[test]
fn parse_announce_failure_reason() {
    let body = b"d14:failure reason13:not authorizede";
    assert!(matches!(
        parse_announce_response(body),
        Err(TrackerError::Failure(reason)) if reason == "not authorized"
    ));
}

#[test]
fn parse_announce_requires_interval_and_peers() {
    assert!(matches!(
        parse_announce_response(b"d5:peers0:e"),
        Err(TrackerError::InvalidResponse(_))
    ));
    assert!(matches!(
        parse_announce_response(b"d8:intervali60ee"),
        Err(TrackerError::InvalidResponse(_))
    ));
    assert!(matches!(
        parse_announce_response(b"i42e"),
        Err(TrackerError::InvalidResponse(_))
    ));
    assert!(matches!(
        parse_announce_response(b"garbage"),
        Err(TrackerError::Bencode(_))
    ));
}

#[test]
fn announce_url_percent_encodes_raw_hash() {
    let info_hash = InfoHash::from_bytes(&[
        0x00, 0x01, 0x7f, 0x80, 0xff, b'a', b'z', b'0', b'9', b'-', 0x20, 0x2f, 0x3a, 0x3f, 0x25,
        0x10, 0x11, 0x12, 0x13, 0x14,
    ])
    .unwrap();
    let peer_id = PeerId::generate();

    let url = build_announce_url(
        "http://tracker.example/announce",
        &info_hash,
        &peer_id,
        6881,
        0,
        0,
        92063,
    );

    assert!(url.starts_with("http://tracker.example/announce?info_hash=%00%01%7f%80%ff"));
    assert!(url.contains("&port=6881"));
    assert!(url.contains("&uploaded=0"));
    assert!(url.contains("&downloaded=0"));
    assert!(url.contains("&left=92063"));
    assert!(url.ends_with("&compact=1"));
}

#[test]
fn announce_url_appends_to_existing_query() {
    let info_hash = InfoHash::from_bytes(&[0u8; 20]).unwrap();
    let url = build_announce_url(
        "http://t.example/announce?key=abc",
        &info_hash,
        &PeerId::generate(),
        6881,
        0,
        0,
        1,
    );
    assert!(url.starts_with("http://t.example/announce?key=abc&info_hash="));
}

#[test]
fn rejects_non_http_announce() {
    assert!(matches!(
        HttpTracker::new("udp://tracker.example:80"),
        Err(TrackerError::InvalidUrl(_))
    ));
    let tracker = HttpTracker::new("http://tracker.example/announce").unwrap();
    assert_eq!(tracker.url(), "http://tracker.example/announce");
}

//! Decoding of complete BMP v1 streams through the public API.
use std::collections::BTreeMap;
use std::io::Cursor;
use std::net::IpAddr;
use std::str::FromStr;

use bmp_decoder::models::*;
use bmp_decoder::{BmpMsgType, BmpParser, MessageBody, ParserBmpError, PeerDownReason, StatType};

mod common;
use common::*;

fn ip(s: &str) -> IpAddr {
    IpAddr::from_str(s).unwrap()
}

/// UPDATE announcing 203.0.113.0/24 with ORIGIN, AS_PATH [65003 65010], NEXT_HOP and a community.
fn update_body() -> Vec<u8> {
    let attrs: Vec<u8> = [
        vec![0x40, 1, 1, 0],
        vec![0x40, 2, 10, 2, 2, 0, 0, 0xfd, 0xeb, 0, 0, 0xfd, 0xf2],
        vec![0x40, 3, 4, 192, 0, 2, 254],
        vec![0xc0, 8, 4, 0xfd, 0xeb, 0, 100],
    ]
    .concat();
    let mut body = vec![0, 0];
    body.extend((attrs.len() as u16).to_be_bytes());
    body.extend(attrs);
    body.extend([24, 203, 0, 113]);
    body
}

#[test]
fn test_mixed_stream() {
    let _ = env_logger::try_init();
    let mut stream = vec![];
    stream.extend(stats_report(ip("192.0.2.1"), &[(0, 5), (1, 7)]));
    stream.extend(route_monitoring(ip("2001:db8::1"), &update_body()));
    stream.extend(peer_down(ip("192.0.2.2"), 3, Some([6, 4])));
    stream.extend(peer_down(ip("192.0.2.3"), 2, None));

    let messages = BmpParser::new(Cursor::new(stream))
        .into_iter()
        .collect::<Vec<_>>();
    assert_eq!(messages.len(), 4);
    assert!(messages.iter().all(|m| m.is_done()));

    let types = messages
        .iter()
        .map(|m| m.header().unwrap().msg_type)
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            BmpMsgType::StatisticsReport,
            BmpMsgType::RouteMonitoring,
            BmpMsgType::PeerDownNotification,
            BmpMsgType::PeerDownNotification
        ]
    );

    match messages[0].body() {
        Some(MessageBody::StatsReport(report)) => assert_eq!(
            report.statistics,
            BTreeMap::from([
                (StatType::PrefixesRejected, 5),
                (StatType::DuplicatePrefixAdvertisements, 7)
            ])
        ),
        body => panic!("unexpected body {:?}", body),
    }

    let rm_header = messages[1].header().unwrap();
    assert_eq!(rm_header.peer_ip, ip("2001:db8::1"));
    assert_eq!(rm_header.afi(), Afi::Ipv6);
    match messages[1].body() {
        Some(MessageBody::RouteMonitoring(rm)) => {
            assert_eq!(
                rm.update.as_path(),
                Some(AsPath::from_sequence([65003, 65010]))
            );
            assert_eq!(
                rm.update.get_attr(AttrType::NEXT_HOP),
                Some(&AttributeValue::NextHop(ip("192.0.2.254")))
            );
            assert_eq!(
                rm.update.get_attr(AttrType::COMMUNITIES),
                Some(&AttributeValue::Communities(vec![Community::Custom(
                    Asn::new_32bit(65003),
                    100
                )]))
            );
            assert_eq!(
                rm.update.announced_prefixes,
                vec![NetworkPrefix::from_str("203.0.113.0/24").unwrap()]
            );
        }
        body => panic!("unexpected body {:?}", body),
    }

    match messages[2].body() {
        Some(MessageBody::PeerDownNotification(pd)) => {
            assert_eq!(pd.reason, PeerDownReason::RemoteNotification);
            let n = pd.notification.as_ref().unwrap();
            assert_eq!(n.error, BgpError::Cease(CeaseSubcode::AdministrativeReset));
        }
        body => panic!("unexpected body {:?}", body),
    }

    match messages[3].body() {
        Some(MessageBody::PeerDownNotification(pd)) => {
            assert_eq!(pd.reason, PeerDownReason::LocalNoNotification);
            assert!(pd.notification.is_none());
        }
        body => panic!("unexpected body {:?}", body),
    }
}

#[test]
fn test_raw_bytes_preserved() {
    let raw = stats_report(ip("192.0.2.1"), &[(4, 1)]);
    let mut parser = BmpParser::new(Cursor::new(raw.clone()));
    let msg = parser.next_message().unwrap().unwrap();
    assert_eq!([msg.raw_header(), msg.raw_payload()].concat(), raw);
    assert!(parser.next_message().unwrap().is_none());
}

#[test]
fn test_empty_stream() {
    let mut parser = BmpParser::new(Cursor::new(Vec::<u8>::new()));
    assert!(parser.next_message().unwrap().is_none());
    assert_eq!(
        BmpParser::new(Cursor::new(Vec::<u8>::new()))
            .into_iter()
            .count(),
        0
    );
}

#[test]
fn test_truncated_header() {
    let raw = stats_report(ip("192.0.2.1"), &[]);
    let mut parser = BmpParser::new(Cursor::new(raw[..20].to_vec()));
    assert!(matches!(
        parser.next_message(),
        Err(ParserBmpError::TruncatedMessage {
            expected: 44,
            read: 20
        })
    ));
}

#[test]
fn test_stream_stops_after_bad_message() {
    let mut stream = peer_down(ip("192.0.2.1"), 4, None);
    // statistics element with an unknown type
    stream.extend(stats_report(ip("192.0.2.1"), &[(42, 1)]));
    stream.extend(peer_down(ip("192.0.2.1"), 4, None));

    let results = BmpParser::new(Cursor::new(stream))
        .disable_warnings()
        .into_fallible_message_iter()
        .collect::<Vec<_>>();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(ParserBmpError::UnknownStatType(42))
    ));
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut stream = peer_down(ip("192.0.2.1"), 1, Some([4, 0]));
    stream.extend(stats_report(ip("192.0.2.1"), &[]));
    std::io::Write::write_all(&mut file, &stream).unwrap();

    let parser = BmpParser::from_path(file.path().to_str().unwrap()).unwrap();
    let messages = parser.into_iter().collect::<Vec<_>>();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0].to_string(),
        "BMP version 1 message of type Peer Down Notification"
    );
}

#[test]
fn test_peer_down_from_hex() {
    let input = "01020000\
                 0000000000000000\
                 000000000000000000000000c0000201\
                 0000fde9\
                 0a000001\
                 6553f100\
                 00000000\
                 01\
                 0602";
    let decoded = hex::decode(input).unwrap();
    let msg = BmpParser::new(Cursor::new(decoded))
        .into_iter()
        .next()
        .unwrap();

    let (header, body) = msg.into_parts().unwrap();
    assert_eq!(header.peer_ip, ip("192.0.2.1"));
    assert_eq!(header.peer_asn, 65001u32);
    assert_eq!(header.peer_bgp_id, std::net::Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(header.timestamp, 1_700_000_000.0);
    match body {
        MessageBody::PeerDownNotification(pd) => {
            assert_eq!(pd.reason, PeerDownReason::LocalNotification);
            assert_eq!(
                pd.notification.unwrap().error,
                BgpError::Cease(CeaseSubcode::AdministrativeShutdown)
            );
        }
        body => panic!("unexpected body {:?}", body),
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_json_output() {
    let mut stream = vec![];
    stream.extend(stats_report(ip("192.0.2.1"), &[(0, 5), (4, 2)]));
    stream.extend(route_monitoring(ip("2001:db8::1"), &update_body()));

    let values = BmpParser::new(Cursor::new(stream))
        .into_iter()
        .map(|msg| {
            let (header, body) = msg.into_parts().unwrap();
            serde_json::json!({"header": header, "body": body})
        })
        .collect::<Vec<_>>();
    assert_eq!(values.len(), 2);

    let stats = &values[0];
    assert_eq!(stats["header"]["version"], 1);
    assert_eq!(stats["header"]["peer_ip"], "192.0.2.1");
    assert_eq!(stats["header"]["peer_asn"], 65001);
    assert_eq!(stats["header"]["timestamp"], 1_700_000_000.0);
    let report = &stats["body"]["StatsReport"];
    assert_eq!(report["stats_count"], 2);
    assert_eq!(report["statistics"]["PrefixesRejected"], 5);
    assert_eq!(report["statistics"]["AsPathLoop"], 2);

    let rm = &values[1];
    assert_eq!(rm["header"]["peer_ip"], "2001:db8::1");
    assert_eq!(rm["header"]["peer_asn"], 65003);
    assert_eq!(rm["body"]["RouteMonitoring"]["bgp_type"], 2);
    assert!(rm["body"]["RouteMonitoring"]["update"].is_object());
}

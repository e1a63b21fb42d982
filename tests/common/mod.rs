//! Builders for raw BMP v1 messages shared by the integration tests.
#![allow(dead_code)]

use std::net::IpAddr;

pub fn common_header(msg_type: u8, peer_ip: IpAddr, peer_asn: u32, secs: u32) -> Vec<u8> {
    let mut data = vec![1, msg_type, 0];
    match peer_ip {
        IpAddr::V4(v4) => {
            data.push(0);
            data.extend([0u8; 8]);
            data.extend([0u8; 12]);
            data.extend(v4.octets());
        }
        IpAddr::V6(v6) => {
            data.push(0x80);
            data.extend([0u8; 8]);
            data.extend(v6.octets());
        }
    }
    data.extend(peer_asn.to_be_bytes());
    data.extend([10, 0, 0, 1]);
    data.extend(secs.to_be_bytes());
    data.extend(0u32.to_be_bytes());
    data
}

pub fn stats_report(peer_ip: IpAddr, elements: &[(u16, u32)]) -> Vec<u8> {
    let mut data = common_header(1, peer_ip, 65001, 1_700_000_000);
    data.extend((elements.len() as u32).to_be_bytes());
    for (stat_type, value) in elements {
        data.extend(stat_type.to_be_bytes());
        data.extend(4u16.to_be_bytes());
        data.extend(value.to_be_bytes());
    }
    data
}

pub fn peer_down(peer_ip: IpAddr, reason: u8, notification: Option<[u8; 2]>) -> Vec<u8> {
    let mut data = common_header(2, peer_ip, 65002, 1_700_000_001);
    data.push(reason);
    if let Some(n) = notification {
        data.extend(n);
    }
    data
}

pub fn route_monitoring(peer_ip: IpAddr, update_body: &[u8]) -> Vec<u8> {
    let mut data = common_header(0, peer_ip, 65003, 1_700_000_002);
    data.extend([0xff; 16]);
    data.extend(((update_body.len() + 19) as u16).to_be_bytes());
    data.push(2);
    data.extend(update_body);
    data
}

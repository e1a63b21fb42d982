use crate::models::*;
use crate::parser::bmp::error::ParserBmpError;
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes};
use chrono::{DateTime, Local, TimeDelta, Utc};
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};

/// Version of the protocol this decoder understands.
pub const BMP_VERSION: u8 = 1;

/// The length of the fixed header part of a BMP message.
pub const BMP_HEADER_LEN: usize = 44;

/// Peer flag: the peer address is an IPv6 address.
pub const PEER_FLAG_IPV6: u8 = 0x80;

/// BMP message type enum.
///
/// ```text
///    o  Message Type (1 byte): This identifies the type of the BMP
///       message.
///
///       *  Type = 0: Route Monitoring
///       *  Type = 1: Statistics Report
///       *  Type = 2: Peer Down Notification
/// ```
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BmpMsgType {
    RouteMonitoring = 0,
    StatisticsReport = 1,
    PeerDownNotification = 2,
}

impl BmpMsgType {
    pub const fn description(&self) -> &'static str {
        match self {
            BmpMsgType::RouteMonitoring => "Route Monitoring",
            BmpMsgType::StatisticsReport => "Statistics Report",
            BmpMsgType::PeerDownNotification => "Peer Down Notification",
        }
    }
}

impl Display for BmpMsgType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Type of the monitored peer.
#[derive(Debug, FromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PeerType {
    Global = 0,
    L3Vpn = 1,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl PeerType {
    pub const fn description(&self) -> &'static str {
        match self {
            PeerType::Global => "Global",
            PeerType::L3Vpn => "L3 VPN",
            PeerType::Unknown(_) => "Unknown",
        }
    }
}

impl Display for PeerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// BMP v1 common header, 44 bytes.
///
/// ```text
///       0                   1                   2                   3
///       0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |    Version    |   Msg. Type   |   Peer Type   |  Peer Flags   |
///      +---------------+---------------+---------------+---------------+
///      |                 Peer Distinguisher (64 bits)                  |
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |                 Peer Address (16 bytes)                       |
///      ~                                                               ~
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |                           Peer AS                             |
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |                         Peer BGP ID                           |
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |                    Timestamp (seconds)                        |
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///      |                  Timestamp (microseconds)                     |
///      +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// An IPv4 peer address occupies the last 4 bytes of the 16-byte field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BmpCommonHeader {
    pub version: u8,
    pub msg_type: BmpMsgType,
    pub peer_type: PeerType,
    pub peer_flags: u8,
    pub peer_distinguisher: u64,
    pub peer_ip: IpAddr,
    pub peer_asn: Asn,
    pub peer_bgp_id: Ipv4Addr,
    /// Seconds since the epoch, with the microseconds as fraction.
    pub timestamp: f64,
    pub time: DateTime<Local>,
}

impl BmpCommonHeader {
    pub fn afi(&self) -> Afi {
        Afi::from(self.peer_ip)
    }
}

/// Parse the 44-byte common header.
///
/// The version is checked before anything else so that a message from an unsupported
/// protocol version never gets past the header.
pub fn parse_bmp_common_header(mut data: Bytes) -> Result<BmpCommonHeader, ParserBmpError> {
    data.has_n_remaining(BMP_HEADER_LEN)?;

    let version = data.read_u8()?;
    if version != BMP_VERSION {
        return Err(ParserBmpError::UnsupportedVersion(version));
    }

    let msg_type_raw = data.read_u8()?;
    let msg_type = BmpMsgType::try_from(msg_type_raw)
        .map_err(|_| ParserBmpError::UnknownMessageType(msg_type_raw))?;
    let peer_type = PeerType::from(data.read_u8()?);
    let peer_flags = data.read_u8()?;
    let peer_distinguisher = data.read_u64()?;

    let peer_ip: IpAddr = if peer_flags & PEER_FLAG_IPV6 > 0 {
        data.read_ipv6_address()?.into()
    } else {
        data.advance(12);
        data.read_ipv4_address()?.into()
    };

    let peer_asn = Asn::new_32bit(data.read_u32()?);
    let peer_bgp_id = data.read_ipv4_address()?;

    let t_sec = data.read_u32()?;
    let t_usec = data.read_u32()?;
    let timestamp = t_sec as f64 + (t_usec as f64) / 1_000_000.0;
    let time = local_time(t_sec, t_usec);

    Ok(BmpCommonHeader {
        version,
        msg_type,
        peer_type,
        peer_flags,
        peer_distinguisher,
        peer_ip,
        peer_asn,
        peer_bgp_id,
        timestamp,
        time,
    })
}

/// `seconds + microseconds * 1e-6` as local calendar time. Microsecond values of a second or
/// more carry over into the seconds.
///
/// Two `u32` fields stay far inside chrono's range, so the conversion cannot fail.
fn local_time(secs: u32, micros: u32) -> DateTime<Local> {
    let total_micros = secs as i64 * 1_000_000 + micros as i64;
    (DateTime::<Utc>::UNIX_EPOCH + TimeDelta::microseconds(total_micros)).with_timezone(&Local)
}

use crate::models::*;
use crate::parser::bmp::error::ParserBmpError;
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes};
use log::warn;

/// Fixed header of the BGP message embedded in a route monitoring message.
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpHeader {
    pub marker: [u8; 16],
    /// Total length of the BGP message, header included.
    pub length: u16,
    pub msg_type: u8,
}

impl BgpHeader {
    /// Number of bytes following the header. Zero for lengths that cannot hold a header.
    pub fn body_len(&self) -> usize {
        (self.length as usize).saturating_sub(BGP_HEADER_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteMonitoring {
    /// The 16-byte marker (authentication) field of the BGP header.
    pub bgp_auth: [u8; 16],
    pub bgp_type: u8,
    pub update: BgpUpdateMessage,
}

/// Parse the 19-byte BGP header.
///
/// A length below 19 cannot describe a BGP message and is rejected. The type is not
/// enforced; anything other than UPDATE is logged and then decoded as an UPDATE body.
pub fn parse_bgp_header(mut data: Bytes) -> Result<BgpHeader, ParserBmpError> {
    data.has_n_remaining(BGP_HEADER_LEN)?;
    let mut marker = [0u8; 16];
    data.copy_to_slice(&mut marker);
    let length = data.read_u16()?;
    if (length as usize) < BGP_HEADER_LEN {
        return Err(ParserBmpError::InvalidBgpLength(length));
    }
    let msg_type = data.read_u8()?;
    if BgpMessageType::try_from(msg_type) != Ok(BgpMessageType::Update) {
        warn!(
            "route monitoring message carries BGP message type {} instead of UPDATE",
            msg_type
        );
    }
    Ok(BgpHeader {
        marker,
        length,
        msg_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(length: u16, msg_type: u8) -> Bytes {
        let mut data = vec![0xff; 16];
        data.extend(length.to_be_bytes());
        data.push(msg_type);
        Bytes::from(data)
    }

    #[test]
    fn test_parse_bgp_header() {
        let header = parse_bgp_header(header_bytes(23, 2)).unwrap();
        assert_eq!(header.marker, [0xff; 16]);
        assert_eq!(header.length, 23);
        assert_eq!(header.msg_type, 2);
        assert_eq!(header.body_len(), 4);

        // non-UPDATE types are let through
        assert_eq!(parse_bgp_header(header_bytes(21, 3)).unwrap().body_len(), 2);
    }

    #[test]
    fn test_parse_bgp_header_too_short() {
        assert!(matches!(
            parse_bgp_header(header_bytes(18, 2)),
            Err(ParserBmpError::InvalidBgpLength(18))
        ));
        assert_eq!(parse_bgp_header(header_bytes(19, 2)).unwrap().body_len(), 0);
    }

    #[test]
    fn test_body_len_of_short_header() {
        let header = BgpHeader {
            marker: [0; 16],
            length: 5,
            msg_type: 2,
        };
        assert_eq!(header.body_len(), 0);
    }
}

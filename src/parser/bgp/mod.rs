/*!
BGP message decoding used for the BGP PDUs embedded in BMP messages.

The BMP decoder only talks to this module through the [BgpDecoder] trait so that a different
BGP implementation can be plugged in.
*/
pub mod attributes;
pub mod messages;

pub use messages::{parse_bgp_notification_message, parse_bgp_update_message};

use crate::error::ParserError;
use crate::models::{AsnLength, BgpNotificationMessage, BgpUpdateMessage};
use bytes::Bytes;

/// Decoder for the BGP message bodies carried inside BMP messages.
///
/// Both methods receive only the message body, i.e. the bytes after the 19-byte BGP header.
/// Any error returned aborts the enclosing BMP message.
pub trait BgpDecoder {
    fn decode_notification(&self, data: Bytes) -> Result<BgpNotificationMessage, ParserError>;

    fn decode_update(
        &self,
        data: Bytes,
        four_byte_asn: bool,
    ) -> Result<BgpUpdateMessage, ParserError>;
}

/// The decoder shipped with this crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBgpDecoder;

impl BgpDecoder for DefaultBgpDecoder {
    fn decode_notification(&self, data: Bytes) -> Result<BgpNotificationMessage, ParserError> {
        parse_bgp_notification_message(data)
    }

    fn decode_update(
        &self,
        data: Bytes,
        four_byte_asn: bool,
    ) -> Result<BgpUpdateMessage, ParserError> {
        let asn_len = match four_byte_asn {
            true => AsnLength::Bits32,
            false => AsnLength::Bits16,
        };
        parse_bgp_update_message(data, false, asn_len)
    }
}

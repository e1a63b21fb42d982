use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// NEXT_HOP carries an IPv4 address; IPv6 next hops only appear inside MP_REACH_NLRI, but
/// some speakers put a 16-byte address here, which is accepted as well.
pub fn parse_next_hop(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let afi = match input.remaining() {
        4 => Afi::Ipv4,
        16 => Afi::Ipv6,
        v => {
            return Err(ParserError::ParseError(format!(
                "invalid next hop length found: {}",
                v
            )))
        }
    };
    input.read_address(&afi).map(AttributeValue::NextHop)
}

use bytes::{Buf, Bytes};
use log::warn;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::{parse_nlri_list, ReadUtils};

/// Parse the body of a BGP NOTIFICATION message.
///
/// `input` holds everything after the BGP header: error code, error subcode and optional data.
pub fn parse_bgp_notification_message(
    mut input: Bytes,
) -> Result<BgpNotificationMessage, ParserError> {
    let error_code = input.read_u8()?;
    let error_subcode = input.read_u8()?;
    let data = input.read_n_bytes(input.remaining())?;
    Ok(BgpNotificationMessage {
        error_code,
        error_subcode,
        error: BgpError::new(error_code, error_subcode),
        data,
    })
}

/// Parse the body of a BGP UPDATE message.
///
/// `input` holds everything after the BGP header. Routes outside of the MP attributes are
/// IPv4 only.
pub fn parse_bgp_update_message(
    mut input: Bytes,
    add_path: bool,
    asn_len: AsnLength,
) -> Result<BgpUpdateMessage, ParserError> {
    let afi = Afi::Ipv4;

    // parse withdrawn prefixes nlri
    let withdrawn_length = input.read_u16()? as usize;
    input.has_n_remaining(withdrawn_length)?;
    let withdrawn_bytes = input.split_to(withdrawn_length);
    let withdrawn_prefixes = read_nlri(withdrawn_bytes, &afi, add_path)?;

    // parse attributes
    let attribute_length = input.read_u16()? as usize;
    input.has_n_remaining(attribute_length)?;
    let attr_data_slice = input.split_to(attribute_length);
    let attributes = parse_attributes(attr_data_slice, asn_len)?;

    // parse announced prefixes nlri; whatever is left belongs to it
    let announced_prefixes = read_nlri(input, &afi, add_path)?;

    Ok(BgpUpdateMessage {
        withdrawn_prefixes,
        attributes,
        announced_prefixes,
    })
}

/// read nlri portion of a bgp update message.
fn read_nlri(input: Bytes, afi: &Afi, add_path: bool) -> Result<Vec<NetworkPrefix>, ParserError> {
    if input.len() == 1 {
        // 1 byte does not make sense
        warn!("seeing strange one-byte NLRI field");
        return Ok(vec![]);
    }
    parse_nlri_list(input, add_path, afi)
}

use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};
use log::warn;
use std::net::Ipv4Addr;

/// Parse aggregator attribute.
///
/// <https://www.rfc-editor.org/rfc/rfc4271.html#section-5.1.7>
///
/// The attribute holds the aggregating speaker's AS number followed by its 4-byte BGP
/// identifier. The AS number width is taken from the attribute length, since it is the only
/// reliable indicator when a speaker disagrees with the negotiated ASN length.
pub fn parse_aggregator(
    mut input: Bytes,
    asn_len: AsnLength,
) -> Result<(Asn, Ipv4Addr), ParserError> {
    let asn_len_found = match input.remaining() {
        8 => AsnLength::Bits32,
        6 => AsnLength::Bits16,
        _ => {
            return Err(ParserError::ParseError(format!(
                "aggregator attribute length is invalid: found {}, should be 6 or 8",
                input.remaining()
            )))
        }
    };
    if asn_len_found != asn_len {
        warn!(
            "aggregator attribute with ASN length set to {:?} but found {:?}",
            asn_len, asn_len_found
        );
    }
    let asn = input.read_asn(asn_len_found)?;
    let identifier = input.read_ipv4_address()?;
    Ok((asn, identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_aggregator() {
        let identifier = Ipv4Addr::from_str("10.0.0.1").unwrap();

        let mut data = vec![1u8, 2];
        data.extend(identifier.octets());
        let (asn, id) = parse_aggregator(Bytes::from(data), AsnLength::Bits16).unwrap();
        assert_eq!(id, identifier);
        assert_eq!(asn, Asn::new_16bit(258));

        // 4-byte ASN read even though 2-byte was expected
        let mut data = vec![0u8, 0, 1, 2];
        data.extend(identifier.octets());
        let (asn, _) = parse_aggregator(Bytes::from(data), AsnLength::Bits16).unwrap();
        assert_eq!(asn.len, AsnLength::Bits32);
        assert_eq!(asn, Asn::new_32bit(258));

        assert!(parse_aggregator(Bytes::from(vec![0u8; 5]), AsnLength::Bits32).is_err());
    }
}

use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

const COMMUNITY_NO_EXPORT: u32 = 0xFFFFFF01;
const COMMUNITY_NO_ADVERTISE: u32 = 0xFFFFFF02;
const COMMUNITY_NO_EXPORT_SUBCONFED: u32 = 0xFFFFFF03;

pub fn parse_regular_communities(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut communities = Vec::with_capacity(input.remaining() / 4);

    while input.remaining() > 0 {
        let community_val = input.read_u32()?;
        communities.push(match community_val {
            COMMUNITY_NO_EXPORT => Community::NoExport,
            COMMUNITY_NO_ADVERTISE => Community::NoAdvertise,
            COMMUNITY_NO_EXPORT_SUBCONFED => Community::NoExportSubConfed,
            value => {
                let asn = ((value >> 16) & 0xffff) as u16;
                let data = (value & 0xffff) as u16;
                Community::Custom(Asn::new_16bit(asn), data)
            }
        });
    }

    Ok(AttributeValue::Communities(communities))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test parsing of communities values, as defined in RFC1997.
    #[test]
    fn test_parse_communities() {
        let value = parse_regular_communities(Bytes::from(vec![
            0xFF, 0xFF, 0xFF, 0x01, // NoExport
            0xFF, 0xFF, 0xFF, 0x02, // NoAdvertise
            0xFF, 0xFF, 0xFF, 0x03, // NoExportSubConfed
            0x00, 0x7B, 0x01, 0xC8, // Custom(123, 456)
        ]))
        .unwrap();
        assert_eq!(
            value,
            AttributeValue::Communities(vec![
                Community::NoExport,
                Community::NoAdvertise,
                Community::NoExportSubConfed,
                Community::Custom(Asn::from(123), 456),
            ])
        );
    }

    #[test]
    fn test_truncated_community() {
        assert!(parse_regular_communities(Bytes::from(vec![0, 1, 2])).is_err());
    }
}

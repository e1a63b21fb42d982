mod attr_01_origin;
mod attr_02_17_as_path;
mod attr_03_next_hop;
mod attr_04_med;
mod attr_05_local_pref;
mod attr_07_18_aggregator;
mod attr_08_communities;
mod attr_32_large_communities;

use bytes::{Buf, Bytes};
use log::{debug, warn};

use crate::models::*;

use crate::error::ParserError;
use crate::parser::bgp::attributes::attr_01_origin::parse_origin;
use crate::parser::bgp::attributes::attr_02_17_as_path::parse_as_path;
use crate::parser::bgp::attributes::attr_03_next_hop::parse_next_hop;
use crate::parser::bgp::attributes::attr_04_med::parse_med;
use crate::parser::bgp::attributes::attr_05_local_pref::parse_local_pref;
use crate::parser::bgp::attributes::attr_07_18_aggregator::parse_aggregator;
use crate::parser::bgp::attributes::attr_08_communities::parse_regular_communities;
use crate::parser::bgp::attributes::attr_32_large_communities::parse_large_communities;
use crate::parser::ReadUtils;

/// Parse the path attributes section of a BGP UPDATE.
///
/// `data` contains the entirety of the attributes bytes, therefore its size is the total
/// attribute length announced in the UPDATE.
pub fn parse_attributes(mut data: Bytes, asn_len: AsnLength) -> Result<Vec<Attribute>, ParserError> {
    let mut attributes: Vec<Attribute> = Vec::with_capacity(10);

    while data.remaining() >= 3 {
        // each attribute is at least 3 bytes: flag(1) + type(1) + length(1)
        let flag = AttrFlags::from_bits_retain(data.read_u8()?);
        let attr_type = AttrType::from(data.read_u8()?);
        let attr_length = match flag.contains(AttrFlags::EXTENDED) {
            false => data.read_u8()? as usize,
            true => data.read_u16()? as usize,
        };

        debug!(
            "reading attribute: type -- {:?}, length -- {}",
            &attr_type, attr_length
        );

        data.has_n_remaining(attr_length)?;
        let attr_data = data.split_to(attr_length);

        let attr = match attr_type {
            AttrType::ORIGIN => parse_origin(attr_data),
            AttrType::AS_PATH => {
                parse_as_path(attr_data, asn_len).map(|path| AttributeValue::AsPath {
                    path,
                    is_as4: false,
                })
            }
            AttrType::NEXT_HOP => parse_next_hop(attr_data),
            AttrType::MULTI_EXIT_DISCRIMINATOR => parse_med(attr_data),
            AttrType::LOCAL_PREFERENCE => parse_local_pref(attr_data),
            AttrType::ATOMIC_AGGREGATE => Ok(AttributeValue::AtomicAggregate),
            AttrType::AGGREGATOR => {
                parse_aggregator(attr_data, asn_len).map(|(asn, id)| AttributeValue::Aggregator {
                    asn,
                    id,
                    is_as4: false,
                })
            }
            AttrType::COMMUNITIES => parse_regular_communities(attr_data),
            AttrType::AS4_PATH => parse_as_path(attr_data, AsnLength::Bits32)
                .map(|path| AttributeValue::AsPath { path, is_as4: true }),
            AttrType::AS4_AGGREGATOR => parse_aggregator(attr_data, AsnLength::Bits32).map(
                |(asn, id)| AttributeValue::Aggregator {
                    asn,
                    id,
                    is_as4: true,
                },
            ),
            AttrType::LARGE_COMMUNITIES => parse_large_communities(attr_data),
            AttrType::RESERVED | AttrType::Unknown(_) => {
                debug!("keeping raw bytes of attribute type {:?}", attr_type);
                Ok(AttributeValue::Unknown(AttrRaw {
                    attr_type,
                    bytes: attr_data.to_vec(),
                }))
            }
        };

        match attr {
            Ok(value) => attributes.push(Attribute { value, flag }),
            Err(e) if flag.contains(AttrFlags::PARTIAL) => {
                // RFC4271 4.3: a partial optional transitive attribute may be incomplete
                warn!("PARTIAL attribute {:?} dropped: {}", attr_type, e);
            }
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        }
    }

    Ok(attributes)
}

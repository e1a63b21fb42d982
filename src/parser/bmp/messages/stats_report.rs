use crate::parser::bmp::error::ParserBmpError;
use crate::parser::ReadUtils;
use bytes::Bytes;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Size of the type + length prefix of one statistics element.
pub const STAT_ELEMENT_HEADER_LEN: usize = 4;

/// Every statistics element carries a 32-bit counter.
pub const STAT_ELEMENT_VALUE_LEN: u16 = 4;

/// Statistics element type codes.
#[derive(
    Debug, TryFromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum StatType {
    PrefixesRejected = 0,
    DuplicatePrefixAdvertisements = 1,
    DuplicateWithdraws = 2,
    ClusterListLoop = 3,
    AsPathLoop = 4,
}

impl StatType {
    pub const fn description(&self) -> &'static str {
        match self {
            StatType::PrefixesRejected => "prefixes rejected by inbound policy",
            StatType::DuplicatePrefixAdvertisements => "(known) duplicate prefix advertisements",
            StatType::DuplicateWithdraws => "(known) duplicate withdraws",
            StatType::ClusterListLoop => "updates invalidated due to CLUSTER_LIST loop",
            StatType::AsPathLoop => "updates invalidated due to AS_PATH loop",
        }
    }
}

impl Display for StatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A decoded statistics report.
///
/// `statistics` keeps one counter per type; when a type is reported more than once the last
/// value wins, so it may hold fewer entries than `stats_count`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsReport {
    pub stats_count: u32,
    pub statistics: BTreeMap<StatType, u32>,
}

/// Parse the 4-byte element count that starts a statistics report.
pub fn parse_stats_count(mut data: Bytes) -> Result<u32, ParserBmpError> {
    Ok(data.read_u32()?)
}

/// Parse the type and length of one statistics element.
///
/// Unknown types and lengths other than [STAT_ELEMENT_VALUE_LEN] abort the message.
pub fn parse_stat_element_header(mut data: Bytes) -> Result<(StatType, u16), ParserBmpError> {
    let stat_type_raw = data.read_u16()?;
    let stat_len = data.read_u16()?;
    let stat_type = StatType::try_from(stat_type_raw)
        .map_err(|_| ParserBmpError::UnknownStatType(stat_type_raw))?;
    if stat_len != STAT_ELEMENT_VALUE_LEN {
        return Err(ParserBmpError::InvalidStatsDataLength(stat_len));
    }
    Ok((stat_type, stat_len))
}

pub fn parse_stat_element_value(mut data: Bytes) -> Result<u32, ParserBmpError> {
    Ok(data.read_u32()?)
}

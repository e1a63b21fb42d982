/*!
Provides the incremental decoder for BMP version 1 messages.

A BMP v1 message carries no overall length field, so the decoder cannot be handed a whole message
at once. Instead a [BmpMessage] tells the caller how many bytes it needs next
([BmpMessage::next_expected_length]) and is fed exactly that many bytes per
[BmpMessage::consume] call until it reports completion.

```rust
use bmp_decoder::BmpMessage;

# fn read_exact(n: usize) -> Vec<u8> { vec![0; n] }
let mut msg = BmpMessage::new();
loop {
    let chunk = read_exact(msg.next_expected_length());
    match msg.consume(&chunk) {
        Ok(true) => break,
        Ok(false) => continue,
        Err(e) => {
            eprintln!("{}", e);
            break;
        }
    }
}
```
*/
use crate::parser::bgp::{BgpDecoder, DefaultBgpDecoder};
use bytes::Bytes;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub mod error;
pub mod messages;

pub use error::ParserBmpError;
pub use messages::*;

/// Decoding state of a [BmpMessage].
///
/// Each variant carries the data gathered so far that the following states still need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BmpState {
    /// Waiting for the 44-byte common header.
    Init,
    /// Waiting for the 19-byte header of the embedded BGP message.
    ParseBgpHeader,
    /// Waiting for the body of the embedded BGP UPDATE.
    ParseBgpUpdate {
        bgp_auth: [u8; 16],
        bgp_type: u8,
        body_len: usize,
    },
    /// Waiting for the 4-byte statistics element count.
    ParseBmpStatReport,
    ParseBmpStatElementTypeLength {
        statistics: BTreeMap<StatType, u32>,
        stats_count: u32,
        statistics_left: u32,
    },
    ParseBmpStatElementValue {
        statistics: BTreeMap<StatType, u32>,
        stats_count: u32,
        statistics_left: u32,
        stat_type: StatType,
        value_len: u16,
    },
    /// Waiting for the 1-byte peer down reason.
    ParseBmpPeerDown,
    /// Waiting for the BGP NOTIFICATION error code and subcode.
    ParseBgpNotification { reason: PeerDownReason },
    /// The message is complete.
    Done,
    /// Decoding was aborted by an error.
    Failed,
}

impl BmpState {
    /// Number of bytes the next chunk must contain. Terminal states expect nothing.
    pub fn expected_length(&self) -> usize {
        match self {
            BmpState::Init => BMP_HEADER_LEN,
            BmpState::ParseBgpHeader => crate::models::BGP_HEADER_LEN,
            BmpState::ParseBgpUpdate { body_len, .. } => *body_len,
            BmpState::ParseBmpStatReport => 4,
            BmpState::ParseBmpStatElementTypeLength { .. } => STAT_ELEMENT_HEADER_LEN,
            BmpState::ParseBmpStatElementValue { value_len, .. } => *value_len as usize,
            BmpState::ParseBmpPeerDown => 1,
            BmpState::ParseBgpNotification { .. } => PEER_DOWN_NOTIFICATION_LEN,
            BmpState::Done | BmpState::Failed => 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BmpState::Done | BmpState::Failed)
    }
}

/// One BMP message being decoded.
///
/// Instances are independent of each other; decoding several connections in parallel only
/// requires one instance per connection.
#[derive(Debug, Clone)]
pub struct BmpMessage {
    state: BmpState,
    header: Option<BmpCommonHeader>,
    body: Option<MessageBody>,
    raw_header: Vec<u8>,
    raw_payload: Vec<u8>,
}

impl Default for BmpMessage {
    fn default() -> Self {
        BmpMessage {
            state: BmpState::Init,
            header: None,
            body: None,
            raw_header: Vec::with_capacity(BMP_HEADER_LEN),
            raw_payload: vec![],
        }
    }
}

impl BmpMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact size of the chunk the next [BmpMessage::consume] call must receive.
    pub fn next_expected_length(&self) -> usize {
        self.state.expected_length()
    }

    /// Feed the next chunk, decoding embedded BGP messages with [DefaultBgpDecoder].
    ///
    /// Returns `Ok(true)` once the message is complete.
    pub fn consume(&mut self, data: &[u8]) -> Result<bool, ParserBmpError> {
        self.consume_with(data, &DefaultBgpDecoder)
    }

    /// Feed the next chunk, decoding embedded BGP messages with `decoder`.
    ///
    /// Any error leaves the message in [BmpState::Failed]; it should then be dropped.
    pub fn consume_with<D: BgpDecoder + ?Sized>(
        &mut self,
        data: &[u8],
        decoder: &D,
    ) -> Result<bool, ParserBmpError> {
        if self.state.is_terminal() {
            return Err(ParserBmpError::MessageFinished);
        }

        let state = std::mem::replace(&mut self.state, BmpState::Failed);
        let expected = state.expected_length();
        if data.len() != expected {
            return Err(ParserBmpError::ChunkLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        match state {
            BmpState::Init => self.raw_header.extend_from_slice(data),
            _ => self.raw_payload.extend_from_slice(data),
        }

        let next = self.advance(state, Bytes::copy_from_slice(data), decoder)?;
        debug!("BMP decoder state: {:?}", &next);
        self.state = next;
        Ok(self.state == BmpState::Done)
    }

    fn advance<D: BgpDecoder + ?Sized>(
        &mut self,
        state: BmpState,
        data: Bytes,
        decoder: &D,
    ) -> Result<BmpState, ParserBmpError> {
        let next = match state {
            BmpState::Init => {
                let header = parse_bmp_common_header(data)?;
                let next = match header.msg_type {
                    BmpMsgType::RouteMonitoring => BmpState::ParseBgpHeader,
                    BmpMsgType::StatisticsReport => BmpState::ParseBmpStatReport,
                    BmpMsgType::PeerDownNotification => BmpState::ParseBmpPeerDown,
                };
                self.header = Some(header);
                next
            }
            BmpState::ParseBgpHeader => {
                let bgp_header = parse_bgp_header(data)?;
                BmpState::ParseBgpUpdate {
                    bgp_auth: bgp_header.marker,
                    bgp_type: bgp_header.msg_type,
                    body_len: bgp_header.body_len(),
                }
            }
            BmpState::ParseBgpUpdate {
                bgp_auth, bgp_type, ..
            } => {
                let update = decoder.decode_update(data, true)?;
                self.finish(MessageBody::RouteMonitoring(RouteMonitoring {
                    bgp_auth,
                    bgp_type,
                    update,
                }))
            }
            BmpState::ParseBmpStatReport => {
                let stats_count = parse_stats_count(data)?;
                if stats_count == 0 {
                    info!("received statistics report with no statistics elements");
                    self.finish(MessageBody::StatsReport(StatsReport::default()))
                } else {
                    BmpState::ParseBmpStatElementTypeLength {
                        statistics: BTreeMap::new(),
                        stats_count,
                        statistics_left: stats_count,
                    }
                }
            }
            BmpState::ParseBmpStatElementTypeLength {
                statistics,
                stats_count,
                statistics_left,
            } => {
                let (stat_type, value_len) = parse_stat_element_header(data)?;
                BmpState::ParseBmpStatElementValue {
                    statistics,
                    stats_count,
                    statistics_left,
                    stat_type,
                    value_len,
                }
            }
            BmpState::ParseBmpStatElementValue {
                mut statistics,
                stats_count,
                statistics_left,
                stat_type,
                ..
            } => {
                statistics.insert(stat_type, parse_stat_element_value(data)?);
                let statistics_left = statistics_left - 1;
                match statistics_left {
                    0 => self.finish(MessageBody::StatsReport(StatsReport {
                        stats_count,
                        statistics,
                    })),
                    _ => BmpState::ParseBmpStatElementTypeLength {
                        statistics,
                        stats_count,
                        statistics_left,
                    },
                }
            }
            BmpState::ParseBmpPeerDown => {
                let reason = parse_peer_down_reason(data)?;
                match reason.has_notification() {
                    true => BmpState::ParseBgpNotification { reason },
                    false => self.finish(MessageBody::PeerDownNotification(PeerDownNotification {
                        reason,
                        notification: None,
                    })),
                }
            }
            BmpState::ParseBgpNotification { reason } => {
                let notification = decoder.decode_notification(data)?;
                self.finish(MessageBody::PeerDownNotification(PeerDownNotification {
                    reason,
                    notification: Some(notification),
                }))
            }
            BmpState::Done | BmpState::Failed => return Err(ParserBmpError::MessageFinished),
        };
        Ok(next)
    }

    fn finish(&mut self, body: MessageBody) -> BmpState {
        self.body = Some(body);
        BmpState::Done
    }

    pub fn state(&self) -> &BmpState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == BmpState::Done
    }

    pub fn is_failed(&self) -> bool {
        self.state == BmpState::Failed
    }

    /// The decoded common header, available once the first chunk was consumed.
    pub fn header(&self) -> Option<&BmpCommonHeader> {
        self.header.as_ref()
    }

    /// The decoded body, available once the message is done.
    pub fn body(&self) -> Option<&MessageBody> {
        self.body.as_ref()
    }

    pub fn raw_header(&self) -> &[u8] {
        &self.raw_header
    }

    /// All bytes consumed after the common header.
    pub fn raw_payload(&self) -> &[u8] {
        &self.raw_payload
    }

    /// Split a completed message into header and body. Returns `None` for unfinished messages.
    pub fn into_parts(self) -> Option<(BmpCommonHeader, MessageBody)> {
        match (self.state, self.header, self.body) {
            (BmpState::Done, Some(header), Some(body)) => Some((header, body)),
            _ => None,
        }
    }
}

impl Display for BmpMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.header {
            Some(header) => write!(
                f,
                "BMP version {} message of type {}",
                header.version, header.msg_type
            ),
            None => write!(f, "BMP message with undecoded header"),
        }
    }
}

//! BGP NOTIFICATION error codes and subcodes.
//!
//! Only the codes a BMP peer-down report is likely to carry get their own subcode table; the
//! IANA registry is at
//! <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-3>.
use log::warn;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum BgpErrorCode {
    Reserved = 0,
    MessageHeaderError = 1,
    OpenError = 2,
    UpdateError = 3,
    HoldTimerExpired = 4,
    FiniteStateMachineError = 5,
    Cease = 6,
    RouteRefreshError = 7,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Decoded (code, subcode) pair of a BGP NOTIFICATION.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpError {
    /// Includes subcode. No subcodes have been assigned.
    Reserved(u8),
    MessageHeaderError(MessageHeaderError),
    OpenError(OpenError),
    UpdateError(UpdateError),
    /// Includes subcode. No subcodes have been assigned.
    HoldTimerExpired(u8),
    FiniteStateMachineError(u8),
    Cease(CeaseSubcode),
    RouteRefreshError(u8),
    Unknown(u8, u8),
}

impl BgpError {
    pub fn new(code: u8, subcode: u8) -> Self {
        match BgpErrorCode::from(code) {
            BgpErrorCode::Reserved => BgpError::Reserved(subcode),
            BgpErrorCode::MessageHeaderError => {
                BgpError::MessageHeaderError(MessageHeaderError::from(subcode))
            }
            BgpErrorCode::OpenError => BgpError::OpenError(OpenError::from(subcode)),
            BgpErrorCode::UpdateError => BgpError::UpdateError(UpdateError::from(subcode)),
            BgpErrorCode::HoldTimerExpired => BgpError::HoldTimerExpired(subcode),
            BgpErrorCode::FiniteStateMachineError => BgpError::FiniteStateMachineError(subcode),
            BgpErrorCode::Cease => BgpError::Cease(CeaseSubcode::from(subcode)),
            BgpErrorCode::RouteRefreshError => BgpError::RouteRefreshError(subcode),
            BgpErrorCode::Unknown(_) => {
                warn!(
                    "unknown BGP notification error code: {}, subcode: {}",
                    code, subcode
                );
                BgpError::Unknown(code, subcode)
            }
        }
    }
}

impl Display for BgpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BgpError::Reserved(sub) => write!(f, "reserved ({})", sub),
            BgpError::MessageHeaderError(sub) => write!(f, "message header error: {:?}", sub),
            BgpError::OpenError(sub) => write!(f, "OPEN message error: {:?}", sub),
            BgpError::UpdateError(sub) => write!(f, "UPDATE message error: {:?}", sub),
            BgpError::HoldTimerExpired(_) => write!(f, "hold timer expired"),
            BgpError::FiniteStateMachineError(sub) => {
                write!(f, "finite state machine error ({})", sub)
            }
            BgpError::Cease(sub) => write!(f, "cease: {:?}", sub),
            BgpError::RouteRefreshError(sub) => write!(f, "ROUTE-REFRESH error ({})", sub),
            BgpError::Unknown(code, sub) => write!(f, "unknown error {}/{}", code, sub),
        }
    }
}

/// Message Header Error subcodes
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-5>
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageHeaderError {
    Unspecific = 0,
    ConnectionNotSynchronized = 1,
    BadMessageLength = 2,
    BadMessageType = 3,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// OPEN Message Error subcodes
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-6>
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OpenError {
    Unspecific = 0,
    UnsupportedVersionNumber = 1,
    BadPeerAs = 2,
    BadBgpIdentifier = 3,
    UnsupportedOptionalParameter = 4,
    // 5 -- deprecated
    UnacceptableHoldTime = 6,
    UnsupportedCapability = 7,
    RoleMismatch = 11,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// UPDATE Message Error subcodes
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-7>
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UpdateError {
    Unspecific = 0,
    MalformedAttributeList = 1,
    UnrecognizedWellKnownAttribute = 2,
    MissingWellKnownAttribute = 3,
    AttributeFlagsError = 4,
    AttributeLengthError = 5,
    InvalidOriginAttribute = 6,
    // 7 -- deprecated
    InvalidNextHopAttribute = 8,
    OptionalAttributeError = 9,
    InvalidNetworkField = 10,
    MalformedAsPath = 11,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Cease NOTIFICATION subcodes (RFC4486)
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-8>
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CeaseSubcode {
    Reserved = 0,
    MaximumNumberOfPrefixesReached = 1,
    AdministrativeShutdown = 2,
    PeerDeconfigured = 3,
    AdministrativeReset = 4,
    ConnectionRejected = 5,
    OtherConfigurationChange = 6,
    ConnectionCollisionResolution = 7,
    OutOfResources = 8,
    HardReset = 9,
    BfdDown = 10,
    #[num_enum(catch_all)]
    Unknown(u8),
}

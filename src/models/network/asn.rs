use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// AS number length: 16 or 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsnLength {
    Bits16,
    Bits32,
}

impl AsnLength {
    /// Number of bytes one AS number occupies on the wire.
    pub const fn byte_len(&self) -> usize {
        match self {
            AsnLength::Bits16 => 2,
            AsnLength::Bits32 => 4,
        }
    }
}

/// ASN -- Autonomous System Number
///
/// Two ASNs are equal when their numeric values are equal, regardless of the encoding length
/// they were read with.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Asn {
    pub asn: u32,
    pub len: AsnLength,
}

impl Asn {
    /// Constructs a new 2-octet `Asn` with `AsnLength::Bits16`.
    pub const fn new_16bit(asn: u16) -> Self {
        Asn {
            asn: asn as u32,
            len: AsnLength::Bits16,
        }
    }

    /// Constructs a new 4-octet `Asn` with `AsnLength::Bits32`.
    pub const fn new_32bit(asn: u32) -> Self {
        Asn {
            asn,
            len: AsnLength::Bits32,
        }
    }

    /// Checks if the given ASN is reserved for private use.
    ///
    /// <https://datatracker.ietf.org/doc/rfc7249/>
    pub const fn is_private(&self) -> bool {
        matches!(self.asn, 64512..=65534 | 4200000000..=4294967294)
    }

    /// `AS_TRANS` (RFC6793) is used in 2-octet fields when the real ASN does not fit.
    pub const fn is_as_trans(&self) -> bool {
        self.asn == 23456
    }
}

impl PartialEq for Asn {
    fn eq(&self, other: &Self) -> bool {
        self.asn == other.asn
    }
}

impl PartialOrd for Asn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Asn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.asn.cmp(&other.asn)
    }
}

impl Hash for Asn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.asn.hash(state);
    }
}

impl PartialEq<u32> for Asn {
    fn eq(&self, other: &u32) -> bool {
        self.asn == *other
    }
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn::new_32bit(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.asn
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asn)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Asn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.asn)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Asn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let asn = <u32 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Asn::new_32bit(asn))
    }
}

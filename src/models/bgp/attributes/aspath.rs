use crate::models::*;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Enum of AS path segment.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsPathSegment {
    AsSequence(Vec<Asn>),
    AsSet(Vec<Asn>),
    ConfedSequence(Vec<Asn>),
    ConfedSet(Vec<Asn>),
}

impl AsPathSegment {
    /// Number of ASNs this segment contributes to the path length (RFC4271 9.1.2.2).
    pub fn count_asns(&self) -> usize {
        match self {
            AsPathSegment::AsSequence(v) => v.len(),
            AsPathSegment::AsSet(_) => 1,
            AsPathSegment::ConfedSequence(_) | AsPathSegment::ConfedSet(_) => 0,
        }
    }

    /// <https://datatracker.ietf.org/doc/html/rfc5065#section-5>
    pub fn is_confed(&self) -> bool {
        matches!(
            self,
            AsPathSegment::ConfedSequence(_) | AsPathSegment::ConfedSet(_)
        )
    }
}

#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPath {
    pub segments: Vec<AsPathSegment>,
}

impl AsPath {
    pub fn new() -> AsPath {
        AsPath { segments: vec![] }
    }

    /// Build a path made of a single AS_SEQUENCE segment.
    pub fn from_sequence<I: IntoIterator<Item = u32>>(asns: I) -> AsPath {
        let seq = asns.into_iter().map(Asn::new_32bit).collect();
        AsPath {
            segments: vec![AsPathSegment::AsSequence(seq)],
        }
    }

    pub fn append_segment(&mut self, segment: AsPathSegment) {
        self.segments.push(segment);
    }

    pub fn count_asns(&self) -> usize {
        self.segments.iter().map(AsPathSegment::count_asns).sum()
    }

    /// Construct AsPath from AS_PATH and AS4_PATH
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc6793#section-4.2.3>
    ///
    /// If AS_PATH is shorter than AS4_PATH, AS4_PATH is ignored. Otherwise the leading ASNs
    /// of AS_PATH are prepended to AS4_PATH so the result has as many ASNs as AS_PATH.
    pub fn merge_aspath_as4path(aspath: &AsPath, as4path: &AsPath) -> AsPath {
        if aspath.count_asns() < as4path.count_asns() || as4path.segments.is_empty() {
            return aspath.clone();
        }

        let mut as4iter = as4path.segments.iter();
        let mut segments = Vec::with_capacity(aspath.segments.len());
        for seg in &aspath.segments {
            let Some(as4seg) = as4iter.next() else {
                segments.push(seg.clone());
                continue;
            };
            match (seg, as4seg) {
                (AsPathSegment::AsSequence(seq), AsPathSegment::AsSequence(seq4))
                    if seq.len() >= seq4.len() =>
                {
                    let diff_len = seq.len() - seq4.len();
                    let merged = seq.iter().take(diff_len).chain(seq4).copied().collect();
                    segments.push(AsPathSegment::AsSequence(merged));
                }
                _ => segments.push(as4seg.clone()),
            }
        }
        AsPath { segments }
    }

    /// Origin AS(es): last ASN of a trailing sequence, or all members of a trailing set.
    pub fn get_origin(&self) -> Option<Vec<Asn>> {
        match self.segments.last()? {
            AsPathSegment::AsSequence(v) => v.last().map(|n| vec![*n]),
            AsPathSegment::AsSet(v) => Some(v.clone()),
            AsPathSegment::ConfedSequence(_) | AsPathSegment::ConfedSet(_) => None,
        }
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self
            .segments
            .iter()
            .map(|seg| match seg {
                AsPathSegment::AsSequence(v) => v.iter().join(" "),
                AsPathSegment::AsSet(v) => format!("{{{}}}", v.iter().join(",")),
                AsPathSegment::ConfedSequence(v) => format!("({})", v.iter().join(" ")),
                AsPathSegment::ConfedSet(v) => format!("[{}]", v.iter().join(",")),
            })
            .join(" ");
        write!(f, "{}", text)
    }
}

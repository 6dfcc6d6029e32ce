//! # Shirt Sizes
//!
//! The closed set of sizes the shop sells and a fixed-width counter keyed by
//! them.
//!
//! ## Canonical Order
//! ```text
//! 4S  SSS  SS  S  M  L  XL  2XL  3XL  4XL  5XL  6XL
//! ```
//! Every report column, every total and every serialized row lists sizes in
//! this order. `SizeCounts` always carries all twelve, so a renderer never has
//! to special-case a missing key.
//!
//! Sizes arrive from storage as free text. [`SizeCode::parse`] is the single
//! place that decides whether a stored size is recognized.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Size Code
// =============================================================================

/// A recognized shirt size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SizeCode {
    #[serde(rename = "4S")]
    FourS,
    #[serde(rename = "SSS")]
    Sss,
    #[serde(rename = "SS")]
    Ss,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    Xl2,
    #[serde(rename = "3XL")]
    Xl3,
    #[serde(rename = "4XL")]
    Xl4,
    #[serde(rename = "5XL")]
    Xl5,
    #[serde(rename = "6XL")]
    Xl6,
}

impl SizeCode {
    /// Number of recognized sizes.
    pub const COUNT: usize = 12;

    /// All sizes in canonical order.
    pub const ALL: [SizeCode; SizeCode::COUNT] = [
        SizeCode::FourS,
        SizeCode::Sss,
        SizeCode::Ss,
        SizeCode::S,
        SizeCode::M,
        SizeCode::L,
        SizeCode::Xl,
        SizeCode::Xl2,
        SizeCode::Xl3,
        SizeCode::Xl4,
        SizeCode::Xl5,
        SizeCode::Xl6,
    ];

    /// The label used in storage, JSON and reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SizeCode::FourS => "4S",
            SizeCode::Sss => "SSS",
            SizeCode::Ss => "SS",
            SizeCode::S => "S",
            SizeCode::M => "M",
            SizeCode::L => "L",
            SizeCode::Xl => "XL",
            SizeCode::Xl2 => "2XL",
            SizeCode::Xl3 => "3XL",
            SizeCode::Xl4 => "4XL",
            SizeCode::Xl5 => "5XL",
            SizeCode::Xl6 => "6XL",
        }
    }

    /// Position in the canonical order.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a stored size label. Matching is exact: `"m"` is not `M`.
    pub fn parse(label: &str) -> Option<SizeCode> {
        SizeCode::ALL.into_iter().find(|size| size.as_str() == label)
    }

    /// All labels in canonical order.
    pub fn labels() -> Vec<&'static str> {
        SizeCode::ALL.iter().map(SizeCode::as_str).collect()
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeCode::parse(s).ok_or_else(|| ValidationError::NotAllowed {
            field: "size".to_string(),
            allowed: SizeCode::labels().into_iter().map(String::from).collect(),
        })
    }
}

// =============================================================================
// Size Counts
// =============================================================================

/// A quantity per size, one slot for every [`SizeCode`].
///
/// Serializes as a JSON object whose keys are the size labels in canonical
/// order: `{"4S":0,"SSS":0,...,"6XL":0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeCounts([i64; SizeCode::COUNT]);

impl SizeCounts {
    /// All sizes at zero.
    pub const fn zero() -> Self {
        SizeCounts([0; SizeCode::COUNT])
    }

    #[inline]
    pub fn get(&self, size: SizeCode) -> i64 {
        self.0[size.index()]
    }

    /// Adds to one slot, saturating at `i64::MAX`.
    #[inline]
    pub fn add(&mut self, size: SizeCode, quantity: i64) {
        let slot = &mut self.0[size.index()];
        *slot = slot.saturating_add(quantity);
    }

    /// Sum over every size, saturating.
    pub fn total(&self) -> i64 {
        self.0.iter().fold(0i64, |acc, &n| acc.saturating_add(n))
    }

    /// `(size, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SizeCode, i64)> + '_ {
        SizeCode::ALL.into_iter().map(move |size| (size, self.get(size)))
    }

    /// Adds another counter slot by slot.
    pub fn merge(&mut self, other: &SizeCounts) {
        for (slot, value) in self.0.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_add(*value);
        }
    }
}

impl Index<SizeCode> for SizeCounts {
    type Output = i64;

    fn index(&self, size: SizeCode) -> &i64 {
        &self.0[size.index()]
    }
}

impl IndexMut<SizeCode> for SizeCounts {
    fn index_mut(&mut self, size: SizeCode) -> &mut i64 {
        &mut self.0[size.index()]
    }
}

impl Serialize for SizeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SizeCode::COUNT))?;
        for (size, count) in self.iter() {
            map.serialize_entry(size.as_str(), &count)?;
        }
        map.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, size) in SizeCode::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
        assert_eq!(
            SizeCode::labels(),
            vec!["4S", "SSS", "SS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL", "6XL"]
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(SizeCode::parse("2XL"), Some(SizeCode::Xl2));
        assert_eq!(SizeCode::parse("4S"), Some(SizeCode::FourS));
        assert_eq!(SizeCode::parse("m"), None);
        assert_eq!(SizeCode::parse("XXL"), None);
        assert_eq!(SizeCode::parse(""), None);
        assert!("7XL".parse::<SizeCode>().is_err());
        assert_eq!("M".parse::<SizeCode>().unwrap(), SizeCode::M);
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&SizeCode::Xl3).unwrap(), "\"3XL\"");
        let parsed: SizeCode = serde_json::from_str("\"SSS\"").unwrap();
        assert_eq!(parsed, SizeCode::Sss);
    }

    #[test]
    fn test_counts_add_and_total() {
        let mut counts = SizeCounts::zero();
        counts.add(SizeCode::M, 2);
        counts.add(SizeCode::M, 3);
        counts[SizeCode::Xl6] += 1;

        assert_eq!(counts[SizeCode::M], 5);
        assert_eq!(counts.get(SizeCode::Xl6), 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_counts_saturate() {
        let mut counts = SizeCounts::zero();
        counts.add(SizeCode::M, i64::MAX - 1);
        counts.add(SizeCode::M, 5);
        counts.add(SizeCode::L, 10);
        assert_eq!(counts[SizeCode::M], i64::MAX);
        assert_eq!(counts.total(), i64::MAX);

        let mut merged = counts;
        merged.merge(&counts);
        assert_eq!(merged[SizeCode::L], 20);
        assert_eq!(merged[SizeCode::M], i64::MAX);
    }

    #[test]
    fn test_counts_merge() {
        let mut a = SizeCounts::zero();
        a.add(SizeCode::S, 1);
        let mut b = SizeCounts::zero();
        b.add(SizeCode::S, 2);
        b.add(SizeCode::L, 4);

        a.merge(&b);
        assert_eq!(a[SizeCode::S], 3);
        assert_eq!(a[SizeCode::L], 4);
    }

    #[test]
    fn test_counts_serialize_every_size_in_order() {
        let mut counts = SizeCounts::zero();
        counts.add(SizeCode::L, 7);

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(
            json,
            r#"{"4S":0,"SSS":0,"SS":0,"S":0,"M":0,"L":7,"XL":0,"2XL":0,"3XL":0,"4XL":0,"5XL":0,"6XL":0}"#
        );
    }
}

//! Attribute value kinds.

use crate::attribute::PoolThreshold;

/// Flat type tag, as written in data files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum AttributeType {
    Integer,
    Decimal,
    Pool,
}

/// What kind of value an attribute holds.
///
/// Only pools carry a threshold table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// Whole-number attribute (ST, Will, Basic Move).
    Integer,

    /// Fractional attribute (Basic Speed).
    Decimal,

    /// Depletable attribute with a maximum and named state bands (HP, FP).
    Pool { thresholds: Vec<PoolThreshold> },
}

impl AttributeKind {
    pub fn pool(thresholds: Vec<PoolThreshold>) -> Self {
        AttributeKind::Pool { thresholds }
    }

    pub const fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeKind::Integer => AttributeType::Integer,
            AttributeKind::Decimal => AttributeType::Decimal,
            AttributeKind::Pool { .. } => AttributeType::Pool,
        }
    }

    pub const fn is_pool(&self) -> bool {
        matches!(self, AttributeKind::Pool { .. })
    }

    pub const fn is_decimal(&self) -> bool {
        matches!(self, AttributeKind::Decimal)
    }

    /// Threshold table, or `None` for non-pool kinds.
    pub fn thresholds(&self) -> Option<&[PoolThreshold]> {
        match self {
            AttributeKind::Pool { thresholds } => Some(thresholds),
            _ => None,
        }
    }

    pub fn thresholds_mut(&mut self) -> Option<&mut Vec<PoolThreshold>> {
        match self {
            AttributeKind::Pool { thresholds } => Some(thresholds),
            _ => None,
        }
    }
}

/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
pub mod band;
pub mod continuous;
pub mod domain;

use crate::error::{BrushFilterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use band::BandScale;
pub use continuous::{ContinuousScale, Interpolator};

/// A single value in a scale's data domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Number(f64),
    Category(Value),
}

impl DomainValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DomainValue::Number(v) => Some(*v),
            DomainValue::Category(v) => v.as_f64(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            DomainValue::Number(v) => Value::from(*v),
            DomainValue::Category(v) => v.clone(),
        }
    }
}

impl From<f64> for DomainValue {
    fn from(v: f64) -> Self {
        DomainValue::Number(v)
    }
}

impl From<&str> for DomainValue {
    fn from(v: &str) -> Self {
        DomainValue::Category(Value::from(v))
    }
}

/// The domain of a scale, or a filtered sub-range of it.
///
/// Continuous domains are a closed `[min, max]` interval. Ordinal domains are
/// a contiguous run of categories in domain order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleDomain {
    Interval([f64; 2]),
    Categories(Vec<Value>),
}

impl ScaleDomain {
    /// First and last endpoints of the domain
    pub fn endpoints(&self) -> Option<(DomainValue, DomainValue)> {
        match self {
            ScaleDomain::Interval([lo, hi]) => {
                Some((DomainValue::Number(*lo), DomainValue::Number(*hi)))
            }
            ScaleDomain::Categories(values) => {
                let first = values.first()?;
                let last = values.last()?;
                Some((
                    DomainValue::Category(first.clone()),
                    DomainValue::Category(last.clone()),
                ))
            }
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ScaleDomain::Interval([lo, hi]) => Value::from(vec![*lo, *hi]),
            ScaleDomain::Categories(values) => Value::Array(values.clone()),
        }
    }
}

/// Scale bound to a chart channel.
///
/// The chart view owns its scales; the filtering logic only reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Continuous(ContinuousScale),
    Ordinal(BandScale),
}

impl Scale {
    pub fn is_ordinal(&self) -> bool {
        matches!(self, Scale::Ordinal(_))
    }

    /// Full domain of the scale
    pub fn domain(&self) -> ScaleDomain {
        match self {
            Scale::Continuous(scale) => ScaleDomain::Interval(scale.domain),
            Scale::Ordinal(scale) => ScaleDomain::Categories(scale.domain.clone()),
        }
    }

    /// Distance between the starts of adjacent bands, `None` for continuous scales
    pub fn step(&self) -> Option<f64> {
        match self {
            Scale::Continuous(_) => None,
            Scale::Ordinal(scale) => Some(scale.step()),
        }
    }

    /// Map a domain value into the scale's range.
    ///
    /// Ordinal values map to the start of their band.
    pub fn map(&self, value: &DomainValue) -> Result<f64> {
        match self {
            Scale::Continuous(scale) => {
                let v = value.as_f64().ok_or_else(|| {
                    BrushFilterError::specification(format!(
                        "Continuous scale cannot map non-numeric value {:?}",
                        value.to_value()
                    ))
                })?;
                Ok(scale.map(v))
            }
            Scale::Ordinal(scale) => {
                let v = value.to_value();
                scale.map(&v).ok_or_else(|| {
                    BrushFilterError::scale(format!("Value {v} is not in the ordinal domain"))
                })
            }
        }
    }

    /// Invert a range position to a domain value, see [`domain::invert`]
    pub fn invert(&self, position: f64, is_range_start: bool) -> Result<DomainValue> {
        domain::invert(self, position, is_range_start)
    }
}

impl From<ContinuousScale> for Scale {
    fn from(scale: ContinuousScale) -> Self {
        Scale::Continuous(scale)
    }
}

impl From<BandScale> for Scale {
    fn from(scale: BandScale) -> Self {
        Scale::Ordinal(scale)
    }
}

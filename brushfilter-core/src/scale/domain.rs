/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Conversion between scale-range positions and data-domain values.

use crate::error::{BrushFilterError, Result};
use crate::scale::{BandScale, DomainValue, Scale, ScaleDomain};
use float_cmp::approx_eq;
use itertools::Itertools;
use log::warn;

/// Invert a position in the scale's range back to a domain value.
///
/// Continuous scales use their own inverse. Ordinal scales have no continuous
/// inverse, so the position is resolved to the band that covers it, and the
/// two edges of a selection resolve differently so that a band partially
/// covered by the selection is included:
///
/// * the start edge resolves to the last band starting at or before
///   `position`,
/// * the end edge resolves to the first band ending at or after `position`.
///
/// Positions outside the range clamp to the first or last category.
pub fn invert(scale: &Scale, position: f64, is_range_start: bool) -> Result<DomainValue> {
    match scale {
        Scale::Continuous(scale) => Ok(DomainValue::Number(scale.invert(position))),
        Scale::Ordinal(scale) => {
            let index = band_index(scale, position, is_range_start).ok_or_else(|| {
                BrushFilterError::scale("Cannot invert a position on an empty ordinal domain")
            })?;
            Ok(DomainValue::Category(scale.domain[index].clone()))
        }
    }
}

fn band_index(scale: &BandScale, position: f64, is_range_start: bool) -> Option<usize> {
    let n = scale.domain.len();
    if n == 0 {
        return None;
    }
    let starts = scale.band_starts();
    let step = scale.step();
    // Boundaries within a millionth of a step of position count as touching it
    let epsilon = step.abs() * 1e-6;
    let touches = |edge: f64| approx_eq!(f64, edge, position, epsilon = epsilon);
    let band = if is_range_start {
        // Leftmost boundary strictly greater than position, minus one
        let i0 = starts.partition_point(|start| *start <= position || touches(*start));
        i0.saturating_sub(1)
    } else {
        let ends = starts.iter().map(|start| start + step).collect::<Vec<_>>();
        ends.partition_point(|end| *end < position && !touches(*end))
    };
    Some(scale.domain_index(band.min(n - 1)))
}

/// Build the canonical domain spanned by two endpoint values.
///
/// Continuous endpoints are sorted ascending. Ordinal endpoints select the
/// contiguous run of categories between them, inclusive, in domain order.
/// An ordinal endpoint that is not part of the domain clamps to the nearest
/// end of the domain: a missing first value to the first category and a
/// missing second value to the last one.
pub fn domain_of(scale: &Scale, values: [DomainValue; 2]) -> Result<ScaleDomain> {
    match scale {
        Scale::Continuous(_) => {
            let numbers = values
                .iter()
                .map(|v| {
                    v.as_f64().ok_or_else(|| {
                        BrushFilterError::specification(format!(
                            "Continuous domain requires numeric values, received {:?}",
                            v.to_value()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let (lo, hi) = numbers
                .into_iter()
                .sorted_by(f64::total_cmp)
                .collect_tuple()
                .ok_or_else(|| BrushFilterError::internal("Expected two domain values"))?;
            Ok(ScaleDomain::Interval([lo, hi]))
        }
        Scale::Ordinal(scale) => {
            if scale.domain.is_empty() {
                return Ok(ScaleDomain::Categories(Vec::new()));
            }
            let [v0, v1] = values;
            let last = scale.domain.len() - 1;
            let start = ordinal_index(scale, &v0).unwrap_or_else(|| {
                warn!(
                    "Value {:?} not found in ordinal domain, using first category",
                    v0.to_value()
                );
                0
            });
            let end = ordinal_index(scale, &v1).unwrap_or_else(|| {
                warn!(
                    "Value {:?} not found in ordinal domain, using last category",
                    v1.to_value()
                );
                last
            });
            let (start, end) = if start <= end { (start, end) } else { (end, start) };
            Ok(ScaleDomain::Categories(scale.domain[start..=end].to_vec()))
        }
    }
}

fn ordinal_index(scale: &BandScale, value: &DomainValue) -> Option<usize> {
    scale.index_of(&value.to_value())
}

/// Invert a normalized `[start, end]` slider selection into a domain.
///
/// When `reverse` is set the positions are mirrored (`v -> 1 - v`) first, as
/// is needed for horizontal sliders on a transposed coordinate system. The
/// smaller position is always treated as the start edge.
pub fn selection_domain(scale: &Scale, values: [f64; 2], reverse: bool) -> Result<ScaleDomain> {
    let [p0, p1] = if reverse {
        [1.0 - values[0], 1.0 - values[1]]
    } else {
        values
    };
    let (lo, hi) = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
    let d0 = invert(scale, lo, true)?;
    let d1 = invert(scale, hi, false)?;
    domain_of(scale, [d0, d1])
}

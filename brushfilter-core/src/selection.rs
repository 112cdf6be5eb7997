/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Conversion between screen-space rectangular selections and per-channel domains.
//!
//! The two directions are not exact inverses for ordinal scales: positions
//! snap to whole bands on the way back.

use crate::coordinate::Coordinate;
use crate::error::{BrushFilterError, Result, ResultWithContext};
use crate::scale::domain::{domain_of, invert};
use crate::scale::{Scale, ScaleDomain};

/// Invert two screen-space corners into `(x, y)` domains
pub fn selection_to_domains(
    corner0: [f64; 2],
    corner1: [f64; 2],
    scale_x: &Scale,
    scale_y: &Scale,
    coordinate: &dyn Coordinate,
) -> Result<(ScaleDomain, ScaleDomain)> {
    let abstract_domain = |point: [f64; 2], start: bool| -> Result<_> {
        let [x, y] = coordinate.invert(point);
        Ok((invert(scale_x, x, start)?, invert(scale_y, y, start)?))
    };
    let (x0, y0) = abstract_domain(corner0, true)?;
    let (x1, y1) = abstract_domain(corner1, false)?;
    let domain_x = domain_of(scale_x, [x0, x1]).with_context(|| "Resolving x selection")?;
    let domain_y = domain_of(scale_y, [y0, y1]).with_context(|| "Resolving y selection")?;
    Ok((domain_x, domain_y))
}

/// Map `(x, y)` domains forward to a screen rectangle `[x0, y0, x1, y1]`.
///
/// For ordinal scales the upper corner is pushed one step further so the
/// rectangle covers the whole last band.
pub fn domains_to_selection(
    domain_x: &ScaleDomain,
    domain_y: &ScaleDomain,
    scale_x: &Scale,
    scale_y: &Scale,
    coordinate: &dyn Coordinate,
) -> Result<[f64; 4]> {
    let (min_x, max_x) = domain_x
        .endpoints()
        .ok_or_else(|| BrushFilterError::specification("Empty x domain"))?;
    let (min_y, max_y) = domain_y
        .endpoints()
        .ok_or_else(|| BrushFilterError::specification("Empty y domain"))?;

    let p0 = [scale_x.map(&min_x)?, scale_y.map(&min_y)?];
    let p1 = [
        scale_x.map(&max_x)? + scale_x.step().unwrap_or(0.0),
        scale_y.map(&max_y)? + scale_y.step().unwrap_or(0.0),
    ];
    let [x, y] = coordinate.map(p0);
    let [x1, y1] = coordinate.map(p1);
    Ok([x, y, x1, y1])
}

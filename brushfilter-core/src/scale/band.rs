/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde_json::Value;

/// Ordinal scale that divides its range into one uniform band per category.
///
/// Band geometry follows the usual band-scale layout: `padding_inner` is the
/// fraction of a step left empty between bands, `padding_outer` the number of
/// steps reserved before the first and after the last band, and `align`
/// distributes the outer space (0 = all after, 1 = all before).
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    pub domain: Vec<Value>,
    pub range: [f64; 2],
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub align: f64,
}

impl BandScale {
    pub fn new(domain: Vec<Value>) -> Self {
        Self {
            domain,
            range: [0.0, 1.0],
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    pub fn with_range(mut self, r0: f64, r1: f64) -> Self {
        self.range = [r0, r1];
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Whether the range runs from high to low
    pub fn is_reversed(&self) -> bool {
        self.range[1] < self.range[0]
    }

    fn layout(&self) -> (f64, f64) {
        let n = self.domain.len() as f64;
        let (start, stop) = if self.is_reversed() {
            (self.range[1], self.range[0])
        } else {
            (self.range[0], self.range[1])
        };
        let span = n - self.padding_inner + self.padding_outer * 2.0;
        let step = (stop - start) / f64::max(1.0, span);
        let start = start + (stop - start - step * (n - self.padding_inner)) * self.align;
        (start, step)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Band start positions in ascending range order.
    pub fn band_starts(&self) -> Vec<f64> {
        let (start, step) = self.layout();
        (0..self.domain.len())
            .map(|i| start + step * i as f64)
            .collect()
    }

    /// Band start position for each category, in domain order.
    pub fn adjusted_range(&self) -> Vec<f64> {
        let mut starts = self.band_starts();
        if self.is_reversed() {
            starts.reverse();
        }
        starts
    }

    /// Convert an index into `band_starts` into an index into the domain
    pub fn domain_index(&self, band_index: usize) -> usize {
        if self.is_reversed() {
            self.domain.len().saturating_sub(1 + band_index)
        } else {
            band_index
        }
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    /// Start of the band for `value`, `None` when the value is not in the domain
    pub fn map(&self, value: &Value) -> Option<f64> {
        let index = self.index_of(value)?;
        self.adjusted_range().get(index).copied()
    }
}

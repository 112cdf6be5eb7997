/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::coordinate::Channel;
use crate::error::{Result, ResultWithContext};
use crate::scale::ScaleDomain;
use crate::spec::chart::ChartSpec;
use crate::spec::mark::MarkSpec;
use crate::spec::values::deep_mix;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Per-channel scale domain overrides applied when filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    domains: BTreeMap<Channel, ScaleDomain>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_domain(mut self, channel: Channel, domain: ScaleDomain) -> Self {
        self.domains.insert(channel, domain);
        self
    }

    pub fn domain(&self, channel: Channel) -> Option<&ScaleDomain> {
        self.domains.get(&channel)
    }

    /// Scale options object, e.g. `{"x": {"domain": [0, 1]}, "y": {"domain": ["a"]}}`
    pub fn to_scale_options(&self) -> Value {
        let options = self
            .domains
            .iter()
            .map(|(channel, domain)| {
                (
                    channel.to_string(),
                    json!({ "domain": domain.to_value() }),
                )
            })
            .collect::<Map<_, _>>();
        Value::Object(options)
    }
}

/// Build a new spec whose marks render only the given per-channel domains.
///
/// Each mark gets:
/// * axis labels hidden on `x` and `y` unless the mark configures its axes,
/// * its scale domains overridden by `options`,
/// * its existing sliders preserved instead of rebuilt,
/// * animation disabled.
///
/// The chart itself is clipped to the plot area with animation disabled.
/// `spec` is left untouched.
pub fn filter_by_domain(spec: &ChartSpec, options: &FilterOptions) -> Result<ChartSpec> {
    let scale_options = options.to_scale_options();
    let marks = spec
        .marks
        .iter()
        .enumerate()
        .map(|(i, mark)| {
            filter_mark(mark, &scale_options).with_context(|| format!("Filtering mark {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChartSpec {
        marks,
        clip: Some(true),
        animate: Some(Value::Bool(false)),
        extra: spec.extra.clone(),
    })
}

fn filter_mark(mark: &MarkSpec, scale_options: &Value) -> Result<MarkSpec> {
    let mut mixed = json!({
        "axis": {
            "x": { "transform": [{ "type": "hide" }] },
            "y": { "transform": [{ "type": "hide" }] },
        }
    });
    deep_mix(&mut mixed, &serde_json::to_value(mark)?);

    let slider = [Channel::X, Channel::Y]
        .into_iter()
        .filter(|channel| mark.has_slider(*channel))
        .map(|channel| (channel.to_string(), json!({ "preserve": true })))
        .collect::<Map<_, _>>();

    deep_mix(
        &mut mixed,
        &json!({
            "scale": scale_options,
            "slider": slider,
            "animate": false,
        }),
    );
    Ok(serde_json::from_value(mixed)?)
}

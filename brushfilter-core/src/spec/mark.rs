/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::coordinate::Channel;
use crate::spec::values::is_truthy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSpec {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<Value>,

    /// Per-channel scale options, e.g. `{"x": {"type": "band", "domain": [...]}}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Value>,

    /// Per-channel axis options, or `false` to hide all axes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Value>,

    /// Per-channel slider options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MarkSpec {
    /// Whether the mark declares a slider on `channel`
    pub fn has_slider(&self, channel: Channel) -> bool {
        self.slider
            .as_ref()
            .and_then(|slider| slider.get(channel.as_str()))
            .map(is_truthy)
            .unwrap_or(false)
    }

    /// Domain configured for `channel` in the mark's scale options, if any
    pub fn scale_domain(&self, channel: Channel) -> Option<&Value> {
        self.scale
            .as_ref()
            .and_then(|scale| scale.get(channel.as_str()))
            .and_then(|options| options.get("domain"))
    }
}

/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use crate::spec::mark::MarkSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Declarative chart description submitted to the view for rendering
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<MarkSpec>,

    /// Clip marks to the plot area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ChartSpec {
    pub fn from_json_str(s: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

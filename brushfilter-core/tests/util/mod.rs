#![allow(dead_code)]

use async_trait::async_trait;
use brushfilter_core::error::{BrushFilterError, Result};
use brushfilter_core::interaction::filter::{ChannelScales, ChartUpdater, InteractionContext};
use brushfilter_core::interaction::slider::{Slider, SliderGroup};
use brushfilter_core::spec::chart::ChartSpec;
use brushfilter_core::{Cartesian, Orientation};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records every spec it is asked to render
#[derive(Default)]
pub struct RecordingUpdater {
    pub delay: Option<Duration>,
    pub fail: Cell<bool>,
    pub specs: RefCell<Vec<ChartSpec>>,
}

impl RecordingUpdater {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.specs.borrow().len()
    }

    pub fn last(&self) -> ChartSpec {
        self.specs.borrow().last().cloned().unwrap()
    }

    /// Domain the last rendered spec set on `channel` for its first mark
    pub fn last_domain(&self, channel: &str) -> Value {
        let spec = self.last();
        spec.marks[0]
            .scale
            .as_ref()
            .and_then(|scale| scale.get(channel))
            .and_then(|options| options.get("domain"))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

#[async_trait(?Send)]
impl ChartUpdater for RecordingUpdater {
    async fn update(&self, spec: ChartSpec) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.specs.borrow_mut().push(spec);
        if self.fail.get() {
            Err(BrushFilterError::update("view rejected the spec"))
        } else {
            Ok(())
        }
    }
}

pub fn interval_spec() -> ChartSpec {
    serde_json::from_value(json!({
        "type": "view",
        "marks": [{
            "type": "interval",
            "data": [{"genre": "a", "sold": 275}, {"genre": "b", "sold": 115}],
            "encode": {"x": "genre", "y": "sold"},
            "slider": {"x": true, "y": {"values": [0.1, 0.9]}},
            "axis": {"y": {"title": "Sold"}}
        }]
    }))
    .unwrap()
}

pub struct Fixture {
    pub group: Rc<SliderGroup>,
    pub horizontal: Rc<Slider>,
    pub vertical: Rc<Slider>,
    pub updater: Rc<RecordingUpdater>,
}

impl Fixture {
    pub fn new(updater: RecordingUpdater) -> Self {
        let group = Rc::new(SliderGroup::new());
        let horizontal = Rc::new(Slider::new(Orientation::Horizontal));
        let vertical = Rc::new(Slider::new(Orientation::Vertical));
        group.append(horizontal.clone());
        group.append(vertical.clone());
        Self {
            group,
            horizontal,
            vertical,
            updater: Rc::new(updater),
        }
    }

    pub fn context(&self, scales: ChannelScales, coordinate: Cartesian) -> InteractionContext {
        InteractionContext {
            container: self.group.clone(),
            scales,
            coordinate: Rc::new(coordinate),
            options: interval_spec(),
            updater: self.updater.clone(),
        }
    }
}

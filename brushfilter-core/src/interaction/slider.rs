/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Event surface of the slider widgets rendered alongside a chart.

use crate::coordinate::Orientation;
use std::cell::RefCell;
use std::rc::Rc;

/// Class name shared by all slider widgets in a chart container
pub const SLIDER_CLASS_NAME: &str = "slider";

/// Event emitted by a slider while its handles are dragged
pub const VALUE_CHANGE_EVENT: &str = "valuechange";

/// Payload of a `valuechange` event: the normalized `[start, end]` selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChangeEvent {
    pub value: [f64; 2],
}

impl ValueChangeEvent {
    pub fn new(start: f64, end: f64) -> Self {
        Self { value: [start, end] }
    }
}

pub type ValueChangeListener = Rc<dyn Fn(&ValueChangeEvent)>;

/// Whether two listeners are the same installed instance
pub fn same_listener(a: &ValueChangeListener, b: &ValueChangeListener) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

pub trait SliderElement {
    fn orientation(&self) -> Orientation;

    /// Register `listener` for `event`. Registering the same instance twice is a no-op.
    fn add_event_listener(&self, event: &str, listener: ValueChangeListener);

    /// Remove exactly the given listener instance
    fn remove_event_listener(&self, event: &str, listener: &ValueChangeListener);
}

/// Element tree hosting a chart's widgets
pub trait SliderContainer {
    fn get_elements_by_class_name(&self, class_name: &str) -> Vec<Rc<dyn SliderElement>>;
}

/// In-memory slider widget that dispatches events synchronously to its listeners
pub struct Slider {
    orientation: Orientation,
    class_names: Vec<String>,
    listeners: RefCell<Vec<(String, ValueChangeListener)>>,
}

impl Slider {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            class_names: vec![SLIDER_CLASS_NAME.to_string()],
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn with_class_names(orientation: Orientation, class_names: &[&str]) -> Self {
        Self {
            orientation,
            class_names: class_names.iter().map(|s| s.to_string()).collect(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn has_class_name(&self, class_name: &str) -> bool {
        self.class_names.iter().any(|c| c == class_name)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Invoke every listener registered for `event`
    pub fn dispatch_event(&self, event: &str, detail: &ValueChangeEvent) {
        // Listeners may detach themselves while running
        let listeners = self
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| listener.clone())
            .collect::<Vec<_>>();
        for listener in listeners {
            listener(detail);
        }
    }

    pub fn dispatch_value_change(&self, start: f64, end: f64) {
        self.dispatch_event(VALUE_CHANGE_EVENT, &ValueChangeEvent::new(start, end));
    }
}

impl SliderElement for Slider {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn add_event_listener(&self, event: &str, listener: ValueChangeListener) {
        let mut listeners = self.listeners.borrow_mut();
        let registered = listeners
            .iter()
            .any(|(name, l)| name == event && same_listener(l, &listener));
        if !registered {
            listeners.push((event.to_string(), listener));
        }
    }

    fn remove_event_listener(&self, event: &str, listener: &ValueChangeListener) {
        self.listeners
            .borrow_mut()
            .retain(|(name, l)| !(name == event && same_listener(l, listener)));
    }
}

/// Flat container of slider widgets
#[derive(Default)]
pub struct SliderGroup {
    sliders: RefCell<Vec<Rc<Slider>>>,
}

impl SliderGroup {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append(&self, slider: Rc<Slider>) {
        self.sliders.borrow_mut().push(slider);
    }

    pub fn len(&self) -> usize {
        self.sliders.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.borrow().is_empty()
    }
}

impl SliderContainer for SliderGroup {
    fn get_elements_by_class_name(&self, class_name: &str) -> Vec<Rc<dyn SliderElement>> {
        self.sliders
            .borrow()
            .iter()
            .filter(|slider| slider.has_class_name(class_name))
            .map(|slider| slider.clone() as Rc<dyn SliderElement>)
            .collect()
    }
}

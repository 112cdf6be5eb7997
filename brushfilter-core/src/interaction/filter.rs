/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
//! Slider-driven filtering of a chart's visible domain.
//!
//! All work happens on a single logical thread. Slider listeners run inside
//! the widget's event dispatch: they throttle, check the session-wide
//! `filtering` flag and, when idle, post the filtered spec to the
//! [`FilterWorker`] through a channel of depth one. Events that arrive while
//! an update is in flight are dropped, not queued.
//!
//! Sliders added to the container after [`SliderFilter::attach`] are not
//! observed.

use crate::config::SliderFilterConfig;
use crate::coordinate::{channel_of, Channel, Coordinate, Orientation};
use crate::error::Result;
use crate::interaction::slider::{
    SliderContainer, SliderElement, ValueChangeEvent, ValueChangeListener, SLIDER_CLASS_NAME,
    VALUE_CHANGE_EVENT,
};
use crate::interaction::throttle::Throttle;
use crate::scale::domain::selection_domain;
use crate::scale::{Scale, ScaleDomain};
use crate::spec::chart::ChartSpec;
use crate::spec::filter::{filter_by_domain, FilterOptions};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;

/// Re-renders the chart from a new spec
#[async_trait(?Send)]
pub trait ChartUpdater {
    async fn update(&self, spec: ChartSpec) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelScales {
    pub x: Scale,
    pub y: Scale,
}

impl ChannelScales {
    pub fn new(x: impl Into<Scale>, y: impl Into<Scale>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn get(&self, channel: Channel) -> &Scale {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
        }
    }
}

/// Currently applied filter domain of each channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDomain {
    x: ScaleDomain,
    y: ScaleDomain,
}

impl ChannelDomain {
    pub fn from_scales(scales: &ChannelScales) -> Self {
        Self {
            x: scales.x.domain(),
            y: scales.y.domain(),
        }
    }

    pub fn get(&self, channel: Channel) -> &ScaleDomain {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
        }
    }

    pub fn set(&mut self, channel: Channel, domain: ScaleDomain) {
        match channel {
            Channel::X => self.x = domain,
            Channel::Y => self.y = domain,
        }
    }
}

/// Everything the filter needs from the chart it is attached to
pub struct InteractionContext {
    pub container: Rc<dyn SliderContainer>,
    pub scales: ChannelScales,
    pub coordinate: Rc<dyn Coordinate>,
    /// Spec the chart was rendered from; never modified
    pub options: ChartSpec,
    pub updater: Rc<dyn ChartUpdater>,
}

/// A filtered spec waiting to be rendered
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub channel: Channel,
    pub spec: ChartSpec,
}

struct WidgetState {
    orientation: Orientation,
    throttle: Throttle<[f64; 2]>,
}

struct FilterState {
    filtering: bool,
    released: bool,
    channel_domain: ChannelDomain,
    widgets: Vec<WidgetState>,
    requests: Option<mpsc::Sender<FilterRequest>>,
}

struct FilterShared {
    scales: ChannelScales,
    transposed: bool,
    options: ChartSpec,
    state: RefCell<FilterState>,
    wake: Notify,
}

impl FilterShared {
    fn on_value_change(&self, widget: usize, values: [f64; 2]) {
        let fired = {
            let mut state = self.state.borrow_mut();
            match state.widgets.get_mut(widget) {
                Some(widget_state) => widget_state.throttle.call(Instant::now(), values),
                None => return,
            }
        };
        match fired {
            Some(values) => self.filter(widget, values),
            None => {
                debug!("Throttled value change on slider {widget}");
                // A trailing call may now be pending
                self.wake.notify_one();
            }
        }
    }

    fn filter(&self, widget: usize, values: [f64; 2]) {
        let mut state = self.state.borrow_mut();
        if state.filtering {
            debug!("Dropping value change on slider {widget} while an update is in flight");
            return;
        }
        let (Some(sender), Some(widget_state)) = (state.requests.clone(), state.widgets.get(widget))
        else {
            return;
        };

        let orientation = widget_state.orientation;
        let (channel0, channel1) = channel_of(orientation, self.transposed);
        let reverse = self.transposed && orientation == Orientation::Horizontal;

        let domain0 = match selection_domain(self.scales.get(channel0), values, reverse) {
            Ok(domain) => domain,
            Err(err) => {
                warn!("Failed to invert slider {widget} selection {values:?}: {err}");
                return;
            }
        };
        let domain1 = state.channel_domain.get(channel1).clone();
        let options = FilterOptions::new()
            .with_domain(channel0, domain0.clone())
            .with_domain(channel1, domain1);
        let spec = match filter_by_domain(&self.options, &options) {
            Ok(spec) => spec,
            Err(err) => {
                warn!("Failed to build filtered spec for slider {widget}: {err}");
                return;
            }
        };

        match sender.try_send(FilterRequest {
            channel: channel0,
            spec,
        }) {
            Ok(()) => {
                debug!("Filtering channel {channel0} to {domain0:?}");
                state.channel_domain.set(channel0, domain0);
                state.filtering = true;
            }
            Err(TrySendError::Full(_)) => {
                debug!("Dropping value change on slider {widget}, a request is already queued");
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Dropping value change on slider {widget}, filter worker has stopped");
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.state
            .borrow()
            .widgets
            .iter()
            .filter_map(|widget| widget.throttle.deadline())
            .min()
    }

    fn flush_trailing(&self, now: Instant) {
        let due = self
            .state
            .borrow_mut()
            .widgets
            .iter_mut()
            .enumerate()
            .filter_map(|(i, widget)| widget.throttle.take_trailing(now).map(|v| (i, v)))
            .collect::<Vec<_>>();
        for (widget, values) in due {
            self.filter(widget, values);
        }
    }

    fn finish_update(&self) {
        self.state.borrow_mut().filtering = false;
    }

    fn is_released(&self) -> bool {
        self.state.borrow().released
    }

    fn release(&self) {
        let mut state = self.state.borrow_mut();
        state.released = true;
        state.requests = None;
        state.widgets.clear();
        self.wake.notify_one();
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Single consumer that renders filtered specs one at a time
pub struct FilterWorker {
    shared: Rc<FilterShared>,
    receiver: mpsc::Receiver<FilterRequest>,
    updater: Rc<dyn ChartUpdater>,
}

impl FilterWorker {
    /// Render the next filtered spec.
    ///
    /// Waits for a slider to post a request, firing trailing throttle calls
    /// as they come due. Returns `None` once the session is detached.
    pub async fn step(&mut self) -> Option<Result<()>> {
        loop {
            if self.shared.is_released() {
                return None;
            }
            let deadline = self.shared.next_deadline();
            tokio::select! {
                biased;
                request = self.receiver.recv() => {
                    let request = request?;
                    if self.shared.is_released() {
                        return None;
                    }
                    return Some(self.apply(request).await);
                }
                _ = sleep_until_deadline(deadline) => {
                    self.shared.flush_trailing(Instant::now());
                }
                _ = self.shared.wake.notified() => {}
            }
        }
    }

    async fn apply(&self, request: FilterRequest) -> Result<()> {
        let FilterRequest { channel, spec } = request;
        let update = self.updater.update(spec);
        tokio::pin!(update);

        // Trailing calls that come due mid-update are dropped by the in-flight flag
        let result = loop {
            let deadline = self.shared.next_deadline();
            tokio::select! {
                biased;
                result = &mut update => break result,
                _ = sleep_until_deadline(deadline) => {
                    self.shared.flush_trailing(Instant::now());
                }
                _ = self.shared.wake.notified() => {}
            }
        };

        self.shared.finish_update();
        result.map_err(|err| err.with_context(|| format!("Updating chart for {channel} slider")))
    }

    /// Process requests until the session is detached, logging failed updates
    pub async fn run(mut self) {
        while let Some(result) = self.step().await {
            if let Err(err) = result {
                error!("Slider filter update failed: {err}");
            }
        }
        debug!("Slider filter worker stopped");
    }
}

/// Listener registrations owned by one attached filter
pub struct SliderFilterSession {
    shared: Option<Rc<FilterShared>>,
    listeners: Vec<(Rc<dyn SliderElement>, ValueChangeListener)>,
}

impl SliderFilterSession {
    pub fn is_attached(&self) -> bool {
        self.shared.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Domain currently applied to `channel`, `None` once detached
    pub fn channel_domain(&self, channel: Channel) -> Option<ScaleDomain> {
        self.shared
            .as_ref()
            .map(|shared| shared.state.borrow().channel_domain.get(channel).clone())
    }

    /// Whether an update is in flight
    pub fn is_filtering(&self) -> bool {
        self.shared
            .as_ref()
            .map(|shared| shared.state.borrow().filtering)
            .unwrap_or(false)
    }

    /// Remove every listener this session installed and stop its worker.
    ///
    /// Safe to call more than once.
    pub fn detach(&mut self) {
        let removed = self.listeners.len();
        for (slider, listener) in self.listeners.drain(..) {
            slider.remove_event_listener(VALUE_CHANGE_EVENT, &listener);
        }
        if let Some(shared) = self.shared.take() {
            shared.release();
            info!("Detached slider filter, removed {removed} listener(s)");
        }
    }
}

impl Drop for SliderFilterSession {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Filters a chart to the domain covered by its sliders
#[derive(Debug, Clone, Default)]
pub struct SliderFilter {
    config: SliderFilterConfig,
}

impl SliderFilter {
    pub fn new(config: SliderFilterConfig) -> Self {
        Self { config }
    }

    /// Install a `valuechange` listener on every slider in the container.
    ///
    /// The returned worker must be driven (see [`FilterWorker::run`]) for
    /// updates to reach the chart. With no sliders present the session is
    /// already detached and the worker finishes immediately.
    pub fn attach(&self, context: InteractionContext) -> (SliderFilterSession, FilterWorker) {
        let InteractionContext {
            container,
            scales,
            coordinate,
            options,
            updater,
        } = context;
        let sliders = container.get_elements_by_class_name(SLIDER_CLASS_NAME);

        let (sender, receiver) = mpsc::channel(1);
        let widgets = sliders
            .iter()
            .map(|slider| WidgetState {
                orientation: slider.orientation(),
                throttle: Throttle::from_config(&self.config),
            })
            .collect();
        let shared = Rc::new(FilterShared {
            transposed: coordinate.is_transposed(),
            state: RefCell::new(FilterState {
                filtering: false,
                released: false,
                channel_domain: ChannelDomain::from_scales(&scales),
                widgets,
                requests: Some(sender),
            }),
            scales,
            options,
            wake: Notify::new(),
        });

        let worker = FilterWorker {
            shared: shared.clone(),
            receiver,
            updater,
        };
        let mut session = SliderFilterSession {
            shared: Some(shared.clone()),
            listeners: Vec::with_capacity(sliders.len()),
        };

        if sliders.is_empty() {
            info!("No sliders found, slider filter is inactive");
            session.detach();
            return (session, worker);
        }

        for (index, slider) in sliders.into_iter().enumerate() {
            let handler = shared.clone();
            let listener: ValueChangeListener = Rc::new(move |event: &ValueChangeEvent| {
                handler.on_value_change(index, event.value)
            });
            slider.add_event_listener(VALUE_CHANGE_EVENT, listener.clone());
            session.listeners.push((slider, listener));
        }
        info!(
            "Attached slider filter to {} slider(s) (wait={}ms, leading={}, trailing={})",
            session.listeners.len(),
            self.config.wait,
            self.config.leading,
            self.config.trailing
        );
        (session, worker)
    }
}

/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
pub mod config;
pub mod coordinate;
pub mod error;
pub mod interaction;
pub mod scale;
pub mod selection;
pub mod spec;

pub use config::SliderFilterConfig;
pub use coordinate::{Cartesian, Channel, Coordinate, Orientation};
pub use interaction::filter::{
    ChannelDomain, ChannelScales, ChartUpdater, FilterWorker, InteractionContext, SliderFilter,
    SliderFilterSession,
};
pub use scale::{DomainValue, Scale, ScaleDomain};
pub use spec::chart::ChartSpec;

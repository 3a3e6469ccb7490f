//! Tracking of the visible map area.
//!
//! A map widget reports two kinds of change: continuous panning, which only moves the center,
//! and discrete zoom steps, after which the search radius is derived again from the visible
//! bounds. Interested parties subscribe a listener and receive `ViewportEvent`s.

use log::debug;

use crate::types::{Bounds, Coordinate};
use crate::util::distance;

/// Fraction of half the shorter viewport side used as the radius, so the circle stays visible.
pub const RADIUS_MARGIN: f64 = 0.8;

/// Largest radius in meters that fits inside the given viewport with a 20% margin.
pub fn min_radius(bounds: &Bounds) -> f64 {
    let nw = bounds.north_west();
    let width = distance(nw, bounds.north_east());
    let height = distance(nw, bounds.south_west());
    RADIUS_MARGIN * f64::min(width, height) / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// The map center moved to this coordinate.
    Center(Coordinate),
    /// A new radius in meters was derived from the viewport.
    Radius(f64),
    /// The map finished zooming to this level.
    Zoom(f64),
}

type Listener<'a> = Box<dyn FnMut(&ViewportEvent) + 'a>;

/// Translates map widget callbacks into `ViewportEvent`s for registered listeners.
#[derive(Default)]
pub struct ViewportTracker<'a> {
    listeners: Vec<Listener<'a>>,
}

impl<'a> ViewportTracker<'a> {
    pub fn new() -> ViewportTracker<'a> {
        ViewportTracker { listeners: Vec::new() }
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn subscribe<F: FnMut(&ViewportEvent) + 'a>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: ViewportEvent) {
        debug!("viewport event {:?}", event);
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Map was mounted with its initial bounds.
    pub fn ready(&mut self, bounds: &Bounds) {
        self.emit(ViewportEvent::Radius(min_radius(bounds)));
    }

    /// Map is panning; only the center changes.
    pub fn moved(&mut self, center: Coordinate) {
        self.emit(ViewportEvent::Center(center));
    }

    /// Map finished a zoom step. Radius is derived from the new bounds before the zoom level is
    /// reported.
    pub fn zoom_ended(&mut self, bounds: &Bounds, zoom: f64) {
        self.emit(ViewportEvent::Radius(min_radius(bounds)));
        self.emit(ViewportEvent::Zoom(zoom));
    }
}

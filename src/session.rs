use std::time::Instant;

use url::Url;

use log::{debug, info};

use crate::config::Config;
use crate::dataset::AreaDataset;
use crate::error::SearchError;
use crate::search_url::SearchUrl;
use crate::select::select;
use crate::types::{Area, Coordinate, Mode};
use crate::url_state::{DeferredWrite, UrlState};
use crate::viewport::ViewportEvent;

/// What the user has chosen on the map and in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub center: Coordinate,
    /// Meters, positive.
    pub radius: f64,
    pub mode: Mode,
    pub search_terms: String,
}

impl SelectionState {
    pub fn from_config(config: &Config) -> SelectionState {
        SelectionState {
            center: config.default_center,
            radius: config.default_radius_m,
            mode: Mode::default(),
            search_terms: String::new(),
        }
    }
}

/// Selection over a loaded dataset. Selected areas and the destination are recomputed from the
/// state on every call; nothing derived is stored.
pub struct Session<'a> {
    dataset: &'a AreaDataset,
    config: Config,
    state: SelectionState,
    zoom: f64,
    center_from_url: bool,
    url_write: DeferredWrite<(Coordinate, f64)>,
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a AreaDataset, config: Config) -> Session<'a> {
        let state = SelectionState::from_config(&config);
        let zoom = config.default_zoom;
        let url_write = DeferredWrite::new(config.url_write_delay());
        Session { dataset, config, state, zoom, center_from_url: false, url_write }
    }

    /// Seed center and zoom from values found in the page url.
    pub fn with_initial_view(mut self, center: Option<Coordinate>, zoom: Option<f64>) -> Session<'a> {
        if let Some(center) = center {
            self.state.center = center;
            self.center_from_url = true;
        }
        if let Some(zoom) = zoom {
            self.zoom = zoom;
        }
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn view_changed(&mut self) {
        self.url_write.schedule((self.state.center, self.zoom), Instant::now());
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.state.center = center;
        self.view_changed();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.view_changed();
    }

    /// Non-positive radii are ignored.
    pub fn set_radius(&mut self, radius: f64) {
        if radius > 0.0 {
            self.state.radius = radius;
        } else {
            debug!("ignoring non-positive radius {}", radius);
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
    }

    pub fn set_search_terms<S: Into<String>>(&mut self, terms: S) {
        self.state.search_terms = terms.into();
    }

    /// Feed a map event into the state.
    pub fn apply_viewport_event(&mut self, event: &ViewportEvent) {
        match *event {
            ViewportEvent::Center(c) => self.set_center(c),
            ViewportEvent::Radius(r) => self.set_radius(r),
            ViewportEvent::Zoom(z) => self.set_zoom(z),
        }
    }

    /// Only ask for the device location when the url did not already place the map.
    pub fn wants_geolocation(&self) -> bool {
        !self.center_from_url
    }

    /// Result of the one-shot location request. `None` means denied or unavailable, and the
    /// current center is kept.
    pub fn geolocated(&mut self, position: Option<Coordinate>) {
        match position {
            Some(c) => {
                info!("recentering on device location {}", c);
                self.set_center(c);
            }
            None => debug!("no device location, keeping {}", self.state.center),
        }
    }

    /// Page url carrying the current view, once the map has been still for the configured delay.
    pub fn poll_url_write(&mut self, page_url: &Url, now: Instant) -> Option<Url> {
        self.url_write
            .poll(now)
            .map(|(center, zoom)| UrlState::write_back(page_url, center, zoom))
    }

    pub fn selected(&self) -> Vec<&'a Area> {
        let dataset: &'a AreaDataset = self.dataset;
        select(dataset, self.state.center, self.state.radius, self.state.mode)
    }

    pub fn destination(&self) -> SearchUrl {
        SearchUrl::build_with_base(&self.config.search_base,
                                   &self.state.search_terms,
                                   &self.selected())
    }

    /// The destination if it can be submitted.
    pub fn status(&self) -> Result<SearchUrl, SearchError> {
        let url = self.destination();
        url.validate(self.config.max_url_length, self.config.strict)?;
        Ok(url)
    }

    /// Url to navigate to on submit, or the reason submission is disabled.
    pub fn submit(&self) -> Result<String, SearchError> {
        let url = self.status()?;
        info!("submitting search for {} areas", url.area_count());
        Ok(url.as_str().to_owned())
    }
}

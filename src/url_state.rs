//! Map position kept in the page url, so a reload or a shared link shows the same view.

use std::time::{Duration, Instant};

use log::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::Coordinate;

const VIEW_KEYS: [&str; 3] = ["lat", "lon", "zoom"];

/// Center and zoom read from `lat`, `lon` and `zoom` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UrlState {
    /// Present only when both `lat` and `lon` parse as numbers.
    pub center: Option<Coordinate>,
    pub zoom: Option<f64>,
}

/// First value of `name` as a number. Blank values count as missing.
fn number(url: &Url, name: &str) -> Option<f64> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| {
            let v = v.trim();
            if v.is_empty() { None } else { v.parse().ok() }
        })
}

impl UrlState {
    pub fn parse(url: &str) -> Result<UrlState> {
        let url = Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_owned()))?;
        Ok(UrlState::from_url(&url))
    }

    pub fn from_url(url: &Url) -> UrlState {
        let center = match (number(url, "lat"), number(url, "lon")) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };
        UrlState { center, zoom: number(url, "zoom") }
    }

    /// Return `url` with `lat`, `lon` and `zoom` set to the given view. Other parameters and
    /// the fragment are kept; existing view parameters are replaced in place and repeats dropped.
    pub fn write_back(url: &Url, center: Coordinate, zoom: f64) -> Url {
        let mut values = vec![("lat", center.lat.to_string()),
                              ("lon", center.lon.to_string()),
                              ("zoom", zoom.to_string())];
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (key, value) in url.query_pairs() {
            match values.iter().position(|&(k, _)| k == key) {
                Some(i) => {
                    let (k, v) = values.remove(i);
                    pairs.push((k.to_owned(), v));
                }
                None if VIEW_KEYS.iter().any(|&k| k == key) => (),
                None => pairs.push((key.into_owned(), value.into_owned())),
            }
        }
        pairs.extend(values.into_iter().map(|(k, v)| (k.to_owned(), v)));

        let mut url = url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url
    }
}

/// Debounced write: a value waits until `delay` has passed without a newer value being
/// scheduled. At most one write is pending.
#[derive(Debug, Clone)]
pub struct DeferredWrite<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> DeferredWrite<T> {
    pub fn new(delay: Duration) -> DeferredWrite<T> {
        DeferredWrite { delay, pending: None }
    }

    /// Replace any pending value and restart the timer.
    pub fn schedule(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            debug!("replacing pending url write");
        }
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value if its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if now >= due => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without writing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn parses_view() {
        let s = UrlState::parse("https://example.fi/?lat=60.2&lon=24.9&zoom=12").unwrap();
        assert_eq!(s.center, Some(Coordinate::new(60.2, 24.9)));
        assert_eq!(s.zoom, Some(12.0));
    }

    #[test]
    fn center_needs_both_halves() {
        let s = UrlState::parse("https://example.fi/?lat=60.2&zoom=12").unwrap();
        assert_eq!(s.center, None);
        assert_eq!(s.zoom, Some(12.0));
        assert_eq!(UrlState::parse("https://example.fi/?lat=60.2&lon=x").unwrap().center, None);
        assert_eq!(UrlState::parse("https://example.fi/").unwrap(), UrlState::default());
    }

    #[test]
    fn decodes_form_encoded_values() {
        let s = UrlState::parse("https://example.fi/?lat=%2060.2&lon=24.9+&zoom=+12&lat=1").unwrap();
        assert_eq!(s.center, Some(Coordinate::new(60.2, 24.9)));
        assert_eq!(s.zoom, Some(12.0));
    }

    #[test]
    fn rejects_unparseable_url() {
        match UrlState::parse("not a url") {
            Err(Error::InvalidUrl(url)) => assert_eq!(url, "not a url"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn writes_and_replaces_params() {
        let url = UrlState::write_back(&page("https://example.fi/"), Coordinate::new(60.17952, 24.93545), 13.0);
        assert_eq!(url.as_str(), "https://example.fi/?lat=60.17952&lon=24.93545&zoom=13");

        let url = UrlState::write_back(&page("https://example.fi/?zoom=3&x=1&lat=1&zoom=4#map"),
                                       Coordinate::new(61.5, 23.75),
                                       9.0);
        assert_eq!(url.as_str(), "https://example.fi/?zoom=9&x=1&lat=61.5&lon=23.75#map");
        assert_eq!(UrlState::from_url(&url).center, Some(Coordinate::new(61.5, 23.75)));
    }

    #[test]
    fn keeps_other_params_readable() {
        let url = UrlState::write_back(&page("https://example.fi/?q=sohva+tuoli&x=a%26b"),
                                       Coordinate::new(60.2, 24.9),
                                       12.0);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_owned(), "sohva tuoli".to_owned()));
        assert_eq!(pairs[1], ("x".to_owned(), "a&b".to_owned()));
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn debounce_keeps_one_pending_value() {
        let start = Instant::now();
        let mut w = DeferredWrite::new(Duration::from_millis(1000));
        assert_eq!(w.poll(start), None);
        w.schedule(1, start);
        w.schedule(2, start + Duration::from_millis(600));
        assert_eq!(w.poll(start + Duration::from_millis(1000)), None);
        assert_eq!(w.poll(start + Duration::from_millis(1600)), Some(2));
        assert!(!w.is_pending());
        assert_eq!(w.poll(start + Duration::from_millis(5000)), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let now = Instant::now();
        let mut w = DeferredWrite::new(Duration::from_millis(10));
        w.schedule("x", now);
        assert_eq!(w.cancel(), Some("x"));
        assert_eq!(w.poll(now + Duration::from_secs(1)), None);
    }
}

use std::fmt;

use log::warn;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, SearchError};
use crate::types::Area;

pub const DEFAULT_SEARCH_BASE: &str = "https://www.tori.fi/koko_suomi";

/// Past this length tori.fi redirects to its front page instead of searching.
pub const MAX_URL_LENGTH: usize = 764;

/// Separator between postal codes in the search text.
pub const CODE_SEPARATOR: &str = " OR ";

/// Query parameters after `q` that restrict the search to all categories, the whole country.
const FIXED_PARAMS: &str = "&cg=0&w=3";

/// Characters left alone by `encodeURIComponent`: alphanumerics and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A tori.fi search destination for a set of postal-code areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrl {
    url: String,
    area_count: usize,
}

impl SearchUrl {
    /// Build against the default tori.fi base.
    pub fn build(search_terms: &str, areas: &[&Area]) -> SearchUrl {
        SearchUrl::build_with_base(DEFAULT_SEARCH_BASE, search_terms, areas)
    }

    /// Build the url `{base}?q={terms} {code} OR {code}...&cg=0&w=3` with the query encoded.
    pub fn build_with_base(base: &str, search_terms: &str, areas: &[&Area]) -> SearchUrl {
        let codes = areas.iter().map(|a| a.code.as_str()).collect::<Vec<_>>().join(CODE_SEPARATOR);
        let text = format!("{} {}", search_terms, codes);
        let url = format!("{}?q={}{}",
                          base,
                          utf8_percent_encode(&text, QUERY_COMPONENT),
                          FIXED_PARAMS);
        SearchUrl { url, area_count: areas.len() }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    pub fn area_count(&self) -> usize {
        self.area_count
    }

    /// Check the url is usable. Length is checked first; an empty selection is only an error when
    /// `strict` is set.
    pub fn validate(&self, max_length: usize, strict: bool) -> Result<(), SearchError> {
        if self.len() > max_length {
            warn!("search url of {} characters exceeds {}", self.len(), max_length);
            return Err(SearchError::OversizedQuery { length: self.len(), max: max_length });
        }
        if strict && self.area_count == 0 {
            warn!("search has no postal-code areas");
            return Err(SearchError::EmptySelection);
        }
        Ok(())
    }

    /// Recover the free text and the postal codes from the url.
    pub fn decode(&self) -> Result<DecodedQuery, Error> {
        decode_query(&self.url)
    }
}

impl fmt::Display for SearchUrl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for SearchUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// The parts of a search url's `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQuery {
    pub search_terms: String,
    pub codes: Vec<String>,
}

/// Split the `q` parameter of a search url back into free text and ordered postal codes.
/// The free text is everything before the last space ahead of the first code.
pub fn decode_query(url: &str) -> Result<DecodedQuery, Error> {
    let invalid = || Error::InvalidUrl(url.to_owned());
    let query = url.splitn(2, '?').nth(1).ok_or_else(invalid)?;
    let encoded = query.split('&')
        .find_map(|pair| pair.strip_prefix("q="))
        .ok_or_else(invalid)?;
    let text = percent_decode_str(encoded).decode_utf8().map_err(|_| invalid())?;

    let (search_terms, joined) = match text.find(CODE_SEPARATOR) {
        Some(first_sep) => {
            let split = text[..first_sep].rfind(' ').ok_or_else(invalid)?;
            (&text[..split], &text[split + 1..])
        }
        None => {
            let split = text.rfind(' ').ok_or_else(invalid)?;
            (&text[..split], &text[split + 1..])
        }
    };
    let codes = if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(CODE_SEPARATOR).map(|c| c.to_owned()).collect()
    };
    Ok(DecodedQuery { search_terms: search_terms.to_owned(), codes })
}

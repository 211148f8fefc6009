//! Rate area resolution
//!
//! A location resolves to a single (state, rate area) pair when every row
//! for it agrees on the rate area. Rows that disagree make the location
//! ambiguous, which is reported but not fatal. A location with no rows at
//! all is an error.
//!
//! When the rows span more than one state, the first state seen is used to
//! match plans and the others are ignored, even if the rate area actually
//! belongs to one of them. This is reported as a [`RateEvent::MultiStateSpan`].

use super::{Granularity, Location, ResolvedArea};
use crate::error::{Result, SlcspError};
use crate::events::{RateEvent, RateObserver};

/// Resolve `identifier` against the location table
pub fn resolve(
    identifier: &str,
    granularity: Granularity,
    locations: &[Location],
    observer: &dyn RateObserver,
) -> Result<ResolvedArea> {
    let matching: Vec<&Location> = locations
        .iter()
        .filter(|loc| granularity.key(loc) == identifier)
        .collect();

    let first = match matching.first() {
        Some(first) => *first,
        None => {
            return Err(SlcspError::LocationNotFound {
                identifier: identifier.to_string(),
                granularity,
            })
        }
    };

    let rate_areas = distinct_in_order(matching.iter().map(|loc| loc.rate_area));
    if rate_areas.len() > 1 {
        observer.observe(RateEvent::AmbiguousRateArea {
            identifier: identifier.to_string(),
            rate_areas,
        });
        return Ok(ResolvedArea::Ambiguous);
    }

    let states = distinct_in_order(matching.iter().map(|loc| loc.state.clone()));
    if states.len() > 1 {
        observer.observe(RateEvent::MultiStateSpan {
            identifier: identifier.to_string(),
            states,
            used_state: first.state.clone(),
        });
    }

    Ok(ResolvedArea::Definite {
        state: first.state.clone(),
        rate_area: first.rate_area,
    })
}

/// Distinct values, keeping the order of first appearance
fn distinct_in_order<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

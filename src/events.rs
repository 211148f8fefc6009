//! Non-fatal conditions raised during resolution and rate calculation
//!
//! The resolver and calculator never log directly; they report to a
//! [`RateObserver`] supplied by the caller. [`LogObserver`] forwards to the
//! `log` facade and is what the binary uses.

use log::info;

/// A condition that leaves the run going but is worth reporting
#[derive(Debug, Clone, PartialEq)]
pub enum RateEvent {
    /// The location maps to more than one rate area; its SLCSP is undefined
    AmbiguousRateArea {
        identifier: String,
        rate_areas: Vec<u32>,
    },
    /// The location spans several states; only `used_state` is matched against plans
    MultiStateSpan {
        identifier: String,
        states: Vec<String>,
        used_state: String,
    },
    /// Fewer than two distinct Silver rates in the rate area
    InsufficientRates {
        state: String,
        rate_area: u32,
        distinct_rates: usize,
    },
}

/// Receives [`RateEvent`]s. Must be `Sync`: locations are processed in parallel.
pub trait RateObserver: Sync {
    fn observe(&self, event: RateEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RateObserver for LogObserver {
    fn observe(&self, event: RateEvent) {
        match event {
            RateEvent::AmbiguousRateArea { identifier, rate_areas } => {
                info!(
                    "{}: more than one rate area matches ({:?}); SLCSP is ambiguous",
                    identifier, rate_areas
                );
            }
            RateEvent::MultiStateSpan { identifier, states, used_state } => {
                info!(
                    "{}: spans more than one state ({}); using {}",
                    identifier,
                    states.join(", "),
                    used_state
                );
            }
            RateEvent::InsufficientRates { state, rate_area, distinct_rates } => {
                info!(
                    "{} rate area {}: {} distinct Silver rate(s), not enough to define a second lowest",
                    state, rate_area, distinct_rates
                );
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RateObserver for NullObserver {
    fn observe(&self, _event: RateEvent) {}
}

//! Second lowest cost Silver plan calculation

use std::fmt;

use crate::events::{RateEvent, RateObserver};
use crate::location::ResolvedArea;
use crate::plan::Plan;

/// SLCSP for one location
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateResult {
    Rate(f64),
    /// Ambiguous rate area, or fewer than two distinct Silver rates
    Undefined,
}

impl RateResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            RateResult::Rate(r) => Some(*r),
            RateResult::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RateResult::Rate(_))
    }
}

/// Two decimal places, or empty when undefined
impl fmt::Display for RateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateResult::Rate(r) => write!(f, "{:.2}", r),
            RateResult::Undefined => Ok(()),
        }
    }
}

/// Second-smallest distinct Silver rate in `state`'s `rate_area`.
///
/// Rates are deduplicated by value before ranking, so several plans at the
/// lowest price count once: `[197.3, 197.3, 201.1]` gives `201.1`.
/// Plans with a blank or non-finite rate are left out.
pub fn compute_slcsp(
    state: &str,
    rate_area: u32,
    plans: &[Plan],
    observer: &dyn RateObserver,
) -> RateResult {
    let mut rates: Vec<f64> = plans
        .iter()
        .filter(|p| p.is_silver_in(state, rate_area))
        .filter_map(Plan::priced_rate)
        .collect();
    rates.sort_by(f64::total_cmp);
    rates.dedup();

    match rates.get(1) {
        Some(&second) => RateResult::Rate(second),
        None => {
            observer.observe(RateEvent::InsufficientRates {
                state: state.to_string(),
                rate_area,
                distinct_rates: rates.len(),
            });
            RateResult::Undefined
        }
    }
}

/// SLCSP for a resolved location. Ambiguous locations are undefined without
/// consulting the plans.
pub fn rate_for_area(area: &ResolvedArea, plans: &[Plan], observer: &dyn RateObserver) -> RateResult {
    match area {
        ResolvedArea::Definite { state, rate_area } => compute_slcsp(state, *rate_area, plans, observer),
        ResolvedArea::Ambiguous => RateResult::Undefined,
    }
}

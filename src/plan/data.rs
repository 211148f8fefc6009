//! Plan table rows

use serde::Deserialize;

/// Plan metal level. Only Silver takes part in the SLCSP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum MetalLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Catastrophic,
    Other(String),
}

impl From<String> for MetalLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Bronze" => MetalLevel::Bronze,
            "Silver" => MetalLevel::Silver,
            "Gold" => MetalLevel::Gold,
            "Platinum" => MetalLevel::Platinum,
            "Catastrophic" => MetalLevel::Catastrophic,
            _ => MetalLevel::Other(s),
        }
    }
}

/// One row of the plan table (plans.csv)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plan {
    pub plan_id: String,
    pub state: String,
    pub metal_level: MetalLevel,
    /// Monthly premium; blank cells load as `None`
    pub rate: Option<f64>,
    pub rate_area: u32,
}

impl Plan {
    /// The premium, if present and finite
    pub fn priced_rate(&self) -> Option<f64> {
        self.rate.filter(|r| r.is_finite())
    }

    /// True if this plan is a Silver plan offered in `state`'s `rate_area`.
    /// Rate area numbers repeat across states, so both must match.
    pub fn is_silver_in(&self, state: &str, rate_area: u32) -> bool {
        self.metal_level == MetalLevel::Silver && self.state == state && self.rate_area == rate_area
    }
}

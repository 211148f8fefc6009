//! Location table rows and resolution outcomes

use serde::Deserialize;
use std::fmt;

/// One row of the location reference table (zips.csv).
///
/// A ZIP code can appear on several rows when it straddles counties or
/// rate areas, so neither `zipcode` nor `county_code` is a key on its own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub zipcode: String,
    pub state: String,
    /// FIPS county code
    pub county_code: String,
    pub name: String,
    pub rate_area: u32,
}

/// Which column of the location table identifies a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Granularity {
    #[default]
    Zip,
    County,
}

impl Granularity {
    /// The identifier of `location` at this granularity
    pub fn key<'a>(&self, location: &'a Location) -> &'a str {
        match self {
            Granularity::Zip => &location.zipcode,
            Granularity::County => &location.county_code,
        }
    }

    /// Header of the identifier column in output tables
    pub fn column(&self) -> &'static str {
        match self {
            Granularity::Zip => "zipcode",
            Granularity::County => "county_code",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Zip => write!(f, "ZIP code"),
            Granularity::County => write!(f, "county"),
        }
    }
}

/// Outcome of resolving a location that has at least one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedArea {
    /// A single rate area; `state` is the first state seen for the location
    Definite { state: String, rate_area: u32 },
    /// Rows disagree on the rate area
    Ambiguous,
}

/// One row of the requested-locations table (slcsp.csv).
///
/// The `rate` column is read and discarded; results are written to a fresh table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestedLocation {
    pub zipcode: String,
    #[serde(default)]
    pub rate: Option<String>,
}

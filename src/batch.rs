//! Batch processing: resolve and price every requested location
//!
//! Two modes, selected by [`Granularity`]:
//! - ZIP mode prices the ZIP codes listed in the requested-locations table
//! - County mode prices every distinct county in the location table
//!
//! A location missing from the reference table aborts the whole batch.
//! Ambiguous or under-supplied locations are reported to the observer and
//! come out with an undefined rate.

use std::io::Write;
use std::path::PathBuf;

use log::info;
use rayon::prelude::*;

use crate::error::{Result, SlcspError};
use crate::events::RateObserver;
use crate::location::{self, resolve, Granularity, Location, RequestedLocation};
use crate::plan::{self, Plan};
use crate::rates::{rate_for_area, RateResult};

/// Parameters for a batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Whether locations are ZIP codes or county codes
    pub granularity: Granularity,

    /// Price locations on the rayon thread pool
    /// Default: true
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Zip,
            parallel: true,
        }
    }
}

/// Locations of the three input tables
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub requested: PathBuf,
    pub plans: PathBuf,
    pub locations: PathBuf,
}

impl DataFiles {
    /// The fixed sample data layout, relative to the working directory
    pub fn sample_data() -> Self {
        Self {
            requested: PathBuf::from("sample_data/slcsp.csv"),
            plans: PathBuf::from("sample_data/plans.csv"),
            locations: PathBuf::from("sample_data/zips.csv"),
        }
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::sample_data()
    }
}

/// One row of the result table
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub identifier: String,
    pub rate: RateResult,
}

/// Price the ZIP codes in `requested`, one row per distinct ZIP in the
/// order they first appear.
pub fn process_requested(
    requested: &[RequestedLocation],
    plans: &[Plan],
    locations: &[Location],
    config: &RunConfig,
    observer: &dyn RateObserver,
) -> Result<Vec<RateRow>> {
    let zips = distinct_identifiers(requested.iter().map(|r| r.zipcode.as_str()));
    info!("Pricing {} requested ZIP codes", zips.len());
    price_all(&zips, Granularity::Zip, plans, locations, config, observer)
}

/// Price every distinct county in the location table, in the order they
/// first appear.
pub fn process_all_counties(
    plans: &[Plan],
    locations: &[Location],
    config: &RunConfig,
    observer: &dyn RateObserver,
) -> Result<Vec<RateRow>> {
    let counties = distinct_identifiers(locations.iter().map(|l| l.county_code.as_str()));
    info!("Pricing all {} counties", counties.len());
    price_all(&counties, Granularity::County, plans, locations, config, observer)
}

/// Load the input tables, price locations per `config`, and write the
/// result table as CSV to `out`.
pub fn run<W: Write>(
    files: &DataFiles,
    config: &RunConfig,
    observer: &dyn RateObserver,
    out: W,
) -> Result<Vec<RateRow>> {
    let plans = plan::load_plans(&files.plans)?;
    let locations = location::load_locations(&files.locations)?;

    let rows = match config.granularity {
        Granularity::Zip => {
            let requested = location::load_requested(&files.requested)?;
            process_requested(&requested, &plans, &locations, config, observer)?
        }
        Granularity::County => process_all_counties(&plans, &locations, config, observer)?,
    };

    write_results(&rows, config.granularity, out)?;
    Ok(rows)
}

/// Write `rows` as CSV with an `<identifier column>,rate` header
pub fn write_results<W: Write>(rows: &[RateRow], granularity: Granularity, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([granularity.column(), "rate"])
        .map_err(SlcspError::Output)?;
    for row in rows {
        wtr.write_record([row.identifier.as_str(), row.rate.to_string().as_str()])
            .map_err(SlcspError::Output)?;
    }
    wtr.flush().map_err(|e| SlcspError::Output(e.into()))?;
    Ok(())
}

fn price_all(
    identifiers: &[String],
    granularity: Granularity,
    plans: &[Plan],
    locations: &[Location],
    config: &RunConfig,
    observer: &dyn RateObserver,
) -> Result<Vec<RateRow>> {
    let price_one = |identifier: &String| -> Result<RateRow> {
        let area = resolve(identifier, granularity, locations, observer)?;
        Ok(RateRow {
            identifier: identifier.clone(),
            rate: rate_for_area(&area, plans, observer),
        })
    };

    let rows: Vec<RateRow> = if config.parallel {
        identifiers.par_iter().map(&price_one).collect::<Result<_>>()?
    } else {
        identifiers.iter().map(&price_one).collect::<Result<_>>()?
    };

    let defined = rows.iter().filter(|r| r.rate.is_defined()).count();
    info!(
        "Priced {} locations: {} with an SLCSP, {} undefined",
        rows.len(),
        defined,
        rows.len() - defined
    );
    Ok(rows)
}

fn distinct_identifiers<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::testing::RecordingObserver;
    use crate::events::{NullObserver, RateEvent};
    use crate::plan::MetalLevel;
    use approx::assert_relative_eq;

    fn loc(zip: &str, state: &str, county: &str, name: &str, rate_area: u32) -> Location {
        Location {
            zipcode: zip.to_string(),
            state: state.to_string(),
            county_code: county.to_string(),
            name: name.to_string(),
            rate_area,
        }
    }

    fn silver(id: &str, state: &str, rate: f64, rate_area: u32) -> Plan {
        Plan {
            plan_id: id.to_string(),
            state: state.to_string(),
            metal_level: MetalLevel::Silver,
            rate: Some(rate),
            rate_area,
        }
    }

    fn requested(zips: &[&str]) -> Vec<RequestedLocation> {
        zips.iter()
            .map(|z| RequestedLocation { zipcode: z.to_string(), rate: None })
            .collect()
    }

    fn zips() -> Vec<Location> {
        vec![
            loc("64148", "MO", "29095", "Jackson", 3),
            loc("40813", "KY", "21013", "Bell", 8),
            loc("54923", "WI", "55139", "Winnebago", 15),
        ]
    }

    fn plans() -> Vec<Plan> {
        let mo = [
            ("78421VV7272023", 290.05),
            ("35866RG6997149", 234.6),
            ("28850TB6621800", 265.82),
            ("53546TY7687603", 251.08),
            ("26631YR3384683", 351.6),
            ("03665WJ8941702", 312.06),
            ("02345TB1383341", 245.2),
            ("40205HK1927400", 265.25),
            ("57237RP9645446", 253.65),
            ("64618UJ3132146", 319.57),
            ("43868JA2737085", 271.64),
            ("44945VH6426537", 298.87),
            ("39063JC7040427", 341.24),
        ];
        let mut plans: Vec<Plan> = mo.iter().map(|&(id, r)| silver(id, "MO", r, 3)).collect();
        plans.push(silver("23018XQ8604367", "WI", 326.7, 15));
        plans.push(silver("28341FR8516247", "WI", 410.74, 15));
        plans
    }

    #[test]
    fn test_basic() {
        let rows = process_requested(
            &requested(&["64148", "40813", "54923"]),
            &plans(),
            &zips(),
            &RunConfig::default(),
            &NullObserver,
        )
        .expect("batch failed");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].identifier, "64148");
        assert_relative_eq!(rows[0].rate.value().unwrap(), 245.2);
        // No plans at all for KY area 8
        assert_eq!(rows[1].rate, RateResult::Undefined);
        assert_relative_eq!(rows[2].rate.value().unwrap(), 410.74);
    }

    #[test]
    fn test_multiple_rate_area() {
        let mut locations = zips();
        locations.push(loc("54923", "WI", "55047", "Green Lake", 15));
        locations.push(loc("54923", "WI", "55137", "Waushara", 11));
        let observer = RecordingObserver::default();

        let rows = process_requested(
            &requested(&["64148", "40813", "54923"]),
            &plans(),
            &locations,
            &RunConfig::default(),
            &observer,
        )
        .expect("batch failed");

        assert_relative_eq!(rows[0].rate.value().unwrap(), 245.2);
        assert_eq!(rows[2].rate, RateResult::Undefined);
        assert!(observer.events().contains(&RateEvent::AmbiguousRateArea {
            identifier: "54923".to_string(),
            rate_areas: vec![15, 11],
        }));
    }

    #[test]
    fn test_no_rate_area_aborts_batch() {
        let result = process_requested(
            &requested(&["64148", "40813", "99999"]),
            &plans(),
            &zips(),
            &RunConfig::default(),
            &NullObserver,
        );

        assert!(matches!(
            result,
            Err(SlcspError::LocationNotFound { ref identifier, .. }) if identifier == "99999"
        ));
    }

    #[test]
    fn test_duplicate_requests_collapse() {
        let rows = process_requested(
            &requested(&["54923", "64148", "54923"]),
            &plans(),
            &zips(),
            &RunConfig::default(),
            &NullObserver,
        )
        .expect("batch failed");

        let ids: Vec<&str> = rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["54923", "64148"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let req = requested(&["64148", "40813", "54923"]);
        let sequential = RunConfig { parallel: false, ..Default::default() };

        let a = process_requested(&req, &plans(), &zips(), &RunConfig::default(), &NullObserver).unwrap();
        let b = process_requested(&req, &plans(), &zips(), &sequential, &NullObserver).unwrap();
        let c = process_requested(&req, &plans(), &zips(), &RunConfig::default(), &NullObserver).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_all_counties() {
        let mut locations = zips();
        // Second ZIP in Jackson county, same rate area
        locations.push(loc("64030", "MO", "29095", "Jackson", 3));

        let rows = process_all_counties(&plans(), &locations, &RunConfig::default(), &NullObserver)
            .expect("batch failed");

        let ids: Vec<&str> = rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["29095", "21013", "55139"]);
        assert_relative_eq!(rows[0].rate.value().unwrap(), 245.2);
        assert_relative_eq!(rows[2].rate.value().unwrap(), 410.74);
    }

    #[test]
    fn test_write_results() {
        let rows = vec![
            RateRow { identifier: "64148".to_string(), rate: RateResult::Rate(245.2) },
            RateRow { identifier: "40813".to_string(), rate: RateResult::Undefined },
        ];
        let mut out = Vec::new();
        write_results(&rows, Granularity::Zip, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "zipcode,rate\n64148,245.20\n40813,\n");
    }

    #[test]
    fn test_county_header() {
        let mut out = Vec::new();
        write_results(&[], Granularity::County, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "county_code,rate\n");
    }

    #[test]
    fn test_multi_state_zip_prices_first_state_only() {
        // 52601 straddles IA and IL in rate area 2; Silver plans exist only on the IL side
        let locations = vec![
            loc("52601", "IA", "19057", "Des Moines", 2),
            loc("52601", "IL", "17071", "Henderson", 2),
        ];
        let plans = vec![
            silver("IL-A", "IL", 280.0, 2),
            silver("IL-B", "IL", 290.0, 2),
        ];
        let observer = RecordingObserver::default();

        let rows = process_requested(&requested(&["52601"]), &plans, &locations, &RunConfig::default(), &observer)
            .expect("batch failed");

        assert_eq!(rows[0].rate, RateResult::Undefined);
        assert_eq!(
            observer.events(),
            vec![
                RateEvent::MultiStateSpan {
                    identifier: "52601".to_string(),
                    states: vec!["IA".to_string(), "IL".to_string()],
                    used_state: "IA".to_string(),
                },
                RateEvent::InsufficientRates {
                    state: "IA".to_string(),
                    rate_area: 2,
                    distinct_rates: 0,
                },
            ]
        );
    }
}

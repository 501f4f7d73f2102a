/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::collections::HashMap;
use chrono::{DateTime,Utc};
use uom::si::length::kilometer;
use lsat_common::{
    cartesian3::Cartesian3, cartographic::Cartographic,
    datetime::{minutes, hours, days, secs, parse_datetime},
    frames::{ecef_to_teme, gmst},
    geo::GeoCoordinate,
    uom::kilometers,
};
use lsat_orbital::{
    errors::{LsatOrbitalError, Result},
    load_config,
    overpass::{PassPrediction, SearchConfig},
    propagator::{ElementDecoder, Propagator},
    tle_catalog::{FileTleSource, OrbitalElementSet},
    tracker::*,
};

// run with "cargo test -p lsat_orbital --test test_tracker -- --nocapture"

fn t0()->DateTime<Utc> { parse_datetime("2025-10-17T12:00:00Z").unwrap() }

fn halifax()->GeoCoordinate { GeoCoordinate::new( 44.6509, -63.5923).unwrap() }

/// stays above a fixed ground point
struct FixedPropagator { name: String, point: GeoCoordinate }

impl Propagator for FixedPropagator {
    fn sat_name (&self)->&str { self.name.as_str() }
    fn epoch (&self)->DateTime<Utc> { t0() }
    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3> {
        let ecef = Cartesian3::from( &Cartographic::from_degrees( self.point.longitude, self.point.latitude, 705_000.0));
        Ok( ecef_to_teme( &ecef, gmst(t)))
    }
}

/// puts all satellites above the same ground point, except of those it refuses to decode
struct FixedDecoder { point: GeoCoordinate, broken: Vec<String> }

impl ElementDecoder for FixedDecoder {
    type Output = FixedPropagator;

    fn decode (&self, elements: &OrbitalElementSet)->Result<FixedPropagator> {
        if self.broken.iter().any( |n| n == elements.name()) {
            Err( LsatOrbitalError::InvalidElementSet( elements.name().to_string()))
        } else {
            Ok( FixedPropagator { name: elements.name().to_string(), point: self.point } )
        }
    }
}

fn tracker_config (names: &[&str], time_step: std::time::Duration, horizon: std::time::Duration)->TrackerConfig {
    TrackerConfig {
        catalog_url: "https://celestrak.org/NORAD/elements/resource.txt".to_string(),
        satellites: names.iter().map( |n| TrackedSatellite { name: n.to_string(), swath_width: kilometers(185.0) }).collect(),
        default_observer: halifax(),
        search: SearchConfig::new( time_step, horizon).unwrap(),
    }
}

async fn catalog()->HashMap<String,OrbitalElementSet> {
    let source = FileTleSource::new("tests/data/resource.txt");
    lsat_orbital::tle_catalog::load_catalog( &source, ["LANDSAT 8", "LANDSAT 9"]).await.unwrap()
}

#[test]
fn test_load_config() {
    let config: TrackerConfig = load_config("landsat.ron").unwrap();
    println!("{config:#?}");

    assert_eq!( config.satellites.len(), 2);
    assert_eq!( config.satellites[0].name, "LANDSAT 8");
    assert_eq!( config.satellites[1].swath().radius_km(), 92.5);
    assert_eq!( config.default_observer, halifax());
    assert_eq!( config.search.time_step, minutes(1));
    assert_eq!( config.search.horizon, days(120));
    assert_eq!( config.search.earth_radius.get::<kilometer>(), 6371.0);
}

#[test]
fn test_observer_generations() {
    let tracker = PassTracker::with_decoder( tracker_config( &["LANDSAT 8"], minutes(1), hours(1)), FixedDecoder{ point: halifax(), broken: vec![] }).unwrap();

    let g1 = tracker.set_observer( halifax());
    assert!( g1.is_current());

    let g2 = tracker.set_observer( GeoCoordinate::new( 45.5017, -73.5673).unwrap());
    assert!( !g1.is_current());
    assert!( g2.is_current());
    assert!( g2.id() > g1.id());
    assert_eq!( g1.observer(), &halifax());
}

#[tokio::test]
async fn test_predict_passes() {
    let config = tracker_config( &["LANDSAT 8", "LANDSAT 9", "LANDSAT 7"], minutes(1), hours(2));
    let tracker = PassTracker::with_decoder( config, FixedDecoder{ point: halifax(), broken: vec![] }).unwrap();
    let catalog = catalog().await;

    let generation = tracker.set_observer( halifax());
    let mut results: HashMap<String,Result<PassPrediction>> = HashMap::new();
    let n = tracker.predict_passes( &generation, &catalog, t0(), |sat,res| { results.insert( sat.name.clone(), res); }).await.unwrap();

    assert_eq!( n, 3);
    for name in ["LANDSAT 8", "LANDSAT 9"] {
        let p = results.get(name).unwrap().as_ref().unwrap();
        println!("{p}");
        assert_eq!( p.sat_name(), name);
        assert_eq!( p.time(), Some(t0()));
    }
    assert!( matches!( results.get("LANDSAT 7"), Some(Err(LsatOrbitalError::MissingSatellite(_)))));
}

#[tokio::test]
async fn test_failures_are_per_satellite() {
    let config = tracker_config( &["LANDSAT 8", "LANDSAT 9"], minutes(1), hours(2));
    let tracker = PassTracker::with_decoder( config, FixedDecoder{ point: halifax(), broken: vec!["LANDSAT 9".to_string()] }).unwrap();
    let catalog = catalog().await;

    let generation = tracker.set_observer( halifax());
    let mut results: HashMap<String,Result<PassPrediction>> = HashMap::new();
    let n = tracker.predict_passes( &generation, &catalog, t0(), |sat,res| { results.insert( sat.name.clone(), res); }).await.unwrap();

    assert_eq!( n, 2);
    assert!( results.get("LANDSAT 8").unwrap().is_ok());
    assert!( matches!( results.get("LANDSAT 9"), Some(Err(LsatOrbitalError::InvalidElementSet(_)))));
}

#[tokio::test]
async fn test_stale_results_are_discarded() {
    let config = tracker_config( &["LANDSAT 8", "LANDSAT 9"], minutes(1), hours(2));
    let tracker = PassTracker::with_decoder( config, FixedDecoder{ point: halifax(), broken: vec![] }).unwrap();
    let catalog = catalog().await;

    let g1 = tracker.set_observer( GeoCoordinate::new( 45.5017, -73.5673).unwrap());
    let g2 = tracker.set_observer( halifax());

    let mut n_calls = 0;
    let n = tracker.predict_passes( &g1, &catalog, t0(), |_,_| n_calls += 1).await.unwrap();
    assert_eq!( n, 0);
    assert_eq!( n_calls, 0);

    let n = tracker.predict_passes( &g2, &catalog, t0(), |_,_| n_calls += 1).await.unwrap();
    assert_eq!( n, 2);
    assert_eq!( n_calls, 2);
}

#[tokio::test]
async fn test_satkit_tracker() {
    let config: TrackerConfig = load_config("landsat.ron").unwrap();
    let tracker = PassTracker::new( config).unwrap();
    let catalog = tracker.fetch_catalog( &FileTleSource::new("tests/data/resource.txt")).await.unwrap();
    assert_eq!( catalog.len(), 2);

    let generation = tracker.set_observer( tracker.config().default_observer);
    let mut predictions: HashMap<String,PassPrediction> = HashMap::new();
    let n = tracker.predict_passes( &generation, &catalog, t0(), |sat,res| {
        let p = res.unwrap();
        println!("{p}");
        predictions.insert( sat.name.clone(), p);
    }).await.unwrap();

    assert_eq!( n, 2);
    assert_eq!( predictions.get("LANDSAT 8").unwrap().time(), parse_datetime("2025-11-25T14:56:00Z"));
    assert_eq!( predictions.get("LANDSAT 9").unwrap().time(), parse_datetime("2025-12-04T01:52:00Z"));
}

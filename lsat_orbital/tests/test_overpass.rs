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

use std::cell::Cell;
use chrono::{DateTime,TimeDelta,Utc,Datelike};
use uom::si::length::kilometer;
use lsat_common::{
    cartesian3::Cartesian3, cartographic::Cartographic,
    datetime::{minutes, hours, days, secs, parse_datetime},
    frames::{ecef_to_teme, gmst},
    geo::{mean_earth_radius, GeoCoordinate},
    uom::kilometers,
};
use lsat_orbital::{
    errors::{LsatOrbitalError, Result},
    overpass::*,
    propagator::{Propagator, SatkitPropagator, ground_track},
    tle_catalog::OrbitalElementSet,
};

// run with "cargo test -p lsat_orbital --test test_overpass -- --nocapture"

const L8_LINE1: &str = "1 39084U 13008A   25290.52388360  .00000404  00000-0  99579-4 0  9990";
const L8_LINE2: &str = "2 39084  98.1962 358.6226 0001157  93.1916 266.9421 14.57104547675811";
const L9_LINE1: &str = "1 49260U 21088A   25290.55047919  .00000418  00000-0  10220-3 0  9999";
const L9_LINE2: &str = "2 49260  98.1973 358.6570 0001199  90.3128 269.8212 14.57112286221582";

const ALTITUDE: f64 = 705_000.0;

fn halifax()->GeoCoordinate { GeoCoordinate::new( 44.6509, -63.5923).unwrap() }

fn t0()->DateTime<Utc> { parse_datetime("2025-10-17T12:00:00Z").unwrap() }

fn teme_from_degrees (lat: f64, lon: f64, t: &DateTime<Utc>)->Cartesian3 {
    let ecef = Cartesian3::from( &Cartographic::from_degrees( lon, lat, ALTITUDE));
    ecef_to_teme( &ecef, gmst(t))
}

/// moves north along a meridian with a constant rate
struct MeridianPropagator { start: DateTime<Utc>, lat0: f64, lon: f64, deg_per_min: f64, calls: usize }

impl MeridianPropagator {
    fn new (start: DateTime<Utc>, lat0: f64, lon: f64, deg_per_min: f64)->Self {
        MeridianPropagator { start, lat0, lon, deg_per_min, calls: 0 }
    }
}

impl Propagator for MeridianPropagator {
    fn sat_name (&self)->&str { "MERIDIAN" }
    fn epoch (&self)->DateTime<Utc> { self.start }
    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3> {
        self.calls += 1;
        let dt_min = (*t - self.start).num_milliseconds() as f64 / 60_000.0;
        Ok( teme_from_degrees( self.lat0 + self.deg_per_min * dt_min, self.lon, t))
    }
}

/// geostationary-like fake that stays over a fixed ground point
struct FixedPropagator { lat: f64, lon: f64, calls: usize }

impl Propagator for FixedPropagator {
    fn sat_name (&self)->&str { "FIXED" }
    fn epoch (&self)->DateTime<Utc> { t0() }
    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3> {
        self.calls += 1;
        Ok( teme_from_degrees( self.lat, self.lon, t))
    }
}

/// fails once a given number of positions was computed
struct DecayingPropagator { max_calls: usize, calls: usize }

impl Propagator for DecayingPropagator {
    fn sat_name (&self)->&str { "DECAYING" }
    fn epoch (&self)->DateTime<Utc> { t0() }
    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3> {
        if self.calls >= self.max_calls {
            return Err( LsatOrbitalError::PropagationError( format!("decayed at {t}")))
        }
        self.calls += 1;
        Ok( teme_from_degrees( -44.6509, 116.4077, t))
    }
}

fn predictor (time_step: std::time::Duration, horizon: std::time::Duration)->OverpassPredictor {
    OverpassPredictor::new( SearchConfig::new( time_step, horizon).unwrap()).unwrap()
}

#[test]
fn test_fake_sub_point() {
    let t = t0() + TimeDelta::minutes(10);
    let mut prop = MeridianPropagator::new( t0(), 30.0, -63.5923, 0.5);
    let c = prop.sub_point( &t).unwrap();
    println!("sub point: {c}");

    assert!( (c.latitude_deg() - 35.0).abs() < 1e-6);
    assert!( (c.longitude_deg() + 63.5923).abs() < 1e-6);
    assert!( (c.height - ALTITUDE).abs() < 1e-3);
}

#[test]
fn test_first_instant_within_swath() {
    let mut prop = MeridianPropagator::new( t0(), 30.0, -63.5923, 0.5);
    let res = predictor( minutes(1), hours(2)).predict_with( &mut prop, &halifax(), t0(), &SwathConfig::landsat()).unwrap();
    println!("{res}");

    match res {
        PassPrediction::Found{sat_name,time,sub_point,distance,steps} => {
            // minute 27 is at 43.5° (128km), minute 28 at 44.0° (72km)
            assert_eq!( sat_name, "MERIDIAN");
            assert_eq!( time, t0() + TimeDelta::minutes(28));
            assert_eq!( steps, 29);
            assert!( (sub_point.latitude - 44.0).abs() < 1e-6);
            let d = distance.get::<kilometer>();
            assert!( d <= 92.5 && (d - 72.38).abs() < 0.1);
        }
        other => panic!("expected pass, got {other}")
    }
    assert_eq!( prop.calls, 29);
}

#[test]
fn test_swath_radius_boundary() {
    // distances are 128km at minute 27 - a 300km wide swath is entered one step earlier
    let mut prop = MeridianPropagator::new( t0(), 30.0, -63.5923, 0.5);
    let swath = SwathConfig::from_swath_width( kilometers(300.0));
    assert_eq!( swath.radius_km(), 150.0);

    let res = predictor( minutes(1), hours(2)).predict_with( &mut prop, &halifax(), t0(), &swath).unwrap();
    assert_eq!( res.time(), Some( t0() + TimeDelta::minutes(27)));
}

#[test]
fn test_start_within_swath() {
    let mut prop = FixedPropagator { lat: 44.6509, lon: -63.5923, calls: 0 };
    let res = predictor( minutes(1), days(16)).predict_with( &mut prop, &halifax(), t0(), &SwathConfig::landsat()).unwrap();
    assert_eq!( res.time(), Some(t0()));
    assert_eq!( res.steps(), 1);
    assert_eq!( prop.calls, 1);
}

#[test]
fn test_horizon_exhausted() {
    let mut prop = FixedPropagator { lat: -44.6509, lon: 116.4077, calls: 0 }; // antipode
    let res = predictor( minutes(1), hours(2)).predict_with( &mut prop, &halifax(), t0(), &SwathConfig::landsat()).unwrap();
    println!("{res}");

    match res {
        PassPrediction::NotFound{sat_name,start,horizon,steps} => {
            assert_eq!( start, t0());
            assert_eq!( horizon, hours(2));
            assert_eq!( steps, 121); // both ends included
        }
        other => panic!("expected no pass, got {other}")
    }
    assert_eq!( prop.calls, 121);

    // horizon shorter than step only checks start
    let mut prop = FixedPropagator { lat: -44.6509, lon: 116.4077, calls: 0 };
    let res = predictor( minutes(1), secs(30)).predict_with( &mut prop, &halifax(), t0(), &SwathConfig::landsat()).unwrap();
    assert!( !res.is_found());
    assert_eq!( res.steps(), 1);
}

#[test]
fn test_zero_swath() {
    let mut prop = MeridianPropagator::new( t0(), 30.0, -63.5923, 0.5);
    let swath = SwathConfig::new( kilometers(0.0));
    let res = predictor( minutes(1), hours(2)).predict_with( &mut prop, &halifax(), t0(), &swath).unwrap();
    assert!( !res.is_found());
}

#[test]
fn test_propagation_error() {
    let mut prop = DecayingPropagator { max_calls: 10, calls: 0 };
    let res = predictor( minutes(1), hours(2)).predict_with( &mut prop, &halifax(), t0(), &SwathConfig::landsat());
    assert!( matches!( res, Err(LsatOrbitalError::PropagationError(_))));
    assert_eq!( prop.calls, 10);
}

#[test]
fn test_invalid_step() {
    assert!( matches!( SearchConfig::new( secs(0), hours(1)), Err(LsatOrbitalError::InvalidSearchConfig(_))));

    let config = SearchConfig { time_step: secs(0), ..SearchConfig::default() };
    assert!( matches!( OverpassPredictor::new( config), Err(LsatOrbitalError::InvalidSearchConfig(_))));

    let es = OrbitalElementSet::new( "LANDSAT 8", L8_LINE1, L8_LINE2);
    let res = predict_next_pass( &es, &halifax(), t0(), &SwathConfig::landsat(), secs(0), hours(1));
    assert!( matches!( res, Err(LsatOrbitalError::InvalidSearchConfig(_))));

    // number of steps does not fit into u64
    let res = SearchConfig::new( std::time::Duration::from_nanos(1), std::time::Duration::from_secs( u64::MAX));
    assert!( matches!( res, Err(LsatOrbitalError::InvalidSearchConfig(_))));

    let config = SearchConfig::new( secs(1), days(120)).unwrap();
    assert_eq!( config.max_step().unwrap(), 120 * 86400);
}

#[test]
fn test_cancellation() {
    // cancelled before the first step
    let mut prop = FixedPropagator { lat: -44.6509, lon: 116.4077, calls: 0 };
    let res = predictor( minutes(1), hours(4)).predict_cancellable( &mut prop, &halifax(), t0(), &SwathConfig::landsat(), || false);
    assert!( matches!( res, Err(LsatOrbitalError::Cancelled(_))));
    assert_eq!( prop.calls, 0);

    // cancelled at the second check
    let checks = Cell::new(0);
    let mut prop = FixedPropagator { lat: -44.6509, lon: 116.4077, calls: 0 };
    let res = predictor( minutes(1), hours(4)).predict_cancellable( &mut prop, &halifax(), t0(), &SwathConfig::landsat(), || {
        checks.set( checks.get() + 1);
        checks.get() < 2
    });
    assert!( matches!( res, Err(LsatOrbitalError::Cancelled(_))));
    assert_eq!( prop.calls, CANCEL_CHECK_INTERVAL as usize);

    // never cancelled - 241 steps are checked at 0,60,120,180,240
    let checks = Cell::new(0);
    let mut prop = FixedPropagator { lat: -44.6509, lon: 116.4077, calls: 0 };
    let res = predictor( minutes(1), hours(4)).predict_cancellable( &mut prop, &halifax(), t0(), &SwathConfig::landsat(), || {
        checks.set( checks.get() + 1);
        true
    });
    assert!( !res.unwrap().is_found());
    assert_eq!( checks.get(), 5);
}

#[test]
fn test_satkit_propagator() {
    let es = OrbitalElementSet::new( "LANDSAT 8", L8_LINE1, L8_LINE2);
    let mut prop = SatkitPropagator::new( &es).unwrap();

    let epoch = prop.epoch();
    println!("epoch: {epoch}");
    assert_eq!( (epoch.year(), epoch.month(), epoch.day()), (2025, 10, 17));

    let track = ground_track( &mut prop, t0(), TimeDelta::minutes(10), 10).unwrap();
    for (t,c) in &track {
        println!("{t}: {c}");
        let h = c.height / 1000.0;
        assert!( h > 680.0 && h < 740.0, "unexpected altitude {h}km");
        assert!( c.latitude_deg().abs() < 82.5); // sun synchronous orbit, inclination 98.2°
    }
}

#[test]
fn test_satkit_pass_with_defaults() {
    let swath = SwathConfig::landsat();
    let config = SearchConfig::default();
    assert_eq!( config.time_step, minutes(1));
    let predictor = OverpassPredictor::new( config).unwrap();

    // with one minute steps both satellites need more than one repeat cycle
    let cases = [
        ("LANDSAT 8", L8_LINE1, L8_LINE2, "2025-11-25T14:56:00Z"),
        ("LANDSAT 9", L9_LINE1, L9_LINE2, "2025-12-04T01:52:00Z"),
    ];

    for (name, line1, line2, expected) in cases {
        let es = OrbitalElementSet::new( name, line1, line2);
        let res = predictor.predict( &es, &halifax(), t0(), &swath).unwrap();
        println!("{res}");

        let Some(time) = res.time() else { panic!("no pass of {name} within default horizon: {res}") };
        assert_eq!( time, parse_datetime(expected).unwrap());
        assert!( time - t0() > TimeDelta::days(16));
        assert_eq!( predictor.predict( &es, &halifax(), t0(), &swath).unwrap(), res);

        // no earlier sampled instant is within the swath
        let mut prop = SatkitPropagator::new( &es).unwrap();
        let mut t = t0();
        for _ in 1..res.steps() {
            let p = GeoCoordinate::from_cartographic( &prop.sub_point( &t).unwrap());
            assert!( p.distance_to( &halifax(), mean_earth_radius()) > swath.radius, "{name} within swath at {t}");
            t = t + TimeDelta::minutes(1);
        }
        assert_eq!( t, time);
        let p = GeoCoordinate::from_cartographic( &prop.sub_point( &t).unwrap());
        assert!( p.distance_to( &halifax(), mean_earth_radius()) <= swath.radius);
    }
}

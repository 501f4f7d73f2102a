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

use chrono::{DateTime,Utc,TimeZone};
use satkit::Instant;
use lsat_common::{datetime, define_load_config};

pub mod errors;
use errors::{LsatOrbitalError,Result,op_failed};

pub mod tle_catalog;
pub mod propagator;
pub mod overpass;
pub mod tracker;

pub use tle_catalog::{OrbitalElementSet, parse_catalog, scan_catalog};
pub use overpass::{predict_next_pass, OverpassPredictor, PassPrediction, SearchConfig, SwathConfig};
pub use tracker::{PassTracker, TrackerConfig, TrackedSatellite, ObserverGeneration};

define_load_config!{}

//--- general utility functions

pub fn instant_from_datetime<Z> (dt: &DateTime<Z>)->Instant where Z:TimeZone {
    Instant::from_unixtime( dt.timestamp_millis() as f64 / 1000.0)
}

/// None for non-finite or out-of-range instants
pub fn datetime_from_instant (t: &Instant)->Option<DateTime<Utc>> {
    let millis = (t.as_unixtime() * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 { return None }
    datetime::from_epoch_millis( millis as i64)
}

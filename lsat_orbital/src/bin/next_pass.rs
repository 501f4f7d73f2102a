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

use tokio;
use anyhow::{anyhow,Result};
use chrono::{DateTime,Utc};
use uom::si::length::kilometer;
use lsat_common::{define_cli, init_tracing, datetime::{parse_datetime, short_utc_datetime_string, local_datetime_string}, geo::GeoCoordinate};
use lsat_orbital::{
    load_config,
    overpass::PassPrediction,
    tle_catalog::{FileTleSource, HttpTleSource},
    tracker::{PassTracker, TrackerConfig}
};

define_cli! { ARGS [about="predict the next overpasses of configured satellites for an observer position"] =
    config: String [help="filename of tracker config", long, default_value="landsat.ron"],
    catalog: Option<String> [help="path of TLE catalog file to use instead of configured URL", long],
    lat: Option<f64> [help="observer latitude in degrees (default from config)", long, allow_hyphen_values=true],
    lon: Option<f64> [help="observer longitude in degrees (default from config)", long, allow_hyphen_values=true],
    date: Option<String> [help="start datetime spec in RFC 3339 (default is now)", long, short]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config: TrackerConfig = load_config( &ARGS.config)?;
    let observer = match (ARGS.lat, ARGS.lon) {
        (Some(lat), Some(lon)) => GeoCoordinate::new( lat, lon)?,
        (None, None) => config.default_observer,
        _ => return Err( anyhow!("--lat and --lon have to be specified together"))
    };
    let start: DateTime<Utc> = match &ARGS.date {
        Some(ds) => parse_datetime(ds).ok_or( anyhow!("invalid datetime spec {ds}"))?,
        None => Utc::now()
    };

    let tracker = PassTracker::new( config)?;
    let catalog = if let Some(path) = &ARGS.catalog {
        tracker.fetch_catalog( &FileTleSource::new( path)).await?
    } else {
        tracker.fetch_catalog( &HttpTleSource::new( &tracker.config().catalog_url)).await?
    };

    let generation = tracker.set_observer( observer);
    println!("next overpasses of observer {} after {}", observer, short_utc_datetime_string( &start));

    tracker.predict_passes( &generation, &catalog, start, |sat, res| {
        match res {
            Ok(PassPrediction::Found{time,sub_point,distance,..}) => {
                println!("{:>12}: {}  ({})", sat.name, short_utc_datetime_string( &time), local_datetime_string( &time));
                println!("{:>12}  ground point {} is {:.1}km from observer", "", sub_point, distance.get::<kilometer>());
            }
            Ok(p) => println!("{:>12}: {}", sat.name, p),
            Err(e) => println!("{:>12}: failed - {}", sat.name, e)
        }
    }).await?;

    Ok(())
}

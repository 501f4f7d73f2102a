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
use chrono::{DateTime,TimeDelta,Utc};
use lsat_common::{define_cli, init_tracing, datetime::{parse_datetime, short_utc_datetime_string}};
use lsat_orbital::{
    load_config,
    propagator::{ground_track, Propagator, SatkitPropagator},
    tle_catalog::{load_catalog, FileTleSource, HttpTleSource, TleSource},
    tracker::TrackerConfig,
};

define_cli! { ARGS [about="print the sub-satellite track of a catalog satellite"] =
    config: String [help="filename of tracker config", long, default_value="landsat.ron"],
    catalog: Option<String> [help="path of TLE catalog file to use instead of configured URL", long],
    date: Option<String> [help="start datetime spec in RFC 3339 (default is now)", long, short],
    minutes: u32 [help="duration of track in minutes", long, short, default_value="99"],
    step: u32 [help="time step in seconds", long, short, default_value="60"],
    name: String [help="satellite name as in catalog, e.g. 'LANDSAT 8'"]
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config: TrackerConfig = load_config( &ARGS.config)?;
    let source: Box<dyn TleSource> = if let Some(path) = &ARGS.catalog {
        Box::new( FileTleSource::new( path))
    } else {
        Box::new( HttpTleSource::new( &config.catalog_url))
    };
    let catalog = load_catalog( source.as_ref(), [&ARGS.name]).await?;
    let elements = catalog.get( &ARGS.name).ok_or( anyhow!("no element set for {} in {}", ARGS.name, source.description()))?;

    let start: DateTime<Utc> = match &ARGS.date {
        Some(ds) => parse_datetime(ds).ok_or( anyhow!("invalid datetime spec {ds}"))?,
        None => Utc::now()
    };
    if ARGS.step == 0 { return Err( anyhow!("time step has to be positive")) }
    let n_steps = (ARGS.minutes as usize * 60) / ARGS.step as usize + 1;

    let mut propagator = SatkitPropagator::new( elements)?;
    println!("{} (epoch {})", elements.name(), short_utc_datetime_string( &propagator.epoch()));

    for (t,c) in ground_track( &mut propagator, start, TimeDelta::seconds( ARGS.step as i64), n_steps)? {
        println!("{}  {:9.4}° {:9.4}°  {:7.1}km", short_utc_datetime_string( &t), c.latitude_deg(), c.longitude_deg(), c.height / 1000.0);
    }

    Ok(())
}

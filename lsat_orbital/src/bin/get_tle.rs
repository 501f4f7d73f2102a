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

use std::path::PathBuf;
use tokio;
use anyhow::Result;
use lsat_common::{define_cli, init_tracing, fs::set_filepath_contents};
use lsat_orbital::{
    load_config,
    tle_catalog::{HttpTleSource, FileTleSource, TleSource},
    tracker::TrackerConfig,
};

define_cli! { ARGS [about="TLE catalog retrieval tool"] =
    config: String [help="filename of tracker config", long, default_value="landsat.ron"],
    catalog: Option<String> [help="path of TLE catalog file to use instead of configured URL", long],
    save: Option<String> [help="directory to save <name>.tle files in", long, short]
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

    print!("retrieving element sets from {}..", source.description());
    let catalog = lsat_orbital::tle_catalog::load_catalog( source.as_ref(), config.satellite_names()).await?;
    println!("found {} of {}", catalog.len(), config.satellites.len());

    for sat in &config.satellites {
        match catalog.get( &sat.name) {
            Some(es) => {
                println!("{es}  (catalog number {})", es.sat_id().unwrap_or_default());
                if let Some(dir) = &ARGS.save {
                    let path = PathBuf::from(dir).join( format!("{}.tle", sat.name.replace(' ', "_")));
                    set_filepath_contents( &path, es.to_string().as_bytes())?;
                    println!("saved to {}", path.display());
                }
            }
            None => println!("{}: no element set", sat.name)
        }
    }

    Ok(())
}

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

/// concurrent pass predictions for a configured set of satellites and a changing observer position.
///
/// Each `set_observer` call starts a new observer generation. Predictions are tagged with the generation
/// they were started for and are only delivered while this generation is still current, i.e. results
/// computed for an outdated position are discarded (and long running searches are cancelled)

use std::{collections::HashMap, panic::{catch_unwind, AssertUnwindSafe}, sync::{Arc, atomic::{AtomicU64,Ordering}}};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use tokio::task::JoinSet;
use uom::si::f64::Length;
use tracing::{debug,info,warn};
use lsat_common::{
    geo::GeoCoordinate,
    uom::{ser_length_as_kilometers, de_length_from_kilometers},
};
use crate::{
    errors::{op_failed, LsatOrbitalError, Result},
    overpass::{OverpassPredictor, PassPrediction, SearchConfig, SwathConfig},
    propagator::{ElementDecoder, Propagator, SatkitDecoder},
    tle_catalog::{load_catalog, OrbitalElementSet, TleSource},
};

/* #region config ***************************************************************************************************/

/// a satellite we want predictions for. `name` is matched against catalog name lines
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrackedSatellite {
    pub name: String,

    #[serde(serialize_with="ser_length_as_kilometers", deserialize_with="de_length_from_kilometers")]
    pub swath_width: Length,
}

impl TrackedSatellite {
    pub fn swath (&self)->SwathConfig { SwathConfig::from_swath_width( self.swath_width) }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct TrackerConfig {
    pub catalog_url: String,
    pub satellites: Vec<TrackedSatellite>,
    pub default_observer: GeoCoordinate,
    pub search: SearchConfig,
}

impl TrackerConfig {
    pub fn satellite_names (&self)->impl Iterator<Item=&str> {
        self.satellites.iter().map( |s| s.name.as_str())
    }
}

/* #endregion config */

/* #region ObserverGeneration ***************************************************************************************/

/// an observer position together with the generation it was set in
#[derive(Debug,Clone)]
pub struct ObserverGeneration {
    id: u64,
    observer: GeoCoordinate,
    current: Arc<AtomicU64>,
}

impl ObserverGeneration {
    pub fn id (&self)->u64 { self.id }

    pub fn observer (&self)->&GeoCoordinate { &self.observer }

    /// false once the observer was changed again
    pub fn is_current (&self)->bool {
        self.current.load( Ordering::Acquire) == self.id
    }
}

/* #endregion ObserverGeneration */

/* #region PassTracker **********************************************************************************************/

pub struct PassTracker<D = SatkitDecoder> where D: ElementDecoder {
    config: TrackerConfig,
    predictor: Arc<OverpassPredictor>,
    decoder: Arc<D>,
    generation: Arc<AtomicU64>,
}

impl PassTracker<SatkitDecoder> {
    pub fn new (config: TrackerConfig)->Result<Self> {
        PassTracker::with_decoder( config, SatkitDecoder)
    }
}

impl<D> PassTracker<D> where D: ElementDecoder {
    pub fn with_decoder (config: TrackerConfig, decoder: D)->Result<Self> {
        let predictor = Arc::new( OverpassPredictor::new( config.search.clone())?);
        Ok( PassTracker { config, predictor, decoder: Arc::new(decoder), generation: Arc::new( AtomicU64::new(0)) } )
    }

    pub fn config (&self)->&TrackerConfig { &self.config }

    /// start a new observer generation, which makes all previous generations stale
    pub fn set_observer (&self, observer: GeoCoordinate)->ObserverGeneration {
        let id = self.generation.fetch_add( 1, Ordering::AcqRel) + 1;
        debug!("observer generation {} at {}", id, observer);
        ObserverGeneration { id, observer, current: self.generation.clone() }
    }

    /// fetch the catalog and extract the element sets of all configured satellites
    pub async fn fetch_catalog<T> (&self, source: &T)->Result<HashMap<String,OrbitalElementSet>> where T: TleSource + ?Sized {
        load_catalog( source, self.config.satellite_names()).await
    }

    /// run one pass search per configured satellite concurrently and call `on_result` for each result
    /// as long as `generation` is current. Satellites without catalog entry produce a `MissingSatellite`
    /// error result. Failures are per satellite. Returns the number of delivered results
    pub async fn predict_passes<F> (&self, generation: &ObserverGeneration, catalog: &HashMap<String,OrbitalElementSet>,
                                    start: DateTime<Utc>, mut on_result: F)->Result<usize>
        where F: FnMut(&TrackedSatellite, Result<PassPrediction>)
    {
        let mut tasks: JoinSet<(usize,Result<PassPrediction>)> = JoinSet::new();
        let mut n_delivered = 0;

        for (idx,sat) in self.config.satellites.iter().enumerate() {
            if let Some(elements) = catalog.get( &sat.name) {
                let elements = elements.clone();
                let generation = generation.clone();
                let predictor = self.predictor.clone();
                let decoder = self.decoder.clone();
                let swath = sat.swath();

                tasks.spawn_blocking( move || {
                    let res = catch_unwind( AssertUnwindSafe( || {
                        let mut propagator = decoder.decode( &elements)?;
                        predictor.predict_cancellable( &mut propagator, generation.observer(), start, &swath, || generation.is_current())
                    })).unwrap_or_else( |_| Err( op_failed!("pass search for {} panicked", elements.name())));
                    (idx, res)
                });

            } else {
                let res = Err( LsatOrbitalError::MissingSatellite( sat.name.clone()));
                if deliver( generation, sat, res, &mut on_result) { n_delivered += 1 }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx,res)) => {
                    if let Some(sat) = self.config.satellites.get(idx) {
                        if deliver( generation, sat, res, &mut on_result) { n_delivered += 1 }
                    }
                }
                Err(e) => warn!("pass search task failed: {e}")
            }
        }

        Ok(n_delivered)
    }
}

fn deliver<F> (generation: &ObserverGeneration, sat: &TrackedSatellite, res: Result<PassPrediction>, on_result: &mut F)->bool
    where F: FnMut(&TrackedSatellite, Result<PassPrediction>)
{
    if generation.is_current() {
        match &res {
            Ok(prediction) => info!("{}", prediction),
            Err(e) => warn!("no prediction for {}: {}", sat.name, e)
        }
        on_result( sat, res);
        true
    } else {
        debug!("discarding stale result for {} (observer generation {})", sat.name, generation.id());
        false
    }
}

/* #endregion PassTracker */

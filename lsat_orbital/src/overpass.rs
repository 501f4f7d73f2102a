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

/// next-overpass search: step a propagator forward from a start time and report the first instant
/// at which the sub-satellite point is within the swath radius of the observer.
///
/// This is a coarse (sampled) search. A satellite ground point moves about 400km per minute so that
/// a swath of 185km width can be crossed between two samples with the default step of one minute.
/// Use a smaller time step if no crossing must be missed

use std::{fmt, time::Duration};
use chrono::{DateTime,TimeDelta,Utc};
use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::kilometer};
use tracing::{debug,trace};
use lsat_common::{
    datetime::{self, ser_epoch_millis, de_from_epoch_millis, serialize_duration, deserialize_duration},
    geo::{haversine_distance, mean_earth_radius, GeoCoordinate},
    uom::{kilometers, ser_length_as_kilometers, de_length_from_kilometers},
};
use crate::{
    errors::{LsatOrbitalError, Result},
    propagator::{Propagator, SatkitPropagator},
    tle_catalog::OrbitalElementSet,
};

/// nominal ground swath width of the Landsat 8/9 OLI and TIRS instruments
pub const LANDSAT_SWATH_WIDTH_KM: f64 = 185.0;

pub const DEFAULT_TIME_STEP: Duration = Duration::from_secs(60);

/// several Landsat repeat cycles (16 days each). The ground track repeats with the cycle, and with
/// one minute steps the sampled sub-points of consecutive cycles are almost the same, so a single
/// cycle often has no sample within the swath even though the observer is covered
pub const DEFAULT_HORIZON: Duration = Duration::from_secs(120 * 86400);

/// number of search steps between checks of the cancellation predicate
pub const CANCEL_CHECK_INTERVAL: u64 = 60;

/* #region SwathConfig **********************************************************************************************/

/// the ground coverage of a satellite instrument, as distance from the sub-satellite point
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SwathConfig {
    #[serde(serialize_with="ser_length_as_kilometers", deserialize_with="de_length_from_kilometers")]
    pub radius: Length
}

impl SwathConfig {
    pub fn new (radius: Length)->Self { SwathConfig { radius } }

    pub fn from_swath_width (width: Length)->Self { SwathConfig { radius: width / 2.0 } }

    pub fn landsat ()->Self { SwathConfig::from_swath_width( kilometers( LANDSAT_SWATH_WIDTH_KM)) }

    pub fn radius_km (&self)->f64 { self.radius.get::<kilometer>() }
}

impl Default for SwathConfig {
    fn default()->Self { SwathConfig::landsat() }
}

/* #endregion SwathConfig */

/* #region SearchConfig *********************************************************************************************/

/// parameters of the pass search. The sampled instants are `start + k * time_step` for
/// `k = 0..=floor(horizon / time_step)`, i.e. a horizon shorter than the step only checks `start`
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SearchConfig {
    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub time_step: Duration,

    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub horizon: Duration,

    /// sphere radius used for surface distances
    #[serde(serialize_with="ser_length_as_kilometers", deserialize_with="de_length_from_kilometers")]
    pub earth_radius: Length,
}

impl SearchConfig {
    pub fn new (time_step: Duration, horizon: Duration)->Result<Self> {
        let config = SearchConfig { time_step, horizon, earth_radius: mean_earth_radius() };
        config.validate()?;
        Ok(config)
    }

    pub fn validate (&self)->Result<()> {
        if self.time_step.is_zero() {
            return Err( LsatOrbitalError::InvalidSearchConfig("time step has to be positive".into()))
        }
        if TimeDelta::from_std( self.time_step).is_err() {
            return Err( LsatOrbitalError::InvalidSearchConfig( format!("time step {:?} out of range", self.time_step)))
        }
        self.max_step()?;
        let r = self.earth_radius.get::<kilometer>();
        if !r.is_finite() || r <= 0.0 {
            return Err( LsatOrbitalError::InvalidSearchConfig( format!("invalid earth radius {r}km")))
        }
        Ok(())
    }

    /// index of the last sampled instant
    pub fn max_step (&self)->Result<u64> {
        if self.time_step.is_zero() {
            return Err( LsatOrbitalError::InvalidSearchConfig("time step has to be positive".into()))
        }
        u64::try_from( self.horizon.as_nanos() / self.time_step.as_nanos())
            .ok()
            .filter( |n| *n < u64::MAX)
            .ok_or( LsatOrbitalError::InvalidSearchConfig( format!("too many steps for horizon {:?} and time step {:?}", self.horizon, self.time_step)))
    }
}

impl Default for SearchConfig {
    fn default()->Self {
        SearchConfig { time_step: DEFAULT_TIME_STEP, horizon: DEFAULT_HORIZON, earth_radius: mean_earth_radius() }
    }
}

/* #endregion SearchConfig */

/* #region PassPrediction *******************************************************************************************/

/// result of a pass search. Not finding a pass within the horizon is a regular outcome
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum PassPrediction {
    Found {
        sat_name: String,
        #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
        time: DateTime<Utc>,
        sub_point: GeoCoordinate,
        #[serde(serialize_with="ser_length_as_kilometers", deserialize_with="de_length_from_kilometers")]
        distance: Length,  // surface distance between sub_point and observer
        steps: u64,        // number of evaluated instants
    },
    NotFound {
        sat_name: String,
        #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
        start: DateTime<Utc>,
        #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
        horizon: Duration,
        steps: u64,
    }
}

impl PassPrediction {
    pub fn sat_name (&self)->&str {
        match self {
            PassPrediction::Found{sat_name,..} => sat_name.as_str(),
            PassPrediction::NotFound{sat_name,..} => sat_name.as_str(),
        }
    }

    pub fn is_found (&self)->bool { matches!( self, PassPrediction::Found{..}) }

    pub fn time (&self)->Option<DateTime<Utc>> {
        if let PassPrediction::Found{time,..} = self { Some(*time) } else { None }
    }

    pub fn steps (&self)->u64 {
        match self {
            PassPrediction::Found{steps,..} => *steps,
            PassPrediction::NotFound{steps,..} => *steps,
        }
    }
}

impl fmt::Display for PassPrediction {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            PassPrediction::Found{sat_name,time,sub_point,distance,..} => {
                write!(f, "{} passes {} at {} ({:.1}km from observer)",
                       sat_name, datetime::short_utc_datetime_string(time), sub_point, distance.get::<kilometer>())
            }
            PassPrediction::NotFound{sat_name,start,horizon,..} => {
                write!(f, "no pass of {} within {}h after {}",
                       sat_name, horizon.as_secs() / 3600, datetime::short_utc_datetime_string(start))
            }
        }
    }
}

/* #endregion PassPrediction */

/* #region OverpassPredictor ****************************************************************************************/

/// the pass search. This is synchronous and CPU bound - async callers should run it via `spawn_blocking`
#[derive(Debug,Clone)]
pub struct OverpassPredictor {
    config: SearchConfig
}

impl OverpassPredictor {
    pub fn new (config: SearchConfig)->Result<Self> {
        config.validate()?;
        Ok( OverpassPredictor { config } )
    }

    pub fn config (&self)->&SearchConfig { &self.config }

    /// decode `elements` and search with a SGP4 propagator
    pub fn predict (&self, elements: &OrbitalElementSet, observer: &GeoCoordinate, start: DateTime<Utc>, swath: &SwathConfig)->Result<PassPrediction> {
        let mut propagator = SatkitPropagator::new( elements)?;
        self.predict_with( &mut propagator, observer, start, swath)
    }

    pub fn predict_with<P: Propagator> (&self, propagator: &mut P, observer: &GeoCoordinate, start: DateTime<Utc>, swath: &SwathConfig)->Result<PassPrediction> {
        self.predict_cancellable( propagator, observer, start, swath, || true)
    }

    /// search that is abandoned with `Cancelled` once `is_live` returns false. The predicate is checked
    /// before the first step and then every `CANCEL_CHECK_INTERVAL` steps
    pub fn predict_cancellable<P,F> (&self, propagator: &mut P, observer: &GeoCoordinate, start: DateTime<Utc>, swath: &SwathConfig, is_live: F)->Result<PassPrediction>
        where P: Propagator, F: Fn()->bool
    {
        let step = TimeDelta::from_std( self.config.time_step)
            .map_err( |_| LsatOrbitalError::InvalidSearchConfig( format!("time step {:?} out of range", self.config.time_step)))?;
        let max_step = self.config.max_step()?;
        let radius = swath.radius;
        let sat_name = propagator.sat_name().to_string();

        debug!("searching pass of {} over {} from {} in {} steps", sat_name, observer, start, max_step+1);

        let mut t = start;
        for k in 0..=max_step {
            if k % CANCEL_CHECK_INTERVAL == 0 && !is_live() {
                debug!("pass search for {} cancelled after {} steps", sat_name, k);
                return Err( LsatOrbitalError::Cancelled( format!("{} after {} steps", sat_name, k)))
            }

            let sub_point = GeoCoordinate::from_cartographic( &propagator.sub_point( &t)?);
            let distance = haversine_distance( &sub_point, observer, self.config.earth_radius);
            trace!("{} {} {:.1}km", t, sub_point, distance.get::<kilometer>());

            if distance <= radius {
                debug!("{} passes at {} after {} steps", sat_name, t, k+1);
                return Ok( PassPrediction::Found { sat_name, time: t, sub_point, distance, steps: k+1 } )
            }

            if k < max_step {
                t = t.checked_add_signed( step).ok_or( LsatOrbitalError::InvalidSearchConfig( format!("search time out of range after {}", t)))?;
            }
        }

        debug!("no pass of {} within {:?}", sat_name, self.config.horizon);
        Ok( PassPrediction::NotFound { sat_name, start, horizon: self.config.horizon, steps: max_step+1 } )
    }
}

impl Default for OverpassPredictor {
    fn default()->Self { OverpassPredictor { config: SearchConfig::default() } }
}

/* #endregion OverpassPredictor */

/// one-shot search with the mean earth radius. Returns `InvalidSearchConfig` for a zero `time_step`
pub fn predict_next_pass (elements: &OrbitalElementSet, observer: &GeoCoordinate, start: DateTime<Utc>,
                          swath: &SwathConfig, time_step: Duration, horizon: Duration)->Result<PassPrediction> {
    let predictor = OverpassPredictor::new( SearchConfig::new( time_step, horizon)?)?;
    predictor.predict( elements, observer, start, swath)
}

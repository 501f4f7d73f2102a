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

/// orbit propagation behind a small trait so that the pass search can be driven by
/// a satkit SGP4 model in production and by deterministic fakes in tests

use chrono::{DateTime,Utc,TimeDelta};
use satkit::{TLE, sgp4::{sgp4, SGP4Error}};
use lsat_common::{
    cartesian3::Cartesian3,
    cartographic::Cartographic,
    frames::gmst,
    geo_constants::POLAR_EARTH_RADIUS,
};
use crate::{
    datetime_from_instant, instant_from_datetime,
    errors::{invalid_element_set, propagation_error, op_failed, LsatOrbitalError, Result},
    tle_catalog::OrbitalElementSet,
};

/// something that can compute satellite positions for arbitrary UTC instants
pub trait Propagator {
    fn sat_name (&self)->&str;

    /// the reference instant of the underlying element set
    fn epoch (&self)->DateTime<Utc>;

    /// earth-centered inertial (TEME) position in meters
    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3>;

    /// geodetic point below the satellite at `t`. The height is the altitude above the ellipsoid
    fn sub_point (&mut self, t: &DateTime<Utc>)->Result<Cartographic> {
        let p = self.teme_position(t)?;
        Ok( Cartographic::from_eci( &p, gmst(t)) )
    }
}

/// factory seam to turn element sets into propagators. Implementations are shared between
/// (blocking) prediction tasks, hence the bounds
pub trait ElementDecoder: Send + Sync + 'static {
    type Output: Propagator;

    fn decode (&self, elements: &OrbitalElementSet)->Result<Self::Output>;
}

#[derive(Debug,Clone,Copy,Default)]
pub struct SatkitDecoder;

impl ElementDecoder for SatkitDecoder {
    type Output = SatkitPropagator;

    fn decode (&self, elements: &OrbitalElementSet)->Result<SatkitPropagator> {
        SatkitPropagator::new( elements)
    }
}

/* #region SatkitPropagator *****************************************************************************************/

/// SGP4 propagation of a single decoded element set
pub struct SatkitPropagator {
    name: String,
    epoch: DateTime<Utc>,
    tle: TLE,
}

impl SatkitPropagator {
    pub fn new (elements: &OrbitalElementSet)->Result<Self> {
        let tle = elements.decode()?;
        let epoch = datetime_from_instant( &tle.epoch)
            .ok_or( invalid_element_set!("{}: epoch out of range", elements.name()))?;
        Ok( SatkitPropagator { name: elements.name().to_string(), epoch, tle } )
    }
}

impl Propagator for SatkitPropagator {
    fn sat_name (&self)->&str { self.name.as_str() }

    fn epoch (&self)->DateTime<Utc> { self.epoch }

    fn teme_position (&mut self, t: &DateTime<Utc>)->Result<Cartesian3> {
        let tvec = [instant_from_datetime(t)];
        let (pteme, _vteme, errs) = sgp4( &mut self.tle, &tvec);

        if let Some(e) = errs.iter().find( |e| !matches!( e, SGP4Error::SGP4Success)) {
            return Err( propagation_error!("{} at {}: {:?}", self.name, t, e))
        }

        let p = Cartesian3::new( pteme[(0,0)], pteme[(1,0)], pteme[(2,0)]);
        if !p.is_finite() {
            return Err( propagation_error!("{} at {}: non-finite position", self.name, t))
        }
        if p.length() < POLAR_EARTH_RADIUS {
            return Err( propagation_error!("{} at {}: position below earth surface (decayed)", self.name, t))
        }

        Ok(p)
    }
}

/* #endregion SatkitPropagator */

/// sub-satellite points for `n_steps` consecutive instants starting at `start`
pub fn ground_track<P: Propagator> (propagator: &mut P, start: DateTime<Utc>, step: TimeDelta, n_steps: usize)->Result<Vec<(DateTime<Utc>,Cartographic)>> {
    let mut track = Vec::with_capacity( n_steps);
    let mut t = start;

    for _ in 0..n_steps {
        track.push( (t, propagator.sub_point( &t)?) );
        t = t.checked_add_signed( step).ok_or( op_failed!("ground track time out of range after {}", t))?;
    }

    Ok(track)
}

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

/// cartographic coordinates.
/// Cartographic is an internal format based on radians, to efficiently interface with unit-less
/// propagator output. Public APIs should use [`crate::geo::GeoCoordinate`] (degrees) instead

use crate::{
    angle::normalize_pi, cartesian3::Cartesian3, frames::teme_to_ecef,
    geo_constants::{EQUATORIAL_EARTH_RADIUS, POLAR_EARTH_RADIUS, E_EARTH_SQUARED},
    atan2, sqrt
};

const MAX_LAT_ITERATIONS: usize = 20;
const LAT_EPSILON: f64 = 1e-12;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Cartographic {
    pub longitude: f64, // radians
    pub latitude: f64,  // radians
    pub height: f64     // meters above ellipsoid
}

impl Cartographic {
    pub fn new (longitude:f64, latitude: f64, height: f64)->Self {
        Cartographic { longitude, latitude, height }
    }

    pub fn from_degrees (lon: f64, lat: f64, height: f64)->Self {
        Cartographic::new( lon.to_radians(), lat.to_radians(), height)
    }

    /// convert an inertial (TEME) position into geodetic coordinates, using the provided Greenwich
    /// sidereal time angle (radians) to rotate into the earth fixed frame
    pub fn from_eci (p: &Cartesian3, gmst: f64) -> Self {
        Cartographic::from_ecef( &teme_to_ecef( p, gmst))
    }

    /// convert earth fixed (ECEF) position into WGS84 geodetic coordinates.
    /// Latitude is computed by fixed point iteration over the prime vertical radius, which converges
    /// within a few rounds for anything between ground level and GEO
    pub fn from_ecef (p: &Cartesian3) -> Self {
        let a = EQUATORIAL_EARTH_RADIUS;
        let r = p.equatorial_length();
        let longitude = normalize_pi( atan2( p.y, p.x));

        if r < 1e-6 { // on the polar axis
            let latitude = if p.z < 0.0 { -crate::HALF_PI } else { crate::HALF_PI };
            return Cartographic::new( longitude, latitude, p.z.abs() - POLAR_EARTH_RADIUS)
        }

        let mut latitude = atan2( p.z, r);
        let mut c = 1.0;

        for _ in 0..MAX_LAT_ITERATIONS {
            let sin_lat = latitude.sin();
            c = 1.0 / sqrt( 1.0 - E_EARTH_SQUARED * sin_lat * sin_lat);
            let next = atan2( p.z + a * c * E_EARTH_SQUARED * sin_lat, r);
            let done = (next - latitude).abs() < LAT_EPSILON;
            latitude = next;
            if done { break }
        }

        let height = r / latitude.cos() - a * c;
        Cartographic::new( longitude, latitude, height)
    }

    pub fn longitude_deg (&self)-> f64 { self.longitude.to_degrees() }
    pub fn latitude_deg (&self)-> f64 { self.latitude.to_degrees() }
}

impl From<&Cartesian3> for Cartographic {
    fn from (p: &Cartesian3) -> Self {
        Cartographic::from_ecef(p)
    }
}

impl From<Cartesian3> for Cartographic {
    fn from (p: Cartesian3) -> Self {
        Cartographic::from_ecef(&p)
    }
}

impl std::fmt::Display for Cartographic {
    fn fmt (&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ longitude: {:.4}, latitude: {:.4}, height: {:.0} }}",
            self.longitude.to_degrees(), self.latitude.to_degrees(), self.height)
    }
}

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

use std::{fmt, ops::{Add, Sub, Mul}};
use serde::{Serialize,Deserialize};
use crate::geo_constants::{EQUATORIAL_EARTH_RADIUS, E_EARTH_SQUARED};
use crate::cartographic::Cartographic;

/// note that we do not use uom here to allow for abstract coordinate systems. This is used for
/// both inertial (TEME) and earth fixed (ECEF) positions, in meters
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn length(&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    /// distance from the z-axis
    pub fn equatorial_length (&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y)).sqrt()
    }

    pub fn is_finite (&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// passive rotation of the coordinate frame around the z-axis by angle (radians), i.e.
    /// this returns the coordinates of self in a frame that is rotated by +angle
    pub fn rotated_frame_z (&self, angle: f64) -> Cartesian3 {
        let (sin_a, cos_a) = angle.sin_cos();
        Cartesian3 {
            x:  cos_a * self.x + sin_a * self.y,
            y: -sin_a * self.x + cos_a * self.y,
            z: self.z
        }
    }
}

impl Add for Cartesian3 {
    type Output = Cartesian3;
    fn add (self, p: Cartesian3) -> Cartesian3 { Cartesian3::new( self.x + p.x, self.y + p.y, self.z + p.z) }
}

impl Sub for Cartesian3 {
    type Output = Cartesian3;
    fn sub (self, p: Cartesian3) -> Cartesian3 { Cartesian3::new( self.x - p.x, self.y - p.y, self.z - p.z) }
}

impl Mul<f64> for Cartesian3 {
    type Output = Cartesian3;
    fn mul (self, s: f64) -> Cartesian3 { Cartesian3::new( self.x * s, self.y * s, self.z * s) }
}

/// geodetic (WGS84) to ECEF
impl From<&Cartographic> for Cartesian3 {
    fn from(p: &Cartographic) -> Self {
        let φ = p.latitude;
        let λ = p.longitude;
        let h = p.height;

        let sin_φ = φ.sin();
        let cos_φ = φ.cos();

        let n = EQUATORIAL_EARTH_RADIUS / ( 1.0 - E_EARTH_SQUARED * (sin_φ * sin_φ)).sqrt(); // prime vertical radius
        let c = (n + h)*cos_φ;

        let x = c * λ.cos();
        let y = c * λ.sin();
        let z = ((1.0 - E_EARTH_SQUARED) * n + h) * sin_φ;

        Cartesian3::new( x, y, z)
    }
}

impl From<Cartographic> for Cartesian3 {
    fn from (p: Cartographic) -> Self {
        Cartesian3::from(&p)
    }
}

impl fmt::Display for Cartesian3 {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

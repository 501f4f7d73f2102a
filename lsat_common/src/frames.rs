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

/// frame rotations between the inertial TEME frame (SGP4 output) and the earth fixed frame.
/// We only account for earth rotation (sidereal time) - polar motion and the equation of equinoxes
/// are below SGP4 accuracy for sub-point computation

use chrono::{DateTime,Utc};
use crate::{angle::normalize_two_pi, cartesian3::Cartesian3, geo_constants::{JD_J2000, JD_UNIX_EPOCH}};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_CENTURY: f64 = 36525.0;

/// julian date for given UTC datetime (also used as UT1 approximation)
pub fn julian_date (t: &DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / MILLIS_PER_DAY + JD_UNIX_EPOCH
}

/// Greenwich mean sidereal time in radians [0,2π) for the given UT1 julian date,
/// using the IAU-82 polynomial (Vallado, Fundamentals of Astrodynamics, eq. 3-47)
pub fn gmst_jd (jd_ut1: f64) -> f64 {
    let tut1 = (jd_ut1 - JD_J2000) / DAYS_PER_CENTURY;

    let secs = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;

    normalize_two_pi( (secs / 240.0).to_radians()) // 240 sidereal secs per degree
}

#[inline]
pub fn gmst (t: &DateTime<Utc>) -> f64 {
    gmst_jd( julian_date(t))
}

/// rotate inertial TEME coordinates into the earth fixed frame
#[inline]
pub fn teme_to_ecef (p: &Cartesian3, gmst: f64) -> Cartesian3 {
    p.rotated_frame_z( gmst)
}

#[inline]
pub fn ecef_to_teme (p: &Cartesian3, gmst: f64) -> Cartesian3 {
    p.rotated_frame_z( -gmst)
}

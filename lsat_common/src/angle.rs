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

use crate::{PI,TWO_PI};

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// radians into (-PI,PI]
#[inline]
pub fn normalize_pi (r: f64) -> f64 {
    let x = r % TWO_PI;

    if x <= -PI { x + TWO_PI }
    else if x > PI { x - TWO_PI }
    else { x }
}

/// radians into [0,2*PI)
#[inline]
pub fn normalize_two_pi (r: f64) -> f64 {
    let x = r % TWO_PI;
    if x < 0.0 { x + TWO_PI } else { x }
}

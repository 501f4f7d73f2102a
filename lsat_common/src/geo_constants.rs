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

/// geodetic constants used throughout lsat crates. Lengths are in meters unless the name says otherwise

/// mean earth radius in kilometers as used for haversine surface distances
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84 semi major axis in meters
pub const EQUATORIAL_EARTH_RADIUS: f64 = 6378137.0;

/// WGS84 semi minor axis in meters
pub const POLAR_EARTH_RADIUS: f64 = 6356752.3142;

/// WGS84 flattening
pub const F_EARTH: f64 = (EQUATORIAL_EARTH_RADIUS - POLAR_EARTH_RADIUS) / EQUATORIAL_EARTH_RADIUS;

/// square of first eccentricity (2f - f²)
pub const E_EARTH_SQUARED: f64 = 2.0*F_EARTH - F_EARTH*F_EARTH;

/// unix epoch as julian date
pub const JD_UNIX_EPOCH: f64 = 2440587.5;

/// J2000 reference epoch as julian date
pub const JD_J2000: f64 = 2451545.0;

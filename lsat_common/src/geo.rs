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

/// this module provides geographic positions on the earth surface and surface distances between them.
/// Positions are stored in degrees (as they come from geolocation APIs or user input). Lengths use
/// [uom](https://docs.rs/uom/latest/uom/) so that callers do not have to guess if a radius is in meters or kilometers

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::kilometer};

use crate::{
    angle::{normalize_180, normalize_90},
    cartographic::Cartographic,
    errors::{LsatCommonError, Result},
    geo_constants::MEAN_EARTH_RADIUS_KM,
    uom::kilometers,
    asin, cos, sin2, sqrt, rad
};

/// the mean earth radius that is used for haversine distances if nothing else is specified
pub fn mean_earth_radius ()->Length {
    kilometers( MEAN_EARTH_RADIUS_KM)
}

/* #region GeoCoordinate ******************************************************************************************/

/// geographic surface position in degrees. No altitude is stored - this is either an observer position
/// or the ground point of a satellite
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(try_from = "GeoCoordinateFields")]
pub struct GeoCoordinate {
    pub latitude: f64,  // degrees [-90,90]
    pub longitude: f64, // degrees [-180,180]
}

impl GeoCoordinate {
    /// create a checked GeoCoordinate, returning `InvalidCoordinate` for out-of-range or non-finite values
    pub fn new (latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err( LsatCommonError::InvalidCoordinate( format!("latitude {latitude} not in [-90,90]")))
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err( LsatCommonError::InvalidCoordinate( format!("longitude {longitude} not in [-180,180]")))
        }
        Ok( GeoCoordinate { latitude, longitude } )
    }

    /// normalize instead of checking. Use this for computed positions
    pub fn from_degrees_unchecked (latitude: f64, longitude: f64) -> Self {
        GeoCoordinate { latitude: normalize_90(latitude), longitude: normalize_180(longitude) }
    }

    pub fn from_cartographic (c: &Cartographic) -> Self {
        GeoCoordinate::from_degrees_unchecked( c.latitude_deg(), c.longitude_deg())
    }

    /// great circle surface distance for a sphere with given radius
    pub fn distance_to (&self, other: &GeoCoordinate, radius: Length) -> Length {
        haversine_distance( self, other, radius)
    }
}

impl From<&Cartographic> for GeoCoordinate {
    fn from (c: &Cartographic) -> Self { GeoCoordinate::from_cartographic(c) }
}

impl fmt::Display for GeoCoordinate {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}°, {:.4}°)", self.latitude, self.longitude)
    }
}

/// the serialized form, supporting the usual name variants
#[derive(Deserialize)]
struct GeoCoordinateFields {
    #[serde(alias="lat")]
    latitude: f64,
    #[serde(alias="lon",alias="lng")]
    longitude: f64,
}

impl TryFrom<GeoCoordinateFields> for GeoCoordinate {
    type Error = LsatCommonError;
    fn try_from (fields: GeoCoordinateFields) -> Result<Self> {
        GeoCoordinate::new( fields.latitude, fields.longitude)
    }
}

/* #endregion GeoCoordinate */

/// haversine great circle distance between two geographic positions on a sphere with given radius.
/// Input angles are in degrees and converted to radians here
pub fn haversine_distance (p1: &GeoCoordinate, p2: &GeoCoordinate, radius: Length) -> Length {
    let lat1 = rad(p1.latitude);
    let lat2 = rad(p2.latitude);
    let dlat = lat2 - lat1;
    let dlon = rad(p2.longitude - p1.longitude);

    let a = sin2(dlat / 2.0) + cos(lat1) * cos(lat2) * sin2(dlon / 2.0);
    let c = 2.0 * asin( sqrt( a.clamp(0.0, 1.0)));  // same as 2*atan2(√a,√(1-a)) but symmetric in rounding

    radius * c
}

/// shortcut for the common mean earth radius case, in kilometers
pub fn haversine_km (p1: &GeoCoordinate, p2: &GeoCoordinate) -> f64 {
    haversine_distance( p1, p2, mean_earth_radius()).get::<kilometer>()
}

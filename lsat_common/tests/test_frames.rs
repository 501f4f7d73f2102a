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

use chrono::{TimeZone,Utc};
use lsat_common::{cartesian3::Cartesian3, cartographic::Cartographic, frames::*, TWO_PI};

#[test]
fn test_gmst() {
    // Vallado, Fundamentals of Astrodynamics and Applications, example 3-5
    let t = Utc.with_ymd_and_hms( 1992, 8, 20, 12, 14, 0).unwrap();
    let g = gmst(&t).to_degrees();
    println!("gmst = {g:.9} deg");
    assert!( (g - 152.578787886).abs() < 1e-5);

    // one sidereal day later we are back at the same angle
    let t1 = t + chrono::TimeDelta::seconds(86164);
    let dg = (gmst(&t1) - gmst(&t)).to_degrees();
    assert!( dg.abs() < 0.01 || (dg.abs() - 360.0).abs() < 0.01);
}

#[test]
fn test_ecef_geodetic() {
    // Halifax at Landsat altitude
    let c = Cartographic::from_degrees( -63.5923, 44.6509, 705_000.0);
    let p = Cartesian3::from(&c);
    let c1 = Cartographic::from(&p);
    println!("{c} -> {p} -> {c1}");

    assert!( (c1.latitude_deg() - 44.6509).abs() < 1e-9);
    assert!( (c1.longitude_deg() + 63.5923).abs() < 1e-9);
    assert!( (c1.height - 705_000.0).abs() < 1e-3);
}

#[test]
fn test_eci_rotation() {
    let t = Utc.with_ymd_and_hms( 2025, 6, 1, 0, 0, 0).unwrap();
    let g = gmst(&t);

    // a point on the x-axis of the rotated frame is on the Greenwich meridian
    let p = Cartesian3::new( 7_000_000.0 * g.cos(), 7_000_000.0 * g.sin(), 0.0);
    let c = Cartographic::from_eci( &p, g);
    assert!( c.longitude.abs() < 1e-9);
    assert!( c.latitude.abs() < 1e-12);

    let ecef = Cartesian3::from( Cartographic::from_degrees( 20.0, -35.0, 600_000.0));
    let teme = ecef_to_teme( &ecef, g);
    let c = Cartographic::from_eci( &teme, g);
    assert!( (c.longitude_deg() - 20.0).abs() < 1e-9);
    assert!( (c.latitude_deg() + 35.0).abs() < 1e-9);
}

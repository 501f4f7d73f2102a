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

use std::f64::consts::{PI as STD_PI};
use tracing_subscriber::EnvFilter;

pub mod macros;
pub mod errors;
pub mod fs;
pub mod config;
pub mod datetime;
pub mod angle;
pub mod geo_constants;
pub mod cartesian3;
pub mod cartographic;
pub mod frames;
pub mod geo;
pub mod uom;

pub use config::load_config;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sin2(x:f64) -> f64 { let sin_x = x.sin(); sin_x*sin_x }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

pub const PI: f64 = STD_PI;
pub const HALF_PI: f64 = PI / 2.0;
pub const TWO_PI: f64 = PI * 2.0;

/// install a global fmt subscriber that is filtered by the RUST_LOG env var (e.g. `RUST_LOG=lsat_orbital=debug`).
/// Note this only succeeds if there is no global subscriber set yet, which is not an error for us
pub fn init_tracing () {
    let res = tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())
        .try_init();

    if res.is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}

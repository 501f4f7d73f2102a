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

use thiserror::Error;
use lsat_common::{errors::LsatCommonError, map_to_opaque_error};

pub type Result<T> = std::result::Result<T, LsatOrbitalError>;

/// note that a search that does not find a pass within its horizon is not an error
/// (see `PassPrediction::NotFound`)
#[derive(Error,Debug)]
pub enum LsatOrbitalError {

   /// missing or malformed element lines in a catalog feed. Only affects the respective record
   #[error("feed parse error {0}")]
   FeedParseError( String ),

   /// element lines that can't be decoded into an orbit model
   #[error("invalid element set {0}")]
   InvalidElementSet( String ),

   /// numerical failure of the orbit model at a given instant (e.g. decayed orbit)
   #[error("propagation error {0}")]
   PropagationError( String ),

   #[error("invalid search config {0}")]
   InvalidSearchConfig( String ),

   #[error("no element set for satellite {0}")]
   MissingSatellite( String ),

   /// prediction abandoned because its observer position is outdated
   #[error("prediction cancelled {0}")]
   Cancelled( String ),

   /// opaque - we don't retry network I/O
   #[error("catalog fetch failed {0}")]
   FetchError( String ),

   #[error("IO error {0}")]
   IOError( #[from] std::io::Error),

   #[error("config error {0}")]
   ConfigError( #[from] LsatCommonError),

   #[error("operation failed {0}")]
   OpFailedError(String),
}

map_to_opaque_error!{ reqwest::Error => LsatOrbitalError::FetchError }

macro_rules! feed_parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        LsatOrbitalError::FeedParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use feed_parse_error;

macro_rules! invalid_element_set {
    ($fmt:literal $(, $arg:expr )* ) => {
        LsatOrbitalError::InvalidElementSet( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_element_set;

macro_rules! propagation_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        LsatOrbitalError::PropagationError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use propagation_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        LsatOrbitalError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

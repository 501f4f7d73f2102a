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

//! RON based configuration lookup.
//!
//! Configs are looked up in the following order:
//!   1. the filename as given (absolute or relative to the current dir)
//!   2. `$LSAT_CONFIG_DIR/<filename>`
//!   3. `<resource_crate_dir>/configs/<filename>`
//!
//! Crates that ship their own `configs/` dir should use [`define_load_config`] so that (3) resolves
//! relative to their manifest dir.

use std::{env, path::{Path,PathBuf}};
use serde::Deserialize;
use crate::{fs::filepath_contents_as_string, errors::{LsatCommonError,Result}};

pub const CONFIG_DIR_ENV: &str = "LSAT_CONFIG_DIR";

pub fn find_config_file (crate_dir: Option<&Path>, filename: &str) -> Option<PathBuf> {
    let path = PathBuf::from(filename);
    if path.is_file() { return Some(path) }

    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let path = Path::new(&dir).join(filename);
        if path.is_file() { return Some(path) }
    }

    if let Some(dir) = crate_dir {
        let path = dir.join("configs").join(filename);
        if path.is_file() { return Some(path) }
    }

    None
}

/// load config without crate specific fallback
pub fn load_config<C> (filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    load_config_from( None, filename)
}

pub fn load_config_from<C> (crate_dir: Option<&Path>, filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    let path = find_config_file( crate_dir, filename).ok_or( LsatCommonError::ConfigNotFound( filename.to_string()))?;
    let data = filepath_contents_as_string( &path)?;
    Ok( ron::from_str( &data)? )
}

/// define a crate local `load_config` that falls back to the `configs/` dir of the calling crate
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load config using lsat_common - based lookup mechanism
        pub fn load_config<C> (filename: &str) -> lsat_common::errors::Result<C> where C: for <'a> serde::Deserialize<'a> {
            let crate_dir = std::path::Path::new( env!("CARGO_MANIFEST_DIR"));
            lsat_common::config::load_config_from( Some(crate_dir), filename)
        }
    }
}

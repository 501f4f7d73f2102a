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

use uom::si::{length::kilometer,f64::Length};
use serde::{Deserialize,ser::Serializer,de::Deserializer};

#[inline]
pub fn kilometers (len: f64)-> Length { Length::new::<kilometer>(len) }

//--- serialization support

pub fn ser_length_as_kilometers<S: Serializer> (length: &Length, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_f64( length.get::<kilometer>())
}

pub fn de_length_from_kilometers <'a,D>(deserializer: D) -> Result<Length,D::Error> where D: Deserializer<'a> {
    let v: f64 = f64::deserialize(deserializer)?;
    Ok( Length::new::<kilometer>(v) )
}

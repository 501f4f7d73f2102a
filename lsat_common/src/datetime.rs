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

use std::time::Duration;
use chrono::{DateTime,Local,TimeDelta,Utc};
use serde::{Deserialize,ser::Serializer,de::{Deserializer,Error as DeError}};
use parse_duration::parse;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }
#[inline] pub fn days (n: u64)->Duration { Duration::from_secs(n * 86400) }

/// None if millis are outside of the chrono range
pub fn from_epoch_millis (millis: i64)->Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

pub fn short_utc_datetime_string (dt: &DateTime<Utc>) -> String {
    format!("{}", dt.format("%Y-%m-%dT%H:%M:%S%Z"))
}

pub fn local_datetime_string (dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.with_timezone(&Local);
    format!("{}", local.format("%Y-%m-%d %H:%M:%S %Z"))
}

//--- misc string format parsing

pub fn parse_datetime (s: &str)->Option<DateTime<Utc>> {
    match DateTime::parse_from_str(s, "%+") {
        Ok(dt) => Some(dt.to_utc()),
        Err(_) => None
    }
}

pub fn parse_optional_datetime_or<F> (spec: &Option<String>, f: F)->DateTime<Utc> where F: FnOnce()->DateTime<Utc> {
    if let Some(date) = spec.as_ref().and_then(|s| parse_datetime(s)) {
        return date
    }
    f()
}

//--- support for serde

pub fn ser_epoch_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_i64(dt.timestamp_millis())
}

pub fn de_from_epoch_millis <'a,D>(deserializer: D) -> Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    let millis: i64 = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis).ok_or( DeError::custom("invalid timestamp value"))
}

/// deserialize human readable duration specs such as "1m", "90s" or "16 days"
pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| DeError::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{}s", dur.as_secs_f64());
    s.serialize_str(&dfm)
}

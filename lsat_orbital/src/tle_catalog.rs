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

use std::{collections::HashMap, fmt, path::PathBuf};
use serde::{Serialize,Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use satkit::TLE;
use tracing::{debug,warn};
use crate::errors::{feed_parse_error, invalid_element_set, LsatOrbitalError, Result};

/// reading satellite element sets from plain text TLE catalogs such as
/// https://celestrak.org/NORAD/elements/resource.txt, which consist of three-line groups
/// ```text
/// LANDSAT 8
/// 1 39084U 13008A   25290.52388360  .00000404  00000-0  99579-4 0  9998
/// 2 39084  98.1962 358.6226 0001157  93.1916 266.9421 14.57104547675810
/// ```

const TLE_LINE_LEN: usize = 69;

/* #region OrbitalElementSet ****************************************************************************************/

/// the (trimmed) TLE lines for a named satellite. This is immutable once created
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct OrbitalElementSet {
    name: String,
    line1: String,
    line2: String,
}

impl OrbitalElementSet {
    pub fn new (name: impl ToString, line1: &str, line2: &str)->Self {
        OrbitalElementSet { name: name.to_string(), line1: line1.trim().to_string(), line2: line2.trim().to_string() }
    }

    pub fn name (&self)->&str { self.name.as_str() }
    pub fn line1 (&self)->&str { self.line1.as_str() }
    pub fn line2 (&self)->&str { self.line2.as_str() }

    /// the NORAD catalog number (columns 3-7 of line 1)
    pub fn sat_id (&self)->Option<u32> {
        self.line1.get(2..7).and_then( |s| s.trim().parse().ok())
    }

    /// structural check of both lines: length, line numbers, matching catalog numbers and checksums.
    /// This is a pre-condition for decoding since the orbit model parses by column
    pub fn validate (&self)->Result<()> {
        let name = &self.name;
        for (i,line) in [&self.line1, &self.line2].iter().enumerate() {
            let n = i+1;
            if !line.is_ascii() || line.len() != TLE_LINE_LEN {
                return Err( invalid_element_set!("{name}: line {n} is not a {TLE_LINE_LEN} character ASCII line"))
            }
            if !line.starts_with( if n == 1 { "1 " } else { "2 " }) {
                return Err( invalid_element_set!("{name}: line {n} has wrong line number"))
            }
            let bytes = line.as_bytes();
            let expected = tle_checksum( &line[..TLE_LINE_LEN-1]);
            let actual = bytes[TLE_LINE_LEN-1];
            if !actual.is_ascii_digit() || (actual - b'0') != expected {
                return Err( invalid_element_set!("{name}: line {n} checksum mismatch (expected {expected})"))
            }
        }

        if self.line1[2..7] != self.line2[2..7] {
            return Err( invalid_element_set!("{name}: catalog numbers of line 1 and 2 differ"))
        }

        Ok(())
    }

    /// decode into the satkit orbit model representation
    pub fn decode (&self)->Result<TLE> {
        self.validate()?;
        TLE::load_2line( &self.line1, &self.line2).map_err( |e| invalid_element_set!("{}: satkit TLE import failed {:?}", self.name, e))
    }
}

impl fmt::Display for OrbitalElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.name, self.line1, self.line2)
    }
}

/// standard TLE modulo 10 checksum: sum of all digits, with '-' counting as 1
pub fn tle_checksum (s: &str)->u8 {
    let sum: u32 = s.bytes().map( |b| match b {
        b'0'..=b'9' => (b - b'0') as u32,
        b'-' => 1,
        _ => 0
    }).sum();
    (sum % 10) as u8
}

/* #endregion OrbitalElementSet */

/* #region catalog parsing ******************************************************************************************/

/// the outcome for one matched name line in a catalog
#[derive(Debug)]
pub struct CatalogRecord {
    pub name: String,       // the wanted name that matched
    pub line_index: usize,  // 0-based index of the matching name line
    pub result: Result<OrbitalElementSet>
}

/// scan catalog text for lines that contain any of the wanted names (case sensitive substring match)
/// and return one record per match in feed order. Matches that are not followed by two non-empty
/// element lines produce a `FeedParseError` record. A single line can match several wanted names
pub fn scan_catalog<I,S> (text: &str, wanted: I) -> Vec<CatalogRecord> where I: IntoIterator<Item=S>, S: AsRef<str> {
    let wanted: Vec<String> = wanted.into_iter()
        .map( |s| s.as_ref().to_string())
        .filter( |s| !s.is_empty())
        .collect();
    let lines: Vec<&str> = text.lines().collect();
    let mut records: Vec<CatalogRecord> = Vec::new();

    for (i,line) in lines.iter().enumerate() {
        for name in &wanted {
            if line.contains( name.as_str()) {
                let result = read_element_lines( &lines, i, name);
                records.push( CatalogRecord { name: name.clone(), line_index: i, result });
            }
        }
    }

    records
}

fn read_element_lines (lines: &[&str], i: usize, name: &str) -> Result<OrbitalElementSet> {
    let (Some(line1), Some(line2)) = (lines.get(i+1), lines.get(i+2)) else {
        return Err( feed_parse_error!("'{name}' in line {} is not followed by two element lines", i+1))
    };

    let line1 = line1.trim();
    let line2 = line2.trim();

    if line1.is_empty() || line2.is_empty() {
        return Err( feed_parse_error!("empty element line after '{name}' in line {}", i+1))
    }
    if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
        return Err( feed_parse_error!("lines following '{name}' in line {} are not TLE lines 1 and 2", i+1))
    }

    Ok( OrbitalElementSet::new( name, line1, line2) )
}

/// parse catalog text into a name -> OrbitalElementSet map for the wanted names.
/// Malformed records are skipped, later records for the same name replace earlier ones
pub fn parse_catalog<I,S> (text: &str, wanted: I) -> HashMap<String,OrbitalElementSet> where I: IntoIterator<Item=S>, S: AsRef<str> {
    let mut map: HashMap<String,OrbitalElementSet> = HashMap::new();

    for rec in scan_catalog( text, wanted) {
        match rec.result {
            Ok(es) => {
                debug!("found element set for '{}' in line {}", rec.name, rec.line_index+1);
                map.insert( rec.name, es);
            }
            Err(e) => warn!("skipping catalog record: {e}")
        }
    }

    map
}

/* #endregion catalog parsing */

/* #region catalog sources ******************************************************************************************/

/// something we can obtain TLE catalog text from
#[async_trait]
pub trait TleSource: Send + Sync {
    async fn fetch_catalog (&self) -> Result<String>;

    fn description (&self) -> String;
}

/// catalog text from a http(s) server, e.g. celestrak.org. No retries, no caching
pub struct HttpTleSource {
    url: String,
    client: Client,
}

impl HttpTleSource {
    pub fn new (url: impl ToString)->Self {
        HttpTleSource { url: url.to_string(), client: Client::new() }
    }
}

#[async_trait]
impl TleSource for HttpTleSource {
    async fn fetch_catalog (&self) -> Result<String> {
        let response = self.client.get( &self.url).send().await?;

        if response.status().is_success() {
            Ok( response.text().await? )
        } else {
            Err( LsatOrbitalError::FetchError( format!("{} returned status {}", self.url, response.status())) )
        }
    }

    fn description (&self) -> String { self.url.clone() }
}

/// catalog text from a local file
pub struct FileTleSource {
    path: PathBuf
}

impl FileTleSource {
    pub fn new (path: impl Into<PathBuf>)->Self {
        FileTleSource { path: path.into() }
    }
}

#[async_trait]
impl TleSource for FileTleSource {
    async fn fetch_catalog (&self) -> Result<String> {
        Ok( tokio::fs::read_to_string( &self.path).await? )
    }

    fn description (&self) -> String { self.path.display().to_string() }
}

/// fetch catalog from source and parse the wanted element sets
pub async fn load_catalog<T,I,S> (source: &T, wanted: I) -> Result<HashMap<String,OrbitalElementSet>>
    where T: TleSource + ?Sized, I: IntoIterator<Item=S>, S: AsRef<str>
{
    let text = source.fetch_catalog().await?;
    debug!("fetched {} bytes of catalog data from {}", text.len(), source.description());
    Ok( parse_catalog( &text, wanted) )
}

/* #endregion catalog sources */

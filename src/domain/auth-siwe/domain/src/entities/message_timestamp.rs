// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// RFC 3339 timestamp that remembers the exact text it was parsed from.
///
/// Signatures are checked against the message text, so a timestamp written as
/// `2024-01-01T00:00:00.000Z` must be rendered back byte for byte even though
/// it denotes the same instant as `2024-01-01T00:00:00Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTimestamp {
    raw: String,
    value: DateTime<Utc>,
}

impl MessageTimestamp {
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self {
            raw: value.to_rfc3339_opts(SecondsFormat::Millis, true),
            value,
        }
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for MessageTimestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc);
        Ok(Self {
            raw: s.to_string(),
            value,
        })
    }
}

impl fmt::Display for MessageTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for MessageTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for MessageTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

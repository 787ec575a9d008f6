pub mod post;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Unexpected},
};
use std::{fmt::Display, num::ParseIntError, str::FromStr};
use thiserror::Error;
use time::UtcDateTime;

/// Identifier of a post: the wall-clock Unix timestamp in milliseconds at
/// which the post was accepted, carried in its decimal string form on the
/// wire and on disk.
///
/// Two posts accepted within the same millisecond receive the same id; the
/// collection resolves that collision last-write-wins.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostId(u64);

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("The post id is not a decimal millisecond timestamp: {0}")]
pub struct InvalidPostIdError(#[source] ParseIntError);

impl PostId {
    /// The single id-generation point. Alternative schemes (monotonic
    /// counter, random identifier) would slot in here without touching the
    /// store's load/save contract.
    #[must_use]
    pub fn now() -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self((UtcDateTime::now().unix_timestamp_nanos() / 1_000_000) as u64)
    }

    #[must_use]
    pub fn from_unix_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub fn unix_millis(self) -> u64 {
        self.0
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for PostId {
    type Err = InvalidPostIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self).map_err(InvalidPostIdError)
    }
}

impl Serialize for PostId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        inner
            .parse()
            .map_err(|_| Error::invalid_value(Unexpected::Str(&inner), &"PostId"))
    }
}

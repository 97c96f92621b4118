//! Enumerated feed filters and upstream document naming.
//!
//! Callers speak in short codes (`H`, `4.5+`, ...); the upstream publishes one
//! document per `{magnitude}_{window}` pair. Both lookups are closed: anything
//! outside the table is rejected before a socket is opened.

use std::fmt;
use std::str::FromStr;

use crate::feed::FeedError;

/// Time window covered by a feed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timebox {
    Hour,
    Day,
    Week,
    Month,
}

impl Timebox {
    pub const ALL: [Timebox; 4] = [Timebox::Hour, Timebox::Day, Timebox::Week, Timebox::Month];

    /// Caller-facing code.
    pub fn code(self) -> &'static str {
        match self {
            Timebox::Hour => "H",
            Timebox::Day => "D",
            Timebox::Week => "W",
            Timebox::Month => "M",
        }
    }

    /// Upstream token.
    pub fn token(self) -> &'static str {
        match self {
            Timebox::Hour => "hour",
            Timebox::Day => "day",
            Timebox::Week => "week",
            Timebox::Month => "month",
        }
    }
}

impl FromStr for Timebox {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timebox::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or(FeedError::InvalidArgument { param: "timebox" })
    }
}

impl fmt::Display for Timebox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Minimum magnitude included in a feed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Magnitude {
    Significant,
    M2_5,
    M1_0,
    All,
}

impl Magnitude {
    pub const ALL: [Magnitude; 4] = [
        Magnitude::Significant,
        Magnitude::M2_5,
        Magnitude::M1_0,
        Magnitude::All,
    ];

    /// Caller-facing code.
    pub fn code(self) -> &'static str {
        match self {
            Magnitude::Significant => "4.5+",
            Magnitude::M2_5 => "2.5+",
            Magnitude::M1_0 => "1.0+",
            Magnitude::All => "all",
        }
    }

    /// Upstream token.
    pub fn token(self) -> &'static str {
        match self {
            Magnitude::Significant => "4.5",
            Magnitude::M2_5 => "2.5",
            Magnitude::M1_0 => "1.0",
            Magnitude::All => "all",
        }
    }
}

impl FromStr for Magnitude {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Magnitude::ALL
            .into_iter()
            .find(|m| m.code() == s)
            .ok_or(FeedError::InvalidArgument { param: "magnitude" })
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validated (window, threshold) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub timebox: Timebox,
    pub magnitude: Magnitude,
}

impl FilterSelection {
    /// Filters used by the legacy listing route.
    pub const DEFAULT: FilterSelection = FilterSelection {
        timebox: Timebox::Day,
        magnitude: Magnitude::All,
    };

    /// Parse raw caller codes. The timebox is checked first, so a request
    /// with two bad values reports the timebox.
    pub fn parse(timebox: &str, magnitude: &str) -> Result<Self, FeedError> {
        let timebox = timebox.parse::<Timebox>()?;
        let magnitude = magnitude.parse::<Magnitude>()?;
        Ok(Self { timebox, magnitude })
    }

    /// Upstream document name, e.g. `4.5_hour.geojson`.
    pub fn document_name(&self) -> String {
        format!("{}_{}.geojson", self.magnitude.token(), self.timebox.token())
    }

    /// Full upstream URL under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.document_name())
    }
}

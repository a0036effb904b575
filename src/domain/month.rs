//! Month - The Dashboard Time Bucket
//!
//! The records endpoint keys months by two-digit code (`"03"`), the aggregate
//! endpoints by short label (`"Mar"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A calendar month selectable on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Month {
    Jan,
    Feb,
    #[default]
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Short label, also the bucket id of the aggregate endpoints
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Full English name
    pub fn name(self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }

    /// Two-digit code expected by the records endpoint
    pub fn code(self) -> &'static str {
        match self {
            Month::Jan => "01",
            Month::Feb => "02",
            Month::Mar => "03",
            Month::Apr => "04",
            Month::May => "05",
            Month::Jun => "06",
            Month::Jul => "07",
            Month::Aug => "08",
            Month::Sep => "09",
            Month::Oct => "10",
            Month::Nov => "11",
            Month::Dec => "12",
        }
    }

    /// 1-based month number
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Month from a 1-based number
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = Error;

    /// Accepts short labels, full names and numeric codes, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if let Ok(number) = value.parse::<u8>() {
            return Self::from_number(number).ok_or_else(|| Error::Invalid {
                message: format!("month number out of range: {value}"),
            });
        }

        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(value) || m.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::Invalid {
                message: format!("unknown month: {value}"),
            })
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

//! Freeform text fields shown on the card
//!
//! Every field is a plain string. Nothing here checks that a grid locator
//! looks like a grid locator or that a date is a date; the card prints
//! whatever the operator typed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of a single text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Callsign,
    OperatorName,
    Qth,
    Grid,
    CqZone,
    ItuZone,
    Date,
    Time,
    Frequency,
    Band,
    Mode,
    Rst,
    Contact,
    Comments,
}

/// Unknown field name given on the command line or in a panel edit
#[derive(Debug, Error, PartialEq)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FieldKey {
    /// All keys in panel order
    pub const ALL: [FieldKey; 14] = [
        FieldKey::Callsign,
        FieldKey::OperatorName,
        FieldKey::Qth,
        FieldKey::Grid,
        FieldKey::CqZone,
        FieldKey::ItuZone,
        FieldKey::Date,
        FieldKey::Time,
        FieldKey::Frequency,
        FieldKey::Band,
        FieldKey::Mode,
        FieldKey::Rst,
        FieldKey::Contact,
        FieldKey::Comments,
    ];

    /// Wire name (snake_case)
    pub fn name(self) -> &'static str {
        match self {
            FieldKey::Callsign => "callsign",
            FieldKey::OperatorName => "operator_name",
            FieldKey::Qth => "qth",
            FieldKey::Grid => "grid",
            FieldKey::CqZone => "cq_zone",
            FieldKey::ItuZone => "itu_zone",
            FieldKey::Date => "date",
            FieldKey::Time => "time",
            FieldKey::Frequency => "frequency",
            FieldKey::Band => "band",
            FieldKey::Mode => "mode",
            FieldKey::Rst => "rst",
            FieldKey::Contact => "contact",
            FieldKey::Comments => "comments",
        }
    }

    /// Human-readable label for the property panel
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Callsign => "Callsign",
            FieldKey::OperatorName => "Operator name",
            FieldKey::Qth => "QTH",
            FieldKey::Grid => "Grid locator",
            FieldKey::CqZone => "CQ zone",
            FieldKey::ItuZone => "ITU zone",
            FieldKey::Date => "Date",
            FieldKey::Time => "Time (UTC)",
            FieldKey::Frequency => "Frequency (MHz)",
            FieldKey::Band => "Band",
            FieldKey::Mode => "Mode",
            FieldKey::Rst => "RST",
            FieldKey::Contact => "Contact callsign",
            FieldKey::Comments => "Comments",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKey {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FieldKey::ALL
            .into_iter()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Current value of every field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub callsign: String,
    pub operator_name: String,
    pub qth: String,
    pub grid: String,
    pub cq_zone: String,
    pub itu_zone: String,
    pub date: String,
    pub time: String,
    pub frequency: String,
    pub band: String,
    pub mode: String,
    pub rst: String,
    pub contact: String,
    pub comments: String,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            callsign: "N0CALL".to_string(),
            operator_name: String::new(),
            qth: String::new(),
            grid: String::new(),
            cq_zone: String::new(),
            itu_zone: String::new(),
            date: String::new(),
            time: String::new(),
            frequency: String::new(),
            band: String::new(),
            mode: String::new(),
            rst: String::new(),
            contact: String::new(),
            comments: String::new(),
        }
    }
}

impl Fields {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Callsign => &self.callsign,
            FieldKey::OperatorName => &self.operator_name,
            FieldKey::Qth => &self.qth,
            FieldKey::Grid => &self.grid,
            FieldKey::CqZone => &self.cq_zone,
            FieldKey::ItuZone => &self.itu_zone,
            FieldKey::Date => &self.date,
            FieldKey::Time => &self.time,
            FieldKey::Frequency => &self.frequency,
            FieldKey::Band => &self.band,
            FieldKey::Mode => &self.mode,
            FieldKey::Rst => &self.rst,
            FieldKey::Contact => &self.contact,
            FieldKey::Comments => &self.comments,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let slot = match key {
            FieldKey::Callsign => &mut self.callsign,
            FieldKey::OperatorName => &mut self.operator_name,
            FieldKey::Qth => &mut self.qth,
            FieldKey::Grid => &mut self.grid,
            FieldKey::CqZone => &mut self.cq_zone,
            FieldKey::ItuZone => &mut self.itu_zone,
            FieldKey::Date => &mut self.date,
            FieldKey::Time => &mut self.time,
            FieldKey::Frequency => &mut self.frequency,
            FieldKey::Band => &mut self.band,
            FieldKey::Mode => &mut self.mode,
            FieldKey::Rst => &mut self.rst,
            FieldKey::Contact => &mut self.contact,
            FieldKey::Comments => &mut self.comments,
        };
        *slot = value.into();
    }

    /// Iterate over (key, value) pairs in panel order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        FieldKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValleyError;

/// Where an item stands. Exactly one at a time; the states are not cumulative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Missing,
    Collected,
    Delivered,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [Self::Missing, Self::Collected, Self::Delivered];

    /// Wire spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Collected => "collected",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValleyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing" => Ok(Self::Missing),
            "collected" => Ok(Self::Collected),
            "delivered" => Ok(Self::Delivered),
            other => Err(ValleyError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A single trackable unit inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Back-reference to the owning bundle.
    pub bundle_id: String,
    pub name: String,
    pub status: ItemStatus,
    /// Optional quality tag, e.g. "gold".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl Item {
    /// A new item, starting out missing.
    pub fn new(id: &str, bundle_id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            bundle_id: bundle_id.to_string(),
            name: name.to_string(),
            status: ItemStatus::Missing,
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: &str) -> Self {
        self.quality = Some(quality.to_string());
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order in which surplus money is thrown at debts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Smallest balance first.
    #[default]
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

impl Strategy {
    pub fn all() -> &'static [Strategy] {
        &[Strategy::Snowball, Strategy::Avalanche]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowball => "SNOWBALL",
            Self::Avalanche => "AVALANCHE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Snowball => "Snowball",
            Self::Avalanche => "Avalanche",
        }
    }

    /// Case-insensitive parse of `snowball` / `avalanche`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SNOWBALL" => Some(Self::Snowball),
            "AVALANCHE" => Some(Self::Avalanche),
            _ => None,
        }
    }

    /// The competing strategy.
    pub fn other(&self) -> Self {
        match self {
            Self::Snowball => Self::Avalanche,
            Self::Avalanche => Self::Snowball,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

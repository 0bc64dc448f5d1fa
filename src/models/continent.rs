use serde::{Deserialize, Serialize};

/// Six-continent taxonomy plus an Unknown bucket for unresolvable countries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Continent {
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "EU")]
    Europe,
    #[serde(rename = "AS")]
    Asia,
    #[serde(rename = "SA")]
    SouthAmerica,
    #[serde(rename = "OC")]
    Oceania,
    #[serde(rename = "AF")]
    Africa,
    Unknown,
}

impl Continent {
    pub fn code(self) -> &'static str {
        match self {
            Continent::NorthAmerica => "NA",
            Continent::Europe => "EU",
            Continent::Asia => "AS",
            Continent::SouthAmerica => "SA",
            Continent::Oceania => "OC",
            Continent::Africa => "AF",
            Continent::Unknown => "Unknown",
        }
    }

    /// Collapse the small-sample continents into a single reporting bucket.
    /// SA, OC and AF individually carry too few papers to plot.
    pub fn grouped(self) -> GroupedContinent {
        match self {
            Continent::NorthAmerica => GroupedContinent::NorthAmerica,
            Continent::Europe => GroupedContinent::Europe,
            Continent::Asia => GroupedContinent::Asia,
            Continent::SouthAmerica | Continent::Oceania | Continent::Africa => {
                GroupedContinent::Others
            }
            Continent::Unknown => GroupedContinent::Unknown,
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Four-bucket reporting taxonomy used by the plotting stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GroupedContinent {
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "EU")]
    Europe,
    #[serde(rename = "AS")]
    Asia,
    Others,
    Unknown,
}

impl GroupedContinent {
    pub fn code(self) -> &'static str {
        match self {
            GroupedContinent::NorthAmerica => "NA",
            GroupedContinent::Europe => "EU",
            GroupedContinent::Asia => "AS",
            GroupedContinent::Others => "Others",
            GroupedContinent::Unknown => "Unknown",
        }
    }

    /// Total over every resolution outcome: a missing continent is Unknown.
    pub fn from_resolved(continent: Option<Continent>) -> Self {
        match continent {
            Some(c) => c.grouped(),
            None => GroupedContinent::Unknown,
        }
    }
}

impl std::fmt::Display for GroupedContinent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

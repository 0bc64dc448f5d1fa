use serde::{Deserialize, Serialize};

use crate::models::continent::Continent;
use crate::models::null_to_default;

/// One affiliation entry as crawled. Institutions occasionally appear as a
/// bare name string instead of an object; both forms are accepted, and
/// anything else collapses to an empty entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawInstitution")]
pub struct Institution {
    #[serde(rename = "Institution Name")]
    pub name: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstitution {
    Detailed {
        #[serde(rename = "Institution Name", default)]
        name: Option<String>,
        #[serde(rename = "Country", default)]
        country: Option<String>,
    },
    Name(String),
    Other(serde_json::Value),
}

impl From<RawInstitution> for Institution {
    fn from(raw: RawInstitution) -> Self {
        match raw {
            RawInstitution::Detailed { name, country } => Institution { name, country },
            RawInstitution::Name(name) => Institution {
                name: Some(name),
                country: None,
            },
            RawInstitution::Other(_) => Institution {
                name: None,
                country: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "Institutions", default, deserialize_with = "null_to_default")]
    pub institutions: Vec<Institution>,

    /// Author name and whatever else the crawler recorded; carried through
    /// untouched so processed files keep the source fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Year labels arrive as strings or bare integers depending on crawler
/// vintage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for YearLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearLabel::Number(n) => write!(f, "{}", n),
            YearLabel::Text(s) => f.write_str(s),
        }
    }
}

/// A paper as produced by the extended crawler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Year", default)]
    pub year: Option<YearLabel>,

    #[serde(
        rename = "Authors and Institutions",
        default,
        deserialize_with = "null_to_default"
    )]
    pub authors: Vec<Author>,
}

/// A paper after reduction: essential fields plus the derived predominant
/// continent. The continent list is recomputed each run, never treated as
/// ground truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedPaper {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Year")]
    pub year: String,

    #[serde(rename = "Predominant Continent")]
    pub predominant_continent: Vec<Continent>,

    #[serde(
        rename = "Authors and Institutions",
        default,
        deserialize_with = "null_to_default"
    )]
    pub authors: Vec<Author>,
}

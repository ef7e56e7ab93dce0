//! Directory API response DTOs.
//!
//! These types map directly to the JSON served under `/fuel_stations`.
//! Every attribute except the identifier is an `Option`: the directory
//! leaves keys out rather than sending null placeholders, and a missing
//! key must decode as absence, not as an error. The same holds one level
//! down: an attribute that is present but malformed (a coordinate pair
//! missing a half, a fuel without a name) is dropped on its own, so one
//! odd record never fails a whole station listing. Unknown keys are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Every directory response wraps its payload in a `data` object.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Payload of the station-list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct StationList {
    pub stations: Vec<Station>,
}

/// One fuel station as exposed by the directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Directory identifier. The API sends it as a number; strings are
    /// accepted too. A record without one decodes with an empty id.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name of the station.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,

    /// City the station is located in.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub city: Option<String>,

    /// Map position.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub coordinates: Option<Coordinates>,

    /// Fuels sold, in directory order.
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub fuels: Option<Vec<NamedEntry>>,

    /// Opening hours.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub schedule: Option<Schedule>,

    /// Extra services (shop, car wash, ...), in directory order.
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub services: Option<Vec<NamedEntry>>,

    /// Free-text note about current operation.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub work_description: Option<String>,
}

impl Station {
    /// Create a station carrying only its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A named list item such as a fuel or a service.
///
/// The directory sends objects like `{"id": 1, "name": "A-95"}`; a bare
/// string is accepted as the name itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEntry")]
pub struct NamedEntry {
    pub name: String,
}

impl NamedEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Plain(String),
    Named { name: String },
}

impl From<RawEntry> for NamedEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Plain(name) | RawEntry::Named { name } => NamedEntry { name },
        }
    }
}

/// Opening hours, which the directory has served in more than one shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Schedule {
    /// Free text such as `"24/7"`.
    Text(String),

    /// A sequence of named entries, one per period.
    Entries(Vec<NamedEntry>),

    /// Anything else; kept verbatim so the station still decodes.
    Other(serde_json::Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Decode an attribute, treating anything that does not fit `T` as absent.
fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Decode a list of named entries, skipping items without a usable name.
///
/// A value that is not a list at all is treated as absent.
fn deserialize_entries<'de, D>(deserializer: D) -> Result<Option<Vec<NamedEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let entries = items
        .into_iter()
        .filter_map(|item| NamedEntry::deserialize(item).ok())
        .collect();
    Ok(Some(entries))
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    };
    Ok(id)
}

//! DispatcherSet - upstream producer output
//!
//! One routing target group for the SIP proxy: a set identifier and its
//! endpoints in priority order.

use serde::{Deserialize, Deserializer, Serialize};

/// A named group of endpoints
///
/// Serialized field names (`ID`, `Endpoints`) are the vocabulary exposed to
/// export templates. Configuration files may also use `id` / `endpoints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherSet {
    /// Set identifier, used as the line prefix in the rendered table
    ///
    /// Integer identifiers are accepted and kept in decimal form.
    #[serde(rename = "ID", alias = "id", deserialize_with = "deserialize_set_id")]
    pub id: String,

    /// Endpoints (host:port or URI) in listed order
    #[serde(rename = "Endpoints", alias = "endpoints", default)]
    pub endpoints: Vec<String>,
}

impl DispatcherSet {
    /// Create a set from an identifier and its endpoints
    pub fn new<I, E>(id: impl Into<String>, endpoints: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            id: id.into(),
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

fn deserialize_set_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SetId {
        Text(String),
        Number(i64),
    }

    Ok(match SetId::deserialize(deserializer)? {
        SetId::Text(id) => id,
        SetId::Number(id) => id.to_string(),
    })
}

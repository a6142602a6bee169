//! Models that keep JSON properties they do not declare.
//!
//! An open model declares its named fields as usual and collects every
//! other key in a flattened `serde_json::Map`:
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! pub struct Document {
//!     #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
//!     pub id: Option<String>,
//!     #[serde(flatten, serialize_with = "open::serialize_unknown::<Document, _>")]
//!     properties: Map<String, Value>,
//! }
//! ```
//!
//! Deserialization leaves only undeclared keys in the map. Serialization
//! writes the named fields, then every map entry whose key is not a named
//! field, so a key never appears twice and the named field wins.

use serde::Serializer;
use serde::ser::SerializeMap;
use serde_json::{Map, Value};

/// Accessors over the additional properties of an open model
pub trait OpenModel {
    /// JSON names of the declared fields
    const FIELD_NAMES: &'static [&'static str];

    fn properties(&self) -> &Map<String, Value>;

    fn properties_mut(&mut self) -> &mut Map<String, Value>;

    /// Additional property `key`, if present
    fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties().get(key)
    }

    /// All additional properties
    fn get_properties(&self) -> &Map<String, Value> {
        self.properties()
    }

    /// Set an additional property.
    ///
    /// Keys that name a declared field are serialized from the field, not
    /// from the property map.
    fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties_mut().insert(key.into(), value.into());
    }

    fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties_mut().remove(key)
    }

    /// Whether `key` is a declared field of this model
    #[must_use]
    fn is_field_name(key: &str) -> bool {
        Self::FIELD_NAMES.contains(&key)
    }
}

/// `serialize_with` target for the flattened property map of `M`.
///
/// # Errors
/// Propagates errors from the underlying serializer.
pub fn serialize_unknown<M: OpenModel, S: Serializer>(
    properties: &Map<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let extra = properties.iter().filter(|(key, _)| !M::is_field_name(key));
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in extra {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

use std::collections::BTreeMap;

use errgate_core::{Failure, PropertySource};
use serde_json::Value;

/// Collects the properties a failure exposes for the error response
///
/// Never fails: a property whose value cannot be produced is logged and
/// left out. Accessor-derived values are collected first and field-derived
/// values applied on top, so a field wins over an accessor of the same name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyExtractor;

impl PropertyExtractor {
    pub fn extract(self, failure: &dyn Failure) -> BTreeMap<String, Value> {
        let (fields, accessors): (Vec<_>, Vec<_>) = failure
            .exposed_properties()
            .into_iter()
            .partition(|property| property.source() == PropertySource::Field);

        let mut properties = BTreeMap::new();

        for property in accessors.into_iter().chain(fields) {
            let include_absent = property.includes_absent();
            let (name, value) = property.into_parts();

            match value {
                Ok(Value::Null) if !include_absent => {}
                Ok(value) => {
                    properties.insert(name, value);
                }
                Err(e) => {
                    tracing::error!(
                        failure = failure.type_key(),
                        property = %name,
                        error = %e,
                        "unable to read exposed property, leaving it out"
                    );
                }
            }
        }

        properties
    }
}

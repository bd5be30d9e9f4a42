//! Shallow construction and deep-merge updates for graph entities.

use crate::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Merges `incoming` into `base`: objects merge key by key, any other value replaces the slot.
///
/// Keys present in `base` but absent from `incoming` are left untouched.
pub fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// An entity that can be patched in place from a JSON object.
pub trait Mergeable: Serialize + DeserializeOwned {
    /// Copies fields that are owned by the graph (and therefore not part of the serialized
    /// form) from `self` onto the freshly merged value.
    fn carry_over(&self, _merged: &mut Self) {}

    /// Deep-merges `patch` into this entity.
    ///
    /// On error the entity is left unchanged.
    fn update(&mut self, patch: &Value) -> Result<()> {
        let merged = self.merged(patch)?;
        *self = merged;
        Ok(())
    }

    /// Returns a patched copy without touching `self`.
    fn merged(&self, patch: &Value) -> Result<Self> {
        let mut value = serde_json::to_value(&*self)?;
        deep_merge_value(&mut value, patch);
        let mut merged: Self = serde_json::from_value(value)?;
        self.carry_over(&mut merged);
        Ok(merged)
    }
}

//! JSON snapshot of the live collection.
//!
//! A snapshot is a flat array of records in storage order. Decoding is strict:
//! unknown or missing fields are rejected. Records in the layout written by the
//! previous widget (`state`: `active`/`disabled`/`deleted`, `checked`) are
//! still accepted on read so old saves can be imported.

use super::error::SnapshotError;
use super::item::ItemId;
use super::state::LifecycleState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapshotRecord {
    pub id: ItemId,
    pub text: String,
    pub lifecycle_state: LifecycleState,
    pub selected: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyRecord {
    id: ItemId,
    text: String,
    state: LegacyState,
    checked: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LegacyState {
    Active,
    Disabled,
    Deleted,
}

impl From<LegacyRecord> for SnapshotRecord {
    fn from(legacy: LegacyRecord) -> Self {
        let lifecycle_state = match legacy.state {
            LegacyState::Active => LifecycleState::Active,
            LegacyState::Disabled => LifecycleState::Completed,
            LegacyState::Deleted => LifecycleState::Deleted,
        };
        Self {
            id: legacy.id,
            text: legacy.text,
            lifecycle_state,
            selected: legacy.checked,
        }
    }
}

pub fn encode(records: &[SnapshotRecord]) -> Result<String, SnapshotError> {
    serde_json::to_string(records).map_err(SnapshotError::Encode)
}

pub fn decode(snapshot: &str) -> Result<Vec<SnapshotRecord>, SnapshotError> {
    let values: Vec<Value> =
        serde_json::from_str(snapshot).map_err(|e| SnapshotError::corrupt(e.to_string()))?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            decode_record(value)
                .map_err(|e| SnapshotError::corrupt(format!("record {}: {}", index, e)))
        })
        .collect()
}

/// Records without `lifecycleState` but with `state` use the legacy layout.
fn decode_record(value: Value) -> serde_json::Result<SnapshotRecord> {
    let is_legacy = value.get("lifecycleState").is_none() && value.get("state").is_some();
    if is_legacy {
        serde_json::from_value::<LegacyRecord>(value).map(SnapshotRecord::from)
    } else {
        serde_json::from_value(value)
    }
}

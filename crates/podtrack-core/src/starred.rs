//! Starred-task extraction for the favorites tab: youth fields whose
//! star twin is set but whose staff approval twin is not.

use crate::types::{FieldRole, OutcomeField, TaskItem};
use std::collections::HashMap;

/// Starred tasks within one pod's normalized fields.
///
/// The BOOL and YDM twins are found by infix substitution on the youth
/// field's name — the three shapes differ only in the
/// `_Youth_`/`_BOOL_`/`_YDM_` infix. A task is starred when its star twin
/// is explicitly true and its approval twin is explicitly false; an
/// approved task leaves the list even if the star is still set.
pub fn starred_in_pod(fields: &[OutcomeField], pod_code: &str, accessible: bool) -> Vec<TaskItem> {
    let by_name: HashMap<&str, &OutcomeField> = fields
        .iter()
        .map(|f| (f.tag.raw_name.as_str(), f))
        .collect();

    let mut out = Vec::new();
    for field in fields {
        if field.tag.role != FieldRole::YouthFlag {
            continue;
        }
        let bool_key = field.tag.raw_name.replace("_Youth_", "_BOOL_");
        let ydm_key = field.tag.raw_name.replace("_Youth_", "_YDM_");

        let starred = by_name
            .get(bool_key.as_str())
            .is_some_and(|f| f.is_true());
        let approved = by_name
            .get(ydm_key.as_str())
            .map(|f| f.value.clone())
            .unwrap_or(serde_json::Value::Null);
        if !starred || approved != serde_json::Value::Bool(false) {
            continue;
        }

        let Some(id) = &field.tag.outcome_id else {
            continue;
        };
        out.push(TaskItem {
            api_key: field.tag.raw_name.clone(),
            api_bool_key: bool_key,
            short_id: id.clone(),
            label: field.tag.label.clone(),
            ydm_approved: false,
            checked: field.value.clone(),
            star_is_filled: true,
            pod_code: pod_code.to_string(),
            accessible,
        });
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

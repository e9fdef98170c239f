//! Checkbox-tree assembly: group typed outcome fields by focus area and
//! outcome id into `OutcomeGroup → TaskItem` rows, then fold the star and
//! approval twins onto the rows they reference.

use crate::types::{FieldRole, OutcomeField, OutcomeGroup, TaskItem};
use std::collections::HashMap;

/// First 3 characters of a field name — the outcome-group code shared by
/// a group header and all of its member fields.
fn group_key(name: &str) -> Option<&str> {
    name.get(0..3)
}

/// Build the checkbox tree for one pod and one focus area.
///
/// Two-pass build with id→index maps instead of repeated linear scans:
/// seed groups from header fields, append one row per youth field, then
/// resolve YDM/BOOL twins by outcome id. Twins that reference no existing
/// row are orphans and are ignored; they never create rows of their own.
/// The pass order matters — twins can only update rows that already exist.
pub fn build_tree(fields: &[OutcomeField], focus_area: &str, pod_code: &str) -> Vec<OutcomeGroup> {
    // Pass 1: seed one group per header field. Headers carry "Outcome" and
    // the focus area in their label; the plural "Outcomes" marks a
    // summary field, not a group.
    let mut groups: Vec<OutcomeGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    for field in fields {
        let label = &field.tag.label;
        if label.contains("Outcome") && label.contains(focus_area) && !label.contains("Outcomes") {
            if let Some(key) = group_key(&field.tag.raw_name) {
                group_index.entry(key.to_string()).or_insert_with(|| {
                    groups.push(OutcomeGroup {
                        id: key.to_string(),
                        title: label.clone(),
                        content: Vec::new(),
                    });
                    groups.len() - 1
                });
            }
        }
    }

    // Pass 2: one row per youth field whose group exists.
    // row_index maps (group index, outcome id) → row position.
    let mut row_index: HashMap<(usize, String), usize> = HashMap::new();
    for field in fields {
        if field.tag.role != FieldRole::YouthFlag {
            continue;
        }
        let (Some(key), Some(id)) = (group_key(&field.tag.raw_name), &field.tag.outcome_id)
        else {
            continue;
        };
        if let Some(&gi) = group_index.get(key) {
            let content = &mut groups[gi].content;
            row_index.insert((gi, id.clone()), content.len());
            content.push(TaskItem {
                api_key: field.tag.raw_name.clone(),
                api_bool_key: String::new(),
                short_id: id.clone(),
                label: field.tag.label.clone(),
                ydm_approved: true,
                checked: field.value.clone(),
                star_is_filled: false,
                pod_code: pod_code.to_string(),
                accessible: true,
            });
        }
    }

    // Passes 3 and 4: fold approval and star twins onto their rows.
    for field in fields {
        let role = field.tag.role;
        if role != FieldRole::YdmFlag && role != FieldRole::BoolFlag {
            continue;
        }
        let (Some(key), Some(id)) = (group_key(&field.tag.raw_name), &field.tag.outcome_id)
        else {
            continue;
        };
        let Some(&gi) = group_index.get(key) else {
            continue;
        };
        let Some(&ri) = row_index.get(&(gi, id.clone())) else {
            continue; // orphaned twin
        };
        let row = &mut groups[gi].content[ri];
        match role {
            FieldRole::YdmFlag => row.ydm_approved = field.is_true(),
            FieldRole::BoolFlag => {
                row.star_is_filled = field.is_true();
                row.api_bool_key = field.tag.raw_name.clone();
            }
            _ => unreachable!(),
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

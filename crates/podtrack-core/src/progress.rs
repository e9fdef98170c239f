//! Progress aggregation over classified fields: the cross-pod home view
//! and the single-pod detail view.

use crate::types::{FieldRole, FocusProgress, HomeProgress, OutcomeField};
use std::collections::BTreeMap;

/// Count of described fields carrying the `_Outcome_<code>` pattern —
/// the denominator for one focus area.
fn total_for_code(fields: &[OutcomeField], code: &str) -> i64 {
    let pattern = format!("_Outcome_{code}");
    fields
        .iter()
        .filter(|f| f.tag.raw_name.contains(&pattern))
        .count() as i64
}

/// Cross-pod home view for one pod.
///
/// `progress` sums the per-focus-area completed counters, `checked` is
/// the pod-wide total marker, and `total` counts outcome-marker fields
/// per completed counter's type code. A user with no record for the pod
/// gets all zeros — that is a normal state, not a failure.
pub fn home_progress(fields: &[OutcomeField], record_exists: bool) -> HomeProgress {
    if !record_exists {
        return HomeProgress::default();
    }

    let mut out = HomeProgress::default();
    for field in fields {
        match field.tag.role {
            FieldRole::CompletedCount => {
                out.progress += field.as_count();
                if let Some(code) = &field.tag.pod_type_code {
                    out.total += total_for_code(fields, code);
                }
            }
            FieldRole::TotalMarker => out.checked = field.as_count(),
            _ => {}
        }
    }
    out
}

/// Single-pod detail view: one entry per focus-area type code found among
/// the completed counters.
///
/// `checked_outcomes` stays `None` when the record exists but carries no
/// checked counter for that focus area — "no such field" and "zero
/// checked" are different answers. A missing record reports zeros.
pub fn focus_progress(
    fields: &[OutcomeField],
    record_exists: bool,
) -> BTreeMap<String, FocusProgress> {
    let mut out = BTreeMap::new();
    for field in fields {
        if field.tag.role != FieldRole::CompletedCount {
            continue;
        }
        let Some(code) = field.tag.pod_type_code.clone() else {
            continue;
        };

        let completed = if record_exists { field.as_count() } else { 0 };
        let checked = if record_exists {
            checked_twin(fields, &field.tag.raw_name).map(OutcomeField::as_count)
        } else {
            Some(0)
        };

        // Label up to the word "Outcomes".
        let name = field
            .tag
            .label
            .split("Outcomes")
            .next()
            .unwrap_or("")
            .to_string();

        out.insert(
            code.clone(),
            FocusProgress {
                completed_outcomes: completed,
                checked_outcomes: checked,
                total_outcomes: total_for_code(fields, &code),
                name,
            },
        );
    }
    out
}

/// The checked counter sharing a completed counter's stem, when the
/// record actually carries a value for it.
fn checked_twin<'a>(fields: &'a [OutcomeField], completed_name: &str) -> Option<&'a OutcomeField> {
    let stem = completed_name.strip_suffix("Completed__c")?;
    let twin = format!("{stem}Checked__c");
    fields
        .iter()
        .find(|f| f.tag.role == FieldRole::CheckedCount && f.tag.raw_name == twin)
        .filter(|f| !f.value.is_null())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize;
    use crate::store::FieldMeta;
    use serde_json::{Map, Value};

    fn build(rows: &[(&str, &str, Value)]) -> Vec<OutcomeField> {
        let meta: Vec<FieldMeta> = rows
            .iter()
            .map(|(name, label, _)| FieldMeta {
                name: name.to_string(),
                label: label.to_string(),
            })
            .collect();
        let mut record = Map::new();
        for (name, _, value) in rows {
            if !value.is_null() {
                record.insert(name.to_string(), value.clone());
            }
        }
        normalize(&meta, &record)
    }

    fn trainee_fields() -> Vec<OutcomeField> {
        build(&[
            (
                "LDRTRN_Leadership_Completed__c",
                "Leadership Outcomes Completed",
                serde_json::json!(2),
            ),
            (
                "LDRTRN_Leadership_Checked__c",
                "Leadership Outcomes Checked",
                serde_json::json!(3),
            ),
            ("Total_Checked__c", "Total Checked", serde_json::json!(5)),
            ("LDR_Outcome_TRN_1__c", "Leadership Outcome 1", Value::Null),
            ("LDR_Outcome_TRN_2__c", "Leadership Outcome 2", Value::Null),
            ("LDR_Outcome_TRN_3__c", "Leadership Outcome 3", Value::Null),
            ("Contact__c", "Contact", Value::Null),
        ])
    }

    #[test]
    fn home_view_sums_counters() {
        let hp = home_progress(&trainee_fields(), true);
        assert_eq!(hp.progress, 2, "sum of completed counters");
        assert_eq!(hp.checked, 5, "total marker value");
        assert_eq!(hp.total, 3, "outcome markers for TRN");
    }

    #[test]
    fn home_view_without_record_is_zeroed() {
        let hp = home_progress(&trainee_fields(), false);
        assert_eq!(hp, HomeProgress::default());
    }

    #[test]
    fn total_marker_not_summed_into_progress() {
        // Total_Checked__c matches the Checked suffix but is its own role;
        // it must not leak into the completed sum.
        let hp = home_progress(&trainee_fields(), true);
        assert_eq!(hp.progress, 2);
    }

    #[test]
    fn detail_view_per_type_code() {
        let detail = focus_progress(&trainee_fields(), true);
        assert_eq!(detail.len(), 1);
        let ldr = &detail["TRN"];
        assert_eq!(ldr.completed_outcomes, 2);
        assert_eq!(ldr.checked_outcomes, Some(3));
        assert_eq!(ldr.total_outcomes, 3);
        assert_eq!(ldr.name, "Leadership ");
    }

    #[test]
    fn missing_checked_counter_reports_null() {
        let fields = build(&[
            (
                "LDRTRN_Leadership_Completed__c",
                "Leadership Outcomes Completed",
                serde_json::json!(1),
            ),
            ("LDR_Outcome_TRN_1__c", "Leadership Outcome 1", Value::Null),
        ]);
        let detail = focus_progress(&fields, true);
        assert_eq!(detail["TRN"].checked_outcomes, None);
        assert_eq!(detail["TRN"].completed_outcomes, 1);
    }

    #[test]
    fn detail_view_without_record_reports_zeros() {
        let detail = focus_progress(&trainee_fields(), false);
        let ldr = &detail["TRN"];
        assert_eq!(ldr.completed_outcomes, 0);
        assert_eq!(ldr.checked_outcomes, Some(0));
        assert_eq!(ldr.total_outcomes, 3, "totals come from the schema");
    }
}

//! Field-name grammar. CRM field names in this org encode structure by
//! convention: a 3-letter pod type code, infix markers (`_Youth_`,
//! `_BOOL_`, `_YDM_`), counter suffixes (`Completed__c`, `Checked__c`),
//! and a trailing 3-character outcome id token. The grammar lives here as
//! an explicit, ordered rule set so the convention can change without
//! touching aggregation logic.

use crate::error::{PodtrackError, Result};
use crate::types::{FieldRole, FieldTag};
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// NameRule
// ---------------------------------------------------------------------------

/// A fn-pointer rule — zero-cost, no heap allocation. First match wins.
struct NameRule {
    #[allow(dead_code)]
    id: &'static str,
    condition: fn(&str) -> bool,
    role: FieldRole,
}

const RULES: &[NameRule] = &[
    NameRule {
        id: "total_marker",
        condition: |n| n.contains("Total_Checked__c"),
        role: FieldRole::TotalMarker,
    },
    NameRule {
        id: "completed_count",
        condition: |n| n.ends_with("Completed__c"),
        role: FieldRole::CompletedCount,
    },
    NameRule {
        id: "checked_count",
        condition: |n| n.ends_with("Checked__c"),
        role: FieldRole::CheckedCount,
    },
    NameRule {
        id: "youth_flag",
        condition: |n| n.contains("_Youth_") && !n.contains("_BOOL_"),
        role: FieldRole::YouthFlag,
    },
    NameRule {
        id: "bool_flag",
        condition: |n| n.contains("_BOOL_"),
        role: FieldRole::BoolFlag,
    },
    NameRule {
        id: "ydm_flag",
        condition: |n| n.contains("_YDM_"),
        role: FieldRole::YdmFlag,
    },
    NameRule {
        id: "outcome_marker",
        condition: |n| outcome_code(n).is_some(),
        role: FieldRole::Other,
    },
];

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

/// The 3-letter code embedded in `_Outcome_<CODE>` names. Used only for
/// counting totals.
fn outcome_code(name: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"_Outcome_([A-Za-z]{3})").expect("outcome code pattern is valid")
    });
    re.captures(name)
        .map(|c| c[1].to_ascii_uppercase())
}

/// Counter fields carry the pod type code at a fixed character offset
/// of the name stripped of its counter suffix.
fn counter_code(name: &str, suffix: &str) -> Option<String> {
    let stem = name.strip_suffix(suffix).unwrap_or(name);
    stem.get(3..6).map(str::to_ascii_uppercase)
}

/// The trailing outcome id: token at index `tokenCount - 3` of the
/// underscore-split name, lowercased. All star/approval linking depends
/// on the `_Youth_`/`_BOOL_`/`_YDM_` twins sharing this token.
fn outcome_id(name: &str) -> Result<String> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() < 3 || tokens[tokens.len() - 3].is_empty() {
        return Err(PodtrackError::MalformedFieldName(name.to_string()));
    }
    Ok(tokens[tokens.len() - 3].to_lowercase())
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Parse one field name (plus its display label) into a `FieldTag`.
///
/// Classification is pure and total over the rule set: the role depends
/// only on the name, never on the field's value. The only failure mode is
/// a flag-role name too short to carry an outcome id token; callers drop
/// such fields and continue.
pub fn classify(name: &str, label: &str) -> Result<FieldTag> {
    let role = RULES
        .iter()
        .find(|rule| (rule.condition)(name))
        .map(|rule| rule.role)
        .unwrap_or(FieldRole::Other);

    let pod_type_code = match role {
        FieldRole::CompletedCount => counter_code(name, "Completed__c"),
        FieldRole::CheckedCount => counter_code(name, "Checked__c"),
        FieldRole::Other => outcome_code(name),
        _ => None,
    };

    let outcome_id = if role.carries_outcome_id() {
        Some(outcome_id(name)?)
    } else {
        None
    };

    Ok(FieldTag {
        raw_name: name.to_string(),
        label: label.to_string(),
        role,
        pod_type_code,
        outcome_id,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn role_of(name: &str) -> FieldRole {
        classify(name, "").unwrap().role
    }

    #[test]
    fn total_marker_wins_over_checked_suffix() {
        // "Total_Checked__c" also ends with "Checked__c"; rule order decides.
        assert_eq!(role_of("Total_Checked__c"), FieldRole::TotalMarker);
    }

    #[test]
    fn counter_roles_and_codes() {
        let tag = classify("OD_TRN_Leadership_Completed__c", "Leadership").unwrap();
        assert_eq!(tag.role, FieldRole::CompletedCount);
        assert_eq!(tag.pod_type_code.as_deref(), Some("TRN"));

        let tag = classify("OD_ASC_Leadership_Checked__c", "Leadership").unwrap();
        assert_eq!(tag.role, FieldRole::CheckedCount);
        assert_eq!(tag.pod_type_code.as_deref(), Some("ASC"));
    }

    #[test]
    fn flag_roles() {
        assert_eq!(role_of("LDR_Youth_abc_001_XYZ__c"), FieldRole::YouthFlag);
        assert_eq!(role_of("LDR_BOOL_abc_001_XYZ__c"), FieldRole::BoolFlag);
        assert_eq!(role_of("LDR_YDM_abc_001_XYZ__c"), FieldRole::YdmFlag);
    }

    #[test]
    fn outcome_marker_code() {
        let tag = classify("LDR_Outcome_TRN_Header__c", "Leadership Outcomes").unwrap();
        assert_eq!(tag.role, FieldRole::Other);
        assert_eq!(tag.pod_type_code.as_deref(), Some("TRN"));
        assert!(tag.outcome_id.is_none());
    }

    #[test]
    fn unrecognized_name_is_other() {
        let tag = classify("Contact__c", "Contact").unwrap();
        assert_eq!(tag.role, FieldRole::Other);
        assert!(tag.pod_type_code.is_none());
        assert!(tag.outcome_id.is_none());
    }

    #[test]
    fn id_symmetry_across_infix_twins() {
        // Twins differ only in the infix; the trailing id token is shared.
        let youth = classify("TRN_Youth_abc_001_XYZ__c", "").unwrap();
        let star = classify("TRN_BOOL_abc_001_XYZ__c", "").unwrap();
        let ydm = classify("TRN_YDM_abc_001_XYZ__c", "").unwrap();
        assert_eq!(youth.outcome_id.as_deref(), Some("xyz"));
        assert_eq!(star.outcome_id, youth.outcome_id);
        assert_eq!(ydm.outcome_id, youth.outcome_id);
    }

    #[test]
    fn classification_is_deterministic() {
        for name in [
            "Total_Checked__c",
            "OD_TRN_X_Completed__c",
            "TRN_Youth_abc_001_XYZ__c",
            "Contact__c",
        ] {
            let a = classify(name, "label").unwrap();
            let b = classify(name, "label").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn missing_id_token_is_a_classification_failure() {
        // The id token (tokenCount - 3) is empty here; dropping the field
        // beats indexing garbage into the tree.
        let err = classify("_Youth___c", "").unwrap_err();
        assert!(matches!(err, PodtrackError::MalformedFieldName(_)));
    }

    #[test]
    fn value_never_consulted() {
        // The same name classifies identically no matter what label (the
        // only other input) says.
        let a = classify("TRN_Youth_abc_001_XYZ__c", "one").unwrap();
        let b = classify("TRN_Youth_abc_001_XYZ__c", "two").unwrap();
        assert_eq!(a.role, b.role);
        assert_eq!(a.outcome_id, b.outcome_id);
    }
}

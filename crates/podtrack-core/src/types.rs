use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldRole
// ---------------------------------------------------------------------------

/// Role of one CRM field, determined purely by naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// The youth self-report value for one outcome.
    YouthFlag,
    /// The "starred" boolean twin of a youth field.
    BoolFlag,
    /// The staff-approval boolean twin of a youth field.
    YdmFlag,
    /// Per-focus-area completed-outcome counter.
    CompletedCount,
    /// Per-focus-area checked-outcome counter.
    CheckedCount,
    /// The pod-wide checked-total field.
    TotalMarker,
    Other,
}

impl FieldRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::YouthFlag => "youth_flag",
            FieldRole::BoolFlag => "bool_flag",
            FieldRole::YdmFlag => "ydm_flag",
            FieldRole::CompletedCount => "completed_count",
            FieldRole::CheckedCount => "checked_count",
            FieldRole::TotalMarker => "total_marker",
            FieldRole::Other => "other",
        }
    }

    /// Roles whose names carry a trailing outcome id token.
    pub fn carries_outcome_id(self) -> bool {
        matches!(
            self,
            FieldRole::YouthFlag | FieldRole::BoolFlag | FieldRole::YdmFlag
        )
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldTag / OutcomeField
// ---------------------------------------------------------------------------

/// Parsed identity of one record-store field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldTag {
    pub raw_name: String,
    /// Human-readable display string from describe metadata.
    pub label: String,
    pub role: FieldRole,
    /// 3-letter pod type code embedded in the name (e.g. "TRN").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_type_code: Option<String>,
    /// Lowercased 3-character token identifying one outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_id: Option<String>,
}

/// A `FieldTag` joined with its current value for one user. Rebuilt per
/// request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeField {
    #[serde(flatten)]
    pub tag: FieldTag,
    pub value: Value,
}

impl OutcomeField {
    /// True only for an explicit boolean `true` value.
    pub fn is_true(&self) -> bool {
        self.value == Value::Bool(true)
    }

    /// Numeric value for counter fields; null and non-numbers count as zero.
    pub fn as_count(&self) -> i64 {
        self.value.as_i64().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// TaskItem / OutcomeGroup
// ---------------------------------------------------------------------------

/// One checkbox row as seen by a user. Serialized field names match the
/// mobile client's existing contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub api_key: String,
    pub api_bool_key: String,
    /// Lowercased outcome id.
    #[serde(rename = "id")]
    pub short_id: String,
    /// Display label.
    #[serde(rename = "key")]
    pub label: String,
    #[serde(rename = "ydmApproved")]
    pub ydm_approved: bool,
    pub checked: Value,
    #[serde(rename = "starIsFilled")]
    pub star_is_filled: bool,
    #[serde(rename = "pod")]
    pub pod_code: String,
    pub accessible: bool,
}

/// One focus-area outcome group with its task rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeGroup {
    /// 3-character outcome-group code (first 3 characters of the field name).
    pub id: String,
    pub title: String,
    pub content: Vec<TaskItem>,
}

// ---------------------------------------------------------------------------
// AccessStatus / PodStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessStatus {
    #[serde(rename = "allowed")]
    Allowed,
    #[serde(rename = "no access")]
    NoAccess,
    #[serde(rename = "does not exist")]
    DoesNotExist,
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessStatus::Allowed => "allowed",
            AccessStatus::NoAccess => "no access",
            AccessStatus::DoesNotExist => "does not exist",
        };
        f.write_str(s)
    }
}

/// Gate state of one pod for one user, held in pod-ordinal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodStatus {
    #[serde(rename = "pod")]
    pub pod_code: String,
    pub status: AccessStatus,
    pub completed: bool,
    pub current: bool,
}

// ---------------------------------------------------------------------------
// Progress views
// ---------------------------------------------------------------------------

/// Cross-pod home-screen summary for one pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HomeProgress {
    pub progress: i64,
    pub checked: i64,
    pub total: i64,
}

/// Single-pod detail view, keyed by focus-area type code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusProgress {
    pub completed_outcomes: i64,
    /// `None` when the record exists but the checked counter is absent
    /// from the projection. Distinct from an explicit zero.
    pub checked_outcomes: Option<i64>,
    pub total_outcomes: i64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&AccessStatus::Allowed).unwrap(),
            "\"allowed\""
        );
        assert_eq!(
            serde_json::to_string(&AccessStatus::NoAccess).unwrap(),
            "\"no access\""
        );
        assert_eq!(
            serde_json::to_string(&AccessStatus::DoesNotExist).unwrap(),
            "\"does not exist\""
        );
    }

    #[test]
    fn task_item_wire_names() {
        let item = TaskItem {
            api_key: "TRN_Youth_abc_001_XYZ__c".to_string(),
            api_bool_key: "TRN_BOOL_abc_001_XYZ__c".to_string(),
            short_id: "xyz".to_string(),
            label: "Shows up on time".to_string(),
            ydm_approved: true,
            checked: Value::Bool(false),
            star_is_filled: false,
            pod_code: "Trainee".to_string(),
            accessible: true,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "xyz");
        assert_eq!(json["key"], "Shows up on time");
        assert_eq!(json["ydmApproved"], true);
        assert_eq!(json["starIsFilled"], false);
        assert_eq!(json["pod"], "Trainee");
        let back: TaskItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn outcome_field_value_helpers() {
        let tag = FieldTag {
            raw_name: "n".to_string(),
            label: "l".to_string(),
            role: FieldRole::Other,
            pod_type_code: None,
            outcome_id: None,
        };
        let truthy = OutcomeField {
            tag: tag.clone(),
            value: Value::Bool(true),
        };
        assert!(truthy.is_true());
        assert_eq!(truthy.as_count(), 0);

        let count = OutcomeField {
            tag: tag.clone(),
            value: serde_json::json!(3),
        };
        assert!(!count.is_true());
        assert_eq!(count.as_count(), 3);

        let absent = OutcomeField {
            tag,
            value: Value::Null,
        };
        assert!(!absent.is_true());
        assert_eq!(absent.as_count(), 0);
    }

    #[test]
    fn roles_carrying_outcome_ids() {
        assert!(FieldRole::YouthFlag.carries_outcome_id());
        assert!(FieldRole::BoolFlag.carries_outcome_id());
        assert!(FieldRole::YdmFlag.carries_outcome_id());
        assert!(!FieldRole::CompletedCount.carries_outcome_id());
        assert!(!FieldRole::TotalMarker.carries_outcome_id());
        assert!(!FieldRole::Other.carries_outcome_id());
    }
}

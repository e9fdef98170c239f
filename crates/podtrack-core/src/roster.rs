use crate::error::{PodtrackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Pod
// ---------------------------------------------------------------------------

/// One stage in the program sequence. The ordering is configuration, not
/// derived: pods appear in the roster file in gate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    /// Display code, e.g. "Trainee".
    pub code: String,
    /// Record type in the CRM, e.g. "Trainee_POD_Map__c".
    pub record_type: String,
}

impl Pod {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let record_type = format!("{code}_POD_Map__c");
        Self { code, record_type }
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The fixed, ordered pod sequence. A total order with no gaps; the
/// position of a pod in `pods` is its ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default = "default_pods")]
    pub pods: Vec<Pod>,
}

fn default_pods() -> Vec<Pod> {
    vec![Pod::new("Trainee"), Pod::new("Associate"), Pod::new("Partner")]
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            pods: default_pods(),
        }
    }
}

impl Roster {
    /// Load a roster from a YAML file, or fall back to the built-in
    /// Trainee/Associate/Partner sequence when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let data = std::fs::read_to_string(p)?;
                let roster: Roster = serde_yaml::from_str(&data)?;
                Ok(roster)
            }
            None => Ok(Roster::default()),
        }
    }

    /// Look up a pod by its display code (the value clients pass in
    /// query parameters).
    pub fn find(&self, code: &str) -> Result<&Pod> {
        self.pods
            .iter()
            .find(|p| p.code == code)
            .ok_or_else(|| PodtrackError::PodNotFound(code.to_string()))
    }

    pub fn ordinal(&self, pod: &Pod) -> Option<usize> {
        self.pods.iter().position(|p| p == pod)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_roster_order() {
        let roster = Roster::default();
        let codes: Vec<&str> = roster.pods.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["Trainee", "Associate", "Partner"]);
        assert_eq!(roster.pods[0].record_type, "Trainee_POD_Map__c");
    }

    #[test]
    fn load_without_path_uses_default() {
        let roster = Roster::load(None).unwrap();
        assert_eq!(roster, Roster::default());
    }

    #[test]
    fn load_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.yaml");
        std::fs::write(
            &path,
            "pods:\n  - code: Rookie\n    record_type: Rookie_POD_Map__c\n  - code: Veteran\n    record_type: Veteran_POD_Map__c\n",
        )
        .unwrap();

        let roster = Roster::load(Some(&path)).unwrap();
        assert_eq!(roster.pods.len(), 2);
        assert_eq!(roster.pods[0].code, "Rookie");
        assert_eq!(roster.ordinal(&roster.pods[1].clone()), Some(1));
    }

    #[test]
    fn find_unknown_pod_fails() {
        let roster = Roster::default();
        assert!(matches!(
            roster.find("Stranger"),
            Err(PodtrackError::PodNotFound(_))
        ));
        assert_eq!(roster.find("Associate").unwrap().code, "Associate");
    }
}

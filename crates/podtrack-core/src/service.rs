//! Per-request pipelines. Each function reads a fresh snapshot from the
//! injected record store, runs it through the classification/aggregation
//! stages, and returns a fully-populated structure — or a single failure.
//! Nothing here caches or mutates shared state between requests.

use crate::error::{PodtrackError, Result};
use crate::gate::{compute_gates, PodSnapshot};
use crate::progress::{focus_progress, home_progress};
use crate::record::normalize;
use crate::roster::{Pod, Roster};
use crate::soql;
use crate::starred::starred_in_pod;
use crate::store::{record_id, FieldMeta, RecordStore};
use crate::tree::build_tree;
use crate::types::{
    AccessStatus, FocusProgress, HomeProgress, OutcomeField, OutcomeGroup, PodStatus, TaskItem,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

struct PodRecord {
    meta: Vec<FieldMeta>,
    record: Option<Map<String, Value>>,
}

impl PodRecord {
    fn exists(&self) -> bool {
        self.record.is_some()
    }

    fn fields(&self) -> Vec<OutcomeField> {
        match &self.record {
            Some(record) => normalize(&self.meta, record),
            None => normalize(&self.meta, &Map::new()),
        }
    }
}

/// Describe the pod's record type and fetch the user's single record for
/// it. Zero records is a normal outcome.
fn fetch_pod(store: &dyn RecordStore, pod: &Pod, user_id: &str) -> Result<PodRecord> {
    let meta = store.describe(&pod.record_type)?;
    let names: Vec<String> = meta.iter().map(|m| m.name.clone()).collect();
    let result = store.query(&soql::select_for_user(&names, &pod.record_type, user_id))?;
    Ok(PodRecord {
        meta,
        record: result.first().cloned(),
    })
}

// ---------------------------------------------------------------------------
// Checkbox tree
// ---------------------------------------------------------------------------

/// The checkbox tree for one pod and focus area. A user without a record
/// still gets the tree shape — every checkbox value is simply null.
pub fn checkbox_tree(
    store: &dyn RecordStore,
    roster: &Roster,
    pod_code: &str,
    focus_area: &str,
    user_id: &str,
) -> Result<Vec<OutcomeGroup>> {
    let pod = roster.find(pod_code)?;
    let fetched = fetch_pod(store, pod, user_id)?;
    Ok(build_tree(&fetched.fields(), focus_area, &pod.code))
}

/// Write one checkbox field on the user's pod record.
pub fn update_checkbox(
    store: &dyn RecordStore,
    roster: &Roster,
    pod_code: &str,
    user_id: &str,
    field_name: &str,
    new_value: Value,
) -> Result<()> {
    let pod = roster.find(pod_code)?;
    let fields = vec!["Contact__c".to_string()];
    let result = store.query(&soql::select_for_user(&fields, &pod.record_type, user_id))?;
    let record = result.first().ok_or_else(|| PodtrackError::NoRecord {
        record_type: pod.record_type.clone(),
    })?;
    let id = record_id(record)?;

    let mut update = Map::new();
    update.insert(field_name.to_string(), new_value);
    tracing::debug!(pod = %pod.code, field = field_name, "updating checkbox");
    store.update(&pod.record_type, &id, &update)
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Cross-pod home-screen summary, one entry per pod in roster order.
pub fn home_screen_progress(
    store: &dyn RecordStore,
    roster: &Roster,
    user_id: &str,
) -> Result<Vec<(Pod, HomeProgress)>> {
    let mut out = Vec::with_capacity(roster.pods.len());
    for pod in &roster.pods {
        let fetched = fetch_pod(store, pod, user_id)?;
        let summary = home_progress(&fetched.fields(), fetched.exists());
        out.push((pod.clone(), summary));
    }
    Ok(out)
}

/// Single-pod detail view, keyed by focus-area type code.
pub fn pod_screen_progress(
    store: &dyn RecordStore,
    roster: &Roster,
    pod_code: &str,
    user_id: &str,
) -> Result<BTreeMap<String, FocusProgress>> {
    let pod = roster.find(pod_code)?;
    let fetched = fetch_pod(store, pod, user_id)?;
    Ok(focus_progress(&fetched.fields(), fetched.exists()))
}

// ---------------------------------------------------------------------------
// Gates and starred tasks
// ---------------------------------------------------------------------------

/// Gate statuses for every pod, in roster order.
pub fn pod_gates(store: &dyn RecordStore, roster: &Roster, user_id: &str) -> Result<Vec<PodStatus>> {
    let snapshots = fetch_snapshots(store, roster, user_id)?;
    Ok(compute_gates(&snapshots))
}

/// Starred-and-unapproved tasks across all pods, in roster order, with
/// accessibility taken from the gate engine.
pub fn starred_tasks(
    store: &dyn RecordStore,
    roster: &Roster,
    user_id: &str,
) -> Result<Vec<TaskItem>> {
    let snapshots = fetch_snapshots(store, roster, user_id)?;
    let gates = compute_gates(&snapshots);

    let mut out = Vec::new();
    for (snap, gate) in snapshots.iter().zip(&gates) {
        let Some(fields) = &snap.fields else {
            continue;
        };
        let accessible = gate.status == AccessStatus::Allowed;
        out.extend(starred_in_pod(fields, &snap.pod_code, accessible));
    }
    Ok(out)
}

/// Fetch every pod's record. Fetches are independent and could be issued
/// concurrently by a caller; the snapshot vector is always assembled in
/// roster order because the gate engine requires the ordinal sequence.
fn fetch_snapshots(
    store: &dyn RecordStore,
    roster: &Roster,
    user_id: &str,
) -> Result<Vec<PodSnapshot>> {
    let mut snapshots = Vec::with_capacity(roster.pods.len());
    for pod in &roster.pods {
        let fetched = fetch_pod(store, pod, user_id)?;
        snapshots.push(PodSnapshot {
            pod_code: pod.code.clone(),
            fields: fetched.exists().then(|| fetched.fields()),
        });
    }
    Ok(snapshots)
}

// ---------------------------------------------------------------------------
// Contact lookups (userinfo / signup)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
}

/// Contact details for an authenticated user, if their contact row is
/// app-enabled.
pub fn user_info(store: &dyn RecordStore, user_id: &str) -> Result<Option<UserInfo>> {
    let soql = format!(
        "SELECT Id, Email, Name FROM Contact \
         WHERE (Has_Youth_App_Account__c = true AND auth0_user_id__c = {})",
        soql::quote(user_id)
    );
    let result = store.query(&soql)?;
    if result.total_size != 1 {
        return Ok(None);
    }
    let record = result.first().ok_or_else(|| {
        PodtrackError::QueryFailed("totalSize of 1 with no records".to_string())
    })?;
    Ok(Some(UserInfo {
        email: string_field(record, "Email"),
        name: string_field(record, "Name"),
    }))
}

/// Pre-registration check: is there exactly one app-enabled contact with
/// this email and full name?
pub fn verify_signup(store: &dyn RecordStore, email: &str, full_name: &str) -> Result<bool> {
    let soql = format!(
        "SELECT Id, Email FROM Contact \
         WHERE (Has_Youth_App_Account__c = true AND email = {} AND name = {})",
        soql::quote(email),
        soql::quote(full_name)
    );
    Ok(store.query(&soql)?.total_size == 1)
}

/// Post-registration hook: mark the contact as registered and store the
/// identity provider's id. Returns false when no contact matches.
pub fn finish_signup(store: &dyn RecordStore, email: &str, auth_id: &str) -> Result<bool> {
    let soql = format!(
        "SELECT Id, Has_Youth_App_Account__c FROM Contact WHERE (email = {})",
        soql::quote(email)
    );
    let result = store.query(&soql)?;
    let Some(record) = result.first() else {
        return Ok(false);
    };
    let id = record
        .get("Id")
        .and_then(Value::as_str)
        .ok_or(PodtrackError::MissingRecordId)?;

    let mut update = Map::new();
    update.insert("Has_Youth_App_Account__c".to_string(), Value::Bool(true));
    update.insert(
        "auth0_user_id__c".to_string(),
        Value::String(auth_id.to_string()),
    );
    store.update("Contact", id, &update)?;
    Ok(true)
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

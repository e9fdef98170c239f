//! Sequential pod gating: allowed / no access / does not exist per pod,
//! plus the single "current" pod marker.

use crate::types::{AccessStatus, OutcomeField, PodStatus};

// ---------------------------------------------------------------------------
// PodSnapshot
// ---------------------------------------------------------------------------

/// One pod's fetched state, in canonical roster order. `fields` is `None`
/// when the user has no record for the pod.
#[derive(Debug, Clone)]
pub struct PodSnapshot {
    pub pod_code: String,
    pub fields: Option<Vec<OutcomeField>>,
}

fn is_completed(fields: &[OutcomeField]) -> bool {
    let mut total = 0;
    let mut done = 0;
    for field in fields {
        if field.tag.raw_name.contains("Outcome") {
            total += 1;
            if field.is_true() {
                done += 1;
            }
        }
    }
    done == total
}

// ---------------------------------------------------------------------------
// compute_gates
// ---------------------------------------------------------------------------

/// Gate the pod sequence. Must be fed snapshots in roster order; the
/// engine consumes them strictly in that order regardless of how they
/// were fetched.
///
/// The gate is a one-step dependency: pod 0 is always allowed, and pod i
/// is allowed exactly when pod i-1 is completed. This deliberately does
/// NOT chain transitively; a pod after an incomplete one is reachable
/// again as soon as its immediate predecessor completes. Missing records
/// report `does not exist`, count as not completed for the pod behind
/// them, and keep their ordinal slot.
pub fn compute_gates(snapshots: &[PodSnapshot]) -> Vec<PodStatus> {
    let mut statuses: Vec<PodStatus> = Vec::with_capacity(snapshots.len());

    for (ordinal, snap) in snapshots.iter().enumerate() {
        let Some(fields) = &snap.fields else {
            statuses.push(PodStatus {
                pod_code: snap.pod_code.clone(),
                status: AccessStatus::DoesNotExist,
                completed: false,
                current: false,
            });
            continue;
        };

        let status = if ordinal == 0 || statuses[ordinal - 1].completed {
            AccessStatus::Allowed
        } else {
            AccessStatus::NoAccess
        };

        statuses.push(PodStatus {
            pod_code: snap.pod_code.clone(),
            status,
            completed: is_completed(fields),
            current: false,
        });
    }

    mark_current(&mut statuses);
    statuses
}

/// Mark the single current pod: the first pod, scanning in order, that is
/// not completed but whose predecessor is. At most one pod is marked.
fn mark_current(statuses: &mut [PodStatus]) {
    let mut prev_completed = false;
    for status in statuses.iter_mut() {
        if prev_completed && !status.completed {
            status.current = true;
            break;
        }
        if status.completed {
            prev_completed = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

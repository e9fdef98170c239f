//! Salesforce REST implementation of the core's `RecordStore` trait.
//!
//! The client is blocking; route handlers call it inside
//! `tokio::task::spawn_blocking`. Session acquisition (OAuth or
//! username/password exchange) is a deployment concern — the server is
//! handed an instance URL and an access token.

use podtrack_core::error::{PodtrackError, Result};
use podtrack_core::store::{FieldMeta, QueryResult, RecordStore};
use serde::Deserialize;
use serde_json::{Map, Value};

const API_ROOT: &str = "/services/data/v59.0";

pub struct SalesforceStore {
    client: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

#[derive(Deserialize)]
struct DescribeResponse {
    fields: Vec<FieldMeta>,
}

impl SalesforceStore {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> reqwest::Result<reqwest::blocking::Response> {
        self.client
            .get(format!("{}{API_ROOT}{path}", self.base_url))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
    }
}

impl RecordStore for SalesforceStore {
    fn describe(&self, record_type: &str) -> Result<Vec<FieldMeta>> {
        let fail = |reason: String| PodtrackError::SchemaUnavailable {
            record_type: record_type.to_string(),
            reason,
        };
        let response = self
            .get(&format!("/sobjects/{record_type}/describe"), &[])
            .map_err(|e| fail(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }
        let parsed: DescribeResponse = response.json().map_err(|e| fail(e.to_string()))?;
        Ok(parsed.fields)
    }

    fn query(&self, soql: &str) -> Result<QueryResult> {
        let response = self
            .get("/query", &[("q", soql)])
            .map_err(|e| PodtrackError::QueryFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PodtrackError::QueryFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .map_err(|e| PodtrackError::QueryFailed(e.to_string()))
    }

    fn update(&self, record_type: &str, record_id: &str, fields: &Map<String, Value>) -> Result<()> {
        let fail = |reason: String| PodtrackError::UpdateRejected {
            record_type: record_type.to_string(),
            record_id: record_id.to_string(),
            reason,
        };
        let response = self
            .client
            .patch(format!(
                "{}{API_ROOT}/sobjects/{record_type}/{record_id}",
                self.base_url
            ))
            .bearer_auth(&self.access_token)
            .json(fields)
            .send()
            .map_err(|e| fail(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

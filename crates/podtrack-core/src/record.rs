use crate::classifier::classify;
use crate::store::FieldMeta;
use crate::types::OutcomeField;
use serde_json::{Map, Value};

/// Join describe metadata with one fetched record into typed outcome
/// fields.
///
/// Every described field is classified and paired with its value; fields
/// absent from the record's projection get `Value::Null` rather than an
/// error. Names the classifier rejects are dropped and logged — a single
/// malformed field must not take down the request.
pub fn normalize(meta: &[FieldMeta], record: &Map<String, Value>) -> Vec<OutcomeField> {
    let mut fields = Vec::with_capacity(meta.len());
    for fm in meta {
        match classify(&fm.name, &fm.label) {
            Ok(tag) => fields.push(OutcomeField {
                tag,
                value: record.get(&fm.name).cloned().unwrap_or(Value::Null),
            }),
            Err(err) => {
                tracing::warn!(field = %fm.name, %err, "dropping unclassifiable field");
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldRole;
    use serde_json::json;

    fn meta(pairs: &[(&str, &str)]) -> Vec<FieldMeta> {
        pairs
            .iter()
            .map(|(name, label)| FieldMeta {
                name: name.to_string(),
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn pairs_values_with_classified_tags() {
        let meta = meta(&[
            ("TRN_Youth_abc_001_XYZ__c", "Shows up on time"),
            ("Total_Checked__c", "Total Checked"),
        ]);
        let record = json!({
            "TRN_Youth_abc_001_XYZ__c": true,
            "Total_Checked__c": 7
        });

        let fields = normalize(&meta, record.as_object().unwrap());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].tag.role, FieldRole::YouthFlag);
        assert!(fields[0].is_true());
        assert_eq!(fields[1].tag.role, FieldRole::TotalMarker);
        assert_eq!(fields[1].as_count(), 7);
    }

    #[test]
    fn missing_projection_value_becomes_null() {
        let meta = meta(&[("TRN_Youth_abc_001_XYZ__c", "Shows up on time")]);
        let record = Map::new();

        let fields = normalize(&meta, &record);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, Value::Null);
    }

    #[test]
    fn malformed_name_dropped_not_fatal() {
        let meta = meta(&[
            ("_Youth___c", "broken"),
            ("TRN_Youth_abc_001_XYZ__c", "fine"),
        ]);
        let record = Map::new();

        let fields = normalize(&meta, &record);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].tag.raw_name, "TRN_Youth_abc_001_XYZ__c");
    }
}

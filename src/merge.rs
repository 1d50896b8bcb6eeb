use crate::errors::AppError;
use crate::models::Person;
use crate::relatives::ResolvedRelatives;
use serde_json::{json, Map, Value};

/// Flattens subject, resolved relatives, nationality flag and correlation id
/// into one mapping-ready record.
///
/// The enrichment keys (`enrichedPartners` etc., `nederlandseNationaliteit`)
/// are chosen so they cannot collide with subject fields; where a name would
/// collide anyway, the subject field wins.
pub fn merge_record(
    subject: &Person,
    relatives: &ResolvedRelatives,
    dutch_nationality: &str,
    referentienummer: Option<&str>,
) -> Result<Value, AppError> {
    let mut record = Map::new();

    record.insert(
        "nederlandseNationaliteit".to_string(),
        json!(dutch_nationality),
    );
    record.insert("enrichedPartners".to_string(), to_value(&relatives.partners)?);
    record.insert("enrichedParents".to_string(), to_value(&relatives.parents)?);
    record.insert("enrichedChildren".to_string(), to_value(&relatives.children)?);

    match serde_json::to_value(subject) {
        Ok(Value::Object(fields)) => {
            for (key, value) in fields {
                record.insert(key, value);
            }
        }
        Ok(other) => {
            return Err(AppError::InternalError(format!(
                "subject serialized to a non-object value: {}",
                other
            )))
        }
        Err(e) => {
            return Err(AppError::InternalError(format!(
                "failed to serialize subject: {}",
                e
            )))
        }
    }

    if let Some(reference) = referentienummer {
        record.insert("referentienummer".to_string(), json!(reference));
    }

    Ok(Value::Object(record))
}

fn to_value(people: &[Person]) -> Result<Value, AppError> {
    serde_json::to_value(people)
        .map_err(|e| AppError::InternalError(format!("failed to serialize relatives: {}", e)))
}

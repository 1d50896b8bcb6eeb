use crate::errors::AppError;
use crate::resources::Mapping;
use serde_json::{Map, Value};

/// Prefix marking a mapping leaf as a literal instead of a source path.
const LITERAL_PREFIX: &str = "const:";

/// Applies a declarative mapping definition to a flat input record.
///
/// The definition mirrors the shape of the target document; object nodes
/// recurse, leaf strings are dotted paths resolved against the record (or
/// `const:` literals copied verbatim). Paths that resolve to nothing are
/// omitted, and branches left without content are dropped with them.
pub fn apply_mapping(mapping: &Mapping, record: &Value) -> Result<Value, AppError> {
    let document = project(&mapping.definition, record);
    if document.is_null() {
        return Err(AppError::MappingError(format!(
            "mapping {} produced an empty document",
            mapping.reference
        )));
    }
    Ok(document)
}

fn project(definition: &Value, record: &Value) -> Value {
    match definition {
        Value::Object(entries) => {
            let mut out = Map::new();
            for (key, node) in entries {
                let value = project(node, record);
                if !value.is_null() {
                    out.insert(key.clone(), value);
                }
            }
            if out.is_empty() {
                Value::Null
            } else {
                Value::Object(out)
            }
        }
        Value::String(leaf) => {
            if let Some(literal) = leaf.strip_prefix(LITERAL_PREFIX) {
                return Value::String(literal.to_string());
            }
            lookup_path(record, leaf).cloned().unwrap_or(Value::Null)
        }
        other => other.clone(),
    }
}

/// Resolves a dotted path (`verblijfplaats.postcode`) inside a JSON value.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

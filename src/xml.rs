use crate::errors::AppError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};
use std::io::Cursor;

/// Root element name of the outbound StUF envelope.
const ENVELOPE_ROOT: &str = "SOAP-ENV:Envelope";

/// Serializes a mapped record into the `SOAP-ENV:Envelope` wire document.
///
/// Objects become nested elements, arrays repeat their element, scalars
/// become text content. Empty elements are omitted from the serialized form.
pub fn encode_envelope(record: &Value) -> Result<String, AppError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| AppError::EncodingError(e.to_string()))?;
    write_element(&mut writer, ENVELOPE_ROOT, record)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| AppError::EncodingError(format!("envelope is not valid UTF-8: {}", e)))
}

fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    value: &Value,
) -> Result<(), AppError> {
    if !has_content(value) {
        return Ok(());
    }

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(fields) => {
            write_event(writer, Event::Start(BytesStart::new(name)))?;
            for (key, child) in fields {
                write_element(writer, key, child)?;
            }
            write_event(writer, Event::End(BytesEnd::new(name)))
        }
        scalar => {
            let text = scalar_text(scalar);
            write_event(writer, Event::Start(BytesStart::new(name)))?;
            write_event(writer, Event::Text(BytesText::new(&text)))?;
            write_event(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), AppError> {
    writer
        .write_event(event)
        .map_err(|e| AppError::EncodingError(e.to_string()))
}

/// An element is emitted only when something non-empty remains under it.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => items.iter().any(has_content),
        Value::Object(fields) => fields.values().any(has_content),
        _ => true,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decodes an inbound SOAP XML document into a JSON value.
///
/// The root element's name is dropped; its children become the top-level
/// object, so the fixed-path lookups start at `SOAP-ENV:Body`. Repeated
/// sibling elements collapse into an array, leaf elements into strings.
/// Attributes are not part of any consumed path and are ignored.
pub fn decode_envelope(xml: &str) -> Result<Value, AppError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => return parse_element(&mut reader),
            Ok(Event::Empty(_)) => return Ok(Value::String(String::new())),
            Ok(Event::Eof) => {
                return Err(AppError::EncodingError(
                    "document has no root element".to_string(),
                ))
            }
            Ok(_) => {}
            Err(e) => return Err(AppError::EncodingError(e.to_string())),
        }
    }
}

fn parse_element(reader: &mut Reader<&[u8]>) -> Result<Value, AppError> {
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                let child = parse_element(reader)?;
                insert_child(&mut children, name, child);
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(&e);
                insert_child(&mut children, name, Value::String(String::new()));
            }
            Ok(Event::Text(t)) => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| AppError::EncodingError(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(t)) => {
                text.push_str(&String::from_utf8_lossy(&t));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(AppError::EncodingError(
                    "unexpected end of document".to_string(),
                ))
            }
            Ok(_) => {}
            Err(e) => return Err(AppError::EncodingError(e.to_string())),
        }
    }

    if children.is_empty() {
        Ok(Value::String(text))
    } else {
        Ok(Value::Object(children))
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Repeated sibling elements collapse into an array, preserving order.
fn insert_child(children: &mut Map<String, Value>, name: String, child: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(child),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, child]);
        }
        None => {
            children.insert(name, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_skips_empty_elements() {
        let record = json!({
            "BG:antwoord": {
                "BG:naam": "Jansen",
                "BG:leeg": "",
                "BG:nul": null
            }
        });

        let xml = encode_envelope(&record).unwrap();
        assert!(xml.contains("<BG:naam>Jansen</BG:naam>"));
        assert!(!xml.contains("BG:leeg"));
        assert!(!xml.contains("BG:nul"));
    }

    #[test]
    fn decode_drops_root_and_collapses_siblings() {
        let xml = r#"<Envelope><Body><item>a</item><item>b</item></Body></Envelope>"#;
        let value = decode_envelope(xml).unwrap();
        assert_eq!(value, json!({"Body": {"item": ["a", "b"]}}));
    }
}

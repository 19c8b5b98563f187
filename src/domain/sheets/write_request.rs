use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use super::{operation::WriteOperation, value_matrix::ValueMatrix};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid values")]
    InvalidValues,
    #[error("Invalid operation")]
    InvalidOperation,
}

/// Body of `PUT /api/sheets/:range`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub values: ValueMatrix,
}

/// Body of `POST /api/sheets/:sheet`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendRequest {
    pub values: ValueMatrix,
    pub operation: WriteOperation,
}

/// Reads a request body as a JSON object. An empty body is an empty object,
/// anything that isn't a JSON object has no `values` to offer.
fn body_fields(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(ValidationError::InvalidValues),
    }
}

fn values_field(fields: &mut Map<String, Value>) -> Result<ValueMatrix, ValidationError> {
    fields
        .remove("values")
        .ok_or(ValidationError::InvalidValues)
        .and_then(ValueMatrix::try_from)
}

impl UpdateRequest {
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let mut fields = body_fields(body)?;
        let values = values_field(&mut fields)?;
        Ok(UpdateRequest { values })
    }
}

impl AppendRequest {
    /// `values` is validated before `operation`.
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let mut fields = body_fields(body)?;
        let values = values_field(&mut fields)?;

        let operation = match fields.get("operation") {
            Some(Value::String(operation)) => WriteOperation::from_str(operation)
                .map_err(|_| ValidationError::InvalidOperation)?,
            _ => return Err(ValidationError::InvalidOperation),
        };

        Ok(AppendRequest { values, operation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request() {
        let request = UpdateRequest::parse(br#"{"values":[["hello"]]}"#).unwrap();
        assert_eq!(request.values.rows(), &[vec![json!("hello")]]);
    }

    #[test]
    fn test_update_ignores_extra_fields() {
        let request = UpdateRequest::parse(br#"{"values":[[1]],"operation":"whatever"}"#);
        assert!(request.is_ok());
    }

    #[test]
    fn test_invalid_values_shapes() {
        let bodies: [&[u8]; 8] = [
            br#"{"values":"a"}"#,
            br#"{"values":3}"#,
            br#"{"values":null}"#,
            br#"{}"#,
            b"",
            b"   ",
            b"not json",
            br#"[["a"]]"#,
        ];
        for body in bodies {
            assert_eq!(
                UpdateRequest::parse(body),
                Err(ValidationError::InvalidValues),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_append_request() {
        let request =
            AppendRequest::parse(br#"{"values":[["a","b"]],"operation":"append"}"#).unwrap();
        assert_eq!(request.operation, WriteOperation::Append);
        assert_eq!(request.values.rows(), &[vec![json!("a"), json!("b")]]);
    }

    #[test]
    fn test_append_rejects_other_operations() {
        let bodies: [&[u8]; 4] = [
            br#"{"values":[["a"]],"operation":"overwrite"}"#,
            br#"{"values":[["a"]],"operation":"Append"}"#,
            br#"{"values":[["a"]],"operation":1}"#,
            br#"{"values":[["a"]]}"#,
        ];
        for body in bodies {
            assert_eq!(
                AppendRequest::parse(body),
                Err(ValidationError::InvalidOperation),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_append_checks_values_first() {
        assert_eq!(
            AppendRequest::parse(br#"{"values":"a","operation":"overwrite"}"#),
            Err(ValidationError::InvalidValues)
        );
    }
}

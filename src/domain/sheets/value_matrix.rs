use serde::Serialize;
use serde_json::Value;

use super::write_request::ValidationError;

/// Rows of untyped cell values, as exchanged with the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueMatrix(Vec<Vec<Value>>);

impl ValueMatrix {
    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[Vec<Value>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.0
    }
}

impl From<Vec<Vec<Value>>> for ValueMatrix {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        ValueMatrix(rows)
    }
}

impl TryFrom<Value> for ValueMatrix {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Array(rows) = value else {
            return Err(ValidationError::InvalidValues);
        };

        rows.into_iter()
            .map(|row| match row {
                Value::Array(cells) => Ok(cells),
                _ => Err(ValidationError::InvalidValues),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ValueMatrix)
    }
}

//! Tabular datasets with an explicit schema
//!
//! Every record carries one string cell per schema field. Field lookups go
//! through the schema and fail with `InvalidField` instead of yielding empty
//! values.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Kind of values observed in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free-form text or discrete labels
    Categorical,
    /// Every non-empty cell parses as a number
    Numeric,
}

impl FieldKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Numeric => "numeric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

/// Ordered, named fields of a dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column index of `name`, or `InvalidField` listing the known fields
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| AnalysisError::InvalidField {
                field: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn field(&self, name: &str) -> Result<&Field> {
        self.index_of(name).map(|idx| &self.fields[idx])
    }
}

/// In-memory dataset: a schema plus ordered records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from field names and rows.
    ///
    /// Fails with `Parse` on duplicate field names or when a row's width does
    /// not match the header. Field kinds are inferred from the cells.
    pub fn new<F, I, R, S>(field_names: F, rows: I) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = field_names.into_iter().map(Into::into).collect();

        let mut seen = FxHashSet::default();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::Parse(format!("duplicate field '{name}'")));
            }
        }

        let mut records = Vec::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let record: Vec<String> = cells.into_iter().map(Into::into).collect();
            if record.len() != names.len() {
                return Err(AnalysisError::Parse(format!(
                    "record {} has {} fields, expected {}",
                    row + 1,
                    record.len(),
                    names.len()
                )));
            }
            records.push(record);
        }

        let fields = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Field {
                kind: infer_kind(records.iter().map(|r| r[idx].as_str())),
                name,
            })
            .collect();

        Ok(Self {
            schema: Schema { fields },
            records,
        })
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        self.records.iter().map(Vec::as_slice)
    }

    /// Cells of a single field, in record order
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &str>> {
        let idx = self.schema.index_of(name)?;
        Ok(self.records.iter().map(move |r| r[idx].as_str()))
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> FieldKind {
    let mut any_value = false;
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if cell.parse::<f64>().is_err() {
            return FieldKind::Categorical;
        }
        any_value = true;
    }

    if any_value {
        FieldKind::Numeric
    } else {
        FieldKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infers_field_kinds() {
        let dataset = Dataset::new(
            ["mbti_type", "age", "notes"],
            [["INTJ", "31", ""], ["ENFP", "", ""], ["ISTJ", "45.5", ""]],
        )
        .unwrap();

        let kinds: Vec<FieldKind> = dataset.schema().fields().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Categorical,
                FieldKind::Numeric,
                FieldKind::Categorical
            ]
        );
    }

    #[test]
    fn test_unknown_field_lists_available() {
        let dataset = Dataset::new(["mbti_type"], [["INTJ"]]).unwrap();
        match dataset.column("type") {
            Err(AnalysisError::InvalidField { field, available }) => {
                assert_eq!(field, "type");
                assert_eq!(available, vec!["mbti_type".to_string()]);
            }
            other => panic!("expected InvalidField, got {:?}", other.map(|c| c.count())),
        }
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Dataset::new(["a", "b"], vec![vec!["1", "2"], vec!["3"]]).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let err = Dataset::new(["a", "a"], Vec::<Vec<&str>>::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }
}

use std::fmt;

use crate::types::Cell;

/// Represents the decoded row payload of a single change event.
///
/// [`ChangeRow`] is an ordered mapping of field name to [`Cell`] value, preserving
/// the order in which the ingestion layer decoded the fields. Beyond the required
/// `_metadata_*` fields it carries arbitrary source columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRow {
    /// Field name and value pairs in decode order
    fields: Vec<(String, Cell)>,
}

impl ChangeRow {
    /// Creates a new row from field name and value pairs.
    pub fn new(fields: Vec<(String, Cell)>) -> Self {
        Self { fields }
    }

    /// Returns the value of the named field, if present.
    ///
    /// When the ingestion layer produced duplicate field names the first
    /// occurrence wins.
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Returns whether the row contains the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the field names in decode order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    /// Returns the number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Cell)> for ChangeRow {
    fn from_iter<I: IntoIterator<Item = (String, Cell)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for ChangeRow {
    /// Renders the full row content for skip logging at the event boundary.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (field, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_occurrence() {
        let row = ChangeRow::new(vec![
            ("id".to_string(), Cell::I64(1)),
            ("id".to_string(), Cell::I64(2)),
        ]);

        assert_eq!(row.get("id"), Some(&Cell::I64(1)));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn display_renders_all_fields_in_order() {
        let row = ChangeRow::new(vec![
            ("id".to_string(), Cell::I64(7)),
            ("name".to_string(), Cell::from("jane")),
            ("deleted".to_string(), Cell::Null),
        ]);

        assert_eq!(row.to_string(), r#"{id: 7, name: "jane", deleted: null}"#);
    }
}

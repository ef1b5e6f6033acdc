//! Ordered column/value record shared by reads and writes.

use rusqlite::types::Value;

/// Ordered column name to value mapping.
///
/// Used both for rows read back from a query and for column sets handed to
/// `Repository::save`; column order is parameter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Lookups return the first column with a given name.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    /// Builder form of [`Record::push`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the column rendered as text.
    ///
    /// Integers and reals are formatted, `NULL` and non UTF-8 blobs yield `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::Null => None,
            Value::Integer(value) => Some(value.to_string()),
            Value::Real(value) => Some(value.to_string()),
            Value::Text(value) => Some(value.clone()),
            Value::Blob(bytes) => String::from_utf8(bytes.clone()).ok(),
        }
    }

    /// Returns the `id` column as text, or `None` when absent or `NULL`.
    ///
    /// An empty string is still an id.
    pub fn id(&self) -> Option<String> {
        self.text("id")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use rusqlite::types::Value;

    #[test]
    fn text_renders_integer_ids() {
        let row = Record::new().with("id", 7_i64).with("body", "hi".to_string());
        assert_eq!(row.text("id").as_deref(), Some("7"));
        assert_eq!(row.text("body").as_deref(), Some("hi"));
    }

    #[test]
    fn text_treats_null_and_missing_as_absent() {
        let row = Record::new().with("deletedAt", Value::Null);
        assert_eq!(row.text("deletedAt"), None);
        assert_eq!(row.text("updatedAt"), None);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn empty_id_is_an_id_but_null_is_not() {
        let empty = Record::new().with("id", String::new());
        assert_eq!(empty.id().as_deref(), Some(""));

        let null = Record::new().with("id", Value::Null);
        assert!(null.contains("id"));
        assert_eq!(null.id(), None);
    }
}

//! Record data structure for line-delimited JSON input

use serde_json::Value;

/// A single parsed line of a dataset
#[derive(Debug, Clone)]
pub struct Record {
    /// The JSON data for this record
    pub data: Value,
    /// 1-based line number in the source file
    pub source_line: usize,
}

impl Record {
    /// Create a new record
    pub fn new(data: Value, source_line: usize) -> Self {
        Self { data, source_line }
    }

    /// Borrow a field, treating JSON `null` as absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_creation() {
        let data = json!({"title": "hello", "id": "0704.0001"});
        let record = Record::new(data.clone(), 3);
        assert_eq!(record.data, data);
        assert_eq!(record.source_line, 3);
    }

    #[test]
    fn test_field_null_is_absent() {
        let record = Record::new(json!({"title": null, "abstract": "text"}), 1);
        assert!(record.field("title").is_none());
        assert!(record.field("missing").is_none());
        assert_eq!(record.field("abstract"), Some(&json!("text")));
    }
}

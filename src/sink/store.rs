//! Record store abstraction

use crate::error::Result;
use crate::types::JsonObject;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

/// A record as held by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned id
    pub id: String,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: JsonObject,
}

/// Query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals a JSON scalar
    FieldEquals { field: String, value: Value },
}

impl Filter {
    pub fn field_equals(field: impl Into<String>, value: Value) -> Self {
        Self::FieldEquals {
            field: field.into(),
            value,
        }
    }

    /// Whether a record's fields satisfy this filter
    pub fn matches(&self, fields: &JsonObject) -> bool {
        match self {
            Self::FieldEquals { field, value } => fields.get(field) == Some(value),
        }
    }

    /// Airtable formula, e.g. `{ID} = 93845` or `{ID} = 'abc'`
    pub fn to_formula(&self) -> String {
        match self {
            Self::FieldEquals { field, value } => {
                let field = field.replace('}', "\\}");
                let literal = match value {
                    Value::Number(n) => n.to_string(),
                    Value::Bool(true) => "TRUE()".to_string(),
                    Value::Bool(false) => "FALSE()".to_string(),
                    Value::String(s) => quote(s),
                    other => quote(&other.to_string()),
                };
                format!("{{{field}}} = {literal}")
            }
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Keyed remote record store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `filter`
    async fn query(&self, filter: &Filter) -> Result<Vec<StoredRecord>>;

    /// Insert a new record
    async fn create(&self, fields: JsonObject) -> Result<StoredRecord>;

    /// Every record in the store
    async fn list(&self) -> Result<Vec<StoredRecord>>;
}

/// In-process store; ids are `rec1`, `rec2`, ...
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query(&self, filter: &Filter) -> Result<Vec<StoredRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.fields))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: JsonObject) -> Result<StoredRecord> {
        let mut records = self.records.write().await;
        let record = StoredRecord {
            id: format!("rec{}", records.len() + 1),
            created_time: Some(chrono::Utc::now().to_rfc3339()),
            fields,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.records.read().await.clone())
    }
}

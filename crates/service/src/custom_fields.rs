//! Filters `custom_data` payloads against the `meta_column` registry.
use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde_json::{Map, Value};
use tracing::debug;

use models::errors::ModelError;
use models::meta_column::{self, DataType, MetaTable};

use crate::errors::ServiceError;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub data_type: DataType,
    pub options: Vec<String>,
}

impl From<meta_column::Model> for FieldDescriptor {
    fn from(m: meta_column::Model) -> Self {
        let options = m.options();
        Self { data_type: m.data_type, options }
    }
}

/// Lookup of registered custom fields keyed by `(table, key)`.
#[async_trait]
pub trait FieldRegistry: Send + Sync {
    async fn lookup(&self, table: MetaTable, key: &str) -> Result<Option<FieldDescriptor>, ServiceError>;
}

/// Registry backed by the `meta_column` table on a given connection or transaction.
pub struct SeaOrmFieldRegistry<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmFieldRegistry<'a, C> {
    pub fn new(db: &'a C) -> Self { Self { db } }
}

#[async_trait]
impl<'a, C: ConnectionTrait> FieldRegistry for SeaOrmFieldRegistry<'a, C> {
    async fn lookup(&self, table: MetaTable, key: &str) -> Result<Option<FieldDescriptor>, ServiceError> {
        let found = meta_column::Entity::find()
            .filter(meta_column::Column::TableName.eq(table))
            .filter(meta_column::Column::FieldKey.eq(key))
            .one(self.db)
            .await?;
        Ok(found.map(FieldDescriptor::from))
    }
}

/// Keep only registered keys; reject `select` values outside their options.
///
/// `None` and `null` sanitize to an empty object. Any other non-object payload
/// is a validation failure on `custom_data`.
pub async fn sanitize<R: FieldRegistry + ?Sized>(
    registry: &R,
    table: MetaTable,
    payload: Option<Value>,
) -> Result<Value, ServiceError> {
    let entries = match payload {
        None | Some(Value::Null) => return Ok(Value::Object(Map::new())),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ModelError::validation("custom_data", "must be a JSON object").into()),
    };

    let mut kept = Map::new();
    for (key, value) in entries {
        let Some(field) = registry.lookup(table, &key).await? else {
            debug!(table = table.as_str(), key = %key, "dropping unregistered custom field");
            continue;
        };
        if field.data_type == DataType::Select {
            let allowed = value.as_str().is_some_and(|v| field.options.iter().any(|o| o == v));
            if !allowed {
                return Err(ServiceError::InvalidOption { key, allowed: field.options });
            }
        }
        kept.insert(key, value);
    }
    Ok(Value::Object(kept))
}

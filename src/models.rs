use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{products, users};

/// A free-form transaction record kept on the user. Records flagged
/// `deleted` are hidden from profile reads but kept in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Transaction(pub Value);

impl Transaction {
    pub fn is_deleted(&self) -> bool {
        self.0
            .get("deleted")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// User as returned by the API. The credential never leaves storage.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub object_id: Uuid,
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub imagen: Option<String>,
    pub zona: Option<String>,
    pub ubicacion: Option<String>,
    pub telefono: Option<String>,
    pub mostrar_contacto: bool,
    pub favoritos: Vec<Uuid>,
    pub transacciones: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_model(model: users::Model, favoritos: Vec<Uuid>) -> Self {
        Self {
            object_id: model.object_id,
            id: model.id,
            email: model.email,
            username: model.username,
            nombre: model.nombre,
            apellido: model.apellido,
            imagen: model.imagen,
            zona: model.zona,
            ubicacion: model.ubicacion,
            telefono: model.telefono,
            mostrar_contacto: model.mostrar_contacto,
            favoritos,
            transacciones: transactions_from_json(model.transacciones),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }

    pub fn without_deleted_transactions(mut self) -> Self {
        self.transacciones.retain(|t| !t.is_deleted());
        self
    }
}

/// Profile read: the user plus the number of delivered donations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub donaciones_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub object_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub categoria: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub provincia: Option<String>,
    pub owner: Uuid,
    pub condicion: Option<String>,
    pub valor_estimado: Option<i64>,
    pub disponible: bool,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        let images = serde_json::from_value(model.images).unwrap_or_default();
        Self {
            object_id: model.object_id,
            title: model.title,
            description: model.description,
            categoria: model.categoria,
            image: model.image,
            images,
            provincia: model.provincia,
            owner: model.owner_id,
            condicion: model.condicion,
            valor_estimado: model.valor_estimado,
            disponible: model.disponible,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Stored transacciones that are not a JSON array read back as empty.
pub fn transactions_from_json(value: Value) -> Vec<Transaction> {
    match value {
        Value::Array(items) => items.into_iter().map(Transaction).collect(),
        _ => Vec::new(),
    }
}

pub fn transactions_to_json(items: Vec<Transaction>) -> Value {
    Value::Array(items.into_iter().map(|t| t.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deleted_flag_must_be_true_boolean() {
        assert!(Transaction(json!({ "deleted": true })).is_deleted());
        assert!(!Transaction(json!({ "deleted": false })).is_deleted());
        assert!(!Transaction(json!({ "deleted": "true" })).is_deleted());
        assert!(!Transaction(json!({ "monto": 10 })).is_deleted());
    }

    #[test]
    fn non_array_transacciones_read_as_empty() {
        assert!(transactions_from_json(json!(null)).is_empty());
        assert_eq!(transactions_from_json(json!([{ "a": 1 }])).len(), 1);
    }
}

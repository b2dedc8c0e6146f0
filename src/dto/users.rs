use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{models::Transaction, services::user_deletion_service::DeletionSummary};

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub imagen: Option<String>,
    pub zona: Option<String>,
    pub telefono: Option<String>,
    /// Accepts `true`/`false` or their string forms; anything else is `false`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    #[schema(value_type = Option<bool>)]
    pub mostrar_contacto: Option<bool>,
    pub transacciones: Option<Vec<Transaction>>,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(Some(coerce_flag(&raw)))
}

pub fn coerce_flag(raw: &Value) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
    pub summary: DeletionSummary,
}

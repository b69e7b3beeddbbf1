use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Stadium {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub capacity: i32,
    pub field_count: i32,
    pub field_types: Vec<String>,
    pub amenities: Vec<String>,
    pub description: Option<String>,
    pub is_partner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StadiumRequest {
    pub name: String,
    pub address: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub capacity: i32,
    pub field_count: Option<i32>,
    #[serde(default)]
    pub field_types: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_partner: bool,
}

#[derive(Debug, Deserialize)]
pub struct StadiumQuery {
    pub search: Option<String>,
    pub city: Option<String>,
}

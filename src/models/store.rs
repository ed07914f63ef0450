// src/models/store.rs
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "role_flag")]
    pub purchaser: bool,
    #[serde(default, deserialize_with = "role_flag")]
    pub biller: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    Purchaser,
    Biller,
}

impl Store {
    pub fn has_role(&self, role: StoreRole) -> bool {
        match role {
            StoreRole::Purchaser => self.purchaser,
            StoreRole::Biller => self.biller,
        }
    }
}

/// Store reference embedded in other records: a bare id, or populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreRef {
    Id(String),
    Populated(StoreSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl StoreRef {
    pub fn id(&self) -> &str {
        match self {
            StoreRef::Id(id) => id,
            StoreRef::Populated(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StoreRef::Id(_) => "",
            StoreRef::Populated(s) => &s.name,
        }
    }
}

// The backend stores role flags as "yes"/"no" on older records.
fn role_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "yes" | "true"),
        None => false,
    })
}

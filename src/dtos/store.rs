use serde::Deserialize;

use crate::models::store::StoreRole;

#[derive(Debug, Default, Deserialize)]
pub struct StoreQuery {
    pub role: Option<StoreRole>,
}

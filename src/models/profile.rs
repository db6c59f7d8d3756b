// src/models/profile.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Entity, EntityKind, FieldNames};

// --- Perfil ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "sigla", default)]
    #[validate(length(min = 1, code = "required"))]
    pub short_code: String,

    #[serde(rename = "descricao", default)]
    #[validate(length(min = 1, code = "required"))]
    pub description: String,
}

impl Entity for Profile {
    const KIND: EntityKind = EntityKind::Profile;
    const RESOURCE: &'static str = "Perfil";
    const COLLECTION: &'static str = "PerfilCollection";
    const LIST_CACHE_KEY: &'static str = "ListaPerfis";
    const ITEM_CACHE_KEY: &'static str = "Perfil";
    const FIELD_NAMES: FieldNames = &[
        ("short_code", "sigla"),
        ("description", "descricao"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

// src/models/profile_user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{dates, validate_not_nil, Entity, EntityKind, FieldNames};

// --- Associação Perfil x Usuário (N:N) ---
// Nenhuma das duas pontas é verificada na gravação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileUser {
    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "idPerfil", default)]
    #[validate(custom(function = "validate_not_nil"))]
    pub profile_id: Uuid,

    #[serde(rename = "idUsuario", default)]
    #[validate(custom(function = "validate_not_nil"))]
    pub user_id: Uuid,

    #[serde(rename = "ativo", default)]
    pub active: bool,

    #[serde(rename = "dataInclusao", default, deserialize_with = "dates::optional_utc")]
    #[validate(required)]
    pub inclusion_date: Option<DateTime<Utc>>,
}

impl Entity for ProfileUser {
    const KIND: EntityKind = EntityKind::ProfileUser;
    const RESOURCE: &'static str = "PerfilUsuario";
    const COLLECTION: &'static str = "PerfilUsuarioCollection";
    const LIST_CACHE_KEY: &'static str = "ListaAssociacoesPerfisUsuarios";
    const ITEM_CACHE_KEY: &'static str = "PerfilUsuario";
    const FIELD_NAMES: FieldNames = &[
        ("profile_id", "idPerfil"),
        ("user_id", "idUsuario"),
        ("active", "ativo"),
        ("inclusion_date", "dataInclusao"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

// src/models/company_type.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Entity, EntityKind, FieldNames};

// --- Tipo de Empresa ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompanyType {
    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "descricao", default)]
    #[validate(length(min = 1, code = "required"))]
    pub description: String,
}

impl Entity for CompanyType {
    const KIND: EntityKind = EntityKind::CompanyType;
    const RESOURCE: &'static str = "TipoEmpresa";
    const COLLECTION: &'static str = "TipoEmpresaCollection";
    const LIST_CACHE_KEY: &'static str = "ListaTiposEmpresa";
    const ITEM_CACHE_KEY: &'static str = "TipoEmpresa";
    const FIELD_NAMES: FieldNames = &[
        ("description", "descricao"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

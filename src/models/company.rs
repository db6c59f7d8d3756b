// src/models/company.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{validate_not_nil, Entity, EntityKind, FieldNames};

// --- Empresa ---
// `idTipoEmpresa` aponta para um TipoEmpresa, mas nada garante que ele exista.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Company {
    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "razaoSocial", default)]
    #[validate(length(min = 1, code = "required"))]
    pub legal_name: String,

    #[serde(rename = "nomeFantasia", default)]
    #[validate(length(min = 1, code = "required"))]
    pub trade_name: String,

    // CNPJ
    #[serde(rename = "cnpj", default)]
    #[validate(length(min = 1, code = "required"))]
    pub tax_id: String,

    #[serde(rename = "ativo", default)]
    pub active: bool,

    #[serde(rename = "idTipoEmpresa", default)]
    #[validate(custom(function = "validate_not_nil"))]
    pub company_type_id: Uuid,
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Company;
    const RESOURCE: &'static str = "Empresa";
    const COLLECTION: &'static str = "EmpresaCollection";
    const LIST_CACHE_KEY: &'static str = "ListaEmpresas";
    const ITEM_CACHE_KEY: &'static str = "Empresa";
    const FIELD_NAMES: FieldNames = &[
        ("legal_name", "razaoSocial"),
        ("trade_name", "nomeFantasia"),
        ("tax_id", "cnpj"),
        ("active", "ativo"),
        ("company_type_id", "idTipoEmpresa"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_external_field_names() {
        let type_id = Uuid::new_v4();
        let company: Company = serde_json::from_value(json!({
            "id": "6f1c2f0e-8d6b-4a57-9d7e-3b8f2b7f8a10",
            "razaoSocial": "Furnas Centrais Elétricas S.A",
            "nomeFantasia": "Furnas",
            "cnpj": "67493040000193",
            "ativo": true,
            "idTipoEmpresa": type_id,
        }))
        .unwrap();

        assert_eq!(company.legal_name, "Furnas Centrais Elétricas S.A");
        assert_eq!(company.company_type_id, type_id);
        assert!(company.active);
        assert!(company.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let company: Company = serde_json::from_value(json!({
            "nomeFantasia": "Vale",
            "cnpj": "81832661000185",
        }))
        .unwrap();

        let errors = company.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("legal_name"));
        assert!(fields.contains_key("company_type_id"));
        assert!(!fields.contains_key("tax_id"));
    }
}

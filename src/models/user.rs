// src/models/user.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{dates, Entity, EntityKind, FieldNames};

// --- Telefone ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Phone {
    // DDI (opcional)
    #[serde(rename = "ddi", default)]
    pub country_code: Option<String>,

    // DDD
    #[serde(rename = "ddd", default)]
    #[validate(length(min = 1, code = "required"))]
    pub area_code: String,

    #[serde(rename = "numero", default)]
    #[validate(length(min = 1, code = "required"))]
    pub number: String,
}

// --- Endereço ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[serde(rename = "logradouro", default)]
    #[validate(length(min = 1, code = "required"))]
    pub street: String,

    #[serde(rename = "complemento", default)]
    pub complement: Option<String>,

    // CEP
    #[serde(rename = "cep", default)]
    #[validate(length(min = 1, code = "required"))]
    pub postal_code: String,

    #[serde(rename = "bairro", default)]
    #[validate(length(min = 1, code = "required"))]
    pub district: String,

    #[serde(rename = "cidade", default)]
    #[validate(length(min = 1, code = "required"))]
    pub city: String,

    #[serde(rename = "estado", default)]
    #[validate(length(min = 1, code = "required"))]
    pub state: String,

    #[serde(rename = "pais", default)]
    #[validate(length(min = 1, code = "required"))]
    pub country: String,
}

// --- Usuário ---
// As listas são obrigatórias (não podem faltar nem vir null), mas podem vir vazias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(default)]
    pub id: Uuid,

    #[serde(rename = "nome", default)]
    #[validate(length(min = 1, code = "required"))]
    pub name: String,

    // CPF
    #[serde(rename = "cpf", default)]
    #[validate(length(min = 1, code = "required"))]
    pub tax_id: String,

    // Data e hora, como os clientes sempre mandaram; aceita só a data também.
    #[serde(rename = "dataNascimento", default, deserialize_with = "dates::optional_naive")]
    pub birth_date: Option<NaiveDateTime>,

    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,

    #[serde(rename = "email", default)]
    #[validate(length(min = 1, code = "required"))]
    pub email: String,

    #[serde(rename = "telefones", default)]
    #[validate(required, nested)]
    pub phones: Option<Vec<Phone>>,

    #[serde(rename = "enderecos", default)]
    #[validate(required, nested)]
    pub addresses: Option<Vec<Address>>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    const RESOURCE: &'static str = "Usuario";
    const COLLECTION: &'static str = "UsuarioCollection";
    const LIST_CACHE_KEY: &'static str = "ListaUsuarios";
    const ITEM_CACHE_KEY: &'static str = "Usuario";
    const FIELD_NAMES: FieldNames = &[
        ("name", "nome"),
        ("tax_id", "cpf"),
        ("birth_date", "dataNascimento"),
        ("sex", "sexo"),
        ("email", "email"),
        ("phones", "telefones"),
        ("addresses", "enderecos"),
        ("country_code", "ddi"),
        ("area_code", "ddd"),
        ("number", "numero"),
        ("street", "logradouro"),
        ("complement", "complemento"),
        ("postal_code", "cep"),
        ("district", "bairro"),
        ("city", "cidade"),
        ("state", "estado"),
        ("country", "pais"),
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

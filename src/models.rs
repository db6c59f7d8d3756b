// src/models.rs

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub mod company;
pub mod company_type;
pub mod dates;
pub mod profile;
pub mod profile_user;
pub mod user;

pub use company::Company;
pub use company_type::CompanyType;
pub use profile::Profile;
pub use profile_user::ProfileUser;
pub use user::{Address, Phone, User};

/// Pares (campo Rust, campo no JSON). Cobre também os registros aninhados.
pub type FieldNames = &'static [(&'static str, &'static str)];

/// Os cinco tipos de entidade do cadastro administrativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Company,
    CompanyType,
    Profile,
    User,
    ProfileUser,
}

/// Contrato comum das entidades: como são guardadas, expostas e cacheadas.
pub trait Entity:
    Serialize + DeserializeOwned + Validate + Clone + Debug + Send + Sync + 'static
{
    const KIND: EntityKind;
    /// Segmento da rota (`/api/v2/{RESOURCE}`).
    const RESOURCE: &'static str;
    /// Coleção dedicada no store de documentos.
    const COLLECTION: &'static str;
    /// Chave fixa do cache da listagem.
    const LIST_CACHE_KEY: &'static str;
    /// Chave fixa do cache da consulta por id. Não varia com o id.
    const ITEM_CACHE_KEY: &'static str;
    /// O validator reporta o nome Rust do campo; a resposta usa o nome do JSON.
    const FIELD_NAMES: FieldNames;

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

// Referência obrigatória: UUID ausente chega como nil (via `#[serde(default)]`).
pub fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

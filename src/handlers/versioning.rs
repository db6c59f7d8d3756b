// src/handlers/versioning.rs

use crate::models::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Depreciada. Sem cache.
    V1,
    /// Atual. Leituras passam pelo cache.
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    pub fn segment(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    pub fn uses_cache(self) -> bool {
        matches!(self, ApiVersion::V2)
    }

    pub fn is_deprecated(self) -> bool {
        matches!(self, ApiVersion::V1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Insert,
    Update,
    Delete,
}

const FULL: &[Operation] = &[
    Operation::List,
    Operation::Get,
    Operation::Insert,
    Operation::Update,
    Operation::Delete,
];
const NO_DELETE: &[Operation] = &[Operation::List, Operation::Get, Operation::Insert, Operation::Update];
const NO_UPDATE: &[Operation] = &[Operation::List, Operation::Get, Operation::Insert, Operation::Delete];
const READ_AND_INSERT: &[Operation] = &[Operation::List, Operation::Get, Operation::Insert];

/// Operações expostas por entidade em cada versão da API.
///
/// A V2 estreita a superfície da V1 de propósito: sem exclusão de Empresa,
/// Perfil e Usuário, e sem alteração de Usuário. A associação Perfil x
/// Usuário nunca teve alteração.
pub fn operations(kind: EntityKind, version: ApiVersion) -> &'static [Operation] {
    match (version, kind) {
        (ApiVersion::V1, EntityKind::Company) => FULL,
        (ApiVersion::V1, EntityKind::CompanyType) => NO_DELETE,
        (ApiVersion::V1, EntityKind::Profile) => FULL,
        (ApiVersion::V1, EntityKind::User) => FULL,
        (ApiVersion::V1, EntityKind::ProfileUser) => NO_UPDATE,

        (ApiVersion::V2, EntityKind::Company) => NO_DELETE,
        (ApiVersion::V2, EntityKind::CompanyType) => NO_DELETE,
        (ApiVersion::V2, EntityKind::Profile) => NO_DELETE,
        (ApiVersion::V2, EntityKind::User) => READ_AND_INSERT,
        (ApiVersion::V2, EntityKind::ProfileUser) => NO_UPDATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supports(kind: EntityKind, version: ApiVersion, op: Operation) -> bool {
        operations(kind, version).contains(&op)
    }

    #[test]
    fn reads_and_inserts_are_everywhere() {
        for version in ApiVersion::ALL {
            for kind in [
                EntityKind::Company,
                EntityKind::CompanyType,
                EntityKind::Profile,
                EntityKind::User,
                EntityKind::ProfileUser,
            ] {
                assert!(supports(kind, version, Operation::List));
                assert!(supports(kind, version, Operation::Get));
                assert!(supports(kind, version, Operation::Insert));
            }
        }
    }

    #[test]
    fn deletes_are_v1_only_except_for_profile_user() {
        assert!(supports(EntityKind::Company, ApiVersion::V1, Operation::Delete));
        assert!(!supports(EntityKind::Company, ApiVersion::V2, Operation::Delete));
        assert!(!supports(EntityKind::Profile, ApiVersion::V2, Operation::Delete));
        assert!(!supports(EntityKind::User, ApiVersion::V2, Operation::Delete));
        assert!(supports(EntityKind::ProfileUser, ApiVersion::V1, Operation::Delete));
        assert!(supports(EntityKind::ProfileUser, ApiVersion::V2, Operation::Delete));
    }

    #[test]
    fn user_update_is_v1_only_and_profile_user_never_updates() {
        assert!(supports(EntityKind::User, ApiVersion::V1, Operation::Update));
        assert!(!supports(EntityKind::User, ApiVersion::V2, Operation::Update));
        for version in ApiVersion::ALL {
            assert!(!supports(EntityKind::ProfileUser, version, Operation::Update));
        }
    }

    #[test]
    fn only_v2_reads_through_the_cache() {
        assert!(!ApiVersion::V1.uses_cache());
        assert!(ApiVersion::V2.uses_cache());
        assert!(ApiVersion::V1.is_deprecated());
    }
}

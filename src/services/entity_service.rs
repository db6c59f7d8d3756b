// src/services/entity_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Repository,
    models::{Company, CompanyType, Entity, Profile, ProfileUser, User},
};

pub type CompanyService = EntityService<Company>;
pub type CompanyTypeService = EntityService<CompanyType>;
pub type ProfileService = EntityService<Profile>;
pub type UserService = EntityService<User>;
pub type ProfileUserService = EntityService<ProfileUser>;

// Delegação pura: converte o UUID na chave string do repositório e repassa.
// Nenhuma regra de negócio mora aqui (nem cascata, nem checagem de referência).
pub struct EntityService<T: Entity> {
    repo: Repository<T>,
}

impl<T: Entity> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<T: Entity> EntityService<T> {
    pub fn new(repo: Repository<T>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<T>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, AppError> {
        self.repo.get_by_id(&id.to_string()).await
    }

    pub async fn insert(&self, item: &T) -> Result<T, AppError> {
        self.repo.add(item).await
    }

    pub async fn update(&self, id: Uuid, item: &T) -> Result<Option<T>, AppError> {
        self.repo.replace(&id.to_string(), item).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.remove_by_id(&id.to_string()).await
    }
}

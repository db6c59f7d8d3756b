pub mod document_store;
pub use document_store::{DocumentStore, Page, StoreError};
pub mod memory_store;
pub use memory_store::InMemoryDocumentStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod repository;
pub use repository::{
    CompanyRepository, CompanyTypeRepository, ProfileRepository, ProfileUserRepository, Repository,
    UserRepository,
};

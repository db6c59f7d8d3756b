pub mod entity_service;
pub use entity_service::{
    CompanyService, CompanyTypeService, EntityService, ProfileService, ProfileUserService, UserService,
};

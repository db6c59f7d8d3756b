pub mod api_version;
pub mod i18n;

// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::{common::i18n, db::StoreError, middleware::i18n::Locale, models::FieldNames};

// Erro interno da aplicação. Nada aqui sabe de idioma: a tradução para a
// resposta HTTP acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    // Leva junto a tabela de nomes da entidade para responder com os nomes do JSON.
    #[error("Erro de validação")]
    ValidationError(ValidationErrors, FieldNames),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Recurso não encontrado")]
    NotFound,

    // Falhas do store de documentos sobem sem tradução
    #[error("Erro do store de documentos: {0}")]
    Store(#[from] StoreError),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que de fato vira resposta HTTP, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors, field_names) => {
                let mut details = BTreeMap::new();
                collect_field_errors("", errors, field_names, lang, &mut details);
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: i18n::message("validation", lang).to_string(),
                    details: Some(details),
                }
            }
            AppError::InvalidBody(rejection) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: format!("{} {}", i18n::message("invalid_body", lang), rejection.body_text()),
                details: None,
            },
            AppError::InvalidPath(_) => ApiError::plain(StatusCode::BAD_REQUEST, i18n::message("invalid_path", lang)),
            AppError::NotFound | AppError::Store(StoreError::NotFound) => {
                ApiError::plain(StatusCode::NOT_FOUND, i18n::message("not_found", lang))
            }
            AppError::Store(StoreError::Conflict(_)) => {
                ApiError::plain(StatusCode::CONFLICT, i18n::message("conflict", lang))
            }

            // Todo o resto vira 500. O detalhe vai para o log, não para o cliente.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::plain(StatusCode::INTERNAL_SERVER_ERROR, i18n::message("internal", lang))
            }
        }
    }
}

impl ApiError {
    fn plain(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Achata erros aninhados (ex.: "telefones[0].ddd") num mapa campo -> mensagens.
fn collect_field_errors(
    prefix: &str,
    errors: &ValidationErrors,
    field_names: FieldNames,
    lang: &str,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let field = wire_name(field, field_names);
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| i18n::field_message(&e.code, lang).to_string())
                    .collect::<Vec<_>>();
                out.entry(path).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, field_names, lang, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{path}[{index}]"), inner, field_names, lang, out);
                }
            }
        }
    }
}

fn wire_name<'a>(field: &'a str, field_names: FieldNames) -> &'a str {
    field_names
        .iter()
        .find(|(rust_name, _)| *rust_name == field)
        .map_or(field, |(_, json_name)| *json_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, Entity, User};
    use serde_json::json;
    use validator::{Validate, ValidationError};

    fn locale(lang: &str) -> Locale {
        Locale(lang.to_string())
    }

    #[test]
    fn validation_errors_become_bad_request_with_details() {
        let mut errors = ValidationErrors::new();
        errors.add("legal_name", ValidationError::new("required"));

        let api = AppError::ValidationError(errors, Company::FIELD_NAMES).to_api_error(&locale("pt"));

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("validation errors carry details");
        assert_eq!(details["razaoSocial"], vec!["O campo é obrigatório.".to_string()]);
    }

    #[test]
    fn store_not_found_maps_to_404_and_conflict_to_409() {
        let not_found = AppError::Store(StoreError::NotFound).to_api_error(&locale("en"));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let conflict = AppError::Store(StoreError::Conflict("abc".into())).to_api_error(&locale("en"));
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn unexpected_faults_hide_details() {
        let api = AppError::InternalServerError(anyhow::anyhow!("connection reset"))
            .to_api_error(&locale("en"));

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("connection reset"));
    }

    #[test]
    fn nested_errors_use_json_names() {
        let user: User = serde_json::from_value(json!({
            "nome": "Maria da Silva",
            "cpf": "52998224725",
            "email": "maria@example.com",
            "telefones": [{ "ddi": "55", "numero": "999998888" }]
        }))
        .unwrap();
        let errors = user.validate().unwrap_err();

        let api = AppError::ValidationError(errors, User::FIELD_NAMES).to_api_error(&locale("en"));
        let details = api.details.unwrap();

        assert_eq!(details["telefones[0].ddd"], vec!["The field is required.".to_string()]);
        assert!(details.contains_key("enderecos"));
        assert!(!details.keys().any(|key| key.contains("phones") || key.contains("area_code")));
    }

    #[test]
    fn unknown_fields_keep_their_name() {
        let mut errors = ValidationErrors::new();
        errors.add("outro", ValidationError::new("required"));

        let api = AppError::ValidationError(errors, Company::FIELD_NAMES).to_api_error(&locale("en"));
        assert!(api.details.unwrap().contains_key("outro"));
    }
}

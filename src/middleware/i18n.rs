// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Extrator de idioma a partir do Accept-Language.
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Locale(language_from(parts)))
    }
}

fn language_from(parts: &Parts) -> String {
    parts
        .headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|header_value| header_value.to_str().ok())
        .and_then(|header_str| {
            accept_language::parse(header_str)
                .first()
                // "pt-BR" -> "pt"
                .map(|tag| tag.split('-').next().unwrap_or(tag.as_str()).to_lowercase())
        })
        .unwrap_or_else(|| "en".to_string())
}

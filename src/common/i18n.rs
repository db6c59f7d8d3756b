// src/common/i18n.rs

// Catálogo mínimo de mensagens. Só "pt" e "en"; qualquer outro idioma cai em "en".
pub fn message(key: &str, lang: &str) -> &'static str {
    match (key, lang) {
        ("validation", "pt") => "Um ou mais campos são inválidos.",
        ("validation", _) => "One or more fields are invalid.",

        ("invalid_body", "pt") => "Corpo da requisição inválido.",
        ("invalid_body", _) => "Invalid request body.",

        ("invalid_path", "pt") => "O identificador informado não é um UUID válido.",
        ("invalid_path", _) => "The given identifier is not a valid UUID.",

        ("not_found", "pt") => "Recurso não encontrado.",
        ("not_found", _) => "Resource not found.",

        ("conflict", "pt") => "Já existe um registro com este identificador.",
        ("conflict", _) => "A record with this identifier already exists.",

        (_, "pt") => "Ocorreu um erro inesperado.",
        _ => "An unexpected error occurred.",
    }
}

// Mensagens por código de erro do `validator`.
pub fn field_message(code: &str, lang: &str) -> &'static str {
    match (code, lang) {
        ("required", "pt") => "O campo é obrigatório.",
        ("required", _) => "The field is required.",
        (_, "pt") => "Valor inválido.",
        _ => "Invalid value.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(message("not_found", "de"), "Resource not found.");
        assert_eq!(field_message("required", "fr"), "The field is required.");
    }

    #[test]
    fn unknown_key_is_generic_error() {
        assert_eq!(message("whatever", "pt"), "Ocorreu um erro inesperado.");
    }
}

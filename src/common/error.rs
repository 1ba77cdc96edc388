// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::dates::DateError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Data inválida: {0}")]
    InvalidDate(#[from] DateError),

    #[error("Valor de aluguel inválido")]
    InvalidRate,

    #[error("Período de locação inválido")]
    InvalidTenancyPeriod,

    #[error("Imóvel não encontrado")]
    PropertyNotFound,

    #[error("Proprietário não encontrado")]
    OwnerNotFound,

    #[error("Inquilino não encontrado")]
    TenantNotFound,

    #[error("Imóvel já cadastrado")]
    DuplicateProperty,

    #[error("Imóvel já possui registro de aluguel")]
    DuplicateRateRecord,

    #[error("Imóvel ainda não possui registro de aluguel")]
    NoRateRecord,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidDate(ref e) => {
                let body = Json(json!({ "error": e.to_string() }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidRate => (StatusCode::BAD_REQUEST, "O valor do aluguel deve ser maior que zero."),
            AppError::InvalidTenancyPeriod => (StatusCode::BAD_REQUEST, "A data de saída não pode ser anterior à data de entrada."),

            AppError::PropertyNotFound => (StatusCode::NOT_FOUND, "Imóvel não encontrado."),
            AppError::OwnerNotFound => (StatusCode::NOT_FOUND, "Proprietário não encontrado."),
            AppError::TenantNotFound => (StatusCode::NOT_FOUND, "Inquilino não encontrado."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::NoRateRecord => (StatusCode::NOT_FOUND, "Este imóvel ainda não possui registro de aluguel."),

            AppError::DuplicateProperty => (StatusCode::CONFLICT, "Já existe um imóvel com este endereço."),
            AppError::DuplicateRateRecord => (StatusCode::CONFLICT, "Este imóvel já possui um registro de aluguel."),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::UniqueConstraintViolation(_) => (StatusCode::CONFLICT, "Registro duplicado."),

            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente."),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};

use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("{0}")]
    InvalidMessage(String),
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("Unknown response")]
    UnknownResponse,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendEmailError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendEmailError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            // `Provider` only ever carries one of the relayed status codes.
            SendEmailError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            SendEmailError::UnknownResponse | SendEmailError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            SendEmailError::InvalidMessage(message)
            | SendEmailError::Provider { message, .. } => HttpResponse::build(self.status_code())
                .content_type(ContentType::plaintext())
                .body(message.clone()),
            SendEmailError::UnknownResponse => HttpResponse::build(self.status_code())
                .content_type(ContentType::plaintext())
                .body("Unknown response"),
            SendEmailError::UnexpectedError(_) => {
                HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

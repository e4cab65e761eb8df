//! Form validation responses.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::validation::FieldErrors;

/// Field Error
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

/// Validation Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorResponse {
    /// One entry per failed check, in form order
    pub errors: Vec<FieldErrorResponse>,
}

impl From<&FieldErrors> for ValidationErrorResponse {
    fn from(errors: &FieldErrors) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|error| FieldErrorResponse {
                    field: error.field.to_string(),
                    message: error.message.clone(),
                })
                .collect(),
        }
    }
}

impl ValidationErrorResponse {
    /// Messages recorded for `field`.
    #[cfg(test)]
    pub(crate) fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }
}

/// Write the field messages and return the `422` status to answer with.
pub(crate) fn render_invalid(res: &mut Response, errors: &FieldErrors) -> StatusCode {
    res.render(Json(ValidationErrorResponse::from(errors)));

    StatusCode::UNPROCESSABLE_ENTITY
}

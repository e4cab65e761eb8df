//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::Invalid(errors) => {
            StatusError::unprocessable_entity().brief(errors.to_string())
        }
        AccountsServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        AccountsServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AccountsServiceError::InvalidReference
        | AccountsServiceError::MissingRequiredData
        | AccountsServiceError::InvalidData => StatusError::bad_request().brief("Invalid account data"),
        AccountsServiceError::SessionNotFound => {
            error!("session disappeared during an account operation");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Task(source) => {
            error!("password hashing task failed: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn duplicate_user_is_409() {
        assert_eq!(
            into_status_error(AccountsServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn missing_session_is_500() {
        assert_eq!(
            into_status_error(AccountsServiceError::SessionNotFound).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

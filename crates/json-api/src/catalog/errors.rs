//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Not found"),
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Catalog entry already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => StatusError::bad_request().brief("Invalid catalog data"),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn not_found_is_404() {
        assert_eq!(
            into_status_error(CatalogServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_error_is_500() {
        assert_eq!(
            into_status_error(CatalogServiceError::Sql(sqlx::Error::PoolTimedOut)).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

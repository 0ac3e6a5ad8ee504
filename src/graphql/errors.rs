use async_graphql::{Error, ErrorExtensions, ID};

pub(crate) fn not_found(message: impl Into<String>) -> Error {
    Error::new(message).extend_with(|_, ext| ext.set("code", "NOT_FOUND"))
}

pub(crate) fn invalid_argument(message: impl Into<String>) -> Error {
    Error::new(message).extend_with(|_, ext| ext.set("code", "INVALID_ARGUMENT"))
}

/// Logs the cause and hides it from the client.
pub(crate) fn internal(cause: impl std::fmt::Debug) -> Error {
    tracing::error!(error = ?cause, "GraphQL resolver failed");
    Error::new("Internal server error").extend_with(|_, ext| ext.set("code", "INTERNAL"))
}

pub(crate) fn parse_id(id: &ID, entity: &str) -> Result<i64, Error> {
    id.parse::<i64>()
        .map_err(|_| invalid_argument(format!(r#"Invalid {entity} id "{}""#, id.as_str())))
}

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| errs.iter().map(move |err| describe(field, err)))
            .collect();
        messages.sort();
        CoreError::Validation(messages.join("; "))
    }
}

/// One readable sentence per field error.
fn describe(field: &str, err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match (err.code.as_ref(), err.params.get("max")) {
        ("length", Some(max)) => format!("{field} must be at most {max} characters"),
        _ => format!("{field} is invalid"),
    }
}

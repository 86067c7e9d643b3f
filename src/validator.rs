use validator::{Validate, ValidationErrors};

use kiit_finder_core::ClientError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Pre-flight check of a request body before it is sent.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] listing every failed field.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ClientError> {
    request
        .validate()
        .map_err(|errors| ClientError::Validation(format_errors(&errors)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiit_finder_models::{LoginRequest, RegisterRequest};

    #[test]
    fn test_valid_request_passes() {
        let request = LoginRequest {
            email: "student@kiit.ac.in".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_all_failures_reported_in_stable_order() {
        let request = RegisterRequest {
            name: String::new(),
            email: "nope".to_string(),
            password: String::new(),
            role: None,
        };
        match validate_request(&request) {
            Err(ClientError::Validation(message)) => assert_eq!(
                message,
                "Email must be a valid address, Name is required, Password is required"
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

use serde_json::{Map, Value, json};

use super::ApiError;
use super::types::SignupRequest;
use crate::domain::Priority;
use crate::services::auth_service::Registration;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Parses a path segment as a positive row id.
pub fn parse_id(raw: &str, resource: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            resource, raw
        ))),
    }
}

pub fn parse_priority(raw: Option<&str>) -> Result<Priority, ApiError> {
    match raw {
        None => Ok(Priority::default()),
        Some(value) => value.parse().map_err(|_| {
            ApiError::validation(format!(
                "Invalid priority: '{}'. Expected high, medium or low",
                value
            ))
        }),
    }
}

pub fn validate_company_url(url: Option<&str>) -> Result<String, ApiError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(ApiError::validation("Company URL is required")),
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Checks every signup field and reports all problems at once under
/// `details.fieldErrors`.
pub fn validate_signup(request: SignupRequest) -> Result<Registration, ApiError> {
    let mut field_errors = Map::new();
    let mut reject = |field: &str, msg: &str| {
        field_errors.insert(field.to_string(), json!([msg]));
    };

    let email = request.email.unwrap_or_default();
    if email.is_empty() {
        reject("email", "Required");
    } else if !is_email(&email) {
        reject("email", "Invalid email");
    }

    let password = request.password.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        reject("password", "Password must be at least 6 characters");
    }

    let full_name = request.full_name.unwrap_or_default();
    if full_name.trim().is_empty() {
        reject("fullName", "Required");
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_with_details(
            "Validation error",
            json!({ "formErrors": [], "fieldErrors": Value::Object(field_errors) }),
        ));
    }

    Ok(Registration {
        email,
        password,
        full_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, full_name: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            full_name: Some(full_name.to_string()),
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12", "company").unwrap(), 12);
        assert!(parse_id("0", "company").is_err());
        assert!(parse_id("-3", "job").is_err());
        assert!(parse_id("abc", "job").is_err());
        assert!(parse_id("99999999999", "job").is_err());
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority(None).unwrap(), Priority::Medium);
        assert_eq!(parse_priority(Some("low")).unwrap(), Priority::Low);
        assert!(parse_priority(Some("urgent")).is_err());
    }

    #[test]
    fn test_validate_company_url() {
        assert_eq!(
            validate_company_url(Some(" https://acme.io ")).unwrap(),
            "https://acme.io"
        );
        assert!(validate_company_url(Some("   ")).is_err());
        assert!(validate_company_url(None).is_err());
    }

    #[test]
    fn test_valid_signup() {
        let registration = validate_signup(signup("ada@example.com", "secret1", "Ada")).unwrap();
        assert_eq!(registration.email, "ada@example.com");
        assert_eq!(registration.full_name, "Ada");
    }

    #[test]
    fn test_signup_reports_every_field() {
        let err = validate_signup(SignupRequest {
            email: Some("not-an-email".to_string()),
            password: Some("123".to_string()),
            full_name: None,
        })
        .unwrap_err();

        let ApiError::ValidationError { details, .. } = err else {
            panic!("expected validation error");
        };
        let fields = &details.unwrap()["fieldErrors"];
        assert_eq!(fields["email"][0], "Invalid email");
        assert!(fields["password"].is_array());
        assert_eq!(fields["fullName"][0], "Required");
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.io"));
        assert!(!is_email("a@@b.io"));
    }
}

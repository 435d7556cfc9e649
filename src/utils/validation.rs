//! Input validation helpers
//!
//! Forms derive `validator::Validate`. The rules that are more than a length,
//! range or format check live here as custom validators, and `check` flattens
//! a failed validation into the list of messages an error response carries.

use bigdecimal::{BigDecimal, Zero};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

/// At least six characters drawn from letters, digits and a few symbols,
/// with at least one letter and one digit.
pub fn password_rule(password: &str) -> Result<(), ValidationError> {
    let acceptable = password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));

    if acceptable {
        Ok(())
    } else {
        Err(ValidationError::new("password"))
    }
}

/// Student index numbers are 8 to 10 digits.
pub fn index_number_rule(index_number: &str) -> Result<(), ValidationError> {
    if (8..=10).contains(&index_number.len()) && index_number.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("index_number"))
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

pub fn non_negative_amount(amount: &BigDecimal) -> Result<(), ValidationError> {
    if amount < &BigDecimal::zero() {
        Err(ValidationError::new("negative"))
    } else {
        Ok(())
    }
}

/// Runs the derived rules. Empty when the form is acceptable, otherwise one
/// message per failed rule, nested forms included.
pub fn check<T: Validate>(form: &T) -> Vec<String> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => messages(&errors),
    }
}

pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, &mut out);
    out
}

fn collect(errors: &ValidationErrors, out: &mut Vec<String>) {
    // HashMap order is arbitrary; sort so responses are stable.
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(failures) => {
                out.extend(failures.iter().map(|failure| match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect(nested, out);
                }
            }
        }
    }
}

/// Fields of a sign-up form, already trimmed (passwords excepted).
#[derive(Debug, Default, Clone, Validate)]
pub struct Registration {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: String,
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(custom(
        function = "password_rule",
        message = "Password must be at least 6 characters long and contain at least one letter and one number"
    ))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub confirm_password: String,
    #[validate(length(min = 2, message = "First name must be at least 2 characters long"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters long"))]
    pub last_name: String,
    #[validate(custom(
        function = "index_number_rule",
        message = "Please provide a valid index number (8-10 digits)"
    ))]
    pub index_number: String,
    #[validate(length(min = 1, message = "Hall of residence is required"))]
    pub hall_of_residence: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 9, message = "Please provide a valid phone number"))]
    pub phone_number: String,
}

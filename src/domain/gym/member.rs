//! Gym member rows and the new-member form.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// Longest value accepted for any member text field.
pub const MAX_FIELD_LEN: usize = 255;

/// A member row as listed by the `miembro` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub membership_type: String,
}

/// Validated input for inserting a member.
///
/// The database derives `full_name` from the first name and paternal
/// surname, so only those parts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    first_name: String,
    paternal_surname: String,
    email: String,
    membership_type: String,
}

impl NewMember {
    /// Builds a new member from raw form values.
    ///
    /// All fields are trimmed and must be non-empty. The email must have a
    /// local part and a domain around a single `@`.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, in form order.
    pub fn new(
        first_name: &str,
        paternal_surname: &str,
        email: &str,
        membership_type: &str,
    ) -> Result<Self, ValidationError> {
        let first_name = required("nombre", first_name)?;
        let paternal_surname = required("apellido_paterno", paternal_surname)?;
        let email = required("correo", email)?;
        validate_email(&email)?;
        let membership_type = required("tipo_membresia", membership_type)?;

        Ok(Self {
            first_name,
            paternal_surname,
            email,
            membership_type,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn paternal_surname(&self) -> &str {
        &self.paternal_surname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn membership_type(&self) -> &str {
        &self.membership_type
    }

    /// Full name as the database composes it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.paternal_surname)
    }
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::too_long(field, MAX_FIELD_LEN));
    }
    Ok(value.to_string())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ValidationError::invalid_format("correo", "missing @ symbol"))?;

    if local.is_empty() || domain.is_empty() {
        return Err(ValidationError::invalid_format(
            "correo",
            "expected name@domain",
        ));
    }
    if domain.contains('@') {
        return Err(ValidationError::invalid_format("correo", "more than one @"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format("correo", "contains whitespace"));
    }
    Ok(())
}

//! Form types for the gym endpoints.

use serde::Deserialize;

use crate::adapters::html::MemberFormValues;
use crate::domain::foundation::ValidationError;
use crate::domain::gym::NewMember;

/// New member form body. Field names match the form inputs.
#[derive(Debug, Default, Deserialize)]
pub struct NewMemberForm {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido_paterno: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub tipo_membresia: String,
}

impl NewMemberForm {
    pub fn validate(&self) -> Result<NewMember, ValidationError> {
        NewMember::new(
            &self.nombre,
            &self.apellido_paterno,
            &self.correo,
            &self.tipo_membresia,
        )
    }

    pub fn values(&self) -> MemberFormValues<'_> {
        MemberFormValues {
            first_name: &self.nombre,
            paternal_surname: &self.apellido_paterno,
            email: &self.correo,
            membership_type: &self.tipo_membresia,
        }
    }
}

use std::collections::BTreeMap;

use email_address::EmailAddress;

use crate::types::UserFormValues;

pub const PHONE_MAX_CHARS: usize = 20;
pub const NAME_MIN_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    UserType,
    Sector,
}

impl FormField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::UserType,
        Self::Sector,
    ];
}

/// First failing rule of each invalid field.
pub type FieldErrors = BTreeMap<FormField, &'static str>;

pub fn validate(values: &UserFormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if values.name.is_empty() {
        errors.insert(FormField::Name, "Nome é obrigatório");
    } else if values.name.chars().count() < NAME_MIN_CHARS {
        errors.insert(FormField::Name, "Nome deve ter pelo menos 3 caracteres");
    }

    if values.email.is_empty() {
        errors.insert(FormField::Email, "E-mail é obrigatório");
    } else if !is_valid_email(&values.email) {
        errors.insert(FormField::Email, "Digite um e-mail válido");
    }

    if values.phone.is_empty() {
        errors.insert(FormField::Phone, "Telefone é obrigatório");
    } else if values.phone.chars().count() > PHONE_MAX_CHARS {
        errors.insert(FormField::Phone, "Telefone não pode exceder 20 caracteres");
    }

    if values.user_type.is_empty() {
        errors.insert(FormField::UserType, "Tipo de usuário é obrigatório");
    }

    if values.sector.is_empty() {
        errors.insert(FormField::Sector, "Setor é obrigatório");
    }

    errors
}

/// Address syntax as described by RFC 5322; the domain needs no dot.
pub fn is_valid_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forms and client-side required-field validation.

use crate::models::FormData;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static TEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+\-()]+$").expect("valid phone regex"));

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Password,
    Select,
    Textarea,
}

/// A single form control.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub id: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
    invalid: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            id: String::new(),
            kind,
            value: String::new(),
            required: false,
            invalid: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether the last validation marked this field with the error class.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Name used in messages: the field name, else its id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A form found on the page by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: String,
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Submitted values of named fields.
    pub fn data(&self) -> FormData {
        self.fields
            .iter()
            .filter(|f| !f.name.is_empty())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// Validate required fields in order and mark failures.
///
/// Returns one message per failing field; empty means the form is valid.
pub fn validate_form(form: &mut Form) -> Vec<String> {
    let mut errors = Vec::new();

    for field in form.fields.iter_mut().filter(|f| f.required) {
        let value = field.value.trim();
        let label = field.label().to_string();

        if value.is_empty() {
            errors.push(format!("Il campo {} è obbligatorio", label));
            field.invalid = true;
            continue;
        }

        field.invalid = false;
        let message = match field.kind {
            FieldKind::Email if !EMAIL_RE.is_match(value) => {
                Some(format!("Email non valida nel campo {}", label))
            }
            FieldKind::Tel if !TEL_RE.is_match(value) => {
                Some(format!("Numero di telefono non valido nel campo {}", label))
            }
            _ => None,
        };

        if let Some(message) = message {
            errors.push(message);
            field.invalid = true;
        }
    }

    errors
}

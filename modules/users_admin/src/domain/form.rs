//! Create/edit form for a single user record.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::config::NotificationTexts;
use crate::contract::{
    client::UsersApi,
    error::Fault,
    model::{Address, NewUser, User, UserPatch},
};
use crate::domain::notify::{Notification, NotificationSink};

pub const NAME_MIN_CHARS: usize = 2;

// Local part and dotted domain labels; total length is checked separately.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    value.len() <= 254 && local.len() <= 64 && EMAIL_RE.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Required,
    TooShort { min: usize },
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Required => write!(f, "{} is required", self.field),
            FieldProblem::TooShort { min } => {
                write!(f, "{} must have at least {min} characters", self.field)
            }
            FieldProblem::InvalidEmail => write!(f, "{} is not a valid email", self.field),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("invalid form: {}", join(.0))]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Fault(#[from] Fault),
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Field values of the form. `id` is set when editing an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub id: Option<String>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            address: Address::default(),
            active: true,
        }
    }
}

impl From<User> for UserForm {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            email: u.email,
            phone: u.phone,
            address: u.address,
            active: u.active,
        }
    }
}

impl UserForm {
    /// Prefill from the stored record for editing.
    #[instrument(name = "users_admin.form.load", skip(api))]
    pub async fn load(api: &dyn UsersApi, id: &str) -> Result<Self, Fault> {
        Ok(api.get(id).await?.into())
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: "name",
                problem: FieldProblem::Required,
            });
        } else if name.chars().count() < NAME_MIN_CHARS {
            errors.push(FieldError {
                field: "name",
                problem: FieldProblem::TooShort {
                    min: NAME_MIN_CHARS,
                },
            });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: "email",
                problem: FieldProblem::Required,
            });
        } else if !is_valid_email(email) {
            errors.push(FieldError {
                field: "email",
                problem: FieldProblem::InvalidEmail,
            });
        }

        errors
    }

    pub fn validate(&self) -> Result<NewUser, FormError> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }
        Ok(NewUser {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.clone(),
            active: self.active,
        })
    }

    /// Create or update the record, then confirm with a notification.
    ///
    /// An invalid form never reaches the client.
    #[instrument(name = "users_admin.form.save", skip_all, fields(id = ?self.id))]
    pub async fn save(
        &self,
        api: &dyn UsersApi,
        sink: &dyn NotificationSink,
        texts: &NotificationTexts,
    ) -> Result<User, FormError> {
        let data = self.validate()?;
        let saved = match self.id.as_deref() {
            Some(id) => api.update(id, UserPatch::from(data)).await?,
            None => api.create(data).await?,
        };
        debug!(id = ?saved.id, "user saved");
        sink.notify(Notification::info(&texts.user_saved, texts));
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserForm {
        UserForm {
            name: "Chelsey Dietrich".into(),
            email: "Lucio_Hettinger@annie.ca".into(),
            ..Default::default()
        }
    }

    #[test]
    fn new_form_defaults_to_active() {
        let form = UserForm::default();
        assert!(form.active);
        assert!(!form.is_edit());
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = UserForm::default().errors();
        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: "name",
                    problem: FieldProblem::Required
                },
                FieldError {
                    field: "email",
                    problem: FieldProblem::Required
                },
            ]
        );
    }

    #[test]
    fn short_name_is_rejected() {
        let form = UserForm {
            name: "A".into(),
            ..filled()
        };
        let err = form.validate().unwrap_err();
        assert!(matches!(
            err,
            FormError::Invalid(ref e) if e[0].problem == FieldProblem::TooShort { min: 2 }
        ));
        assert_eq!(
            err.to_string(),
            "invalid form: name must have at least 2 characters"
        );
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["plain", "a@", "@b.com", "a b@c.com", "a@-b.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["Sincere@april.biz", "a.b+c@d-e.f", "x@localhost"] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn valid_form_trims_values() {
        let form = UserForm {
            name: "  Chelsey Dietrich ".into(),
            ..filled()
        };
        let data = form.validate().unwrap();
        assert_eq!(data.name, "Chelsey Dietrich");
        assert!(data.active);
    }
}

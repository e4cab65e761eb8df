//! Account Data
//!
//! Raw registration and login input, and the checks that run before any
//! storage access.

use serde::Deserialize;

use crate::{
    domain::accounts::password::Password,
    validation::{FieldErrors, non_blank},
};

pub(crate) const REQUIRED: &str = "Обязательное поле.";
pub(crate) const USERNAME_TAKEN: &str =
    "Пользователь с данным логином уже зарегистрирован в системе!";
pub(crate) const EMAIL_TAKEN: &str = "Пользователь с данным почтовым адресом уже зарегистрирован!";
pub(crate) const PASSWORDS_DIFFER: &str = "Ваши пароли не совпадают! Попробуйте снова!";
pub(crate) const INVALID_EMAIL: &str = "Введите правильный адрес электронной почты.";
pub(crate) const UNKNOWN_USERNAME: &str =
    "Пользователь с данным логином не зарегистрирован в системе!";
pub(crate) const WRONG_PASSWORD: &str = "Неверный пароль!";

/// Registration form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub username: Option<String>,
    pub password: Option<String>,
    pub password_check: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Registration input that passed the field checks.
#[derive(Debug)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: Password,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// Check required fields, email shape and the password confirmation.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = non_blank(self.username);
        let email = non_blank(self.email);
        let password = self.password.filter(|password| !password.is_empty());
        let password_check = self.password_check.filter(|password| !password.is_empty());

        if username.is_none() {
            errors.push("username", REQUIRED);
        }

        match email.as_deref() {
            None => errors.push("email", REQUIRED),
            Some(email) if !looks_like_email(email) => errors.push("email", INVALID_EMAIL),
            Some(_) => {}
        }

        if password.is_none() {
            errors.push("password", REQUIRED);
        }

        if password_check.is_none() {
            errors.push("password_check", REQUIRED);
        }

        if let (Some(password), Some(password_check)) = (&password, &password_check)
            && password != password_check
        {
            errors.push("password_check", PASSWORDS_DIFFER);
        }

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(errors);
        };

        errors.into_result(ValidRegistration {
            username,
            email,
            password: Password::new(password),
            first_name: non_blank(self.first_name).unwrap_or_default(),
            last_name: non_blank(self.last_name).unwrap_or_default(),
        })
    }
}

/// Login form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login input with both fields present.
#[derive(Debug)]
pub struct ValidCredentials {
    pub username: String,
    pub password: Password,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns every missing field.
    pub fn validate(self) -> Result<ValidCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = non_blank(self.username);
        let password = self.password.filter(|password| !password.is_empty());

        if username.is_none() {
            errors.push("username", REQUIRED);
        }

        if password.is_none() {
            errors.push("password", REQUIRED);
        }

        match (username, password) {
            (Some(username), Some(password)) => Ok(ValidCredentials {
                username,
                password: Password::new(password),
            }),
            _ => Err(errors),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
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

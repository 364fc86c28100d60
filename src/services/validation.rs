//! Client-side input validation
//!
//! Checks run in a fixed order and stop at the first violation, so the user
//! sees exactly one message per attempt. Nothing that fails here reaches the
//! network.

use once_cell::sync::Lazy;
use regex::Regex;

use super::messages;
use super::notifier::Notifier;
use crate::config::ValidationConfig;
use crate::models::{LoginInput, PostInput, RegisterInput};

/// `local@domain.tld` with no whitespace and no extra `@` in any segment
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// The first rule an input violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", messages::VALIDATE_POST_TITLE_EMPTY)]
    TitleEmpty,
    #[error("{}", messages::VALIDATE_POST_TITLE_TOO_LONG)]
    TitleTooLong,
    #[error("{}", messages::VALIDATE_POST_CONTENT_EMPTY)]
    ContentEmpty,
    #[error("{}", messages::VALIDATE_POST_CONTENT_TOO_LONG)]
    ContentTooLong,
    #[error("{}", messages::VALIDATE_POST_AGE_ID_EMPTY)]
    AgeMissing,
    #[error("{}", messages::VALIDATE_POST_IMAGE_URL_EMPTY)]
    ImageMissing,
    #[error("{}", messages::VALIDATE_USER_NAME_EMPTY)]
    UserNameEmpty,
    #[error("{}", messages::VALIDATE_USER_NAME_TOO_LONG)]
    UserNameTooLong,
    #[error("{}", messages::VALIDATE_EMAIL_EMPTY)]
    EmailEmpty,
    #[error("{}", messages::VALIDATE_EMAIL_INCORRECT_FORMAT)]
    EmailFormat,
    #[error("{}", messages::VALIDATE_PASSWORD_EMPTY)]
    PasswordEmpty,
    #[error("{}", messages::VALIDATE_PASSWORD_TOO_SHORT)]
    PasswordTooShort,
    #[error("{}", messages::VALIDATE_PASSWORD_TOO_LONG)]
    PasswordTooLong,
}

/// Which user form is being checked
#[derive(Debug, Clone, Copy)]
pub enum UserForm<'a> {
    Login(&'a LoginInput),
    Register(&'a RegisterInput),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Check a post draft: title, content, age, image, in that order
pub fn validate_post(post: &PostInput, limits: &ValidationConfig) -> Result<(), ValidationError> {
    if is_blank(&post.title) {
        return Err(ValidationError::TitleEmpty);
    }
    if too_long(&post.title, limits.title_max_length) {
        return Err(ValidationError::TitleTooLong);
    }
    if is_blank(&post.content) {
        return Err(ValidationError::ContentEmpty);
    }
    if too_long(&post.content, limits.content_max_length) {
        return Err(ValidationError::ContentTooLong);
    }
    if post.age_id.is_none() {
        return Err(ValidationError::AgeMissing);
    }
    if is_blank(&post.image_url) {
        return Err(ValidationError::ImageMissing);
    }
    Ok(())
}

/// Email and password rules shared by login and registration
pub fn validate_credentials(
    email: &str,
    password: &str,
    limits: &ValidationConfig,
) -> Result<(), ValidationError> {
    if is_blank(email) {
        return Err(ValidationError::EmailEmpty);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailFormat);
    }
    if is_blank(password) {
        return Err(ValidationError::PasswordEmpty);
    }
    let length = password.chars().count();
    if length < limits.password_min_length {
        return Err(ValidationError::PasswordTooShort);
    }
    if length > limits.password_max_length {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Check a login or registration form.
///
/// Registration checks the user name first, then applies the login rules.
pub fn validate_user(form: UserForm<'_>, limits: &ValidationConfig) -> Result<(), ValidationError> {
    match form {
        UserForm::Login(input) => validate_credentials(&input.email, &input.password, limits),
        UserForm::Register(input) => {
            if is_blank(&input.user_name) {
                return Err(ValidationError::UserNameEmpty);
            }
            if too_long(&input.user_name, limits.user_name_max_length) {
                return Err(ValidationError::UserNameTooLong);
            }
            validate_credentials(&input.email, &input.password, limits)
        }
    }
}

/// Validate a post and notify the violated rule, if any
pub fn is_post_valid(post: &PostInput, limits: &ValidationConfig, notifier: &dyn Notifier) -> bool {
    report(validate_post(post, limits), notifier)
}

/// Validate a user form and notify the violated rule, if any
pub fn is_user_valid(form: UserForm<'_>, limits: &ValidationConfig, notifier: &dyn Notifier) -> bool {
    report(validate_user(form, limits), notifier)
}

fn report(result: Result<(), ValidationError>, notifier: &dyn Notifier) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(rule = ?e, "input rejected before submission");
            notifier.error(&e.to_string());
            false
        }
    }
}

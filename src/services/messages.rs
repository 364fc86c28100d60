//! User-facing messages
//!
//! Every notice the client shows goes through one of these constants so the
//! wording stays consistent between views.

// Validation: registration and login
pub const VALIDATE_USER_NAME_EMPTY: &str = "Please enter a name";
pub const VALIDATE_USER_NAME_TOO_LONG: &str = "The name is too long";
pub const VALIDATE_EMAIL_EMPTY: &str = "Please enter an email address";
pub const VALIDATE_EMAIL_INCORRECT_FORMAT: &str = "The email address format is invalid";
pub const VALIDATE_PASSWORD_EMPTY: &str = "Please enter a password";
pub const VALIDATE_PASSWORD_TOO_SHORT: &str = "The password is too short";
pub const VALIDATE_PASSWORD_TOO_LONG: &str = "The password is too long";

// Validation: posts
pub const VALIDATE_POST_TITLE_EMPTY: &str = "Please enter a title";
pub const VALIDATE_POST_TITLE_TOO_LONG: &str = "The title is too long";
pub const VALIDATE_POST_CONTENT_EMPTY: &str = "Please enter some content";
pub const VALIDATE_POST_CONTENT_TOO_LONG: &str = "The content is too long";
pub const VALIDATE_POST_AGE_ID_EMPTY: &str = "Please select an age";
pub const VALIDATE_POST_IMAGE_URL_EMPTY: &str = "Please select an image";

// Session
pub const USER_REGISTER_SUCCEEDED: &str = "Registration succeeded";
pub const USER_REGISTER_FAILED: &str = "Registration failed";
pub const ALREADY_LOGGED_IN: &str = "You are already logged in";
pub const LOG_IN_SUCCESS: &str = "Logged in";
pub const LOG_IN_FAILED: &str = "Login failed";
pub const LOG_OUT_SUCCESS: &str = "Logged out";
pub const LOG_OUT_FAILED: &str = "Logout failed";
pub const USER_INFO_GET_FAILED: &str = "Could not load user information";
pub const LOGIN_REQUIRED: &str = "You must be logged in to use this feature";
pub const NO_PERMISSION: &str = "You do not have permission to perform this operation";

// Posts
pub const POST_CREATE_SUCCEEDED: &str = "Post created";
pub const POST_CREATE_FAILED: &str = "Could not create the post";
pub const POST_UPDATE_SUCCEEDED: &str = "Post updated";
pub const POST_UPDATE_FAILED: &str = "Could not update the post";
pub const POST_GET_FAILED: &str = "Could not load posts";
pub const POST_NOT_FOUND: &str = "Post not found (it may have been deleted)";
pub const POST_EXECUTE_CONFIRM: &str = "Are you sure?";
pub const POST_DELETE_SUCCEEDED: &str = "Post deleted";
pub const POST_DELETE_FAILED: &str = "Could not delete the post";
pub const CANCELLED: &str = "Cancelled";

// Reference data and third-party API
pub const AGE_GET_ERROR: &str = "Could not load the list of dog ages";
pub const DOG_API_ERROR: &str = "Could not fetch a dog image";

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

// Shell
pub const NO_FORM_ON_PAGE: &str = "This page has no such field";
pub const NO_ACTION_ON_PAGE: &str = "That command is not available on this page";

//! Data models
//!
//! This module contains all data structures exchanged with the post API:
//! - Wire entities (Post, Age, UserProfile)
//! - Form inputs (PostInput, LoginInput, RegisterInput)
//! - The client-side Session state

mod age;
mod post;
mod session;
mod user;

pub use age::Age;
pub use post::{Post, PostInput};
pub use session::Session;
pub use user::{LoginInput, RegisterInput, UserProfile};

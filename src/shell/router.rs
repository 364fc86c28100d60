//! Client-side routes
//!
//! Any path that does not name a known page resolves to the post index.

use std::fmt;

/// A page of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    PostNew,
    PostIndex,
    PostShow(i64),
    PostEdit(i64),
    UserRegister,
    UserLogin,
}

impl Route {
    /// Resolve a path; unknown paths fall back to the post index
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["posts", "new"] => Route::PostNew,
            ["posts", "index"] => Route::PostIndex,
            ["posts", "show", id] => id.parse().map(Route::PostShow).unwrap_or(Route::PostIndex),
            ["posts", "edit", id] => id.parse().map(Route::PostEdit).unwrap_or(Route::PostIndex),
            ["users", "register"] => Route::UserRegister,
            ["users", "login"] => Route::UserLogin,
            _ => {
                tracing::debug!(path, "unknown route, redirecting to post index");
                Route::PostIndex
            }
        }
    }

    /// Canonical path of the route
    pub fn path(&self) -> String {
        match self {
            Route::PostNew => "/posts/new".to_string(),
            Route::PostIndex => "/posts/index".to_string(),
            Route::PostShow(id) => format!("/posts/show/{}", id),
            Route::PostEdit(id) => format!("/posts/edit/{}", id),
            Route::UserRegister => "/users/register".to_string(),
            Route::UserLogin => "/users/login".to_string(),
        }
    }

    /// Pages that only make sense for a signed-in user
    pub fn requires_login(&self) -> bool {
        matches!(self, Route::PostNew | Route::PostEdit(_))
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::PostIndex
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

//! Page header

use crate::models::Session;

/// Header line: the user name and logout when signed in, sign-up and login
/// otherwise. Nothing is gated while the session is still loading.
pub fn render_header(session: &Session) -> String {
    match session {
        Session::Loading => "dogpost | ...".to_string(),
        Session::Anonymous => "dogpost | [register] [login]".to_string(),
        Session::Authenticated(user) => format!("dogpost | {} [logout]", user.user_name),
    }
}

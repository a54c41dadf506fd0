/**
 * Routes
 *
 * In-app views addressed by path, plus the protected-route guard.
 */

use crate::app::session::Session;
use crate::shared::models::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    CreatePost,
    /// `/users/{id}` or `/users/me`
    User(UserRef),
    /// `/users/me/edit`
    EditProfile,
}

impl Default for Route {
    fn default() -> Self {
        Self::Home
    }
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::CreatePost => "/create-post".to_string(),
            Self::User(user) => format!("/users/{user}"),
            Self::EditProfile => "/users/me/edit".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] | [""] => Some(Self::Home),
            ["login"] => Some(Self::Login),
            ["register"] => Some(Self::Register),
            ["create-post"] => Some(Self::CreatePost),
            ["users", "me", "edit"] => Some(Self::EditProfile),
            ["users", user] => user.parse().ok().map(Self::User),
            _ => None,
        }
    }

    /// Routes that need a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::CreatePost | Self::EditProfile | Self::User(UserRef::Me)
        )
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    /// Session still resolving; show a loading indicator.
    Pending,
}

pub fn guard(route: Route, session: &Session) -> Navigation {
    if !route.is_protected() {
        return Navigation::Render(route);
    }
    if session.is_loading() {
        return Navigation::Pending;
    }
    if session.is_authenticated() {
        Navigation::Render(route)
    } else {
        tracing::debug!("Redirecting {} to /login", route.path());
        Navigation::Redirect(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_roundtrip() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::CreatePost,
            Route::User(UserRef::Me),
            Route::User(UserRef::Id(12)),
            Route::EditProfile,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse("/users/abc"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/login/"), Some(Route::Login));
    }

    #[test]
    fn test_guard_public_route() {
        let session = Session::default();
        assert_eq!(guard(Route::Home, &session), Navigation::Render(Route::Home));
        assert_eq!(
            guard(Route::User(UserRef::Id(3)), &session),
            Navigation::Render(Route::User(UserRef::Id(3)))
        );
    }

    #[test]
    fn test_guard_redirects_when_signed_out() {
        let session = Session::default();
        assert_eq!(guard(Route::CreatePost, &session), Navigation::Redirect(Route::Login));
        assert_eq!(guard(Route::User(UserRef::Me), &session), Navigation::Redirect(Route::Login));
    }
}

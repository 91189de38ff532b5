#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

/// Who is currently logged in. Authentication is derived from the presence of
/// a bearer token, so an authenticated session without a token cannot exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn authenticated(token: &str) -> Session {
        return Session {
            token: Some(token.to_string()),
        };
    }

    pub fn is_authenticated(&self) -> bool {
        return self.token.is_some();
    }

    pub fn token(&self) -> Option<&str> {
        return self.token.as_deref();
    }
}

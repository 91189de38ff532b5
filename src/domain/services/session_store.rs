#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Session;
use crate::infrastructure::auth::AuthClient;

/// Single owner of the login state. Dependents borrow the session through
/// `current_user`; only `login` and `logout` mutate it. Nothing is persisted.
#[derive(Default)]
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    /// Builds the store from configuration. A configured token wins, then a
    /// configured username and password pair is exchanged for one. Otherwise
    /// the store starts logged out.
    pub async fn from_config() -> Result<SessionStore> {
        let mut store = SessionStore::default();

        let token = Config::get(ConfigKey::Token);
        if !token.is_empty() {
            store.login(&token);
            return Ok(store);
        }

        let username = Config::get(ConfigKey::Username);
        let password = Config::get(ConfigKey::Password);
        if !username.is_empty() && !password.is_empty() {
            let token = AuthClient::default().login(&username, &password).await?;
            store.login(&token);
        }

        return Ok(store);
    }

    pub fn login(&mut self, token: &str) {
        self.session = Session::authenticated(token);
        tracing::info!("logged in");
    }

    pub fn logout(&mut self) {
        self.session = Session::default();
        tracing::info!("logged out");
    }

    pub fn current_user(&self) -> &Session {
        return &self.session;
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Exchanges credentials for a bearer token against the service's login
/// endpoint.
pub struct AuthClient {
    url: String,
}

impl Default for AuthClient {
    fn default() -> AuthClient {
        return AuthClient::new(&Config::get(ConfigKey::ServiceURL));
    }
}

impl AuthClient {
    pub fn new(url: &str) -> AuthClient {
        return AuthClient {
            url: url.trim_end_matches('/').to_string(),
        };
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/login", url = self.url))
            .header("Accept", "application/json")
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Login request failed");
            bail!("Invalid credentials");
        }

        let body = res.json::<LoginResponse>().await?;
        if let Some(token) = body.token {
            if !token.is_empty() {
                return Ok(token);
            }
        }

        tracing::error!("Login response did not include a token");
        bail!("Invalid credentials");
    }
}

// Session endpoints: login, logout, password change and profile edit.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

// ── Bearer token ─────────────────────────────────────────────────────

/// Session token sent as `Authorization: Bearer <token>`.
///
/// An absent token still produces the header, with an empty value; the
/// server decides what an anonymous request may do.
#[derive(Clone, Default)]
pub struct BearerToken(Option<SecretString>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    /// A token that sends a blank bearer value.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// The raw token, or `""` when absent.
    pub fn expose(&self) -> &str {
        self.0.as_ref().map_or("", <SecretString as ExposeSecret<str>>::expose_secret)
    }

    pub(crate) fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(self.expose())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("BearerToken(****)"),
            None => f.write_str("BearerToken(<none>)"),
        }
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose() && self.is_present() == other.is_present()
    }
}

impl From<Option<String>> for BearerToken {
    fn from(token: Option<String>) -> Self {
        token.map_or_else(Self::none, Self::new)
    }
}

// ── Wire types ───────────────────────────────────────────────────────

/// Profile of the signed-in user, as returned by login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginBody {
    token: String,
    #[serde(default)]
    user: UserInfo,
}

/// Successful login: the session token plus the user's profile.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: BearerToken,
    pub user: UserInfo,
}

/// Body of `PATCH /changepassword`.
#[derive(Clone)]
pub struct ChangePasswordRequest {
    pub old_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

impl ChangePasswordRequest {
    fn wire(&self) -> Value {
        json!({
            "oldPassword": self.old_password.expose_secret(),
            "newPassword": self.new_password.expose_secret(),
            "confirmPassword": self.confirm_password.expose_secret(),
        })
    }
}

/// Body of `PUT /users/edit`. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EditUserRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none()
    }
}

// ── Endpoints ────────────────────────────────────────────────────────

impl ApiClient {
    /// `POST /auth/login`. The only call made without a bearer header.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        let url = self.endpoint(["auth", "login"])?;
        debug!(email, "logging in");
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let resp: LoginBody = self.post(url, None, &body).await?;
        Ok(LoginResponse {
            token: BearerToken::new(resp.token),
            user: resp.user,
        })
    }

    /// `POST /auth/logout`.
    pub async fn logout(&self, token: &BearerToken) -> Result<Value, Error> {
        let url = self.endpoint(["auth", "logout"])?;
        self.post(url, Some(token), &json!({})).await
    }

    /// `PATCH /changepassword`.
    pub async fn change_password(
        &self,
        token: &BearerToken,
        request: &ChangePasswordRequest,
    ) -> Result<Value, Error> {
        let url = self.endpoint(["changepassword"])?;
        self.patch(url, token, &request.wire()).await
    }

    /// `PUT /users/edit`.
    pub async fn edit_user(&self, token: &BearerToken, request: &EditUserRequest) -> Result<Value, Error> {
        let url = self.endpoint(["users", "edit"])?;
        self.put(url, token, request).await
    }
}

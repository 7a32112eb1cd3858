//! HTTP client for the registry token endpoints.

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode, Url,
    header::{ACCEPT, WWW_AUTHENTICATE},
};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{
    credentials::{Auth, RequestAuth},
    profile::{NewToken, ProfileClient, ProfileError, TokenRecord},
};

/// Header carrying the one-time password.
pub const OTP_HEADER: &str = "npm-otp";

const TOKENS_PATH: &str = "-/npm/v1/tokens";

/// Profile client speaking the registry's `/-/npm/v1/tokens` API.
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    registry: Url,
    http: Client,
}

impl HttpProfileClient {
    /// Create a client rooted at `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if `registry` is not an absolute http(s) URL.
    pub fn new(registry: &str) -> Result<Self, ProfileError> {
        let mut url = Url::parse(registry)
            .map_err(|_parse| ProfileError::InvalidRegistry(registry.to_string()))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ProfileError::InvalidRegistry(registry.to_string()));
        }

        // Relative joins below replace the last segment unless the path ends in `/`.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            registry: url,
            http: Client::new(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProfileError> {
        self.registry
            .join(path)
            .map_err(|_parse| ProfileError::InvalidRegistry(format!("{}{path}", self.registry)))
    }

    fn request(&self, method: Method, url: Url, auth: &RequestAuth) -> RequestBuilder {
        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        let request = match &auth.auth {
            Auth::Token(token) => request.bearer_auth(token.as_str()),
            Auth::Basic { username, password } => {
                request.basic_auth(username, Some(password.as_str()))
            }
            Auth::Anonymous => request,
        };

        match &auth.otp {
            Some(otp) => request.header(OTP_HEADER, otp),
            None => request,
        }
    }
}

#[async_trait]
impl ProfileClient for HttpProfileClient {
    async fn list_tokens(&self, auth: &RequestAuth) -> Result<Vec<TokenRecord>, ProfileError> {
        let mut url = self.url(TOKENS_PATH)?;
        let mut visited = FxHashSet::default();
        let mut tokens = Vec::new();

        loop {
            visited.insert(url.clone());

            tracing::debug!(%url, "fetching token page");

            let page: TokenPage = send(self.request(Method::GET, url.clone(), auth))
                .await?
                .json()
                .await?;

            tokens.extend(page.objects);

            let next = match page.urls.next.as_deref() {
                Some(next) if !next.is_empty() => self.url(next)?,
                _ => break,
            };

            if visited.contains(&next) {
                tracing::warn!(%next, "token pages link back to a visited page");
                break;
            }

            url = next;
        }

        Ok(tokens)
    }

    async fn create_token(
        &self,
        auth: &RequestAuth,
        token: &NewToken,
    ) -> Result<TokenRecord, ProfileError> {
        let body = serde_json::json!({
            "password": token.password.as_str(),
            "readonly": token.readonly,
            "cidr_whitelist": token.cidr_whitelist,
        });

        let request = self
            .request(Method::POST, self.url(TOKENS_PATH)?, auth)
            .json(&body);

        Ok(send(request).await?.json().await?)
    }

    async fn remove_token(&self, auth: &RequestAuth, key: &str) -> Result<(), ProfileError> {
        let mut url = self.url(&format!("{TOKENS_PATH}/token/"))?;

        url.path_segments_mut()
            .map_err(|()| ProfileError::InvalidRegistry(self.registry.to_string()))?
            .pop_if_empty()
            .push(key);

        send(self.request(Method::DELETE, url, auth)).await?;

        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ProfileError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let challenge = response
        .headers()
        .get(WWW_AUTHENTICATE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let text = response.text().await.unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED
        && (challenge.contains("otp") || text.to_ascii_lowercase().contains("one-time pass"))
    {
        return Err(ProfileError::OtpRequired);
    }

    Err(ProfileError::UnexpectedResponse(format!(
        "{url} failed with status {status}: {text}"
    )))
}

#[derive(Debug, Deserialize)]
struct TokenPage {
    objects: Vec<TokenRecord>,

    #[serde(default)]
    urls: PageUrls,
}

#[derive(Debug, Default, Deserialize)]
struct PageUrls {
    next: Option<String>,
}

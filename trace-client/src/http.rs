//! HTTP client for network-based API calls
//!
//! Wraps `reqwest`, attaches the session's Basic credentials and maps every
//! outcome onto [`ClientError`].

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::MessagePayload;

use crate::session::{Credentials, SessionStore};
use crate::{ClientConfig, ClientError, ClientResult};

/// How a request authenticates
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// Public endpoint
    None,
    /// Whatever the session store holds right now
    Session,
    /// An explicit pair (candidate login)
    With(&'a Credentials),
}

/// HTTP client for making requests to the trace backend
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("logged_in", &self.session.is_logged_in())
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()
            .map_err(|e| ClientError::network("building the HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach credentials. With no stored pair the request goes out bare and
    /// the backend decides.
    fn authorize(&self, request: RequestBuilder, auth: Auth<'_>) -> RequestBuilder {
        let stored;
        let credentials = match auth {
            Auth::None => return request,
            Auth::With(credentials) => credentials,
            Auth::Session => match self.session.credentials() {
                Some(credentials) => {
                    stored = credentials;
                    &stored
                }
                None => {
                    tracing::debug!("No stored credentials, sending unauthenticated request");
                    return request;
                }
            },
        };
        request.basic_auth(credentials.username(), Some(credentials.password()))
    }

    /// Authorize, send and check the status of a prepared request
    async fn send(
        &self,
        request: RequestBuilder,
        auth: Auth<'_>,
        context: &'static str,
    ) -> ClientResult<Response> {
        let response = self.authorize(request, auth).send().await.map_err(|e| {
            tracing::warn!("Request failed without response ({context}): {e}");
            ClientError::network(context, e)
        })?;
        Self::check_status(response, context).await
    }

    /// Map non-success statuses onto [`ClientError`]
    async fn check_status(response: Response, context: &'static str) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%status, "Backend rejected credentials");
            return Err(ClientError::Unauthorized);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::network(context, e))?;
        let err = application_error(status, &text);
        tracing::warn!(%status, "Backend returned error: {err}");
        Err(err)
    }

    /// Decode a JSON success body; an undecodable body counts as no usable response
    async fn decode<T: DeserializeOwned>(response: Response, context: &'static str) -> ClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(context, e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("Malformed response body ({context}): {e}");
            ClientError::network(context, e)
        })
    }

    /// Read a message body: plain text, a JSON string or `{"message": ...}`
    async fn read_message(response: Response, context: &'static str) -> ClientResult<String> {
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::network(context, e))?;
        Ok(success_message(text))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    /// Make a GET request and decode the JSON response
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth<'_>,
        context: &'static str,
    ) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, path), auth, context).await?;
        Self::decode(response, context).await
    }

    /// Make a GET request, keeping only the status outcome
    pub(crate) async fn get_empty(
        &self,
        path: &str,
        auth: Auth<'_>,
        context: &'static str,
    ) -> ClientResult<()> {
        self.send(self.request(Method::GET, path), auth, context)
            .await
            .map(drop)
    }

    /// Make a POST request with JSON body and decode the JSON response
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth<'_>,
        context: &'static str,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(request, auth, context).await?;
        Self::decode(response, context).await
    }

    /// Make a POST request with JSON body and return the message it answers with
    pub(crate) async fn post_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth<'_>,
        context: &'static str,
    ) -> ClientResult<String> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(request, auth, context).await?;
        Self::read_message(response, context).await
    }
}

/// Error for a non-401 failure status
pub(crate) fn application_error(status: StatusCode, body: &str) -> ClientError {
    match MessagePayload::parse(body) {
        Some(payload) => ClientError::Application(payload.into_message()),
        None => ClientError::Application(format!("Request failed with status {status}")),
    }
}

/// Message of a message-only success body; bodies without one come back as is
fn success_message(text: String) -> String {
    match MessagePayload::parse(&text) {
        Some(payload) => payload.into_message(),
        None => text,
    }
}

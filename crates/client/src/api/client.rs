//! API client
//!
//! Every backend call goes through this pipeline: attach the bearer token
//! when a session exists, dispatch once with timing instrumentation,
//! unwrap the `{code, msg, data}` envelope, classify failures, and run the
//! session-expiry side effects on 401.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use scholarkg_common::session::{MemorySessionStore, SessionStore};
use scholarkg_domain::constants::GENERIC_FAILURE_MESSAGE;
use scholarkg_domain::envelope::{classify, EnvelopeOutcome};
use scholarkg_domain::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::events::{ClientEvents, NoopEvents};
use super::multipart::MultipartForm;
use super::options::RequestOptions;
use crate::config::ApiClientConfig;
use crate::http::HttpClient;

/// Suppression window for the login redirect. Concurrent calls failing on
/// the same expired session must trigger at most one navigation.
const REDIRECT_DEBOUNCE: Duration = Duration::from_secs(5);

enum Payload {
    None,
    Json(Value),
    Multipart(MultipartForm),
}

/// The request pipeline.
///
/// Endpoint modules call the four verbs (plus [`ApiClient::get_bytes`] and
/// [`ApiClient::post_multipart`]) with a path and payload and receive the
/// unwrapped envelope `data`, typed by their generic parameter. Key-case
/// bridging is the endpoint module's business; the pipeline never applies
/// it.
pub struct ApiClient {
    http: HttpClient,
    config: ApiClientConfig,
    session: Arc<dyn SessionStore>,
    events: Arc<dyn ClientEvents>,
    last_redirect: Mutex<Option<Instant>>,
}

impl ApiClient {
    /// Create a client over the given configuration, session store, and
    /// event sink.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying transport cannot be
    /// constructed.
    pub fn new(
        config: ApiClientConfig,
        session: Arc<dyn SessionStore>,
        events: Arc<dyn ClientEvents>,
    ) -> ApiResult<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config, session, events, last_redirect: Mutex::new(None) })
    }

    /// Create a builder for fluent configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Execute a GET request.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with(path, RequestOptions::default()).await
    }

    /// Execute a GET request with per-call options.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let data = self.execute(Method::GET, path, Payload::None, &options).await?;
        decode_data(data)
    }

    /// Execute a POST request with a JSON body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.post_with(path, body, RequestOptions::default()).await
    }

    /// Execute a POST request with a JSON body and per-call options.
    pub async fn post_with<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let body = encode_body(body)?;
        let data = self.execute(Method::POST, path, Payload::Json(body), &options).await?;
        decode_data(data)
    }

    /// Execute a PUT request with a JSON body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.put_with(path, body, RequestOptions::default()).await
    }

    /// Execute a PUT request with a JSON body and per-call options.
    pub async fn put_with<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let body = encode_body(body)?;
        let data = self.execute(Method::PUT, path, Payload::Json(body), &options).await?;
        decode_data(data)
    }

    /// Execute a DELETE request.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.delete_with(path, RequestOptions::default()).await
    }

    /// Execute a DELETE request with per-call options.
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let data = self.execute(Method::DELETE, path, Payload::None, &options).await?;
        decode_data(data)
    }

    /// Execute a POST request with a multipart body.
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let data = self.execute(Method::POST, path, Payload::Multipart(form), &options).await?;
        decode_data(data)
    }

    /// Fetch a binary resource.
    ///
    /// The envelope contract does not apply to binary responses: the raw
    /// body is returned as-is. Failure classification (including the 401
    /// side effects) is identical to the JSON path.
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn get_bytes(&self, path: &str, options: RequestOptions) -> ApiResult<Vec<u8>> {
        let started = Instant::now();
        let response = match self.dispatch(Method::GET, path, Payload::None, &options).await {
            Ok(response) => response,
            Err(error) => return Err(self.reject(error, &options)),
        };

        let status = response.status();
        debug!(path, status = status.as_u16(), elapsed_ms = elapsed_ms(started), "api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.classify_status(status, &body, &options));
        }

        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(err) => Err(self.reject(ApiError::Network(err.to_string()), &options)),
        }
    }

    /// Build and dispatch one request; no response interpretation.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> ApiResult<Response> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut builder = self.http.request(method, &url);

        // The session slot is read at dispatch time and never mutated
        // here; it may be cleared by another call's 401 handling while
        // this request is in flight.
        if let Some(session) = self.session.get() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", session.token));
        }

        if !options.params.is_empty() {
            builder = builder.query(&options.params);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match payload {
            Payload::None => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(form) => builder.multipart(form.into_form()?),
        };

        self.http.send(builder).await
    }

    /// Full JSON pipeline: dispatch, classify the status, unwrap the
    /// envelope.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: &RequestOptions,
    ) -> ApiResult<Value> {
        let started = Instant::now();
        let response = match self.dispatch(method, path, payload, options).await {
            Ok(response) => response,
            Err(error) => return Err(self.reject(error, options)),
        };

        let status = response.status();
        debug!(path, status = status.as_u16(), elapsed_ms = elapsed_ms(started), "api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.classify_status(status, &body, options));
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(_) => {
                // A 2xx body that is not JSON cannot be an envelope; reject
                // as a generic application failure.
                let error = ApiError::Application {
                    code: None,
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                    body: Value::Null,
                };
                return Err(self.reject(error, options));
            }
        };

        match classify(&body) {
            EnvelopeOutcome::Success(data) => Ok(data),
            EnvelopeOutcome::SessionExpired { .. } => {
                // No notification on an envelope 401; the forced logout is
                // the signal.
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
            EnvelopeOutcome::Failure { code, msg, body } => {
                let message = msg.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                Err(self.reject(ApiError::Application { code, message, body }, options))
            }
        }
    }

    /// Classify a non-2xx response by the fixed status table.
    fn classify_status(
        &self,
        status: StatusCode,
        body: &str,
        options: &RequestOptions,
    ) -> ApiError {
        // Error bodies often still carry an envelope; salvage its message.
        let body_msg = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("msg").and_then(Value::as_str).map(str::to_string));

        let error = match status.as_u16() {
            400 => ApiError::Status {
                status: 400,
                message: body_msg.unwrap_or_else(|| "invalid request parameters".to_string()),
            },
            401 => {
                self.expire_session();
                ApiError::SessionExpired
            }
            403 => ApiError::Status {
                status: 403,
                message: "permission denied for this resource".to_string(),
            },
            404 => ApiError::Status {
                status: 404,
                message: "requested resource does not exist".to_string(),
            },
            500 => ApiError::Status { status: 500, message: "internal server error".to_string() },
            other => ApiError::Status {
                status: other,
                message: body_msg.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            },
        };

        self.reject(error, options)
    }

    /// Run the notification side effect (unless silent) and hand the error
    /// back for rejection.
    fn reject(&self, error: ApiError, options: &RequestOptions) -> ApiError {
        if !options.silent {
            self.events.show_error(&error.to_string());
        }
        error
    }

    /// Session-expiry side effects: clear the persisted session and
    /// navigate to login, debounced so repeated 401s cannot loop.
    fn expire_session(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "failed to clear persisted session");
        }

        let mut last = self.last_redirect.lock();
        let debounced = last.is_some_and(|at| at.elapsed() < REDIRECT_DEBOUNCE);
        if !debounced {
            *last = Some(Instant::now());
            drop(last);
            self.events.redirect_to_login();
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn encode_body<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode_data<T: DeserializeOwned>(data: Value) -> ApiResult<T> {
    serde_json::from_value(data).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    session: Option<Arc<dyn SessionStore>>,
    events: Option<Arc<dyn ClientEvents>>,
}

impl ApiClientBuilder {
    /// Set the client configuration.
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the session store.
    pub fn session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the host event sink.
    pub fn events(mut self, events: Arc<dyn ClientEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the client. Defaults: [`ApiClientConfig::default`], an empty
    /// in-memory session store, and the no-op event sink.
    pub fn build(self) -> ApiResult<ApiClient> {
        let config = self.config.unwrap_or_default();
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()) as Arc<dyn SessionStore>);
        let events = self.events.unwrap_or_else(|| Arc::new(NoopEvents) as Arc<dyn ClientEvents>);
        ApiClient::new(config, session, events)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use scholarkg_common::session::UserSession;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Default)]
    struct RecordingEvents {
        redirects: AtomicUsize,
        errors: Mutex<Vec<String>>,
    }

    impl ClientEvents for RecordingEvents {
        fn redirect_to_login(&self) {
            self.redirects.fetch_add(1, Ordering::SeqCst);
        }

        fn show_error(&self, message: &str) {
            self.errors.lock().push(message.to_string());
        }
    }

    fn client_for(
        server: &MockServer,
        session: Arc<dyn SessionStore>,
        events: Arc<RecordingEvents>,
    ) -> ApiClient {
        ApiClient::builder()
            .config(ApiClientConfig::new(server.uri()))
            .session(session)
            .events(events)
            .build()
            .expect("api client")
    }

    #[tokio::test]
    async fn get_unwraps_envelope_data_without_normalizing_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/document/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200, "msg": null, "data": {"foo_bar": 1}
            })))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, Arc::new(MemorySessionStore::new()), events.clone());

        let data: Value = client.get("/api/document/list").await.unwrap();
        // The pipeline hands `data` through untouched; key-case bridging
        // belongs to endpoint modules.
        assert_eq!(data, json!({"foo_bar": 1}));
        assert!(events.errors.lock().is_empty());
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_session_exists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/current"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0, "msg": "ok", "data": {"id": 7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Arc::new(MemorySessionStore::with_session(UserSession::new("tok-123")));
        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, session, events);

        let data: Value = client.get("/api/user/current").await.unwrap();
        assert_eq!(data["id"], 7);
    }

    #[tokio::test]
    async fn omits_authorization_header_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200, "data": null
            })))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, Arc::new(MemorySessionStore::new()), events);

        let _: Value = client.get("/anything").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn envelope_failure_rejects_and_notifies_with_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/document/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 500, "msg": "unsupported file type", "data": null
            })))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client =
            client_for(&server, Arc::new(MemorySessionStore::new()), events.clone());

        let result: ApiResult<Value> =
            client.post("/api/document/upload", &json!({"name": "x"})).await;

        match result {
            Err(ApiError::Application { code, message, .. }) => {
                assert_eq!(code, Some(500));
                assert_eq!(message, "unsupported file type");
            }
            other => panic!("expected application error, got {other:?}"),
        }
        assert_eq!(events.errors.lock().as_slice(), ["unsupported file type"]);
    }

    #[tokio::test]
    async fn silent_option_suppresses_notification_but_not_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client =
            client_for(&server, Arc::new(MemorySessionStore::new()), events.clone());

        let result: ApiResult<Value> =
            client.get_with("/missing", RequestOptions::new().silent()).await;

        match result {
            Err(ApiError::Status { status: 404, message }) => {
                assert_eq!(message, "requested resource does not exist");
            }
            other => panic!("expected 404 status error, got {other:?}"),
        }
        assert!(events.errors.lock().is_empty());
    }

    #[tokio::test]
    async fn envelope_401_clears_session_and_redirects_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 401, "msg": "expired", "data": null
            })))
            .mount(&server)
            .await;

        let session = Arc::new(MemorySessionStore::with_session(UserSession::new("stale")));
        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, session.clone(), events.clone());

        let first: ApiResult<Value> = client.get("/api/kg/status").await;
        assert!(matches!(first, Err(ApiError::SessionExpired)));
        assert!(session.get().is_none());

        // A second call hitting the same expired session rejects the same
        // way but must not redirect again within the window.
        let second: ApiResult<Value> = client.get("/api/kg/status").await;
        assert!(matches!(second, Err(ApiError::SessionExpired)));
        assert_eq!(events.redirects.load(Ordering::SeqCst), 1);

        // Envelope 401s never toast; the redirect is the signal.
        assert!(events.errors.lock().is_empty());
    }

    #[tokio::test]
    async fn transport_401_runs_same_expiry_side_effects_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let session = Arc::new(MemorySessionStore::with_session(UserSession::new("stale")));
        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, session.clone(), events.clone());

        let result: ApiResult<Value> = client.get("/api/user/current").await;
        assert!(matches!(result, Err(ApiError::SessionExpired)));
        assert!(session.get().is_none());
        assert_eq!(events.redirects.load(Ordering::SeqCst), 1);
        assert_eq!(
            events.errors.lock().as_slice(),
            ["session expired, please log in again"]
        );
    }

    #[tokio::test]
    async fn status_400_prefers_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 400, "msg": "title is required", "data": null
            })))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client =
            client_for(&server, Arc::new(MemorySessionStore::new()), events.clone());

        let result: ApiResult<Value> = client.post("/api/document/create", &json!({})).await;
        match result {
            Err(ApiError::Status { status: 400, message }) => {
                assert_eq!(message, "title is required");
            }
            other => panic!("expected 400 status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let events = Arc::new(RecordingEvents::default());
        let client =
            client_for(&server, Arc::new(MemorySessionStore::new()), events.clone());

        let result: ApiResult<Value> = client.get("/weird").await;
        match result {
            Err(ApiError::Application { code: None, message, .. }) => {
                assert_eq!(message, GENERIC_FAILURE_MESSAGE);
            }
            other => panic!("expected generic application failure, got {other:?}"),
        }
        assert_eq!(events.errors.lock().len(), 1);
    }

    #[tokio::test]
    async fn type_mismatch_surfaces_as_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200, "data": {"id": "not-a-number"}
            })))
            .mount(&server)
            .await;

        #[derive(Debug, serde::Deserialize)]
        struct Typed {
            #[allow(dead_code)]
            id: u64,
        }

        let events = Arc::new(RecordingEvents::default());
        let client = client_for(&server, Arc::new(MemorySessionStore::new()), events);

        let result: ApiResult<Typed> = client.get("/typed").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn builder_defaults_are_usable() {
        let client = ApiClient::builder().build();
        assert!(client.is_ok());
    }
}

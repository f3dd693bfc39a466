//! Stateless request builder, response parser and one-shot operations for
//! the Calendly v1 API.
//!
//! # Design
//! `CalendlyClient` holds a token, a base URL and a transport, and carries no
//! mutable state between calls. Every operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that decodes
//! an `HttpResponse`; the one-shot method runs one through the transport and
//! hands the result to the other.
//!
//! Parsers never look at the transport status. The provider answers
//! failures with a JSON envelope (`status`, `type`, `message`) and the
//! caller branches on that after decoding.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::form_urlencoded;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, AUTH_HEADER, CONTENT_TYPE_FORM};
use crate::responses::{
    CreateHookResponse, DeleteHookResponse, EchoResponse, EventTypesResponse, GetHookResponse,
    GetHooksResponse, MeResponse,
};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateHookInput, DeleteHookInput, GetEventTypesInput, GetHookInput};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://calendly.com/api/v1";

/// Environment variable read by `CalendlyClient::from_env` for the token.
pub const TOKEN_ENV: &str = "CALENDLY_API_TOKEN";

/// Environment variable read by `CalendlyClient::from_env` for the base URL.
pub const BASE_URL_ENV: &str = "CALENDLY_API_URL";

/// Client for the Calendly v1 API.
///
/// Immutable after construction, so one instance can serve concurrent
/// callers whenever its transport can.
#[derive(Clone)]
pub struct CalendlyClient<T = UreqTransport> {
    auth_token: String,
    base_url: String,
    transport: T,
}

impl CalendlyClient<UreqTransport> {
    /// Client against the production API root.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: UreqTransport::new(),
        }
    }

    /// Client configured from `CALENDLY_API_TOKEN` and, when set,
    /// `CALENDLY_API_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Config(format!("{TOKEN_ENV} is not set")))?;
        let client = Self::new(token);
        Ok(match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => client.with_base_url(&base_url),
            _ => client,
        })
    }
}

impl<T> CalendlyClient<T> {
    /// Point the client at another API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_transport<U>(self, transport: U) -> CalendlyClient<U> {
        CalendlyClient {
            auth_token: self.auth_token,
            base_url: self.base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_echo(&self) -> Result<HttpRequest> {
        self.request(HttpMethod::Get, "/echo", &[], None)
    }

    pub fn build_create_hook(&self, input: &CreateHookInput) -> Result<HttpRequest> {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("url", &input.url);
        for event in &input.events {
            form.append_pair("events[]", event);
        }
        self.request(HttpMethod::Post, "/hooks", &[], Some(form.finish()))
    }

    pub fn build_get_hook(&self, input: &GetHookInput) -> Result<HttpRequest> {
        self.request(HttpMethod::Get, &format!("/hooks/{}", input.id), &[], None)
    }

    pub fn build_get_hooks(&self) -> Result<HttpRequest> {
        self.request(HttpMethod::Get, "/hooks", &[], None)
    }

    pub fn build_delete_hook(&self, input: &DeleteHookInput) -> Result<HttpRequest> {
        self.request(HttpMethod::Delete, &format!("/hooks/{}", input.id), &[], None)
    }

    pub fn build_me(&self) -> Result<HttpRequest> {
        self.request(HttpMethod::Get, "/users/me", &[], None)
    }

    pub fn build_get_event_types(&self, input: &GetEventTypesInput) -> Result<HttpRequest> {
        let query: Vec<(&str, &str)> = input
            .include
            .as_deref()
            .map(|include| ("include", include))
            .into_iter()
            .collect();
        self.request(HttpMethod::Get, "/users/me/event_types", &query, None)
    }

    pub fn parse_echo(&self, response: HttpResponse) -> Result<EchoResponse> {
        decode(&response)
    }

    pub fn parse_create_hook(&self, response: HttpResponse) -> Result<CreateHookResponse> {
        decode(&response)
    }

    pub fn parse_get_hook(&self, response: HttpResponse) -> Result<GetHookResponse> {
        decode(&response)
    }

    pub fn parse_get_hooks(&self, response: HttpResponse) -> Result<GetHooksResponse> {
        decode(&response)
    }

    pub fn parse_delete_hook(&self, response: HttpResponse) -> Result<DeleteHookResponse> {
        decode(&response)
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<MeResponse> {
        decode(&response)
    }

    pub fn parse_get_event_types(&self, response: HttpResponse) -> Result<EventTypesResponse> {
        decode(&response)
    }

    /// Assemble a request against the base URL. Path parameters are already
    /// interpolated; query parameters are merged into the URL here.
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        form: Option<String>,
    ) -> Result<HttpRequest> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = vec![(AUTH_HEADER.to_string(), self.auth_token.clone())];
        if form.is_some() {
            headers.push(("content-type".to_string(), CONTENT_TYPE_FORM.to_string()));
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body: form,
        })
    }
}

impl<T: Transport> CalendlyClient<T> {
    /// `GET /echo`: the account email, or a 401 envelope for a bad token.
    pub fn echo(&self) -> Result<EchoResponse> {
        let response = self.transport.execute(self.build_echo()?)?;
        self.parse_echo(response)
    }

    /// `POST /hooks`: subscribe `input.url` to `input.events`.
    pub fn create_hook(&self, input: &CreateHookInput) -> Result<CreateHookResponse> {
        let response = self.transport.execute(self.build_create_hook(input)?)?;
        self.parse_create_hook(response)
    }

    /// `GET /hooks/{id}`. The hook comes back as a list, normally of one.
    pub fn get_hook(&self, input: &GetHookInput) -> Result<GetHookResponse> {
        let response = self.transport.execute(self.build_get_hook(input)?)?;
        self.parse_get_hook(response)
    }

    /// `GET /hooks`: every hook registered for the account.
    pub fn get_hooks(&self) -> Result<GetHooksResponse> {
        let response = self.transport.execute(self.build_get_hooks()?)?;
        self.parse_get_hooks(response)
    }

    /// `DELETE /hooks/{id}`. Success is reported only through the envelope.
    pub fn delete_hook(&self, input: &DeleteHookInput) -> Result<DeleteHookResponse> {
        let response = self.transport.execute(self.build_delete_hook(input)?)?;
        self.parse_delete_hook(response)
    }

    /// `GET /users/me`: the authenticated user's profile.
    pub fn me(&self) -> Result<MeResponse> {
        let response = self.transport.execute(self.build_me()?)?;
        self.parse_me(response)
    }

    /// `GET /users/me/event_types`, with owners side-loaded when
    /// `input.include` is `Some("owner")`.
    pub fn get_event_types(&self, input: &GetEventTypesInput) -> Result<EventTypesResponse> {
        let response = self.transport.execute(self.build_get_event_types(input)?)?;
        self.parse_get_event_types(response)
    }
}

impl<T> fmt::Debug for CalendlyClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendlyClient")
            .field("base_url", &self.base_url)
            .field("auth_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Decode a body into `R`, treating a literal `null` as `R::default()`.
fn decode<R: DeserializeOwned + Default>(response: &HttpResponse) -> Result<R> {
    let decoded: Option<R> = serde_json::from_str(&response.body)?;
    if decoded.is_none() {
        debug!(status = response.status, "null response body");
    }
    Ok(decoded.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::envelope::ApiResponse;
    use crate::types::ResourceId;

    const BASE: &str = "http://localhost:3000";

    fn client() -> CalendlyClient {
        CalendlyClient::new("secret").with_base_url(BASE)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    /// Records every request and answers with a fixed response.
    struct Replay {
        response: HttpResponse,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Transport for Replay {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.borrow_mut().push(request);
            Ok(self.response.clone())
        }
    }

    fn replaying(status: u16, body: &str) -> CalendlyClient<Replay> {
        client().with_transport(Replay {
            response: response(status, body),
            seen: RefCell::new(Vec::new()),
        })
    }

    #[test]
    fn new_defaults_to_production_root() {
        assert_eq!(CalendlyClient::new("t").base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CalendlyClient::new("t").with_base_url("http://localhost:3000/");
        let req = client.build_get_hooks().unwrap();
        assert_eq!(req.url, "http://localhost:3000/hooks");
    }

    #[test]
    fn every_request_carries_the_token() {
        let c = client();
        let requests = [
            c.build_echo().unwrap(),
            c.build_get_hooks().unwrap(),
            c.build_me().unwrap(),
            c.build_delete_hook(&DeleteHookInput { id: 1u64.into() }).unwrap(),
        ];
        for req in requests {
            assert_eq!(req.header(AUTH_HEADER), Some("secret"), "{}", req.url);
        }
    }

    #[test]
    fn build_echo_produces_correct_request() {
        let req = client().build_echo().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/echo");
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn build_create_hook_encodes_repeated_events() {
        let input = CreateHookInput {
            url: "https://example.com/hook?a=1".to_string(),
            events: vec!["invitee.created".to_string(), "invitee.canceled".to_string()],
        };
        let req = client().build_create_hook(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/hooks");
        assert_eq!(req.header("Content-Type"), Some(CONTENT_TYPE_FORM));

        let body = req.body.unwrap();
        let pairs: Vec<(String, String)> = form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("url".to_string(), "https://example.com/hook?a=1".to_string()),
                ("events[]".to_string(), "invitee.created".to_string()),
                ("events[]".to_string(), "invitee.canceled".to_string()),
            ]
        );
    }

    #[test]
    fn build_get_hook_interpolates_numeric_and_text_ids() {
        let numeric = client()
            .build_get_hook(&GetHookInput { id: 123u64.into() })
            .unwrap();
        assert_eq!(numeric.url, "http://localhost:3000/hooks/123");

        let text = client()
            .build_get_hook(&GetHookInput { id: "abc123".into() })
            .unwrap();
        assert_eq!(text.url, "http://localhost:3000/hooks/abc123");
    }

    #[test]
    fn build_delete_hook_has_no_body() {
        let req = client()
            .build_delete_hook(&DeleteHookInput { id: 123u64.into() })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/hooks/123");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_event_types_merges_include_into_query() {
        let plain = client()
            .build_get_event_types(&GetEventTypesInput::default())
            .unwrap();
        assert_eq!(plain.url, "http://localhost:3000/users/me/event_types");

        let with_owner = client()
            .build_get_event_types(&GetEventTypesInput::include("owner"))
            .unwrap();
        assert_eq!(
            with_owner.url,
            "http://localhost:3000/users/me/event_types?include=owner"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let client = CalendlyClient::new("t").with_base_url("not a url");
        assert!(matches!(client.build_echo(), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn parse_unauthorized_regardless_of_transport_status() {
        let body = r#"{"status": 401, "type": "authentication_error", "message": "Invalid token"}"#;
        for status in [200, 401] {
            let resp = client().parse_echo(response(status, body)).unwrap();
            assert!(resp.unauthorized());
            assert_eq!(resp.envelope.kind, "authentication_error");
            assert_eq!(resp.err().unwrap_err().to_string(), "Invalid token");
        }
    }

    #[test]
    fn parse_null_message_keeps_status() {
        let body = r#"{"status":401,"type":"authentication_error","message":null}"#;
        let resp = client().parse_echo(response(401, body)).unwrap();
        assert!(resp.unauthorized());
        assert_eq!(resp.envelope.message, "");
        assert!(resp.err().is_err());
    }

    #[test]
    fn parse_delete_hook_null_body_is_success() {
        let resp = client().parse_delete_hook(response(200, "null")).unwrap();
        assert!(resp.err().is_ok());
    }

    #[test]
    fn parse_bad_json_is_decode_error() {
        let err = client()
            .parse_get_hooks(response(200, "<html>oops</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_shape_mismatch_is_decode_error() {
        let err = client()
            .parse_get_hooks(response(200, r#"{"data": {"id": 1}}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn create_hook_sends_one_request_and_decodes_id() {
        let client = replaying(200, r#"{"id": 123}"#);
        let input = CreateHookInput {
            url: "https://example.com".to_string(),
            events: vec!["invitee.created".to_string()],
        };
        let resp = client.create_hook(&input).unwrap();
        assert_eq!(resp.id, Some(ResourceId::Number(123)));

        let seen = client.transport().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
    }

    #[test]
    fn get_event_types_without_include_has_no_relationships() {
        let body = r##"{"data": [{
            "type": "event_types", "id": "AAAAAAAAAAAAAAAA",
            "attributes": {
                "name": "15 Minute Meeting", "description": "", "duration": 30,
                "slug": "15min", "color": "#fff200", "active": true,
                "created_at": "2015-06-16T18:46:53Z", "updated_at": "2016-08-23T19:27:52Z",
                "url": "https://calendly.com/janedoe/15min"
            }
        }]}"##;
        let client = replaying(200, body);
        let resp = client
            .get_event_types(&GetEventTypesInput::default())
            .unwrap();
        assert_eq!(resp.data.len(), 1);
        assert!(resp.included.is_empty());
        assert!(resp.data[0].relationships.is_none());
        assert_eq!(resp.data[0].attributes.description.as_deref(), Some(""));
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains(BASE));
    }
}

//! Blocking client for the Calendly v1 REST API.
//!
//! # Overview
//! Builds authenticated `HttpRequest` values from typed inputs, executes them
//! through a `Transport`, and decodes the JSON bodies into typed responses.
//!
//! # Design
//! - `CalendlyClient` is stateless: it holds a token, a base URL and a
//!   transport, none of which change after construction.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response) around the one-shot method, so the I/O boundary is
//!   explicit and the mapping is testable without a network.
//! - Provider failures arrive as a JSON envelope in the body, not as
//!   transport errors. Every response flattens an `Envelope`, and the
//!   `ApiResponse` trait exposes its predicates.
//! - Mock-server DTOs are defined independently; integration tests catch
//!   schema drift.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod responses;
pub mod transport;
pub mod types;

pub use client::{CalendlyClient, DEFAULT_BASE_URL};
pub use envelope::{ApiResponse, Envelope};
pub use error::{ApiError, Result, StatusError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use responses::{
    CreateHookResponse, DeleteHookResponse, EchoResponse, EventTypesResponse, GetHookResponse,
    GetHooksResponse, MeResponse,
};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Avatar, CreateHookInput, DeleteHookInput, EventType, EventTypeAttributes,
    EventTypeRelationships, GetEventTypesInput, GetHookInput, Hook, HookAttributes,
    IncludedResource, Relationship, Resource, ResourceId, ResourceKind, ResourcePointer,
    UserAttributes,
};

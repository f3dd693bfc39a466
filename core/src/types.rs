//! Resource and input types for the Calendly v1 API.
//!
//! # Design
//! Resources follow the provider's `{id, type, attributes}` layout, so one
//! generic `Resource<A>` covers hooks, users, teams and the `included`
//! side-loads. Event types are the exception: they may carry a
//! `relationships` block and get their own struct.
//!
//! Ids are kept exactly as received. Older API revisions send hook ids as
//! JSON integers and newer ones as strings, and both must serialize back
//! unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque resource id, either a JSON integer or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Text(id)
    }
}

/// A `{id, type, attributes}` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<A> {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
}

/// A registered webhook subscription.
pub type Hook = Resource<HookAttributes>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookAttributes {
    pub url: String,
    pub created_at: DateTime<Utc>,
    /// Free-form lifecycle state, e.g. `active` or `disabled`. Empty when
    /// the provider leaves it out.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub url: String,
}

/// Profile attributes shared by users and teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    pub name: String,
    pub slug: String,
    /// `None` when the provider sends `null` (teams have no email).
    pub email: Option<String>,
    pub url: String,
    pub timezone: String,
    pub avatar: Avatar,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which kind of profile a `type` tag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Team,
    Other,
}

impl ResourceKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "users" => ResourceKind::User,
            "teams" => ResourceKind::Team,
            _ => ResourceKind::Other,
        }
    }
}

/// A side-loaded user or team from the `included` list.
pub type IncludedResource = Resource<UserAttributes>;

impl IncludedResource {
    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::from_tag(&self.kind)
    }

    pub fn is_pointed_to_by(&self, pointer: &ResourcePointer) -> bool {
        self.kind == pointer.kind && self.id == pointer.id
    }
}

/// A bookable meeting template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: EventTypeAttributes,
    /// Present only when the request asked for `include=owner`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<EventTypeRelationships>,
}

impl EventType {
    /// Pointer to the owning user or team, if relationships were included.
    pub fn owner(&self) -> Option<&ResourcePointer> {
        self.relationships.as_ref().map(|r| &r.owner.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeAttributes {
    pub name: String,
    pub description: Option<String>,
    /// Minutes.
    pub duration: u32,
    pub slug: String,
    pub color: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeRelationships {
    pub owner: Relationship,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: ResourcePointer,
}

/// `(type, id)` reference into the `included` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePointer {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: ResourceId,
}

/// Input for `CalendlyClient::create_hook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHookInput {
    pub url: String,
    /// Event names such as `invitee.created`, sent as repeated `events[]`.
    pub events: Vec<String>,
}

/// Input for `CalendlyClient::get_hook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetHookInput {
    pub id: ResourceId,
}

/// Input for `CalendlyClient::delete_hook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteHookInput {
    pub id: ResourceId,
}

/// Input for `CalendlyClient::get_event_types`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEventTypesInput {
    /// Side-load request, e.g. `owner`. Sent as the `include` query parameter.
    pub include: Option<String>,
}

impl GetEventTypesInput {
    pub fn include(include: impl Into<String>) -> Self {
        Self {
            include: Some(include.into()),
        }
    }
}

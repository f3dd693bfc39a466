//! Decoded response shapes, one per client operation.
//!
//! Each flattens the shared `Envelope` beside its payload. Payload fields are
//! defaulted so that an error body such as
//! `{"status": 401, "type": "authentication_error", "message": "Invalid token"}`
//! decodes into any response type.

use serde::{Deserialize, Serialize};

use crate::envelope::{ApiResponse, Envelope};
use crate::types::{EventType, Hook, IncludedResource, Resource, ResourceId, UserAttributes};

macro_rules! impl_api_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn envelope(&self) -> &Envelope {
                    &self.envelope
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHookResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub id: Option<ResourceId>,
}

/// Single-hook lookup. The provider answers with a list, normally of one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHookResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Vec<Hook>,
}

impl GetHookResponse {
    pub fn hook(&self) -> Option<&Hook> {
        self.data.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHooksResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Vec<Hook>,
}

/// Delete carries nothing but the envelope; a literal `null` body decodes to
/// the default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHookResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Option<Resource<UserAttributes>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypesResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Vec<EventType>,
    /// Users and teams referenced by `relationships.owner`, only sent when
    /// the request asked for them.
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

impl EventTypesResponse {
    /// Resolve an event type's owner against `included` by `(type, id)`.
    pub fn owner_of(&self, event_type: &EventType) -> Option<&IncludedResource> {
        let pointer = event_type.owner()?;
        self.included.iter().find(|r| r.is_pointed_to_by(pointer))
    }
}

impl_api_response!(
    EchoResponse,
    CreateHookResponse,
    GetHookResponse,
    GetHooksResponse,
    DeleteHookResponse,
    MeResponse,
    EventTypesResponse,
);

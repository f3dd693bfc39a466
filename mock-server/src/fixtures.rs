//! Canned account data served by the read-only endpoints.

use serde_json::{json, Value};

use crate::{Hook, HookAttributes};

pub const ACCOUNT_EMAIL: &str = "test@example.com";

pub const USER_ID: &str = "XXXXXXXXXXXXXXXX";
pub const TEAM_ID: &str = "ZZZZZZZZZZZZZZZZ";

pub fn seed_hooks() -> Vec<Hook> {
    vec![
        Hook {
            id: 12345,
            kind: "hooks".to_string(),
            attributes: HookAttributes {
                url: "http://foo.bar/1".to_string(),
                created_at: "2016-08-23T19:15:24Z".to_string(),
                state: "active".to_string(),
                events: vec!["invitee.created".to_string(), "invitee.canceled".to_string()],
            },
        },
        Hook {
            id: 1234,
            kind: "hooks".to_string(),
            attributes: HookAttributes {
                url: "http://foo.bar/2".to_string(),
                created_at: "2016-02-11T19:10:12Z".to_string(),
                state: "disabled".to_string(),
                events: vec!["invitee.created".to_string()],
            },
        },
    ]
}

fn user() -> Value {
    json!({
        "type": "users",
        "id": USER_ID,
        "attributes": {
            "name": "Jane Doe",
            "slug": "janedoe",
            "email": "janedoe30305@gmail.com",
            "url": "https://calendly.com/janedoe",
            "timezone": "America/New_York",
            "avatar": {
                "url": "https://d3v0px0pttie1i.cloudfront.net/uploads/user/avatar/68272/78fb9f5e.jpg"
            },
            "created_at": "2015-06-16T18:46:52Z",
            "updated_at": "2016-08-23T19:40:07Z"
        }
    })
}

fn team() -> Value {
    json!({
        "type": "teams",
        "id": TEAM_ID,
        "attributes": {
            "name": "ACME Team",
            "slug": "acme-team",
            "email": null,
            "url": "https://calendly.com/acme-team",
            "timezone": "America/New_York",
            "avatar": {
                "url": "https://d3v0px0pttie1i.cloudfront.net/uploads/team/avatar/2682/9e56907a.gif"
            },
            "created_at": "2016-03-24T16:09:01Z",
            "updated_at": "2016-03-24T16:09:01Z"
        }
    })
}

pub fn me() -> Value {
    json!({ "data": user() })
}

/// `(id, owner type, owner id, attributes)` for each event type.
fn event_type_rows() -> Vec<(&'static str, &'static str, &'static str, Value)> {
    vec![
        (
            "AAAAAAAAAAAAAAAA",
            "users",
            USER_ID,
            json!({
                "name": "15 Minute Meeting",
                "description": "",
                "duration": 15,
                "slug": "15min",
                "color": "#fff200",
                "active": true,
                "created_at": "2015-06-16T18:46:53Z",
                "updated_at": "2016-08-23T19:27:52Z",
                "url": "https://calendly.com/janedoe/15min"
            }),
        ),
        (
            "BBBBBBBBBBBBBBBB",
            "users",
            USER_ID,
            json!({
                "name": "30 Minute Meeting",
                "description": "",
                "duration": 30,
                "slug": "30min",
                "color": "#74daed",
                "active": true,
                "created_at": "2015-06-16T18:46:53Z",
                "updated_at": "2016-06-02T16:26:44Z",
                "url": "https://calendly.com/janedoe/30min"
            }),
        ),
        (
            "CCCCCCCCCCCCCCCC",
            "teams",
            TEAM_ID,
            json!({
                "name": "Sales call",
                "description": null,
                "duration": 30,
                "slug": "sales-call",
                "color": "#c5c1ff",
                "active": false,
                "created_at": "2016-06-23T20:13:17Z",
                "updated_at": "2016-06-23T20:13:22Z",
                "url": "https://calendly.com/acme-team/sales-call"
            }),
        ),
    ]
}

/// Event type listing; owners and the `included` list only when requested.
pub fn event_types(include_owner: bool) -> Value {
    let data: Vec<Value> = event_type_rows()
        .into_iter()
        .map(|(id, owner_type, owner_id, attributes)| {
            let mut event_type = json!({
                "type": "event_types",
                "id": id,
                "attributes": attributes
            });
            if include_owner {
                event_type["relationships"] = json!({
                    "owner": { "data": { "type": owner_type, "id": owner_id } }
                });
            }
            event_type
        })
        .collect();

    if include_owner {
        json!({ "data": data, "included": [user(), team()] })
    } else {
        json!({ "data": data })
    }
}

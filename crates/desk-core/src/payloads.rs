//! Request payloads accepted by engine operations.
//!
//! Fields are kept loose (`Option<String>`) so the validation layer, not
//! deserialization, decides what is acceptable. A field counts as *provided*
//! when it is present and non-empty.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{TicketPriority, TicketStatus};

/// Present-and-non-empty check shared by payloads and validators.
#[must_use]
pub fn provided(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Provided after trimming surrounding whitespace.
#[must_use]
pub fn provided_trimmed(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Normalized to `medium` when absent or unrecognised.
    pub priority: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub message: Option<String>,
}

/// Partial ticket update.
///
/// `status` and `priority` stay raw strings: unknown values are ignored at
/// apply time rather than rejected. `assigned_to` records key presence, so
/// `{"assignedTo": null}` clears the assignment while an absent key leaves
/// it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<Option<String>>,
}

impl TicketUpdatePayload {
    /// Whether the payload carries any client-editable content.
    #[must_use]
    pub fn has_content_change(&self) -> bool {
        provided(self.title.as_deref())
            || provided(self.description.as_deref())
            || provided(self.image_url.as_deref())
    }

    /// Whether the payload tries to set a staff-managed field.
    #[must_use]
    pub fn touches_managed_fields(&self) -> bool {
        provided(self.status.as_deref())
            || provided(self.priority.as_deref())
            || self
                .assigned_to
                .as_ref()
                .is_some_and(|value| provided(value.as_deref()))
    }
}

/// Optional list filters. Clients are additionally scoped to their own tickets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assigned_to_distinguishes_null_from_absent() {
        let absent: TicketUpdatePayload = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(absent.assigned_to, None);

        let null: TicketUpdatePayload = serde_json::from_str(r#"{"assignedTo":null}"#).unwrap();
        assert_eq!(null.assigned_to, Some(None));

        let set: TicketUpdatePayload =
            serde_json::from_str(r#"{"assignedTo":"usr-1234abcd"}"#).unwrap();
        assert_eq!(set.assigned_to, Some(Some("usr-1234abcd".into())));
    }

    #[test]
    fn camel_case_field_names() {
        let payload: NewTicketPayload = serde_json::from_str(
            r#"{"title":"Printer jam","description":"Tray 2","imageUrl":"https://img/1.png"}"#,
        )
        .unwrap();
        assert_eq!(payload.image_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(payload.priority, None);
    }

    #[test]
    fn empty_strings_are_not_provided() {
        let payload = TicketUpdatePayload {
            title: Some(String::new()),
            status: Some(String::new()),
            assigned_to: Some(Some(String::new())),
            ..Default::default()
        };
        assert!(!payload.has_content_change());
        assert!(!payload.touches_managed_fields());
    }
}

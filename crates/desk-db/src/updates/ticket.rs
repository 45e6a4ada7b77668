//! Ticket update builder.

use serde::Serialize;
use desk_core::enums::{TicketPriority, TicketStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    /// `Some(None)` clears the assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<String>>,
}

impl TicketUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
    }
}

#[derive(Default)]
pub struct TicketUpdateBuilder(TicketUpdate);

impl TicketUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.0.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TicketStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: TicketPriority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, assigned_to: Option<String>) -> Self {
        self.0.assigned_to = Some(assigned_to);
        self
    }

    #[must_use]
    pub fn build(self) -> TicketUpdate {
        self.0
    }
}

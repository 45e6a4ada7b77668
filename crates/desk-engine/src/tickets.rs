//! Ticket lifecycle operations.

use desk_core::entities::Ticket;
use desk_core::enums::{TicketPriority, TicketStatus};
use desk_core::errors::DeskError;
use desk_core::identity::SessionUser;
use desk_core::payloads::{NewTicketPayload, TicketFilter, TicketUpdatePayload};
use desk_core::roles::{can_access_ticket, is_agent_or_admin, is_client};
use desk_core::validation::{validate_ticket_input, validate_ticket_update};
use desk_db::error::DatabaseError;
use desk_db::repos::NewTicket;
use desk_db::updates::ticket::{TicketUpdate, TicketUpdateBuilder};
use desk_notify::Notification;

use crate::{DeskService, at_boundary};

const NOT_FOUND: &str = "Not found";

impl DeskService {
    /// Open a ticket on behalf of a client.
    ///
    /// Priority falls back to `medium` when absent or unrecognised. The
    /// requester gets a `TicketCreated` notification.
    ///
    /// # Errors
    ///
    /// `Forbidden("Clients only")` for staff, `Validation` when the title or
    /// description is blank.
    pub async fn create_ticket(
        &self,
        payload: &NewTicketPayload,
        requester: &SessionUser,
    ) -> Result<Ticket, DeskError> {
        self.create_ticket_inner(payload, requester)
            .await
            .map_err(|e| at_boundary("create ticket", e))
    }

    async fn create_ticket_inner(
        &self,
        payload: &NewTicketPayload,
        requester: &SessionUser,
    ) -> Result<Ticket, DeskError> {
        if !is_client(requester.role) {
            return Err(DeskError::Forbidden("Clients only".into()));
        }
        validate_ticket_input(payload)?;

        let new = NewTicket {
            title: payload.title.as_deref().unwrap_or_default(),
            description: payload.description.as_deref().unwrap_or_default(),
            priority: TicketPriority::normalize(payload.priority.as_deref()),
            created_by: &requester.id,
            image_url: payload.image_url.as_deref().filter(|url| !url.is_empty()),
        };
        let ticket = self.db.insert_ticket(new, self.now()).await?;
        tracing::info!(ticket_id = %ticket.id, created_by = %requester.id, "ticket created");

        self.notifier.emit(Notification::TicketCreated {
            to: requester.email.clone(),
            title: ticket.title.clone(),
        });
        Ok(ticket)
    }

    /// # Errors
    ///
    /// `NotFound` if the ticket does not exist, `Forbidden` if the caller is
    /// a client who does not own it.
    pub async fn get_ticket(&self, id: &str, requester: &SessionUser) -> Result<Ticket, DeskError> {
        self.load_accessible_ticket(id, requester, NOT_FOUND)
            .await
            .map_err(|e| at_boundary("load ticket", e))
    }

    /// Tickets visible to the caller, newest first. Clients only see their own.
    ///
    /// # Errors
    ///
    /// Only storage faults.
    pub async fn list_tickets(
        &self,
        requester: &SessionUser,
        filter: TicketFilter,
    ) -> Result<Vec<Ticket>, DeskError> {
        let owner = (!is_agent_or_admin(requester.role)).then_some(requester.id.as_str());
        self.db
            .list_tickets(owner, filter)
            .await
            .map_err(|e| at_boundary("load tickets", e.into()))
    }

    /// Apply a partial update under the caller's role rules.
    ///
    /// Title, description, and image URL apply for anyone who passes
    /// validation. Staff additionally set status and priority (unknown
    /// values are ignored) and assignment (an explicit empty or null value
    /// clears it). Moving a ticket into `closed` notifies its owner.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden`, the validator's error, or `Conflict` when
    /// the ticket changed between load and save.
    pub async fn update_ticket(
        &self,
        id: &str,
        payload: &TicketUpdatePayload,
        requester: &SessionUser,
    ) -> Result<Ticket, DeskError> {
        self.update_ticket_inner(id, payload, requester)
            .await
            .map_err(|e| at_boundary("update ticket", e))
    }

    async fn update_ticket_inner(
        &self,
        id: &str,
        payload: &TicketUpdatePayload,
        requester: &SessionUser,
    ) -> Result<Ticket, DeskError> {
        let ticket = self
            .load_accessible_ticket(id, requester, NOT_FOUND)
            .await?;
        validate_ticket_update(payload, requester.role, ticket.status)?;

        let previous_status = ticket.status;
        let update = apply_fields(payload, previous_status, is_agent_or_admin(requester.role));

        let updated = match self
            .db
            .update_ticket(&ticket.id, ticket.version, &update, self.now())
            .await
        {
            Ok(updated) => updated,
            Err(DatabaseError::NoResult) => return Err(DeskError::not_found()),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            ticket_id = %updated.id,
            by = %requester.id,
            from = %previous_status,
            to = %updated.status,
            "ticket updated"
        );

        if previous_status != TicketStatus::Closed && updated.status == TicketStatus::Closed {
            self.notify_owner(&updated, |to| Notification::TicketClosed {
                to,
                title: updated.title.clone(),
            })
            .await;
        }
        Ok(updated)
    }

    /// Remove a ticket and its thread. Staff only; no notification.
    ///
    /// # Errors
    ///
    /// `Forbidden` for clients, `NotFound` if the ticket does not exist.
    pub async fn delete_ticket(&self, id: &str, requester: &SessionUser) -> Result<Ticket, DeskError> {
        self.delete_ticket_inner(id, requester)
            .await
            .map_err(|e| at_boundary("delete ticket", e))
    }

    async fn delete_ticket_inner(&self, id: &str, requester: &SessionUser) -> Result<Ticket, DeskError> {
        if !is_agent_or_admin(requester.role) {
            return Err(DeskError::forbidden());
        }
        let deleted = self.db.delete_ticket(id).await?.ok_or_else(DeskError::not_found)?;
        tracing::info!(ticket_id = %deleted.id, by = %requester.id, "ticket deleted");
        Ok(deleted)
    }

    /// Load a ticket and check the caller may see it. An absent ticket fails
    /// `NotFound` with `missing` as the message.
    pub(crate) async fn load_accessible_ticket(
        &self,
        id: &str,
        requester: &SessionUser,
        missing: &'static str,
    ) -> Result<Ticket, DeskError> {
        let ticket = self
            .db
            .find_ticket(id)
            .await?
            .ok_or_else(|| DeskError::NotFound(missing.into()))?;
        if !can_access_ticket(requester.role, &requester.id, &ticket.created_by) {
            return Err(DeskError::forbidden());
        }
        Ok(ticket)
    }

    /// Queue a notification to the ticket owner's address, if the owner is
    /// still on record. Runs after the mutation is stored, so a failed owner
    /// lookup is logged and skipped.
    pub(crate) async fn notify_owner(
        &self,
        ticket: &Ticket,
        build: impl FnOnce(String) -> Notification,
    ) {
        match self.db.find_user(&ticket.created_by).await {
            Ok(Some(owner)) => self.notifier.emit(build(owner.email)),
            Ok(None) => tracing::debug!(ticket_id = %ticket.id, "ticket owner not on record; notification skipped"),
            Err(error) => tracing::warn!(
                ticket_id = %ticket.id,
                %error,
                "ticket owner lookup failed; notification skipped"
            ),
        }
    }
}

/// Translate a validated payload into the storage update the caller's role
/// allows. A status outside `current`'s next states is dropped.
fn apply_fields(payload: &TicketUpdatePayload, current: TicketStatus, staff: bool) -> TicketUpdate {
    let mut update = TicketUpdateBuilder::new();

    if let Some(title) = payload.title.as_deref().filter(|v| !v.is_empty()) {
        update = update.title(title);
    }
    if let Some(description) = payload.description.as_deref().filter(|v| !v.is_empty()) {
        update = update.description(description);
    }
    if let Some(image_url) = payload.image_url.as_deref().filter(|v| !v.is_empty()) {
        update = update.image_url(image_url);
    }

    if staff {
        if let Some(status) = payload
            .status
            .as_deref()
            .and_then(TicketStatus::parse)
            .filter(|next| current.can_transition_to(*next))
        {
            update = update.status(status);
        }
        if let Some(priority) = payload.priority.as_deref().and_then(TicketPriority::parse) {
            update = update.priority(priority);
        }
        if let Some(assignee) = &payload.assigned_to {
            update = update.assigned_to(assignee.clone().filter(|v| !v.is_empty()));
        }
    }

    update.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use chrono::Duration;
    use desk_core::enums::Role;
    use desk_core::errors::ValidationError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn new_payload(title: &str, description: &str) -> NewTicketPayload {
        NewTicketPayload {
            title: Some(title.into()),
            description: Some(description.into()),
            ..NewTicketPayload::default()
        }
    }

    fn patch(json: &str) -> TicketUpdatePayload {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn client_creates_with_defaults_and_is_notified() {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;

        let ticket = h
            .service
            .create_ticket(&new_payload("Printer jam", "Tray 2 stuck"), &ada)
            .await
            .unwrap();

        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.created_by, ada.id);
        assert_eq!(ticket.assigned_to, None);
        assert_eq!(
            h.drain(),
            vec![Notification::TicketCreated {
                to: "ada@example.com".into(),
                title: "Printer jam".into(),
            }]
        );
    }

    #[rstest]
    #[case(Some("high"), TicketPriority::High)]
    #[case(Some("low"), TicketPriority::Low)]
    #[case(Some("urgent"), TicketPriority::Medium)]
    #[case(Some(""), TicketPriority::Medium)]
    #[case(None, TicketPriority::Medium)]
    #[tokio::test]
    async fn priority_is_normalized(#[case] raw: Option<&str>, #[case] expected: TicketPriority) {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let payload = NewTicketPayload {
            priority: raw.map(String::from),
            ..new_payload("t", "d")
        };
        let ticket = h.service.create_ticket(&payload, &ada).await.unwrap();
        assert_eq!(ticket.priority, expected);
    }

    #[rstest]
    #[case(Role::Agent)]
    #[case(Role::Admin)]
    #[tokio::test]
    async fn staff_cannot_create(#[case] role: Role) {
        let mut h = Harness::new().await;
        let staff = h.user("Staff", role).await;
        let err = h
            .service
            .create_ticket(&new_payload("t", "d"), &staff)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Clients only");
        assert_eq!(err.status_code(), 403);
        assert!(h.drain().is_empty());
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_storage() {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let err = h
            .service
            .create_ticket(&new_payload("   ", "d"), &ada)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Title and description are required");
        assert_eq!(err.status_code(), 400);
        assert!(h.service.list_tickets(&ada, TicketFilter::default()).await.unwrap().is_empty());
        assert!(h.drain().is_empty());
    }

    #[tokio::test]
    async fn image_url_is_kept_on_create() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let payload = NewTicketPayload {
            image_url: Some("https://cdn.example.com/jam.png".into()),
            ..new_payload("t", "d")
        };
        let ticket = h.service.create_ticket(&payload, &ada).await.unwrap();
        assert_eq!(ticket.image_url.as_deref(), Some("https://cdn.example.com/jam.png"));
    }

    #[tokio::test]
    async fn get_enforces_ownership() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let eve = h.user("Eve", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        assert_eq!(h.service.get_ticket(&ticket.id, &ada).await.unwrap().id, ticket.id);
        assert_eq!(h.service.get_ticket(&ticket.id, &bea).await.unwrap().id, ticket.id);

        let err = h.service.get_ticket(&ticket.id, &eve).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = h.service.get_ticket("tkt-missing0", &bea).await.unwrap_err();
        assert_eq!(err.to_string(), "Not found");
    }

    #[tokio::test]
    async fn list_is_client_scoped_and_newest_first() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let eve = h.user("Eve", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;

        h.service.create_ticket(&new_payload("A1", "d"), &ada).await.unwrap();
        h.advance(Duration::minutes(1));
        h.service.create_ticket(&new_payload("E1", "d"), &eve).await.unwrap();
        h.advance(Duration::minutes(1));
        h.service.create_ticket(&new_payload("A2", "d"), &ada).await.unwrap();

        let titles = |tickets: Vec<Ticket>| tickets.into_iter().map(|t| t.title).collect::<Vec<_>>();

        let mine = h.service.list_tickets(&ada, TicketFilter::default()).await.unwrap();
        assert_eq!(titles(mine), vec!["A2", "A1"]);

        let all = h.service.list_tickets(&bea, TicketFilter::default()).await.unwrap();
        assert_eq!(titles(all), vec!["A2", "E1", "A1"]);
    }

    #[tokio::test]
    async fn agent_update_applies_status_and_any_assignee() {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h
            .service
            .create_ticket(&new_payload("Printer jam", "Tray 2 stuck"), &ada)
            .await
            .unwrap();
        h.drain();

        let updated = h
            .service
            .update_ticket(
                &ticket.id,
                &patch(r#"{"status":"resolved","assignedTo":"bogus-enum-ignored-field-still-applies"}"#),
                &bea,
            )
            .await
            .unwrap();

        assert_eq!(updated.status, TicketStatus::Resolved);
        assert_eq!(
            updated.assigned_to.as_deref(),
            Some("bogus-enum-ignored-field-still-applies")
        );
        assert!(h.drain().is_empty(), "resolved is not closed");
    }

    #[tokio::test]
    async fn invalid_status_and_priority_are_ignored_not_rejected() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let updated = h
            .service
            .update_ticket(
                &ticket.id,
                &patch(r#"{"status":"archived","priority":"critical","title":"renamed"}"#),
                &bea,
            )
            .await
            .unwrap();
        assert_eq!(updated.status, TicketStatus::Open);
        assert_eq!(updated.priority, TicketPriority::Medium);
        assert_eq!(updated.title, "renamed");
    }

    #[tokio::test]
    async fn explicit_null_or_empty_assignee_clears() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let assign = patch(&format!(r#"{{"assignedTo":"{}"}}"#, bea.id));
        let assigned = h.service.update_ticket(&ticket.id, &assign, &bea).await.unwrap();
        assert_eq!(assigned.assigned_to.as_deref(), Some(bea.id.as_str()));

        let untouched = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"priority":"high"}"#), &bea)
            .await
            .unwrap();
        assert_eq!(untouched.assigned_to.as_deref(), Some(bea.id.as_str()));

        for clear in [r#"{"assignedTo":null}"#, r#"{"assignedTo":""}"#] {
            h.service.update_ticket(&ticket.id, &assign, &bea).await.unwrap();
            let cleared = h.service.update_ticket(&ticket.id, &patch(clear), &bea).await.unwrap();
            assert_eq!(cleared.assigned_to, None, "{clear}");
        }
    }

    #[tokio::test]
    async fn client_edits_only_content_while_open() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let edited = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"description":"more detail"}"#), &ada)
            .await
            .unwrap();
        assert_eq!(edited.description, "more detail");

        let err = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"title":"x","status":"closed"}"#), &ada)
            .await
            .unwrap_err();
        assert!(matches!(err, DeskError::Validation(ValidationError::ForbiddenFieldChange)));
        assert_eq!(err.status_code(), 403);

        h.service
            .update_ticket(&ticket.id, &patch(r#"{"status":"in_progress"}"#), &bea)
            .await
            .unwrap();
        let err = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"title":"x"}"#), &ada)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Clients can only edit open tickets");
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn client_noop_update_is_bad_request() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let err = h
            .service
            .update_ticket(&ticket.id, &patch("{}"), &ada)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Nothing to update");
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn client_image_only_update_applies() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let updated = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"imageUrl":"https://img/2.png"}"#), &ada)
            .await
            .unwrap();
        assert_eq!(updated.image_url.as_deref(), Some("https://img/2.png"));
    }

    #[tokio::test]
    async fn other_clients_ticket_is_forbidden_before_validation() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let eve = h.user("Eve", Role::Client).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        let err = h
            .service
            .update_ticket(&ticket.id, &patch("{}"), &eve)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[tokio::test]
    async fn unchanged_payload_refreshes_updated_at_only() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();
        let assign = patch(&format!(r#"{{"status":"in_progress","priority":"high","assignedTo":"{}"}}"#, bea.id));
        let before = h.service.update_ticket(&ticket.id, &assign, &bea).await.unwrap();

        h.advance(Duration::minutes(10));
        let after = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"title":"t","description":"d"}"#), &bea)
            .await
            .unwrap();

        assert_eq!(after.status, before.status);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.assigned_to, before.assigned_to);
        assert_eq!(after.title, before.title);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.updated_at, h.now());
    }

    #[rstest]
    #[case::open_to_closed(None, "closed", 1)]
    #[case::in_progress_to_closed(Some("in_progress"), "closed", 1)]
    #[case::resolved_to_closed(Some("resolved"), "closed", 1)]
    #[case::closed_resubmitted(Some("closed"), "closed", 0)]
    #[case::open_to_resolved(None, "resolved", 0)]
    #[case::closed_reopened(Some("closed"), "open", 0)]
    #[tokio::test]
    async fn closed_notification_fires_only_on_entry(
        #[case] start: Option<&str>,
        #[case] target: &str,
        #[case] expected: usize,
    ) {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("Printer jam", "d"), &ada).await.unwrap();
        if let Some(start) = start {
            let body = format!(r#"{{"status":"{start}"}}"#);
            h.service.update_ticket(&ticket.id, &patch(&body), &bea).await.unwrap();
        }
        h.drain();

        let body = format!(r#"{{"status":"{target}"}}"#);
        h.service.update_ticket(&ticket.id, &patch(&body), &bea).await.unwrap();

        let closed: Vec<_> = h
            .drain()
            .into_iter()
            .filter(|n| matches!(n, Notification::TicketClosed { .. }))
            .collect();
        assert_eq!(closed.len(), expected);
        if expected == 1 {
            assert_eq!(closed[0].recipient(), "ada@example.com");
        }
    }

    // Transitions are deliberately unconstrained: staff may move any status
    // to any other in one step, including reopening a closed ticket.
    #[tokio::test]
    async fn staff_may_reopen_closed_ticket() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let dee = h.user("Dee", Role::Admin).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();

        h.service
            .update_ticket(&ticket.id, &patch(r#"{"status":"closed"}"#), &dee)
            .await
            .unwrap();
        let reopened = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"status":"open"}"#), &dee)
            .await
            .unwrap();
        assert_eq!(reopened.status, TicketStatus::Open);
    }

    #[test]
    fn staff_status_follows_transition_graph() {
        for current in TicketStatus::ALL {
            for next in TicketStatus::ALL {
                let body = format!(r#"{{"status":"{next}"}}"#);
                let update = apply_fields(&patch(&body), current, true);
                assert_eq!(update.status, Some(next), "{current} -> {next}");
            }
        }
    }

    #[test]
    fn client_status_is_never_applied() {
        let update = apply_fields(&patch(r#"{"title":"t","status":"closed"}"#), TicketStatus::Open, false);
        assert_eq!(update.status, None);
        assert_eq!(update.title.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn delete_is_staff_only() {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h.service.create_ticket(&new_payload("t", "d"), &ada).await.unwrap();
        h.drain();

        let err = h.service.delete_ticket(&ticket.id, &ada).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let deleted = h.service.delete_ticket(&ticket.id, &bea).await.unwrap();
        assert_eq!(deleted.id, ticket.id);
        assert!(h.drain().is_empty());

        let err = h.service.delete_ticket(&ticket.id, &bea).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn client_delete_of_missing_ticket_is_forbidden_first() {
        let h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let err = h.service.delete_ticket("tkt-missing0", &ada).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn close_survives_failed_owner_lookup() {
        let mut h = Harness::new().await;
        let ada = h.user("Ada", Role::Client).await;
        let bea = h.user("Bea", Role::Agent).await;
        let ticket = h
            .service
            .create_ticket(&new_payload("Printer jam", "Tray 2 stuck"), &ada)
            .await
            .unwrap();
        h.drain();
        h.break_user_lookup().await;

        let closed = h
            .service
            .update_ticket(&ticket.id, &patch(r#"{"status":"closed"}"#), &bea)
            .await
            .unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(h.drain().is_empty());

        let stored = h.service.get_ticket(&ticket.id, &bea).await.unwrap();
        assert_eq!(stored.status, TicketStatus::Closed);
    }
}

//! The four notification kinds and their rendered text.

use serde::Serialize;

/// A notification owed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sent to a client after they open a ticket.
    TicketCreated { to: String, title: String },
    /// Sent to the ticket owner when an agent or admin comments.
    AgentComment {
        to: String,
        title: String,
        agent_name: String,
    },
    /// Sent to the ticket owner when the ticket moves into `closed`.
    TicketClosed { to: String, title: String },
    /// Sent to the assigned agent by the stale-ticket scan.
    AgentReminder { to: String, title: String },
}

impl Notification {
    #[must_use]
    pub fn recipient(&self) -> &str {
        match self {
            Self::TicketCreated { to, .. }
            | Self::AgentComment { to, .. }
            | Self::TicketClosed { to, .. }
            | Self::AgentReminder { to, .. } => to,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TicketCreated { .. } => "ticket_created",
            Self::AgentComment { .. } => "agent_comment",
            Self::TicketClosed { .. } => "ticket_closed",
            Self::AgentReminder { .. } => "agent_reminder",
        }
    }

    #[must_use]
    pub const fn subject(&self) -> &'static str {
        match self {
            Self::TicketCreated { .. } => "Ticket created",
            Self::AgentComment { .. } => "Ticket updated by agent",
            Self::TicketClosed { .. } => "Ticket closed",
            Self::AgentReminder { .. } => "Pending ticket reminder",
        }
    }

    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::TicketCreated { title, .. } => format!(
                "Your ticket \"{title}\" was created successfully. Our team will review it shortly."
            ),
            Self::AgentComment {
                title, agent_name, ..
            } => format!(
                "{agent_name} responded to your ticket \"{title}\". Sign in to review the reply."
            ),
            Self::TicketClosed { title, .. } => format!(
                "Your ticket \"{title}\" has been marked as closed. Reply to reopen the conversation if needed."
            ),
            Self::AgentReminder { title, .. } => format!(
                "A ticket assigned to you (\"{title}\") has no agent reply yet. Please follow up with the client."
            ),
        }
    }

    /// Render into a plain-text email from `from`.
    #[must_use]
    pub fn render(&self, from: &str) -> Email {
        Email {
            from: from.to_string(),
            to: self.recipient().to_string(),
            subject: self.subject().to_string(),
            text: self.body(),
        }
    }
}

/// A rendered message, as posted to the mail relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_ticket_created() {
        let email = Notification::TicketCreated {
            to: "ada@example.com".into(),
            title: "Printer jam".into(),
        }
        .render("no-reply@helpdeskpro.local");

        assert_eq!(
            email,
            Email {
                from: "no-reply@helpdeskpro.local".into(),
                to: "ada@example.com".into(),
                subject: "Ticket created".into(),
                text: "Your ticket \"Printer jam\" was created successfully. Our team will review it shortly."
                    .into(),
            }
        );
    }

    #[test]
    fn agent_comment_names_the_agent() {
        let n = Notification::AgentComment {
            to: "ada@example.com".into(),
            title: "VPN".into(),
            agent_name: "Bea".into(),
        };
        assert_eq!(n.subject(), "Ticket updated by agent");
        assert!(n.body().starts_with("Bea responded to your ticket \"VPN\""));
    }

    #[test]
    fn subjects_are_distinct_per_kind() {
        let all = [
            Notification::TicketCreated { to: "a".into(), title: "t".into() },
            Notification::AgentComment { to: "a".into(), title: "t".into(), agent_name: "b".into() },
            Notification::TicketClosed { to: "a".into(), title: "t".into() },
            Notification::AgentReminder { to: "a".into(), title: "t".into() },
        ];
        let mut subjects: Vec<_> = all.iter().map(Notification::subject).collect();
        subjects.dedup();
        assert_eq!(subjects.len(), 4);
        assert!(all.iter().all(|n| n.recipient() == "a"));
    }

    #[test]
    fn email_serializes_flat() {
        let email = Notification::TicketClosed { to: "x@y".into(), title: "T".into() }.render("f@y");
        let json = serde_json::to_value(&email).unwrap();
        assert_eq!(json["from"], "f@y");
        assert_eq!(json["to"], "x@y");
        assert_eq!(json["subject"], "Ticket closed");
    }
}

use clap::Subcommand;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Accounts and roles.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Support tickets.
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Ticket conversation threads.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Stale-ticket reminders.
    Reminders {
        #[command(subcommand)]
        action: ReminderCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a client account. Needs no session.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List users visible to the caller.
    List,
    /// Change a user's role (admin only).
    SetRole { id: String, role: String },
}

#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// Open a ticket (clients only).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Show one ticket.
    Get { id: String },
    /// List tickets visible to the caller.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Update a ticket.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Assign to this user id.
        #[arg(long, conflicts_with = "unassign")]
        assign: Option<String>,
        /// Clear the assignment.
        #[arg(long)]
        unassign: bool,
    },
    /// Delete a ticket (agents and admins only).
    Delete { id: String },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Show a ticket's thread, oldest first.
    List { ticket_id: String },
    /// Add a comment to a ticket.
    Add {
        ticket_id: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ReminderCommands {
    /// Remind assigned agents about idle tickets.
    Scan {
        /// Shared secret, required when `reminders.cron_secret` is set.
        #[arg(long)]
        secret: Option<String>,
    },
}

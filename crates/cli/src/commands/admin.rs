//! Contact form and administrator commands.

use std::io;

use clap::{Args, Subcommand};

use storefront::{
    dashboard::ContactForm,
    domain::messages::models::MessageId,
    tables::{write_messages, write_overview, write_users},
};

use crate::{
    commands::{Invocation, signed_in},
    errors::CliError,
};

#[derive(Debug, Args)]
pub(crate) struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    message: String,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AdminCommand {
    /// Revenue, order counts and monthly sales
    Overview,

    /// Every registered user
    Users,

    /// The contact inbox
    Messages,

    /// Mark a contact message as handled
    Resolve { message: String },
}

pub(super) async fn contact<W: io::Write>(
    invocation: &mut Invocation<W>,
    args: ContactArgs,
) -> Result<(), CliError> {
    let ContactArgs {
        name,
        email,
        subject,
        message,
    } = args;

    invocation
        .context
        .dashboard()
        .submit_message(
            invocation.sessions.session(),
            ContactForm {
                name,
                email,
                subject,
                message,
            },
        )
        .await?;

    Ok(writeln!(invocation.out, "Message sent")?)
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    command: AdminCommand,
) -> Result<(), CliError> {
    let Invocation {
        context,
        sessions,
        out,
        ..
    } = invocation;

    let session = signed_in(sessions)?;
    let dashboard = context.dashboard();

    match command {
        AdminCommand::Overview => write_overview(out, &dashboard.overview(session).await?)?,
        AdminCommand::Users => write_users(out, &dashboard.users(session).await?)?,
        AdminCommand::Messages => write_messages(out, &dashboard.messages(session).await?)?,
        AdminCommand::Resolve { message } => {
            let id = MessageId::new(message);

            dashboard.resolve_message(session, &id).await?;

            writeln!(out, "Resolved message {id}")?;
        }
    }

    Ok(())
}

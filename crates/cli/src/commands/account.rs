//! Sign-in, registration and profile commands.

use std::io;

use clap::Args;

use storefront::auth::{Credentials, Password, ProfileUpdate, Registration, Session};

use crate::{commands::Invocation, errors::CliError};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Default shipping address
    #[arg(long)]
    address: Option<String>,

    /// Avatar image URL
    #[arg(long)]
    avatar: Option<String>,
}

fn describe(mut out: impl io::Write, session: &Session) -> io::Result<()> {
    let user = session.user();
    let role = if session.is_admin() { " (admin)" } else { "" };

    writeln!(out, "Signed in as {} <{}>{role}", user.name, user.email)
}

pub(super) async fn login<W: io::Write>(
    invocation: &mut Invocation<W>,
    args: LoginArgs,
) -> Result<(), CliError> {
    let LoginArgs { email, password } = args;

    let session = invocation
        .sessions
        .login(Credentials {
            email,
            password: Password::new(password),
        })
        .await?;

    Ok(describe(&mut invocation.out, session)?)
}

pub(super) async fn register<W: io::Write>(
    invocation: &mut Invocation<W>,
    args: RegisterArgs,
) -> Result<(), CliError> {
    let RegisterArgs {
        name,
        email,
        password,
    } = args;

    let session = invocation
        .sessions
        .register(Registration {
            name,
            email,
            password: Password::new(password),
        })
        .await?;

    Ok(describe(&mut invocation.out, session)?)
}

pub(super) async fn logout<W: io::Write>(invocation: &mut Invocation<W>) -> Result<(), CliError> {
    invocation.sessions.logout().await?;

    Ok(writeln!(invocation.out, "Signed out")?)
}

pub(super) fn whoami<W: io::Write>(invocation: &mut Invocation<W>) -> Result<(), CliError> {
    match invocation.sessions.session() {
        Some(session) => describe(&mut invocation.out, session)?,
        None => writeln!(invocation.out, "Not signed in")?,
    }

    Ok(())
}

pub(super) async fn update_profile<W: io::Write>(
    invocation: &mut Invocation<W>,
    args: ProfileArgs,
) -> Result<(), CliError> {
    let ProfileArgs {
        name,
        email,
        phone,
        address,
        avatar,
    } = args;

    let session = invocation
        .sessions
        .update_profile(ProfileUpdate {
            name,
            email,
            phone,
            address,
            avatar,
        })
        .await?;

    Ok(describe(&mut invocation.out, session)?)
}

//! Subcommands and their dispatch.

use std::io;

use clap::Subcommand;

use storefront::{
    auth::{AuthError, Session, SessionManager},
    context::StorefrontContext,
    http::CancelToken,
};

use crate::errors::CliError;

mod account;
mod admin;
mod cart;
mod catalog;
mod checkout;
mod orders;
mod reviews;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Sign in and cache the session
    Login(account::LoginArgs),

    /// Create an account and sign in
    Register(account::RegisterArgs),

    /// Forget the cached session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Update the signed-in user's profile
    Profile(account::ProfileArgs),

    /// Browse the catalog
    #[command(subcommand)]
    Products(catalog::ProductsCommand),

    /// Inspect and change the cart
    #[command(subcommand)]
    Cart(cart::CartCommand),

    /// Pay for the cart and place an order
    Checkout(checkout::CheckoutArgs),

    /// Order history and fulfilment
    #[command(subcommand)]
    Orders(orders::OrdersCommand),

    /// Product reviews
    #[command(subcommand)]
    Reviews(reviews::ReviewsCommand),

    /// Send a message through the contact form
    Contact(admin::ContactArgs),

    /// Administrator tools
    #[command(subcommand)]
    Admin(admin::AdminCommand),
}

/// Everything a subcommand runs against.
pub(crate) struct Invocation<W> {
    pub(crate) context: StorefrontContext,
    pub(crate) sessions: SessionManager,
    pub(crate) token: CancelToken,
    pub(crate) out: W,
}

impl<W: io::Write> Invocation<W> {
    pub(crate) fn new(context: StorefrontContext, token: CancelToken, out: W) -> Self {
        Self {
            sessions: context.session_manager(),
            context,
            token,
            out,
        }
    }

    /// Restore any cached session, then run `command`.
    pub(crate) async fn run(mut self, command: Command) -> Result<(), CliError> {
        self.sessions.restore().await?;

        match command {
            Command::Login(args) => account::login(&mut self, args).await,
            Command::Register(args) => account::register(&mut self, args).await,
            Command::Logout => account::logout(&mut self).await,
            Command::Whoami => account::whoami(&mut self),
            Command::Profile(args) => account::update_profile(&mut self, args).await,
            Command::Products(command) => catalog::run(&mut self, command).await,
            Command::Cart(command) => cart::run(&mut self, command).await,
            Command::Checkout(args) => checkout::run(&mut self, args).await,
            Command::Orders(command) => orders::run(&mut self, command).await,
            Command::Reviews(command) => reviews::run(&mut self, command).await,
            Command::Contact(args) => admin::contact(&mut self, args).await,
            Command::Admin(command) => admin::run(&mut self, command).await,
        }
    }
}

fn signed_in(sessions: &SessionManager) -> Result<&Session, AuthError> {
    sessions.session().ok_or(AuthError::NotAuthenticated)
}

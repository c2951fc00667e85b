//! Order history commands.

use std::io;

use clap::Subcommand;

use storefront::{
    domain::orders::models::{OrderId, OrderStatus},
    tables::{write_invoice, write_orders},
};

use crate::{
    commands::{Invocation, signed_in},
    errors::CliError,
};

#[derive(Debug, Subcommand)]
pub(crate) enum OrdersCommand {
    /// Your orders, or every order for administrators
    List,

    /// Print the invoice for one order
    Invoice { order: String },

    /// Move an order to a new status (administrators only)
    Status {
        order: String,

        /// pending, processing, shipped, delivered, completed or cancelled
        status: OrderStatus,
    },
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    command: OrdersCommand,
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
        OrdersCommand::List => {
            let orders = dashboard.orders(session).await?;

            write_orders(out, &orders)?;
        }
        OrdersCommand::Invoice { order } => {
            let id = OrderId::new(order);
            let orders = dashboard.orders(session).await?;

            let order = orders
                .iter()
                .find(|candidate| candidate.id == id)
                .ok_or_else(|| CliError::UnknownOrder(id.to_string()))?;

            write_invoice(out, order)?;
        }
        OrdersCommand::Status { order, status } => {
            let id = OrderId::new(order);

            dashboard.update_order_status(session, &id, status).await?;

            writeln!(out, "Order {id} is now {status}")?;
        }
    }

    Ok(())
}

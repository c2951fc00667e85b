//! Checkout command.

use std::io;

use clap::Args;

use storefront::{
    checkout::{CheckoutOutcome, CheckoutState},
    tables::{write_cart, write_invoice},
};

use crate::{
    commands::{Invocation, signed_in},
    errors::CliError,
    widget::TerminalPaymentWidget,
};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Shipping address for the order
    #[arg(long)]
    address: String,
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    args: CheckoutArgs,
) -> Result<(), CliError> {
    let Invocation {
        context,
        sessions,
        token,
        out,
    } = invocation;

    let session = signed_in(sessions)?;
    let mut flow = context.checkout(token.clone());

    flow.load(Some(session)).await?;

    if *flow.state() == CheckoutState::EmptyCart {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    write_cart(&mut *out, flow.items())?;

    flow.set_address(args.address)?;

    let widget = TerminalPaymentWidget::new();

    match flow.pay(session, &widget).await? {
        CheckoutOutcome::Placed(Some(order)) => {
            writeln!(out, "Order placed.")?;
            write_invoice(out, order)?;
        }
        CheckoutOutcome::Placed(None) => {
            writeln!(out, "Order placed. Run `storefront orders list` to see it.")?;
        }
        CheckoutOutcome::Dismissed => {
            writeln!(out, "Payment cancelled, your cart is unchanged.")?;
        }
    }

    Ok(())
}

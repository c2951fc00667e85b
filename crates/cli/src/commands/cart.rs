//! Cart commands.

use std::io;

use clap::Subcommand;

use storefront::{
    domain::{
        carts::models::CartItemId,
        products::{
            SearchMode,
            models::{ProductId, Size},
        },
    },
    tables::write_cart,
};

use crate::{commands::Invocation, errors::CliError};

#[derive(Debug, Subcommand)]
pub(crate) enum CartCommand {
    /// Show the cart and its total
    Show,

    /// Add one unit of a product
    Add {
        product: String,

        /// Size (XS, S, M, L, XL, XXL)
        #[arg(long)]
        size: Option<Size>,
    },

    /// Set a line's quantity; zero or less removes it
    Set {
        line: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove { line: String },

    /// Empty the cart
    Clear,
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    command: CartCommand,
) -> Result<(), CliError> {
    let Invocation {
        context,
        sessions,
        token,
        out,
    } = invocation;

    let session = sessions.session();
    let mut cart = context.cart_store(token.clone());

    cart.load(session).await?;

    match command {
        CartCommand::Show => {}
        CartCommand::Add { product, size } => {
            let product = context
                .catalog(SearchMode::default())
                .product(&ProductId::new(product))
                .await?;

            cart.add(session, &product, size).await?;
        }
        CartCommand::Set { line, quantity } => {
            cart.update_quantity(session, &CartItemId::new(line), quantity)
                .await?;
        }
        CartCommand::Remove { line } => {
            cart.remove(session, &CartItemId::new(line)).await?;
        }
        CartCommand::Clear => cart.clear(session).await?,
    }

    Ok(write_cart(out, cart.items())?)
}

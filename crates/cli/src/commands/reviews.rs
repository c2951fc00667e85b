//! Review commands.

use std::io;

use clap::Subcommand;

use storefront::domain::{products::models::ProductId, reviews::models::average_rating};

use crate::{commands::Invocation, errors::CliError};

#[derive(Debug, Subcommand)]
pub(crate) enum ReviewsCommand {
    /// Reviews left on a product
    List { product: String },

    /// Review a product as the signed-in shopper
    Submit {
        product: String,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,

        #[arg(long)]
        comment: String,
    },
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    command: ReviewsCommand,
) -> Result<(), CliError> {
    let Invocation {
        context,
        sessions,
        out,
        ..
    } = invocation;

    let dashboard = context.dashboard();

    match command {
        ReviewsCommand::List { product } => {
            let reviews = dashboard.reviews(&ProductId::new(product)).await?;

            match average_rating(&reviews) {
                Some(average) => writeln!(out, "Average {average}/5 over {}", reviews.len())?,
                None => writeln!(out, "No reviews yet")?,
            }

            for review in &reviews {
                writeln!(
                    out,
                    "{}/5  {}  {}: {}",
                    review.rating,
                    review.date.strftime("%Y-%m-%d"),
                    review.user.name,
                    review.comment
                )?;
            }
        }
        ReviewsCommand::Submit {
            product,
            rating,
            comment,
        } => {
            dashboard
                .submit_review(sessions.session(), &ProductId::new(product), rating, comment)
                .await?;

            writeln!(out, "Thanks for your review")?;
        }
    }

    Ok(())
}

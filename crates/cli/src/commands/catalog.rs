//! Catalog browsing and product management commands.

use std::io;

use clap::{Args, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use storefront::{
    domain::products::{
        SearchMode,
        models::{
            Category, CategoryFilter, NewProduct, PriceRange, Product, ProductId, ProductPage,
            ProductQuery, SortKey,
        },
    },
    tables::{write_product, write_products},
};

use crate::{
    commands::{Invocation, signed_in},
    errors::CliError,
};

#[derive(Debug, Subcommand)]
pub(crate) enum ProductsCommand {
    /// List one page of products
    List(ListArgs),

    /// Show a product with its reviews
    Show { id: String },

    /// Products from the same category
    Related {
        id: String,

        #[arg(long, default_value_t = 4)]
        limit: usize,
    },

    /// New arrivals at the lower end of the price range
    Trending {
        #[arg(long, default_value_t = 8)]
        limit: usize,
    },

    /// Add a product (administrators only)
    Create(ProductArgs),

    /// Replace a product's details (administrators only)
    Update {
        id: String,

        #[command(flatten)]
        product: ProductArgs,
    },

    /// Delete a product (administrators only)
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sort {
    PriceAsc,
    PriceDesc,
    Unsorted,
}

impl From<Sort> for Option<SortKey> {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::PriceAsc => Some(SortKey::PriceAsc),
            Sort::PriceDesc => Some(SortKey::PriceDesc),
            Sort::Unsorted => None,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Search {
    /// The backend filters by the search term
    Server,

    /// Fetch the page unfiltered, then narrow it locally
    Client,
}

impl From<Search> for SearchMode {
    fn from(search: Search) -> Self {
        match search {
            Search::Server => SearchMode::Server,
            Search::Client => SearchMode::ClientNarrowing,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Category name, or "all"
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Free-text search term
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value = "0")]
    min_price: Decimal,

    #[arg(long, default_value = "50000")]
    max_price: Decimal,

    #[arg(long, value_enum, default_value_t = Sort::PriceAsc)]
    sort: Sort,

    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = 12)]
    limit: u32,

    /// Where the search term is applied
    #[arg(long, value_enum, default_value_t = Search::Client)]
    search_mode: Search,
}

impl ListArgs {
    fn query(&self) -> ProductQuery {
        ProductQuery {
            category: self.category,
            search: self.search.clone(),
            price: PriceRange {
                min: self.min_price,
                max: self.max_price,
            },
            sort: self.sort.into(),
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ProductArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    category: Category,

    /// Image URL
    #[arg(long, default_value = "")]
    image: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Flag the product as a new arrival
    #[arg(long)]
    is_new: bool,
}

impl From<ProductArgs> for NewProduct {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            image: args.image,
            category: args.category,
            description: args.description,
            is_new: args.is_new,
        }
    }
}

pub(super) async fn run<W: io::Write>(
    invocation: &mut Invocation<W>,
    command: ProductsCommand,
) -> Result<(), CliError> {
    let Invocation {
        context,
        sessions,
        out,
        ..
    } = invocation;

    match command {
        ProductsCommand::List(args) => {
            let page = context
                .catalog(args.search_mode.into())
                .browse(&args.query())
                .await?;

            write_products(out, &page)?;
        }
        ProductsCommand::Show { id } => {
            let id = ProductId::new(id);
            let product = context.catalog(SearchMode::default()).product(&id).await?;
            let reviews = context.dashboard().reviews(&id).await?;

            write_product(out, &product, &reviews)?;
        }
        ProductsCommand::Related { id, limit } => {
            let catalog = context.catalog(SearchMode::default());
            let product = catalog.product(&ProductId::new(id)).await?;
            let related = catalog.related(&product, limit).await?;

            write_list(out, related)?;
        }
        ProductsCommand::Trending { limit } => {
            let trending = context
                .catalog(SearchMode::default())
                .trending(limit)
                .await?;

            write_list(out, trending)?;
        }
        ProductsCommand::Create(args) => {
            let session = signed_in(sessions)?;
            let product = context
                .dashboard()
                .create_product(session, args.into())
                .await?;

            writeln!(out, "Created product {}", product.id)?;
        }
        ProductsCommand::Update { id, product } => {
            let session = signed_in(sessions)?;
            let product = context
                .dashboard()
                .update_product(session, &ProductId::new(id), product.into())
                .await?;

            writeln!(out, "Updated product {}", product.id)?;
        }
        ProductsCommand::Delete { id } => {
            let session = signed_in(sessions)?;
            let id = ProductId::new(id);

            context.dashboard().delete_product(session, &id).await?;

            writeln!(out, "Deleted product {id}")?;
        }
    }

    Ok(())
}

fn write_list(out: impl io::Write, products: Vec<Product>) -> io::Result<()> {
    let page = ProductPage {
        products,
        total_pages: 1,
        current_page: None,
    };

    write_products(out, &page)
}

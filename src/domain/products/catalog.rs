//! Catalog browsing.
//!
//! Listing is server-side (category, price range, sort, paging). Free-text
//! search can either be sent to the server as-is or narrowed client-side
//! over the fetched page, which is what the existing backend integration does.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::{debug, instrument};

use crate::domain::products::{
    errors::ProductsServiceError,
    models::{CategoryFilter, Product, ProductId, ProductPage, ProductQuery},
    service::ProductsService,
};

/// Where free-text search is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Send the search term to the server and trust its filtering.
    Server,

    /// Fetch the page without a search term, then keep products whose name,
    /// category or description contains the term (case-insensitive).
    #[default]
    ClientNarrowing,
}

/// Catalog browsing over a [`ProductsService`].
#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductsService>,
    mode: SearchMode,
}

impl Catalog {
    /// Catalog searching the way `mode` says.
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, mode: SearchMode) -> Self {
        Self { products, mode }
    }

    /// Fetch one page of products for the query.
    ///
    /// # Errors
    ///
    /// Returns the service error when the listing request fails.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn browse(&self, query: &ProductQuery) -> Result<ProductPage, ProductsServiceError> {
        match self.mode {
            SearchMode::Server => self.products.list_products(query.clone()).await,
            SearchMode::ClientNarrowing => {
                let server_query = ProductQuery {
                    search: String::new(),
                    ..query.clone()
                };

                let mut page = self.products.list_products(server_query).await?;
                let fetched = page.products.len();

                page.products
                    .retain(|product| matches_search(product, &query.search));

                debug!(fetched, kept = page.products.len(), "narrowed page by search term");

                Ok(page)
            }
        }
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::NotFound`] for unknown ids.
    pub async fn product(&self, product: &ProductId) -> Result<Product, ProductsServiceError> {
        self.products.get_product(product).await
    }

    /// Other products from the same category, excluding `product` itself.
    ///
    /// # Errors
    ///
    /// Returns the service error when the listing request fails.
    pub async fn related(
        &self,
        product: &Product,
        limit: usize,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let page = self
            .products
            .list_products(ProductQuery {
                category: CategoryFilter::Only(product.category),
                ..ProductQuery::default()
            })
            .await?;

        Ok(page
            .products
            .into_iter()
            .filter(|candidate| candidate.id != product.id)
            .take(limit)
            .collect())
    }

    /// Newly arrived products from the cheapest end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns the service error when the listing request fails.
    pub async fn trending(&self, limit: usize) -> Result<Vec<Product>, ProductsServiceError> {
        let mut query = ProductQuery::default();
        query.price.max = 300.into();

        let page = self.products.list_products(query).await?;

        Ok(page
            .products
            .into_iter()
            .filter(|product| product.is_new)
            .take(limit)
            .collect())
    }
}

/// Case-insensitive substring match over name, category and description.
/// An empty term matches everything.
#[must_use]
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.trim().to_lowercase();

    if term.is_empty() {
        return true;
    }

    [
        product.name.as_str(),
        product.category.as_str(),
        product.description.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Catalog")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

//! Products service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::instrument;

use crate::{
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductId, ProductPage, ProductQuery},
    },
    http::{ApiClient, NO_QUERY},
};

const PRODUCTS_PATH: &str = "/api/products";

fn product_path(product: &ProductId) -> String {
    format!("{PRODUCTS_PATH}/{product}")
}

/// [`ProductsService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
}

impl HttpProductsService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    #[instrument(skip(self))]
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError> {
        Ok(self.api.get(PRODUCTS_PATH, &query.to_params()).await?)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError> {
        Ok(self.api.get(&product_path(product), NO_QUERY).await?)
    }

    #[instrument(skip(self))]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        validate(&product)?;

        Ok(self.api.send(Method::POST, PRODUCTS_PATH, &product).await?)
    }

    #[instrument(skip(self))]
    async fn update_product(
        &self,
        product: &ProductId,
        update: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        validate(&update)?;

        Ok(self
            .api
            .send(Method::PUT, &product_path(product), &update)
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError> {
        Ok(self
            .api
            .send_query(Method::DELETE, &product_path(product), NO_QUERY)
            .await?)
    }
}

/// Required-field checks the admin product form enforces before saving.
fn validate(product: &NewProduct) -> Result<(), ProductsServiceError> {
    if product.name.trim().is_empty() {
        return Err(ProductsServiceError::InvalidData("name is required"));
    }

    if product.image.trim().is_empty() {
        return Err(ProductsServiceError::InvalidData("image URL is required"));
    }

    if product.price.is_sign_negative() {
        return Err(ProductsServiceError::InvalidData("price cannot be negative"));
    }

    Ok(())
}

/// Catalogue reads and admin product CRUD.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products matching the query.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: &ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replaces a product's details.
    async fn update_product(
        &self,
        product: &ProductId,
        update: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes the product with the given id.
    async fn delete_product(&self, product: &ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::models::{Category, CategoryFilter, PriceRange, SortKey},
        test::TestServer,
    };

    use super::*;

    fn shirt() -> NewProduct {
        NewProduct {
            name: "Linen Shirt".to_owned(),
            price: Decimal::from(1299),
            image: "/img/shirt.jpg".to_owned(),
            category: Category::Men,
            description: String::new(),
            is_new: false,
        }
    }

    #[test]
    fn validate_accepts_complete_product() {
        assert!(validate(&shirt()).is_ok(), "complete product should validate");
    }

    #[test]
    fn validate_requires_image() {
        let product = NewProduct {
            image: " ".to_owned(),
            ..shirt()
        };

        assert!(matches!(
            validate(&product),
            Err(ProductsServiceError::InvalidData(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let product = NewProduct {
            price: Decimal::from(-5),
            ..shirt()
        };

        assert!(matches!(
            validate(&product),
            Err(ProductsServiceError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn listing_sends_filters_and_paging_as_query() -> TestResult {
        let server =
            TestServer::respond_with(200, r#"{"products":[],"totalPages":3,"currentPage":2}"#)
                .await?;
        let products = HttpProductsService::new(server.client()?);

        let page = products
            .list_products(ProductQuery {
                category: CategoryFilter::Only(Category::Women),
                search: "linen".to_owned(),
                price: PriceRange {
                    min: Decimal::from(100),
                    max: Decimal::from(2000),
                },
                sort: Some(SortKey::PriceDesc),
                page: 2,
                limit: 12,
            })
            .await?;

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, Some(2));

        let requests = server.requests().await;
        let request = requests.first().ok_or("no request received")?;

        assert_eq!(request.method, "GET");
        assert_eq!(
            request.target,
            "/api/products?category=women&search=linen&minPrice=100&maxPrice=2000&sort=price-desc&page=2&limit=12"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_maps_to_not_found() -> TestResult {
        let server = TestServer::respond_with(404, r#"{"message":"Product not found"}"#).await?;
        let products = HttpProductsService::new(server.client()?);

        let result = products.get_product(&ProductId::new("nope")).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "got {result:?}"
        );

        let requests = server.requests().await;

        assert_eq!(
            requests.first().map(|request| request.target.as_str()),
            Some("/api/products/nope")
        );

        Ok(())
    }
}

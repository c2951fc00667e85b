//! Product Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Closed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Menswear.
    Men,
    /// Womenswear.
    Women,
    /// Children's clothing.
    Kids,
    /// Unisex clothing.
    Unisex,
    /// Bags, belts and the like.
    Accessories,
    /// Sportswear.
    Sports,
    /// Beauty products.
    Beauty,
}

impl Category {
    /// Every category, in storefront menu order.
    pub const ALL: [Self; 7] = [
        Self::Men,
        Self::Women,
        Self::Kids,
        Self::Unisex,
        Self::Accessories,
        Self::Sports,
        Self::Beauty,
    ];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
            Self::Unisex => "unisex",
            Self::Accessories => "accessories",
            Self::Sports => "sports",
            Self::Beauty => "beauty",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Unknown category or size name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError {
                kind: "category",
                value: value.to_owned(),
            })
    }
}

/// Garment size offered on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    /// Extra small.
    XS,
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    XL,
    /// Double extra large.
    XXL,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// Wire name of the size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError {
                kind: "size",
                value: value.to_owned(),
            })
    }
}

/// Decode an optional size, treating a blank string as no size.
pub(crate) fn blank_size_as_none<'de, D>(deserializer: D) -> Result<Option<Size>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(size) => size.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in rupees.
    pub price: Decimal,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Catalogue category.
    pub category: Category,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Shown with a "new" badge.
    #[serde(default)]
    pub is_new: bool,
}

/// New Product Model, also used as the full replacement on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price in rupees.
    pub price: Decimal,
    /// Image URL, required.
    pub image: String,
    /// Catalogue category.
    pub category: Category,
    /// Long description.
    pub description: String,
    /// Shown with a "new" badge.
    pub is_new: bool,
}

/// Category selector for listing; `All` disables the category filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single category.
    Only(Category),
}

impl CategoryFilter {
    /// Value of the `category` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        value.parse().map(Self::Only)
    }
}

/// Server-side ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Cheapest first.
    #[default]
    #[serde(rename = "price-asc")]
    PriceAsc,

    /// Most expensive first.
    #[serde(rename = "price-desc")]
    PriceDesc,
}

impl SortKey {
    /// Value of the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest price, inclusive.
    pub min: Decimal,
    /// Highest price, inclusive.
    pub max: Decimal,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::from(50_000),
        }
    }
}

/// Product listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// Category filter.
    pub category: CategoryFilter,
    /// Search term sent to the server; may be empty.
    pub search: String,
    /// Price bounds.
    pub price: PriceRange,
    /// Ordering; `None` sends an empty `sort`.
    pub sort: Option<SortKey>,
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            price: PriceRange::default(),
            sort: Some(SortKey::PriceAsc),
            page: 1,
            limit: 12,
        }
    }
}

impl ProductQuery {
    /// Query-string parameters understood by `GET /api/products`.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("category", self.category.as_str().to_owned()),
            ("search", self.search.clone()),
            ("minPrice", self.price.min.to_string()),
            ("maxPrice", self.price.max.to_string()),
            ("sort", self.sort.map(SortKey::as_str).unwrap_or_default().to_owned()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Number of pages; one when the backend omits it.
    #[serde(default = "one")]
    pub total_pages: u32,
    /// Page the backend says it returned.
    #[serde(default)]
    pub current_page: Option<u32>,
}

const fn one() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_decodes_backend_shape() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{"_id":"p1","name":"Linen Shirt","price":1299.5,"image":"/img/p1.jpg",
                "category":"men","description":"Breathable","isNew":true,"__v":0}"#,
        )?;

        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Decimal::new(12_995, 1));
        assert_eq!(product.category, Category::Men);
        assert!(product.is_new);

        Ok(())
    }

    #[test]
    fn unknown_category_fails_decode() {
        let result = serde_json::from_str::<Product>(
            r#"{"_id":"p1","name":"Cap","price":10,"category":"hats"}"#,
        );

        assert!(result.is_err(), "closed category set must reject `hats`");
    }

    #[test]
    fn default_query_matches_category_page() {
        let params = ProductQuery::default().to_params();

        assert_eq!(
            params,
            vec![
                ("category", "all".to_owned()),
                ("search", String::new()),
                ("minPrice", "0".to_owned()),
                ("maxPrice", "50000".to_owned()),
                ("sort", "price-asc".to_owned()),
                ("page", "1".to_owned()),
                ("limit", "12".to_owned()),
            ]
        );
    }

    #[test]
    fn category_filter_parses_all_and_names() -> TestResult {
        assert_eq!("all".parse::<CategoryFilter>()?, CategoryFilter::All);
        assert_eq!(
            "Beauty".parse::<CategoryFilter>()?,
            CategoryFilter::Only(Category::Beauty)
        );
        assert!("hats".parse::<CategoryFilter>().is_err(), "hats is not a category");

        Ok(())
    }
}

//! Terminal tables
//!
//! Plain-text renderings of catalog pages, carts, orders and dashboard data
//! for terminal front ends.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    domain::{
        carts::models::{CartItem, cart_total},
        messages::models::Message,
        orders::{
            OrderOverview,
            models::{Order, OrderItem},
        },
        products::models::{Product, ProductPage},
        reviews::models::{Review, average_rating},
        users::models::{Role, User},
    },
    pricing::{line_total, to_money},
};

fn money(amount: Decimal) -> String {
    to_money(amount).to_string()
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Option<std::ops::Range<usize>>,
) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    if let Some(columns) = numeric {
        table.modify(Columns::new(columns), Alignment::right());
    }

    writeln!(out, "{table}")
}

/// One page of catalog results with its pagination line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_products(mut out: impl io::Write, page: &ProductPage) -> io::Result<()> {
    if page.products.is_empty() {
        return writeln!(out, "No products found.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "New"]);

    for product in &page.products {
        builder.push_record(product_row(product));
    }

    write_table(&mut out, builder, Some(3..4))?;

    writeln!(
        out,
        "Page {} of {}",
        page.current_page.unwrap_or(1),
        page.total_pages.max(1)
    )
}

fn product_row(product: &Product) -> [String; 5] {
    [
        product.id.to_string(),
        product.name.clone(),
        product.category.to_string(),
        money(product.price),
        if product.is_new { "yes" } else { "" }.to_owned(),
    ]
}

/// A single product with its description.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_product(
    mut out: impl io::Write,
    product: &Product,
    reviews: &[Review],
) -> io::Result<()> {
    writeln!(out, "{} ({})", product.name, product.category)?;
    writeln!(out, "{}", money(product.price))?;

    if !product.description.is_empty() {
        writeln!(out, "\n{}", product.description)?;
    }

    match average_rating(reviews) {
        Some(average) => writeln!(out, "\nRated {average}/5 from {} reviews", reviews.len())?,
        None => writeln!(out, "\nNo reviews yet")?,
    }

    if reviews.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Rating", "By", "Date", "Comment"]);

    for review in reviews {
        builder.push_record([
            "★".repeat(usize::from(review.rating)),
            review.user.name.clone(),
            review.date.strftime("%Y-%m-%d").to_string(),
            review.comment.clone(),
        ]);
    }

    write_table(&mut out, builder, None)
}

/// Cart lines followed by the recomputed total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, items: &[CartItem]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["Line", "Product", "Size", "Qty", "Price", "Subtotal"]);

    for item in items {
        builder.push_record([
            item.id.to_string(),
            item.product.name.clone(),
            item.size.map(|size| size.to_string()).unwrap_or_default(),
            item.quantity.to_string(),
            money(item.product.price),
            money(item.line_total()),
        ]);
    }

    write_table(&mut out, builder, Some(3..6))?;

    writeln!(out, "Total: {}", money(cart_total(items)))
}

/// Order list for the orders view.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_orders(mut out: impl io::Write, orders: &[Order]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders yet.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Customer", "Items", "Total", "Status", "Payment"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.created_at.strftime("%Y-%m-%d").to_string(),
            order
                .user
                .as_ref()
                .map(|user| user.name().map_or_else(|| user.id().to_string(), str::to_owned))
                .unwrap_or_default(),
            order.items.len().to_string(),
            money(order.total),
            order.status.to_string(),
            order.payment_status.to_string(),
        ]);
    }

    write_table(&mut out, builder, Some(3..5))
}

/// Invoice for a single order, as offered for download from the orders view.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_invoice(mut out: impl io::Write, order: &Order) -> io::Result<()> {
    writeln!(out, "Invoice #{}", order.invoice_number())?;
    writeln!(out, "Order date: {}", order.created_at.strftime("%Y-%m-%d"))?;
    writeln!(out, "Status: {}", order.status)?;

    if let Some(user) = &order.user {
        writeln!(out, "Billed to: {}", user.name().unwrap_or("N/A"))?;
    }

    writeln!(out, "Shipping address: {}", order.address)?;

    let mut builder = Builder::default();

    builder.push_record(["Product", "Size", "Qty", "Price"]);

    for item in &order.items {
        builder.push_record(invoice_row(item));
    }

    write_table(&mut out, builder, Some(2..4))?;

    writeln!(out, "Payment status: {}", order.payment_status)?;
    writeln!(out, "Total: {}", money(order.total))
}

fn invoice_row(item: &OrderItem) -> [String; 4] {
    let name = item
        .product
        .as_ref()
        .map(|product| {
            product
                .name()
                .map_or_else(|| product.id().to_string(), str::to_owned)
        })
        .unwrap_or_else(|| "(deleted product)".to_owned());

    [
        name,
        item.size.map(|size| size.to_string()).unwrap_or_default(),
        item.quantity.to_string(),
        money(line_total(item.price, item.quantity)),
    ]
}

/// Headline figures and the monthly sales series.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_overview(mut out: impl io::Write, overview: &OrderOverview) -> io::Result<()> {
    writeln!(out, "Total revenue:  {}", money(overview.total_revenue))?;
    writeln!(out, "Total orders:   {}", overview.total_orders)?;
    writeln!(out, "Pending orders: {}", overview.pending_orders)?;

    let mut builder = Builder::default();

    builder.push_record(["Month", "Sales"]);

    for (month, sales) in overview.sales_series() {
        builder.push_record([month.to_owned(), money(sales)]);
    }

    write_table(&mut out, builder, Some(1..2))
}

/// Account table for the admin dashboard.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_users(mut out: impl io::Write, users: &[User]) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Email", "Role", "Phone"]);

    for user in users {
        builder.push_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            match user.role {
                Role::Admin => "admin",
                Role::User => "user",
            }
            .to_owned(),
            user.phone.clone().unwrap_or_default(),
        ]);
    }

    write_table(&mut out, builder, None)
}

/// Contact inbox, in the order the backend lists it.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_messages(mut out: impl io::Write, messages: &[Message]) -> io::Result<()> {
    if messages.is_empty() {
        return writeln!(out, "Inbox is empty.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Received", "From", "Subject", "Message"]);

    for message in messages {
        builder.push_record([
            message.id.to_string(),
            message.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
            format!("{} <{}>", message.name, message.email),
            message.subject.clone(),
            message.message.clone(),
        ]);
    }

    write_table(&mut out, builder, None)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::{
        carts::models::CartItemId,
        orders::models::{OrderId, OrderStatus, PaymentStatus, ProductRef, ProductSummary},
        products::models::{Category, ProductId, Size},
    };

    use super::*;

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::from(price),
            image: String::new(),
            category: Category::Men,
            description: String::new(),
            is_new: false,
        }
    }

    #[test]
    fn cart_table_lists_lines_and_total() -> TestResult {
        let items = [
            CartItem {
                id: CartItemId::new("c1"),
                product: product("p1", "Linen Shirt", 500),
                quantity: 2,
                size: Some(Size::M),
            },
            CartItem {
                id: CartItemId::new("c2"),
                product: product("p2", "Chinos", 1200),
                quantity: 1,
                size: None,
            },
        ];

        let mut out = Vec::new();

        write_cart(&mut out, &items)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Linen Shirt"), "{rendered}");
        assert!(rendered.contains("Chinos"), "{rendered}");
        assert!(
            rendered.contains(&format!("Total: {}", money(Decimal::from(2200)))),
            "{rendered}"
        );

        Ok(())
    }

    #[test]
    fn empty_cart_says_so() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "Your cart is empty\n");

        Ok(())
    }

    #[test]
    fn invoice_uses_purchase_time_prices() -> TestResult {
        let order = Order {
            id: OrderId::new("665f00000000000000abcdef"),
            user: None,
            items: vec![OrderItem {
                product: Some(ProductRef::Summary(ProductSummary {
                    id: ProductId::new("p1"),
                    name: "Linen Shirt".to_owned(),
                    image: String::new(),
                    price: Some(Decimal::from(999)),
                })),
                quantity: 2,
                size: Some(Size::L),
                price: Decimal::from(450),
            }],
            total: Decimal::from(900),
            payment_id: "pay_1".to_owned(),
            status: OrderStatus::Completed,
            payment_status: PaymentStatus::Completed,
            address: "12 MG Road".to_owned(),
            created_at: "2024-03-05T10:00:00Z".parse::<Timestamp>()?,
        };

        let mut out = Vec::new();

        write_invoice(&mut out, &order)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Invoice #00ABCDEF"), "{rendered}");
        assert!(rendered.contains(&money(Decimal::from(900))), "{rendered}");
        assert!(!rendered.contains(&money(Decimal::from(1998))), "{rendered}");

        Ok(())
    }
}

//! Admin sales overview.

use jiff::tz::TimeZone;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::orders::models::{Order, OrderStatus};

/// Short month labels, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOverview {
    /// Sum of every order total.
    pub total_revenue: Decimal,
    /// Number of orders.
    pub total_orders: usize,
    /// Orders still [`OrderStatus::Pending`].
    pub pending_orders: usize,

    /// Order totals bucketed by calendar month of creation (UTC), January
    /// first. Orders from different years share a bucket.
    pub monthly_sales: [Decimal; 12],

    /// Number of orders per status; absent statuses have no orders.
    pub status_counts: FxHashMap<OrderStatus, usize>,
}

impl OrderOverview {
    /// Aggregate `orders` into dashboard figures.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut monthly_sales = [Decimal::ZERO; 12];
        let mut status_counts = FxHashMap::default();

        for order in orders {
            let month = order.created_at.to_zoned(TimeZone::UTC).month();

            if let Some(bucket) = usize::try_from(month - 1)
                .ok()
                .and_then(|index| monthly_sales.get_mut(index))
            {
                *bucket += order.total;
            }

            *status_counts.entry(order.status).or_insert(0) += 1;
        }

        Self {
            total_revenue: orders.iter().map(|order| order.total).sum(),
            total_orders: orders.len(),
            pending_orders: status_counts
                .get(&OrderStatus::Pending)
                .copied()
                .unwrap_or_default(),
            monthly_sales,
            status_counts,
        }
    }

    /// `(label, sales)` pairs for a sales chart.
    pub fn sales_series(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        MONTH_LABELS.into_iter().zip(self.monthly_sales.iter().copied())
    }
}

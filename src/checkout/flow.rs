//! Checkout flow.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    sync::Arc,
};

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::{
    auth::Session,
    checkout::{CheckoutError, CheckoutOutcome, CheckoutState},
    domain::{
        carts::{
            CartsService,
            models::{CartItem, cart_total},
        },
        orders::{
            OrdersService,
            models::{NewOrder, Order},
        },
        payments::{
            PaymentOutcome, PaymentReceipt, PaymentRequest, PaymentWidget, PaymentsService,
            PaymentsServiceError, Prefill, models::NewPaymentIntent,
        },
    },
    http::CancelToken,
};

/// One pass through checkout for the signed-in shopper.
pub struct CheckoutFlow {
    carts: Arc<dyn CartsService>,
    payments: Arc<dyn PaymentsService>,
    orders: Arc<dyn OrdersService>,
    token: CancelToken,
    state: CheckoutState,
    items: Vec<CartItem>,
    address: String,
}

impl CheckoutFlow {
    /// Flow in [`CheckoutState::LoadingCart`]; every request it makes is
    /// abandoned once `token` is cancelled.
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        payments: Arc<dyn PaymentsService>,
        orders: Arc<dyn OrdersService>,
        token: CancelToken,
    ) -> Self {
        Self {
            carts,
            payments,
            orders,
            token,
            state: CheckoutState::LoadingCart,
            items: Vec::new(),
            address: String::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Cart lines being checked out.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of the cart lines at their current prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.items)
    }

    /// Shipping address as entered, or as locked in once payment started.
    #[must_use]
    pub fn address(&self) -> &str {
        match &self.state {
            CheckoutState::ProcessingPayment { address, .. } => address,
            _ => &self.address,
        }
    }

    /// Fetch the cart. Guests, empty carts and failed fetches all land in
    /// [`CheckoutState::EmptyCart`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidState`]: payment is already under way or done.
    /// - [`CheckoutError::Cart`]: the cart could not be fetched.
    #[instrument(skip_all)]
    pub async fn load(&mut self, session: Option<&Session>) -> Result<(), CheckoutError> {
        if matches!(
            self.state,
            CheckoutState::ProcessingPayment { .. } | CheckoutState::Completed { .. }
        ) {
            return Err(self.invalid("load the cart"));
        }

        self.state = CheckoutState::LoadingCart;

        let Some(session) = session else {
            self.items.clear();
            self.state = CheckoutState::EmptyCart;

            return Ok(());
        };

        let loaded = self
            .guarded("load cart", self.carts.get_cart(session.user_id()))
            .await;

        match loaded {
            Ok(items) => {
                self.state = if items.is_empty() {
                    CheckoutState::EmptyCart
                } else {
                    CheckoutState::AwaitingAddress
                };
                self.items = items;

                debug!(lines = self.items.len(), state = self.state.name(), "cart loaded");

                Ok(())
            }
            Err(error) => {
                self.items.clear();
                self.state = CheckoutState::EmptyCart;

                Err(error)
            }
        }
    }

    /// Record the shipping address. Any text is accepted; only blank input
    /// keeps payment disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] once payment has started: the
    /// order is placed with the address the intent was created for.
    pub fn set_address(&mut self, address: impl Into<String>) -> Result<(), CheckoutError> {
        if matches!(
            self.state,
            CheckoutState::ProcessingPayment { .. } | CheckoutState::Completed { .. }
        ) {
            return Err(self.invalid("change the address"));
        }

        self.address = address.into();

        Ok(())
    }

    /// Whether the pay action is enabled.
    #[must_use]
    pub fn can_pay(&self) -> bool {
        matches!(self.state, CheckoutState::AwaitingAddress)
            && !self.items.is_empty()
            && !self.address.trim().is_empty()
    }

    /// Pre-create a payment intent for the cart total and enter
    /// [`CheckoutState::ProcessingPayment`].
    ///
    /// Returns what the payment widget must be opened with.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] / [`CheckoutError::AddressRequired`]:
    ///   payment is not enabled yet.
    /// - [`CheckoutError::Payment`]: the intent could not be created; the flow
    ///   stays in [`CheckoutState::AwaitingAddress`] so the shopper can retry.
    #[instrument(skip_all)]
    pub async fn begin_payment(
        &mut self,
        session: &Session,
    ) -> Result<PaymentRequest, CheckoutError> {
        if !matches!(self.state, CheckoutState::AwaitingAddress) {
            return Err(self.invalid("start payment"));
        }

        if self.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address = self.address.trim();

        if address.is_empty() {
            return Err(CheckoutError::AddressRequired);
        }

        let address = address.to_owned();

        let intent =
            NewPaymentIntent::for_total(self.total()).map_err(PaymentsServiceError::from)?;

        let intent = self
            .guarded("create payment intent", self.payments.create_intent(intent))
            .await?;

        info!(intent = %intent.id, amount = intent.amount, "payment started");

        self.state = CheckoutState::ProcessingPayment {
            intent: intent.clone(),
            address,
        };

        let user = session.user();

        Ok(PaymentRequest {
            intent,
            description: format!("Order for {}", user.name),
            prefill: Prefill {
                name: user.name.clone(),
                email: user.email.clone(),
                contact: user.phone.clone(),
            },
        })
    }

    /// The widget was closed without paying; go back to the address step
    /// with the cart intact.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] outside of payment processing.
    pub fn dismiss_payment(&mut self) -> Result<(), CheckoutError> {
        if !matches!(self.state, CheckoutState::ProcessingPayment { .. }) {
            return Err(self.invalid("dismiss payment"));
        }

        debug!("payment dismissed");

        self.state = CheckoutState::AwaitingAddress;

        Ok(())
    }

    /// Record the order for a captured payment and clear the cart.
    ///
    /// A failed order creation leaves the flow in
    /// [`CheckoutState::ProcessingPayment`] so completion can be retried. No
    /// idempotency key is sent, so the backend cannot tell a retry from a new
    /// order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidState`]: no payment is being processed.
    /// - [`CheckoutError::Order`]: the order could not be created.
    /// - [`CheckoutError::CartNotCleared`]: the order was created (the flow is
    ///   [`CheckoutState::Completed`]) but the remote cart still has its lines.
    ///
    /// Returns `None` when the backend accepted the order without sending it
    /// back; the flow still completes.
    #[instrument(skip_all, fields(payment = %receipt.payment_id))]
    pub async fn complete_payment(
        &mut self,
        session: &Session,
        receipt: PaymentReceipt,
    ) -> Result<Option<&Order>, CheckoutError> {
        let CheckoutState::ProcessingPayment { address, .. } = &self.state else {
            return Err(self.invalid("complete payment"));
        };

        let order = NewOrder::from_cart(
            session.user_id().clone(),
            &self.items,
            receipt.payment_id,
            address,
        );

        let order = self
            .guarded("create order", self.orders.create_order(order))
            .await?;

        match &order {
            Some(order) => info!(order = %order.id, total = %order.total, "order created"),
            None => info!("order created without details"),
        }

        let cleared = self
            .token
            .run(self.carts.clear_cart(session.user_id()))
            .await;

        let order_id = order.as_ref().map(|order| order.id.clone());

        self.items.clear();
        self.state = CheckoutState::Completed {
            order: order.map(Box::new),
        };

        match cleared {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                warn!(order = ?order_id, error = %source, "failed to clear cart after order");

                return Err(CheckoutError::CartNotCleared {
                    order: order_id,
                    source,
                });
            }
            Err(cancelled) => return Err(cancelled.into()),
        }

        match &self.state {
            CheckoutState::Completed { order } => Ok(order.as_deref()),
            _ => Err(self.invalid("complete payment")),
        }
    }

    /// Run the whole payment step through `widget`.
    ///
    /// Returns [`CheckoutOutcome::Placed`] once the order exists, or
    /// [`CheckoutOutcome::Dismissed`] if the shopper closed the widget.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::begin_payment`] or [`Self::complete_payment`].
    /// A widget failure is treated like a dismissal before being reported.
    pub async fn pay(
        &mut self,
        session: &Session,
        widget: &dyn PaymentWidget,
    ) -> Result<CheckoutOutcome<'_>, CheckoutError> {
        let request = self.begin_payment(session).await?;

        match widget.open(request).await {
            Ok(PaymentOutcome::Paid(receipt)) => self
                .complete_payment(session, receipt)
                .await
                .map(CheckoutOutcome::Placed),
            Ok(PaymentOutcome::Dismissed) => {
                self.dismiss_payment()?;

                Ok(CheckoutOutcome::Dismissed)
            }
            Err(error) => {
                warn!(error = %error, "payment widget failed");

                self.dismiss_payment()?;

                Err(error.into())
            }
        }
    }

    /// Take the completed order out of a finished flow.
    ///
    /// `None` until the flow completes, and also when the backend accepted
    /// the order without sending it back.
    #[must_use]
    pub fn into_order(self) -> Option<Order> {
        match self.state {
            CheckoutState::Completed { order } => order.map(|order| *order),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidState {
            action,
            state: self.state.name(),
        }
    }

    async fn guarded<T, E>(
        &self,
        step: &'static str,
        request: impl Future<Output = Result<T, E>>,
    ) -> Result<T, CheckoutError>
    where
        E: std::error::Error,
        CheckoutError: From<E>,
    {
        match self.token.run(request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!(step, error = %error, "checkout step failed");

                Err(error.into())
            }
            Err(cancelled) => {
                debug!(step, "checkout step cancelled");

                Err(cancelled.into())
            }
        }
    }
}

impl Debug for CheckoutFlow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state.name())
            .field("lines", &self.items.len())
            .finish_non_exhaustive()
    }
}

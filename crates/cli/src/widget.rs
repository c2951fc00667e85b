//! Terminal stand-in for the hosted payment widget.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout, stdin, stdout},
    sync::Mutex,
};

use storefront::{
    domain::payments::{
        PaymentOutcome, PaymentReceipt, PaymentRequest, PaymentWidget, PaymentWidgetError,
    },
    pricing::to_money,
};

/// Shows the payment request on stdout and reads the provider's payment id
/// from stdin. A blank line closes the widget without paying.
#[derive(Debug)]
pub(crate) struct TerminalPaymentWidget {
    input: Mutex<BufReader<Stdin>>,
    output: Mutex<Stdout>,
}

impl TerminalPaymentWidget {
    pub(crate) fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(stdin())),
            output: Mutex::new(stdout()),
        }
    }
}

#[async_trait]
impl PaymentWidget for TerminalPaymentWidget {
    async fn open(&self, request: PaymentRequest) -> Result<PaymentOutcome, PaymentWidgetError> {
        let prompt = render_prompt(&request);

        {
            let mut output = self.output.lock().await;

            output.write_all(prompt.as_bytes()).await?;
            output.flush().await?;
        }

        let mut line = String::new();

        let read = self.input.lock().await.read_line(&mut line).await?;

        if read == 0 {
            return Err(PaymentWidgetError::Unavailable(
                "stdin closed before the payment finished".to_owned(),
            ));
        }

        Ok(outcome(&request, &line))
    }
}

fn render_prompt(request: &PaymentRequest) -> String {
    let amount = Decimal::new(
        i64::try_from(request.intent.amount).unwrap_or(i64::MAX),
        2,
    );

    format!(
        "{}\nAmount: {}\nPaying as {} <{}>\nEnter the payment id to confirm, or leave blank to cancel: ",
        request.description,
        to_money(amount),
        request.prefill.name,
        request.prefill.email,
    )
}

fn outcome(request: &PaymentRequest, line: &str) -> PaymentOutcome {
    let payment_id = line.trim();

    if payment_id.is_empty() {
        return PaymentOutcome::Dismissed;
    }

    PaymentOutcome::Paid(PaymentReceipt {
        payment_id: payment_id.to_owned(),
        order_id: request.intent.id.clone(),
        signature: String::new(),
    })
}

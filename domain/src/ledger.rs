//! Pure ledger arithmetic for one reservation.
//!
//! Every mutation runs the payment sequence through [`process`] so that the
//! derived figures persisted with the document, the synchronous response and
//! every broadcast all carry identical numbers.

use crate::error::Error;
use entity::payments::Payment;

/// Result of walking a payment sequence against a declared total price.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// The input payments with their `monto_pendiente` snapshots rewritten.
    pub payments: Vec<Payment>,
    pub total_paid: f64,
    /// `total - total_paid`; equals the last payment's snapshot, or the
    /// full total when there are no payments.
    pub pending_balance: f64,
}

/// Walk `payments` in order, accumulating the running paid total and
/// attaching to each payment the balance still owed immediately after it.
///
/// Fails with an overpayment error when the accumulated amount strictly
/// exceeds `total`; callers must reject the whole mutation before anything
/// is persisted. No side effects: identical input always produces an
/// identical `Ledger`.
pub fn process(payments: Vec<Payment>, total: f64) -> Result<Ledger, Error> {
    let mut total_paid = 0.0;

    let payments: Vec<Payment> = payments
        .into_iter()
        .map(|mut payment| {
            total_paid += payment.amount;
            payment.monto_pendiente = total - total_paid;
            payment
        })
        .collect();

    if total_paid > total {
        return Err(Error::overpayment(total, total_paid));
    }

    Ok(Ledger {
        payments,
        total_paid,
        pending_balance: total - total_paid,
    })
}

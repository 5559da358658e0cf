//! Monthly per-method totals over the document store.

use crate::error::Error;
use entity::monthly_totals::MonthlyTotals;
use entity::payment_method::PaymentMethod;
use entity::Id;
use entity_api::ReservationStore;
use log::*;

/// Sum declared reservation price per payment method for one calendar
/// month of a user's stays.
///
/// The grouping happens store-side over the raw `payment_method` strings;
/// reservations carrying a method outside the canonical set are silently
/// excluded so the result shape stays fixed. When no year is given the
/// query matches the month across all years, mirroring the aggregation
/// this replaces.
pub async fn monthly_totals(
    store: &dyn ReservationStore,
    user_id: Id,
    month: u32,
    year: Option<i32>,
) -> Result<MonthlyTotals, Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::validation(format!("invalid month: {month}")));
    }

    let sums = store.sum_price_by_method(user_id, month, year).await?;

    let mut totals = MonthlyTotals::default();
    for (method, sum) in sums {
        match method.parse::<PaymentMethod>() {
            Ok(method) => totals.add(method, sum),
            Err(_) => {
                debug!("Excluding non-canonical payment method {method:?} from monthly totals")
            }
        }
    }

    Ok(totals)
}

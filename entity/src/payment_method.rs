use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// The fixed set of payment methods the billing side understands.
/// Reservations carrying any other method string are excluded from the
/// monthly per-method totals rather than widening the result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Deposit,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PaymentMethodParseError;

impl FromStr for PaymentMethod {
    type Err = PaymentMethodParseError;

    fn from_str(method: &str) -> Result<PaymentMethod, Self::Err> {
        match method.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "deposit" => Ok(PaymentMethod::Deposit),
            _ => Err(PaymentMethodParseError),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(fmt, "cash"),
            PaymentMethod::Card => write!(fmt, "card"),
            PaymentMethod::Deposit => write!(fmt, "deposit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_methods_case_insensitively() {
        assert_eq!("cash".parse(), Ok(PaymentMethod::Cash));
        assert_eq!("Card".parse(), Ok(PaymentMethod::Card));
        assert_eq!("DEPOSIT".parse(), Ok(PaymentMethod::Deposit));
    }

    #[test]
    fn rejects_unknown_method_strings() {
        assert_eq!(
            "barter".parse::<PaymentMethod>(),
            Err(PaymentMethodParseError)
        );
    }
}

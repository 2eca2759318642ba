//! Price Calculator
//!
//! Uses rust_decimal for the arithmetic, f64 at the boundaries
//! (stored and serialized values are f64, 2 decimal places).

use crate::models::{Discount, ItemLine, Price};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Currency suffix used on the reservation form
const CURRENCY_SUFFIX: &str = "zł";

/// Largest amount (price, payroll, discount) accepted at the API boundary
pub const MAX_AMOUNT: f64 = 1e12;

/// Largest item count on a single line
pub const MAX_ITEM_COUNT: i64 = 10_000;

/// Item price id -> unit cost
pub type PriceLookup = HashMap<i64, f64>;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Discount as seen by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTerms {
    pub is_percentage: bool,
    /// Percentage (20 = 20%) or flat amount
    pub value: f64,
}

impl DiscountTerms {
    pub fn percentage(value: f64) -> Self {
        Self {
            is_percentage: true,
            value,
        }
    }

    pub fn flat(value: f64) -> Self {
        Self {
            is_percentage: false,
            value,
        }
    }
}

impl From<&Discount> for DiscountTerms {
    fn from(discount: &Discount) -> Self {
        Self {
            is_percentage: discount.is_percentage,
            value: discount.value,
        }
    }
}

/// Build the item price lookup from a price list (service prices are ignored)
pub fn item_price_lookup(prices: &[Price]) -> PriceLookup {
    prices
        .iter()
        .filter(|p| p.is_item)
        .map(|p| (p.id, p.cost))
        .collect()
}

/// Cost of a single line: `count * unit cost`
///
/// `None` when the line has no price/count yet or its price is unknown.
pub fn line_cost(line: &ItemLine, item_prices: &PriceLookup) -> Option<f64> {
    let price_id = line.price_id?;
    let count = line.count?;
    let cost = item_prices.get(&price_id)?;
    to_decimal(*cost).checked_mul(Decimal::from(count)).map(to_f64)
}

/// Compute the reservation total
///
/// - only complete lines (item, price and positive count) are counted
/// - a line whose price is missing from `item_prices` is skipped
/// - a line whose cost does not fit in a `Decimal` is skipped
/// - the discount is applied once, to the running total
/// - the result is never negative
pub fn compute_total(
    base_cost: f64,
    items: &[ItemLine],
    item_prices: &PriceLookup,
    discount: Option<DiscountTerms>,
) -> f64 {
    let mut total = to_decimal(base_cost);

    for line in items {
        let Some((_, price_id, count)) = line.complete() else {
            continue;
        };
        let Some(cost) = item_prices.get(&price_id) else {
            tracing::debug!(price_id, "Item price not found, line skipped");
            continue;
        };
        let sum = to_decimal(*cost)
            .checked_mul(Decimal::from(count))
            .and_then(|line| total.checked_add(line));
        match sum {
            Some(sum) => total = sum,
            None => tracing::warn!(price_id, count, "Line cost overflows, line skipped"),
        }
    }

    if let Some(discount) = discount {
        let value = to_decimal(discount.value);
        let discounted = if discount.is_percentage {
            total
                .checked_mul(value)
                .map(|cut| cut / Decimal::ONE_HUNDRED)
                .and_then(|cut| total.checked_sub(cut))
        } else {
            total.checked_sub(value)
        };
        // 溢出只会发生在折扣超过总额时
        total = discounted.unwrap_or(Decimal::ZERO);
    }

    to_f64(total.max(Decimal::ZERO))
}

/// Format an amount the way the reservation form shows it (`12.50zł`)
pub fn format_price(amount: f64) -> String {
    format!("{:.2}{}", amount, CURRENCY_SUFFIX)
}

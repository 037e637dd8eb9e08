use crate::types::{CommandlineArgs, Error, OrderRequest, OrderType, RiskParams, Side};

use regex::Regex;
use std::str::FromStr;

/// Run all checks on the parsed arguments and produce the validated order
/// plus optional TP/SL levels. Fails on the first violated rule with the
/// offending field named; nothing has touched the network at this point.
///
/// This is a pure function of its input. The same arguments always produce
/// the same `OrderRequest`.
pub fn validate(args: &CommandlineArgs) -> Result<(OrderRequest, RiskParams), Error> {
    let symbol = validate_symbol(&args.symbol)?;
    let side = Side::from_str(&args.side)
        .map_err(|reason| Error::Validation { field: "side", reason })?;
    let order_type = OrderType::from_str(&args.order_type)
        .map_err(|reason| Error::Validation { field: "type", reason })?;
    let quantity = positive_decimal("quantity", &args.quantity)?;

    // price is required for LIMIT/STOP_LIMIT and ignored for MARKET
    let price = if order_type.requires_price() {
        match &args.price {
            Some(raw) => Some(positive_decimal("price", raw)?),
            None => {
                return Err(Error::Validation {
                    field: "price",
                    reason: format!("required for {} orders", order_type),
                })
            }
        }
    } else {
        None
    };

    let stop_price = if order_type.requires_stop_price() {
        match &args.stop_price {
            Some(raw) => Some(positive_decimal("stop-price", raw)?),
            None => {
                return Err(Error::Validation {
                    field: "stop-price",
                    reason: format!("required for {} orders", order_type),
                })
            }
        }
    } else {
        None
    };

    // TP/SL only need to be positive numbers. Where they sit relative to the
    // entry price or to each other is left to the exchange to judge.
    let take_profit = match &args.tp {
        Some(raw) => Some(positive_decimal("tp", raw)?),
        None => None,
    };
    let stop_loss = match &args.sl {
        Some(raw) => Some(positive_decimal("sl", raw)?),
        None => None,
    };

    Ok((
        OrderRequest {
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
        },
        RiskParams {
            take_profit,
            stop_loss,
        },
    ))
}

/// Symbol must be non-empty uppercase alphanumeric after normalization,
/// e.g. BTCUSDT.
fn validate_symbol(raw: &str) -> Result<String, Error> {
    let symbol = raw.trim().to_uppercase();
    // unwrap is fine, pattern is a compile-time constant
    let re = Regex::new(r"^[A-Z0-9]+$").unwrap();
    if !re.is_match(&symbol) {
        return Err(Error::Validation {
            field: "symbol",
            reason: format!("'{}' must be non-empty uppercase alphanumeric, e.g. BTCUSDT", symbol),
        });
    }
    Ok(symbol)
}

/// Parse a field as a finite, strictly positive decimal.
fn positive_decimal(field: &'static str, raw: &str) -> Result<f64, Error> {
    let value: f64 = raw.trim().parse().map_err(|_| Error::Validation {
        field,
        reason: format!("'{}' is not a number", raw),
    })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation {
            field,
            reason: format!("must be a positive number, got {}", raw),
        });
    }
    Ok(value)
}

use crate::client::PlaceOrder;
use crate::defines::DEFAULT_TIME_IN_FORCE;
use crate::types::{Error, NewOrder, OrderAck, OrderRequest, OrderType, RiskParams};

use tracing::info;

/// Build and submit the primary order.
pub fn place_order(api: &impl PlaceOrder, order: &OrderRequest) -> Result<OrderAck, Error> {
    api.place_order(&primary_order(order))
}

/// Submit the optional take-profit and stop-loss child orders, in that
/// order. Each child closes the primary position: opposite side, same
/// quantity, trigger at the requested level.
///
/// Submissions are sequential and non-atomic. The exchange offers no
/// multi-order transaction, so a failure here leaves every previously
/// acknowledged order (including the primary) live; the first error halts
/// the sequence and surfaces to the caller.
pub fn attach_risk_orders(
    api: &impl PlaceOrder,
    order: &OrderRequest,
    risk: &RiskParams,
) -> Result<Vec<OrderAck>, Error> {
    let mut acks = Vec::new();
    if let Some(level) = risk.take_profit {
        info!("attaching take-profit @ {}", level);
        acks.push(api.place_order(&closing_order(order, "TAKE_PROFIT_MARKET", level))?);
    }
    if let Some(level) = risk.stop_loss {
        info!("attaching stop-loss @ {}", level);
        acks.push(api.place_order(&closing_order(order, "STOP_MARKET", level))?);
    }
    Ok(acks)
}

/// Wire-level request for the primary order. MARKET carries no price
/// fields at all; LIMIT carries price; stop-limit maps to the exchange's
/// STOP type and carries both price and stopPrice. Priced orders are GTC.
fn primary_order(order: &OrderRequest) -> NewOrder {
    let (wire_type, price, stop_price) = match order.order_type {
        OrderType::Market => ("MARKET", None, None),
        OrderType::Limit => ("LIMIT", order.price, None),
        OrderType::StopLimit => ("STOP", order.price, order.stop_price),
    };
    NewOrder {
        symbol: order.symbol.clone(),
        side: order.side.as_str(),
        order_type: wire_type,
        quantity: order.quantity,
        price,
        stop_price,
        time_in_force: price.map(|_| DEFAULT_TIME_IN_FORCE),
    }
}

/// A trigger order closing the primary position at the given level.
fn closing_order(order: &OrderRequest, wire_type: &'static str, level: f64) -> NewOrder {
    NewOrder {
        symbol: order.symbol.clone(),
        side: order.side.opposite().as_str(),
        order_type: wire_type,
        quantity: order.quantity,
        price: None,
        stop_price: Some(level),
        time_in_force: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use std::cell::RefCell;

    /// Records every submission; optionally fails the nth one.
    struct MockApi {
        calls: RefCell<Vec<NewOrder>>,
        fail_on: Option<usize>,
    }

    impl MockApi {
        fn new() -> MockApi {
            MockApi { calls: RefCell::new(Vec::new()), fail_on: None }
        }

        fn failing_on(call_index: usize) -> MockApi {
            MockApi { calls: RefCell::new(Vec::new()), fail_on: Some(call_index) }
        }
    }

    impl PlaceOrder for MockApi {
        fn place_order(&self, order: &NewOrder) -> Result<OrderAck, Error> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push(order.clone());
            if self.fail_on == Some(index) {
                return Err(Error::Submission {
                    code: -2021,
                    msg: "Order would immediately trigger.".to_string(),
                });
            }
            Ok(OrderAck {
                order_id: 1000 + index as u64,
                symbol: order.symbol.clone(),
                status: "NEW".to_string(),
                ..OrderAck::default()
            })
        }
    }

    fn request(symbol: &str, side: Side, order_type: OrderType, quantity: f64) -> OrderRequest {
        OrderRequest {
            symbol: symbol.to_string(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
        }
    }

    #[test]
    fn market_order_submits_once_with_no_price_fields() {
        let api = MockApi::new();
        let order = request("BTCUSDT", Side::Buy, OrderType::Market, 0.001);
        place_order(&api, &order).unwrap();

        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].order_type, "MARKET");
        assert_eq!(calls[0].side, "BUY");
        assert_eq!(calls[0].quantity, 0.001);
        assert_eq!(calls[0].price, None);
        assert_eq!(calls[0].stop_price, None);
        assert_eq!(calls[0].time_in_force, None);
    }

    #[test]
    fn limit_order_carries_price_and_gtc() {
        let api = MockApi::new();
        let mut order = request("ETHUSDT", Side::Sell, OrderType::Limit, 0.05);
        order.price = Some(3200.0);
        place_order(&api, &order).unwrap();

        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].order_type, "LIMIT");
        assert_eq!(calls[0].price, Some(3200.0));
        assert_eq!(calls[0].stop_price, None);
        assert_eq!(calls[0].time_in_force, Some("GTC"));
    }

    #[test]
    fn stop_limit_maps_to_stop_with_both_prices() {
        let api = MockApi::new();
        let mut order = request("BTCUSDT", Side::Buy, OrderType::StopLimit, 0.002);
        order.price = Some(100000.0);
        order.stop_price = Some(99500.0);
        place_order(&api, &order).unwrap();

        let calls = api.calls.borrow();
        assert_eq!(calls[0].order_type, "STOP");
        assert_eq!(calls[0].price, Some(100000.0));
        assert_eq!(calls[0].stop_price, Some(99500.0));
        assert_eq!(calls[0].time_in_force, Some("GTC"));
    }

    #[test]
    fn tp_and_sl_on_market_buy_make_three_submissions_in_order() {
        let api = MockApi::new();
        let order = request("BTCUSDT", Side::Buy, OrderType::Market, 0.002);
        let risk = RiskParams { take_profit: Some(70000.0), stop_loss: Some(55000.0) };

        place_order(&api, &order).unwrap();
        let acks = attach_risk_orders(&api, &order, &risk).unwrap();
        assert_eq!(acks.len(), 2);

        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].order_type, "MARKET");
        assert_eq!(calls[0].side, "BUY");

        assert_eq!(calls[1].order_type, "TAKE_PROFIT_MARKET");
        assert_eq!(calls[1].side, "SELL");
        assert_eq!(calls[1].quantity, 0.002);
        assert_eq!(calls[1].stop_price, Some(70000.0));
        assert_eq!(calls[1].price, None);

        assert_eq!(calls[2].order_type, "STOP_MARKET");
        assert_eq!(calls[2].side, "SELL");
        assert_eq!(calls[2].quantity, 0.002);
        assert_eq!(calls[2].stop_price, Some(55000.0));
    }

    #[test]
    fn risk_orders_close_a_sell_with_buys() {
        let api = MockApi::new();
        let order = request("ETHUSDT", Side::Sell, OrderType::Market, 0.05);
        let risk = RiskParams { take_profit: Some(2800.0), stop_loss: None };
        attach_risk_orders(&api, &order, &risk).unwrap();

        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].side, "BUY");
        assert_eq!(calls[0].order_type, "TAKE_PROFIT_MARKET");
    }

    #[test]
    fn failed_take_profit_halts_before_stop_loss() {
        // call 0 is the primary, call 1 (take-profit) fails
        let api = MockApi::failing_on(1);
        let order = request("BTCUSDT", Side::Buy, OrderType::Market, 0.002);
        let risk = RiskParams { take_profit: Some(70000.0), stop_loss: Some(55000.0) };

        place_order(&api, &order).unwrap();
        let err = attach_risk_orders(&api, &order, &risk).unwrap_err();
        assert!(matches!(err, Error::Submission { code: -2021, .. }));

        // the stop-loss was never attempted; the primary stays acknowledged
        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].order_type, "TAKE_PROFIT_MARKET");
    }

    #[test]
    fn no_risk_params_means_no_extra_submissions() {
        let api = MockApi::new();
        let order = request("BTCUSDT", Side::Buy, OrderType::Market, 0.001);
        let acks = attach_risk_orders(&api, &order, &RiskParams::default()).unwrap();
        assert!(acks.is_empty());
        assert!(api.calls.borrow().is_empty());
    }
}

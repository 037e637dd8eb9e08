mod client;
mod defines;
mod dispatch;
mod impls;
mod logging;
mod types;
mod util;
mod validate;

use clap::Parser;
use tracing::error;
use types::*;

fn main() {
    // parse arguments via clap; numeric fields stay raw text so the
    // validator owns every domain error
    let cmd_args = CommandlineArgs::parse();

    if let Err(e) = logging::init(defines::LOG_FILE) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let (order, risk) = match validate::validate(&cmd_args) {
        Ok(validated) => validated,
        Err(e) => fail("validation", e),
    };
    print_summary(&order, &risk);

    let start = std::time::Instant::now();

    let client = match Config::from_env().and_then(client::BinanceFuturesClient::new) {
        Ok(client) => client,
        Err(e) => fail("client setup", e),
    };

    let ack = match dispatch::place_order(&client, &order) {
        Ok(ack) => ack,
        Err(e) => fail("order placement", e),
    };
    print_ack("order placed", &ack);

    if risk.take_profit.is_some() || risk.stop_loss.is_some() {
        match dispatch::attach_risk_orders(&client, &order, &risk) {
            Ok(acks) => {
                for risk_ack in &acks {
                    print_ack("risk order placed", risk_ack);
                }
            }
            Err(e) => {
                // the primary order is already acknowledged and stays live;
                // there is no rollback on this exchange
                error!("TP/SL placement failed: {}", e);
                eprintln!(
                    "warning: primary order {} is live, but TP/SL failed: {}",
                    ack.order_id, e
                );
                std::process::exit(1);
            }
        }
    }

    println!("done in {}ms", start.elapsed().as_millis());
}

/// Log the failure in full, summarize for the user, exit non-zero.
fn fail(stage: &str, e: Error) -> ! {
    error!("{} failed: {}", stage, e);
    eprintln!("error: {}", e);
    std::process::exit(1)
}

fn print_summary(order: &OrderRequest, risk: &RiskParams) {
    println!("order: {} {} {} qty {}", order.symbol, order.side, order.order_type, order.quantity);
    if let Some(price) = order.price {
        println!("  price       : {}", price);
    }
    if let Some(stop_price) = order.stop_price {
        println!("  stop price  : {}", stop_price);
    }
    if let Some(tp) = risk.take_profit {
        println!("  take-profit : {}", tp);
    }
    if let Some(sl) = risk.stop_loss {
        println!("  stop-loss   : {}", sl);
    }
}

fn print_ack(heading: &str, ack: &OrderAck) {
    println!("{}: id={} status={}", heading, ack.order_id, ack.status);
    if let Some(order_type) = &ack.order_type {
        println!("  type        : {}", order_type);
    }
    if let Some(executed_qty) = &ack.executed_qty {
        println!("  executed qty: {}", executed_qty);
    }
    if let Some(avg_price) = &ack.avg_price {
        println!("  avg price   : {}", avg_price);
    }
    if let Some(stop_price) = &ack.stop_price {
        println!("  stop price  : {}", stop_price);
    }
}

use crate::defines::*;
use crate::types::{Config, Error, OrderType, Side};

use std::fmt;
use std::str::FromStr;

impl Side {
    /// Exchange-level string for this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// The closing side for TP/SL child orders.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Side, String> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(format!("'{}' is not one of BUY, SELL", other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
        }
    }

    /// Whether this type carries a limit price.
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    /// Whether this type carries a stop trigger price.
    pub fn requires_stop_price(&self) -> bool {
        matches!(self, OrderType::StopLimit)
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<OrderType, String> {
        match s.trim().to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            other => Err(format!("'{}' is not one of MARKET, LIMIT, STOP_LIMIT", other)),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Config {
    /// Read credentials from the environment. The base URL is pinned to the
    /// testnet so a missing variable can never send an order to mainnet.
    pub fn from_env() -> Result<Config, Error> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| Error::Config(format!("{} must be set", ENV_API_KEY)))?;
        let api_secret = std::env::var(ENV_API_SECRET)
            .map_err(|_| Error::Config(format!("{} must be set", ENV_API_SECRET)))?;
        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(Error::Config(format!(
                "{} and {} must be non-empty",
                ENV_API_KEY, ENV_API_SECRET
            )));
        }
        Ok(Config {
            api_key,
            api_secret,
            base_url: TESTNET_BASE_URL.to_string(),
        })
    }
}

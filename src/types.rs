use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name="placer")]
#[clap(about="placer puts market/limit/stop-limit orders (with optional TP/SL) on Binance USDT-M futures testnet", long_about=None)]
pub struct CommandlineArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// Order side, BUY or SELL (case-insensitive)
    pub side: String,

    /// Order type, MARKET, LIMIT or STOP_LIMIT (case-insensitive)
    #[clap(value_name="TYPE")]
    pub order_type: String,

    /// Amount of the base asset to trade.
    // Taken as raw text so a bad number surfaces as a validation error
    // naming the field, not as a parse failure from the argument parser.
    pub quantity: String,

    /// Limit price, required for LIMIT and STOP_LIMIT
    #[clap(long)]
    pub price: Option<String>,

    /// Stop trigger price, required for STOP_LIMIT
    #[clap(long)]
    pub stop_price: Option<String>,

    /// Take-profit trigger price; attaches a TAKE_PROFIT_MARKET order on the opposite side
    #[clap(long)]
    pub tp: Option<String>,

    /// Stop-loss trigger price; attaches a STOP_MARKET order on the opposite side
    #[clap(long)]
    pub sl: Option<String>,
}

/// Order side as accepted by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Order type at the user-facing level.
/// Note the wire-level type string differs for stop-limit, see `dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

/// Validated primary order parameters.
/// Price fields are populated iff the order type requires them; the
/// validator is the only constructor so the invariant holds everywhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
}

/// Optional take-profit/stop-loss trigger levels, valid with any order type.
/// No local check relates these to the primary price or side; the exchange
/// rejects trigger levels it considers invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskParams {
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
}

/// Wire-level order request as sent to the exchange.
/// `order_type` holds the exchange's type string which is a superset of
/// what the user can ask for directly (TP/SL children use trigger types).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewOrder {
    pub symbol: String,
    pub side: &'static str,
    #[serde(rename = "type")]
    pub order_type: &'static str,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "stopPrice", skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<f64>,
    #[serde(rename = "timeInForce", skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<&'static str>,
}

/// Order acknowledgment from the exchange.
/// Treated as an opaque payload; the raw body is logged verbatim before
/// deserialization and nothing is derived from these fields beyond display.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub order_id: u64,
    pub symbol: String,
    pub status: String,
    pub client_order_id: Option<String>,
    pub side: Option<String>,
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    pub orig_qty: Option<String>,
    pub price: Option<String>,
    pub avg_price: Option<String>,
    pub executed_qty: Option<String>,
    pub stop_price: Option<String>,
    pub time_in_force: Option<String>,
    pub update_time: Option<u64>,
}

/// Error payload the exchange returns on a rejected request.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// Credentials and endpoint for the client factory. Constructed once at
/// startup from the environment and passed in explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A CLI-supplied parameter violates a structural or domain rule.
    /// Raised before any network call is attempted.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Missing or empty credentials in the environment.
    #[error("configuration error: {0}")]
    Config(String),

    /// The exchange rejected the request.
    #[error("exchange rejected request (code {code}): {msg}")]
    Submission { code: i64, msg: String },

    /// Network/connectivity failure reaching the exchange. Not retried.
    #[error("transport error: {0}")]
    Transport(#[from] isahc::Error),

    #[error("failed to build http request: {0}")]
    Request(#[from] isahc::http::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response from exchange: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to parse url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}

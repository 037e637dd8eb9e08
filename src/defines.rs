/// Base URL of Binance USDT-M futures testnet.
/// All requests go against the sandbox; there is no mainnet switch on purpose.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Order placement endpoint (signed).
pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";

/// Environment variable names holding the testnet API credentials.
pub const ENV_API_KEY: &str = "BINANCE_API_KEY";
pub const ENV_API_SECRET: &str = "BINANCE_API_SECRET";

/// recvWindow in milliseconds sent with every signed request.
pub const RECV_WINDOW_MS: u64 = 5000;

/// Time-in-force attached to priced orders.
pub const DEFAULT_TIME_IN_FORCE: &str = "GTC";

/// Append-only log file written next to the working directory.
pub const LOG_FILE: &str = "placer.log";

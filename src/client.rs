use crate::defines::*;
use crate::types::{ApiErrorResponse, Config, Error, NewOrder, OrderAck};
use crate::util::{hex_string, timestamp_ms};

use isahc::{HttpClient, ReadResponseExt, Request};
use ring::hmac;
use tracing::{debug, error, info};
use url::Url;

/// The one capability the rest of the program needs from the exchange:
/// submit an order, get back an acknowledgment or an error. Keeping the
/// seam this narrow lets the dispatcher run against a substitute in tests.
pub trait PlaceOrder {
    fn place_order(&self, order: &NewOrder) -> Result<OrderAck, Error>;
}

/// Authenticated handle to the futures testnet REST API.
pub struct BinanceFuturesClient {
    http: HttpClient,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl BinanceFuturesClient {
    /// Build the client once from an explicitly loaded configuration.
    pub fn new(config: Config) -> Result<BinanceFuturesClient, Error> {
        info!("initializing futures testnet client -> {}", config.base_url);
        Ok(BinanceFuturesClient {
            http: HttpClient::new()?,
            api_key: config.api_key,
            api_secret: config.api_secret,
            base_url: config.base_url,
        })
    }
}

impl PlaceOrder for BinanceFuturesClient {
    fn place_order(&self, order: &NewOrder) -> Result<OrderAck, Error> {
        // the outgoing payload is logged before the request is made so a
        // transport failure still leaves a record of what was attempted
        info!(
            "placing {} order -> {}",
            order.order_type,
            serde_json::to_string(order)?
        );

        let query = signed_query(order, timestamp_ms(), &self.api_secret);
        let mut url = Url::parse(&format!("{}{}", self.base_url, ORDER_ENDPOINT))?;
        url.set_query(Some(&query));

        let request = Request::post(url.as_str())
            .header("X-MBX-APIKEY", self.api_key.as_str())
            .body(())?;
        let mut response = self.http.send(request)?;
        let status = response.status();
        let body = response.text()?;
        debug!("raw response (http {}) -> {}", status.as_u16(), body);

        if !status.is_success() {
            // rejected requests come back as {"code": ..., "msg": ...};
            // anything else (proxies, html error pages) is passed through raw
            let (code, msg) = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api) => (api.code, api.msg),
                Err(_) => (i64::from(status.as_u16()), body.clone()),
            };
            error!("order rejected (http {}): code={} msg={}", status.as_u16(), code, msg);
            return Err(Error::Submission { code, msg });
        }

        info!("order response -> {}", body);
        Ok(serde_json::from_str(&body)?)
    }
}

/// Order parameters as query pairs, in the order they are signed.
/// Absent optional fields produce no pair at all; a MARKET order must not
/// mention price, stopPrice or timeInForce on the wire.
pub(crate) fn order_query_pairs(order: &NewOrder) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("symbol", order.symbol.clone()),
        ("side", order.side.to_string()),
        ("type", order.order_type.to_string()),
        ("quantity", order.quantity.to_string()),
    ];
    if let Some(price) = order.price {
        pairs.push(("price", price.to_string()));
    }
    if let Some(stop_price) = order.stop_price {
        pairs.push(("stopPrice", stop_price.to_string()));
    }
    if let Some(tif) = order.time_in_force {
        pairs.push(("timeInForce", tif.to_string()));
    }
    pairs
}

/// Build the full query string for a signed order request: the order
/// parameters, recvWindow and timestamp, then the HMAC-SHA256 signature of
/// everything before it.
pub(crate) fn signed_query(order: &NewOrder, timestamp: u64, secret: &str) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in order_query_pairs(order) {
        serializer.append_pair(key, &value);
    }
    serializer.append_pair("recvWindow", &RECV_WINDOW_MS.to_string());
    serializer.append_pair("timestamp", &timestamp.to_string());
    let query = serializer.finish();

    let signature = sign(secret, &query);
    format!("{}&signature={}", query, signature)
}

/// HMAC-SHA256 of the payload with the API secret, hex-encoded.
pub(crate) fn sign(secret: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hex_string(hmac::sign(&key, payload.as_bytes()).as_ref())
}

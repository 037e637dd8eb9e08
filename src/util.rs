use std::time::{SystemTime, UNIX_EPOCH};

/// Lower-case hex encoding, used for the request signature.
pub fn hex_string(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Current unix timestamp in milliseconds as required by signed endpoints.
pub fn timestamp_ms() -> u64 {
    // system clock before the epoch is not a situation we can trade in anyway
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encodes_lower_case_with_padding() {
        assert_eq!(hex_string(&[]), "");
        assert_eq!(hex_string(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
    }
}

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::error;

type HmacSha256 = Hmac<Sha256>;

/// Checks a LINE webhook signature: base64 of HMAC-SHA256 over the raw body,
/// keyed with the channel secret. The comparison is constant-time.
#[must_use]
pub fn verify_line_signature(request_body: &[u8], signature: &str, channel_secret: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        error!("Signature header is not valid base64");
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(request_body);

    if mac.verify_slice(&expected).is_ok() {
        true
    } else {
        error!("Signature verification failed");
        false
    }
}

#[must_use]
pub fn compute_signature(request_body: &[u8], channel_secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(request_body);
    STANDARD.encode(mac.finalize().into_bytes())
}

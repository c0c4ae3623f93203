//! Stripe Webhook Handling
//!
//! Verifies `stripe-signature` headers and activates paid tokens.
//!
//! Stripe signs `"{timestamp}.{raw body}"` with HMAC-SHA256 and sends
//! `t=<timestamp>,v1=<hex signature>` (more than one `v1` during secret
//! rotation). The body must be verified as received, before any parsing.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use pixelgate_core::{AccessToken, TokenStore};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

use crate::checkout::TOKEN_METADATA_KEY;
use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed webhook, in seconds
pub const SIGNATURE_TOLERANCE_SECS: u64 = 300;

/// Event type sent when a hosted checkout is paid
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// Parsed webhook event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebhookEvent {
    /// Checkout completed - activate the embedded token
    CheckoutCompleted {
        session_id: String,
        token: Option<AccessToken>,
    },

    /// Unhandled event type
    Other { event_type: String },
}

/// Event envelope; the object is only inspected for event types we act on
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
}

/// Check a `stripe-signature` header against the raw payload
pub fn verify_signature(payload: &[u8], header: &str, secret: &str, now: i64) -> Result<()> {
    if secret.is_empty() {
        return Err(PaymentError::WebhookSignature("signing secret not configured".into()));
    }

    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| PaymentError::WebhookSignature("missing timestamp".into()))?;
    if signatures.is_empty() {
        return Err(PaymentError::WebhookSignature("missing v1 signature".into()));
    }
    if now.abs_diff(timestamp) > SIGNATURE_TOLERANCE_SECS {
        return Err(PaymentError::WebhookSignature("timestamp outside tolerance".into()));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::WebhookSignature(e.to_string()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|candidate| {
        hex::decode(candidate).is_ok_and(|bytes| mac.clone().verify_slice(&bytes).is_ok())
    });

    if matched {
        Ok(())
    } else {
        Err(PaymentError::WebhookSignature("no matching signature".into()))
    }
}

/// Webhook handler
pub struct WebhookHandler {
    token_store: Arc<dyn TokenStore>,
    secret: String,
}

impl WebhookHandler {
    /// Handler activating tokens in `token_store`, verifying with `secret`
    pub fn new(token_store: Arc<dyn TokenStore>, secret: impl Into<String>) -> Self {
        Self {
            token_store,
            secret: secret.into(),
        }
    }

    /// Verify webhook signature and parse event
    pub fn parse_event(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent> {
        verify_signature(payload, signature, &self.secret, chrono::Utc::now().timestamp())?;

        let raw: RawEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::WebhookParse(e.to_string()))?;

        if raw.event_type == CHECKOUT_COMPLETED {
            let token = raw
                .data
                .pointer("/object/metadata")
                .and_then(|m| m.get(TOKEN_METADATA_KEY))
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(AccessToken::from_string);

            let session_id = raw
                .data
                .pointer("/object/id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            Ok(WebhookEvent::CheckoutCompleted { session_id, token })
        } else {
            Ok(WebhookEvent::Other {
                event_type: raw.event_type,
            })
        }
    }

    /// Process a verified webhook event
    ///
    /// Replayed completion events re-activate their token.
    pub fn handle(&self, event: &WebhookEvent) -> Result<()> {
        match event {
            WebhookEvent::CheckoutCompleted {
                session_id,
                token: Some(token),
            } => {
                self.token_store.insert(token)?;
                tracing::info!(
                    session_id = %session_id,
                    token = %token.redacted(),
                    "Activated access token"
                );
            }

            WebhookEvent::CheckoutCompleted {
                session_id,
                token: None,
            } => {
                tracing::warn!(session_id = %session_id, "Completed checkout without token metadata");
            }

            WebhookEvent::Other { event_type } => {
                tracing::debug!(event_type = %event_type, "Unhandled webhook event");
            }
        }

        Ok(())
    }

    /// Verify, parse and process in one step
    pub fn process(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent> {
        let event = self.parse_event(payload, signature)?;
        self.handle(&event)?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgate_core::MemoryTokenStore;

    const SECRET: &str = "whsec_test123secret456";

    fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn completed_payload(token: &str) -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_test_1", "metadata": { "token": token } } }
        })
        .to_string()
        .into_bytes()
    }

    fn handler() -> (Arc<MemoryTokenStore>, WebhookHandler) {
        let store = Arc::new(MemoryTokenStore::new());
        let handler = WebhookHandler::new(store.clone(), SECRET);
        (store, handler)
    }

    #[test]
    fn test_valid_signature() {
        let now = chrono::Utc::now().timestamp();
        let payload = b"{\"type\":\"checkout.session.completed\"}";
        let header = sign(payload, SECRET, now);
        assert!(verify_signature(payload, &header, SECRET, now).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = chrono::Utc::now().timestamp();
        let payload = b"{}";
        let header = sign(payload, "wrong_secret", now);
        assert!(verify_signature(payload, &header, SECRET, now).is_err());
    }

    #[test]
    fn test_modified_payload_rejected() {
        let now = chrono::Utc::now().timestamp();
        let header = sign(b"{\"amount\":500}", SECRET, now);
        assert!(verify_signature(b"{\"amount\":1}", &header, SECRET, now).is_err());
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let now = chrono::Utc::now().timestamp();
        let header = sign(b"{}", SECRET, now - 600);
        assert!(verify_signature(b"{}", &header, SECRET, now).is_err());
    }

    #[test]
    fn test_extreme_timestamp_rejected() {
        let now = chrono::Utc::now().timestamp();
        for t in [i64::MIN, i64::MAX] {
            let header = format!("t={t},v1=00");
            assert!(verify_signature(b"{}", &header, SECRET, now).is_err(), "t={t}");
        }
    }

    #[test]
    fn test_malformed_headers_rejected() {
        let now = chrono::Utc::now().timestamp();
        assert!(verify_signature(b"{}", "v1=abcdef", SECRET, now).is_err());
        assert!(verify_signature(b"{}", &format!("t={now}"), SECRET, now).is_err());
        assert!(verify_signature(b"{}", &format!("t={now},v1=zz"), SECRET, now).is_err());
        assert!(verify_signature(b"{}", "", SECRET, now).is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let now = chrono::Utc::now().timestamp();
        let header = sign(b"{}", "", now);
        assert!(verify_signature(b"{}", &header, "", now).is_err());
    }

    #[test]
    fn test_rotated_secret_second_signature() {
        let now = chrono::Utc::now().timestamp();
        let good = sign(b"{}", SECRET, now);
        let v1 = good.split_once("v1=").unwrap().1;
        let header = format!("t={now},v1=deadbeef,v1={v1}");
        assert!(verify_signature(b"{}", &header, SECRET, now).is_ok());
    }

    #[test]
    fn test_completed_event_activates_token() {
        let (store, handler) = handler();
        let payload = completed_payload("T1");
        let header = sign(&payload, SECRET, chrono::Utc::now().timestamp());

        let event = handler.process(&payload, &header).unwrap();
        assert_eq!(
            event,
            WebhookEvent::CheckoutCompleted {
                session_id: "cs_test_1".into(),
                token: Some(AccessToken::from_string("T1")),
            }
        );
        assert!(store.contains(&AccessToken::from_string("T1")).unwrap());
    }

    #[test]
    fn test_invalid_signature_leaves_store_untouched() {
        let (store, handler) = handler();
        let payload = completed_payload("T1");
        let header = sign(&payload, "wrong_secret", chrono::Utc::now().timestamp());

        let err = handler.process(&payload, &header).unwrap_err();
        assert!(err.is_bad_request());
        assert!(store.is_empty());
    }

    #[test]
    fn test_other_events_ignored() {
        let (store, handler) = handler();
        let payload = serde_json::json!({
            "type": "payment_intent.created",
            "data": { "object": { "id": "pi_1" } }
        })
        .to_string();
        let header = sign(payload.as_bytes(), SECRET, chrono::Utc::now().timestamp());

        let event = handler.process(payload.as_bytes(), &header).unwrap();
        assert_eq!(
            event,
            WebhookEvent::Other {
                event_type: "payment_intent.created".into()
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_unusual_event_shapes_ignored() {
        let (store, handler) = handler();
        let now = chrono::Utc::now().timestamp();
        for payload in [
            r#"{"type":"invoice.upcoming","data":{"object":{"id":null,"metadata":{"n":1}}}}"#,
            r#"{"type":"ping"}"#,
        ] {
            let header = sign(payload.as_bytes(), SECRET, now);
            let event = handler.process(payload.as_bytes(), &header).unwrap();
            assert!(matches!(event, WebhookEvent::Other { .. }), "{payload}");
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_completed_without_token() {
        let (store, handler) = handler();
        let payload = serde_json::json!({
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_2", "metadata": {} } }
        })
        .to_string();
        let header = sign(payload.as_bytes(), SECRET, chrono::Utc::now().timestamp());

        assert!(handler.process(payload.as_bytes(), &header).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unparsable_body() {
        let (_, handler) = handler();
        let payload = b"not json";
        let header = sign(payload, SECRET, chrono::Utc::now().timestamp());
        assert!(matches!(
            handler.process(payload, &header),
            Err(PaymentError::WebhookParse(_))
        ));
    }
}

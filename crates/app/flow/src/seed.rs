//! Sample payload the signer message is pre-filled with.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Nonce baked into the sample payload.
pub const SEED_NONCE: u64 = 847293;

#[derive(Serialize)]
struct SeedPayload<'a> {
    app: &'a str,
    action: &'a str,
    nonce: u64,
    timestamp: String,
}

/// Pretty-printed sign-in payload stamped with `now`.
pub fn seed_message(now: DateTime<Utc>) -> String {
    let payload = SeedPayload {
        app: "Web3 Auth",
        action: "Sign In",
        nonce: SEED_NONCE,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    serde_json::to_string_pretty(&payload).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seed_message_layout() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let expected = "{\n  \"app\": \"Web3 Auth\",\n  \"action\": \"Sign In\",\n  \"nonce\": 847293,\n  \"timestamp\": \"2024-05-01T12:30:00.000Z\"\n}";
        assert_eq!(seed_message(now), expected);
    }

    #[test]
    fn test_seed_message_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(&seed_message(Utc::now())).unwrap();
        assert_eq!(value["nonce"], SEED_NONCE);
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}

//! Fatal-vs-transient classification of endpoint failures.
//!
//! Retrying cannot fix a rejected credential or an exhausted quota, so
//! those stop the retry loop at once. Everything else is transient.
//!
//! Status codes decide first. Without a decisive status, the message is
//! scanned for whole phrases, so words that merely contain "rate"
//! ("generate", "separate") do not count as rate limiting.

/// Outcome of classifying one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Credential rejected. Stop.
    Auth,
    /// Rate limit or quota exhausted. Stop.
    Quota,
    /// Worth another attempt.
    Transient,
}

const AUTH_PHRASES: &[&str] = &[
    "api key",
    "api_key",
    "apikey",
    "authentication",
    "unauthorized",
    "unauthorised",
    "invalid credentials",
    "permission denied",
];

const QUOTA_PHRASES: &[&str] = &[
    "quota",
    "rate limit",
    "rate_limit",
    "ratelimit",
    "rate-limit",
    "too many requests",
];

/// Classify a failure from its HTTP status (if any) and message.
#[must_use]
pub fn classify(status: Option<u16>, message: &str) -> FailureClass {
    match status {
        Some(401 | 403) => return FailureClass::Auth,
        Some(429) => return FailureClass::Quota,
        _ => {}
    }

    let lowered = message.to_ascii_lowercase();
    if AUTH_PHRASES.iter().any(|p| lowered.contains(p)) {
        FailureClass::Auth
    } else if QUOTA_PHRASES.iter().any(|p| lowered.contains(p)) {
        FailureClass::Quota
    } else {
        FailureClass::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(401), "", FailureClass::Auth)]
    #[case(Some(403), "forbidden", FailureClass::Auth)]
    #[case(Some(429), "slow down", FailureClass::Quota)]
    #[case(Some(400), "Invalid API Key provided", FailureClass::Auth)]
    #[case(None, "Authentication failed for org", FailureClass::Auth)]
    #[case(Some(400), "You exceeded your current quota", FailureClass::Quota)]
    #[case(None, "Rate limit reached for model llama", FailureClass::Quota)]
    #[case(Some(503), "Too Many Requests upstream", FailureClass::Quota)]
    #[case(Some(500), "Internal Server Error", FailureClass::Transient)]
    #[case(None, "connection reset by peer", FailureClass::Transient)]
    #[case(None, "failed to generate a response", FailureClass::Transient)]
    #[case(Some(502), "separate upstream error", FailureClass::Transient)]
    fn classification(
        #[case] status: Option<u16>,
        #[case] message: &str,
        #[case] expected: FailureClass,
    ) {
        assert_eq!(classify(status, message), expected);
    }

    #[test]
    fn auth_wins_when_both_match() {
        assert_eq!(
            classify(None, "API key over quota"),
            FailureClass::Auth
        );
    }
}

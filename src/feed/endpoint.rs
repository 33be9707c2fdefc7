use crate::config::FeedConfig;

use super::error::FeedError;

/// Host without its port. Bracketed IPv6 literals keep their brackets.
fn hostname(host: &str) -> &str {
    if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}

/// Picks the feed URL for a client running on `host`.
///
/// Development hosts (matched case-insensitively) talk to the local
/// plain-text endpoint, everything else uses TLS on the same host.
pub fn select_endpoint(host: &str, feed: &FeedConfig) -> String {
    if let Some(endpoint) = &feed.endpoint {
        return endpoint.clone();
    }

    let name = hostname(host);
    if feed.dev_hosts.iter().any(|dev| dev.eq_ignore_ascii_case(name)) {
        feed.local_endpoint.clone()
    } else {
        format!("wss://{}{}", host, feed.path)
    }
}

pub fn validate_endpoint(endpoint: &str) -> Result<(), FeedError> {
    let rest = endpoint
        .strip_prefix("wss://")
        .or_else(|| endpoint.strip_prefix("ws://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(()),
        _ => Err(FeedError::InvalidEndpoint(endpoint.to_string())),
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalError {
    #[error(
        "request timed out — the car-listing API may be slow or unreachable. \
         Try increasing --timeout or check --api-url"
    )]
    Timeout,

    #[error("connection failed — is the car-listing API running? ({0})")]
    ConnectionFailed(String),

    #[error("DNS resolution failed for {0} — check --api-url")]
    DnsResolution(String),

    #[error("proxy error — check your --proxy URL is correct ({0})")]
    ProxyError(String),

    #[error("unexpected HTTP status {0} from the car-listing API")]
    HttpStatus(u16),

    #[error("failed to decode API response — {0}")]
    Decode(String),

    #[error("invalid date \"{0}\" — must be YYYY-MM-DD format (e.g. 2026-03-01)")]
    InvalidDate(String),

    #[error("invalid page {page} — must be between 1 and {total_pages}")]
    InvalidPage { page: u32, total_pages: u32 },

    #[error("invalid route \"{0}\"")]
    InvalidRoute(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Validation(String),
}

pub fn from_http_error(err: wreq::Error) -> RentalError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return RentalError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return RentalError::DnsResolution(msg);
        }
        return RentalError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return RentalError::ProxyError(msg);
    }

    if lower.contains("builder error") && lower.contains("uri") {
        return RentalError::Validation(format!("invalid API URL ({msg})"));
    }

    RentalError::ConnectionFailed(msg)
}

//! The closed set of failure kinds and the classification function.

use super::error::TransferError;

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Resolver failures surface from hyper as a connect error with this message.
const DNS_MARKERS: [&str; 2] = ["dns error", "failed to lookup address"];

/// What went wrong with an attempt, at the granularity the engine acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The URL was rejected by the transport.
    BadUrl,
    /// Socket-level network failure.
    NoConnection,
    /// Host name resolution failed.
    UnknownHost,
    /// The target file could not be created, seeked or written.
    LocalIo,
    /// The server omitted the content length, declared zero bytes, or sent
    /// more than it declared.
    Protocol,
    /// Anything else.
    Unknown,
}

impl FailureKind {
    /// Map a cause onto its kind.
    pub fn classify(err: &TransferError) -> FailureKind {
        match err {
            TransferError::BadUrl(_) => FailureKind::BadUrl,
            TransferError::UnknownHost(_) => FailureKind::UnknownHost,
            TransferError::Http { source } => classify_reqwest(source),
            TransferError::Status(_) => FailureKind::Unknown,
            TransferError::Stream { source } => classify_stream(source),
            TransferError::LocalIo { .. } => FailureKind::LocalIo,
            TransferError::Protocol(_) => FailureKind::Protocol,
            TransferError::Middleware { source } => classify_middleware(source.as_ref()),
        }
    }

    /// Whether the engine restarts the attempt instead of reporting.
    pub fn is_retryable(self) -> bool {
        match self {
            FailureKind::NoConnection | FailureKind::UnknownHost => true,
            FailureKind::BadUrl
            | FailureKind::LocalIo
            | FailureKind::Protocol
            | FailureKind::Unknown => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::BadUrl => "bad url",
            FailureKind::NoConnection => "no connection",
            FailureKind::UnknownHost => "unknown host",
            FailureKind::LocalIo => "local i/o",
            FailureKind::Protocol => "protocol",
            FailureKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

fn classify_reqwest(err: &reqwest::Error) -> FailureKind {
    if err.is_builder() {
        return FailureKind::BadUrl;
    }
    if err.is_timeout() {
        return FailureKind::Unknown;
    }
    if err.is_connect() {
        return if is_dns_failure(err) {
            FailureKind::UnknownHost
        } else {
            FailureKind::NoConnection
        };
    }
    if let Some(kind) = io_kind_in_chain(err) {
        return classify_io_kind(kind);
    }
    if err.is_body() {
        return FailureKind::NoConnection;
    }
    FailureKind::Unknown
}

fn classify_middleware(err: &(dyn StdError + 'static)) -> FailureKind {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(inner) = e.downcast_ref::<reqwest::Error>() {
            return classify_reqwest(inner);
        }
        if let Some(reqwest_middleware::Error::Reqwest(inner)) =
            e.downcast_ref::<reqwest_middleware::Error>()
        {
            return classify_reqwest(inner);
        }
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return classify_io_kind(io_err.kind());
        }
        current = e.source();
    }
    if is_dns_failure(err) {
        return FailureKind::UnknownHost;
    }
    FailureKind::Unknown
}

fn classify_stream(err: &io::Error) -> FailureKind {
    if let Some(inner) = err
        .get_ref()
        .and_then(|e| e.downcast_ref::<reqwest::Error>())
    {
        if err.kind() == io::ErrorKind::Other {
            return classify_reqwest(inner);
        }
    }
    classify_io_kind(err.kind())
}

fn classify_io_kind(kind: io::ErrorKind) -> FailureKind {
    match kind {
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::NotConnected
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::UnexpectedEof => FailureKind::NoConnection,
        _ => FailureKind::Unknown,
    }
}

fn io_kind_in_chain(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current = err.source();
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = e.source();
    }
    None
}

fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        if DNS_MARKERS.iter().any(|marker| message.contains(marker)) {
            return true;
        }
        current = e.source();
    }
    false
}

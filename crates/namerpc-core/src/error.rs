//! Error taxonomy shared by providers and their callers.
//!
//! Three independent kinds, each with its own closed set of codes:
//!
//! - [`ResolutionError`] — production-path failures (`NamingServiceDown`,
//!   `ServiceProviderError`, ...)
//! - [`ConfigurationError`] — local misconfiguration
//! - [`DnsRecordsError`] — malformed or missing DNS record data
//!
//! Each carries a `code` and a metadata map; the display message is a
//! per-code template filled in from the metadata. Two errors of the same
//! kind are equal when their codes are equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder name → value, interpolated into the error message.
pub type Metadata = BTreeMap<String, String>;

/// A boxed, unclassified error passed through untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ─── Codes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionErrorCode {
    UnregisteredDomain,
    UnspecifiedResolver,
    UnsupportedDomain,
    UnsupportedMethod,
    UnspecifiedCurrency,
    UnsupportedCurrency,
    IncorrectResolverInterface,
    RecordNotFound,
    MetadataEndpointError,
    ServiceProviderError,
    NamingServiceDown,
    InvalidTwitterVerification,
    InconsistentDomainArray,
}

impl ResolutionErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnregisteredDomain => "UnregisteredDomain",
            Self::UnspecifiedResolver => "UnspecifiedResolver",
            Self::UnsupportedDomain => "UnsupportedDomain",
            Self::UnsupportedMethod => "UnsupportedMethod",
            Self::UnspecifiedCurrency => "UnspecifiedCurrency",
            Self::UnsupportedCurrency => "UnsupportedCurrency",
            Self::IncorrectResolverInterface => "IncorrectResolverInterface",
            Self::RecordNotFound => "RecordNotFound",
            Self::MetadataEndpointError => "MetadataEndpointError",
            Self::ServiceProviderError => "ServiceProviderError",
            Self::NamingServiceDown => "NamingServiceDown",
            Self::InvalidTwitterVerification => "InvalidTwitterVerification",
            Self::InconsistentDomainArray => "InconsistentDomainArray",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::UnregisteredDomain => "Domain {domain} is not registered",
            Self::UnspecifiedResolver => "Domain {domain} is not configured",
            Self::UnsupportedDomain => "Domain {domain} is not supported",
            Self::UnsupportedMethod => "Method {method} is not supported for {domain}",
            Self::UnspecifiedCurrency => "Domain {domain} has no {currencyTicker} attached to it",
            Self::UnsupportedCurrency => "{currencyTicker} is not supported",
            Self::IncorrectResolverInterface => {
                "Domain resolver is configured incorrectly for {method}"
            }
            Self::RecordNotFound => "No {recordName} record found for {domain}",
            Self::MetadataEndpointError => {
                "Failed to query tokenUri {tokenUri}. Error: {errorMessage}"
            }
            Self::ServiceProviderError => "< {providerMessage} >",
            Self::NamingServiceDown => "{method} naming service is down at the moment",
            Self::InvalidTwitterVerification => {
                "Domain {domain} has invalid Twitter signature verification"
            }
            Self::InconsistentDomainArray => "Domain metadata returned by {method} is inconsistent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigurationErrorCode {
    IncorrectProvider,
    UnsupportedNetwork,
    UnspecifiedUrl,
    NetworkConfigMissing,
    CustomNetworkConfigMissing,
    InvalidConfigurationField,
}

impl ConfigurationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncorrectProvider => "IncorrectProvider",
            Self::UnsupportedNetwork => "UnsupportedNetwork",
            Self::UnspecifiedUrl => "UnspecifiedUrl",
            Self::NetworkConfigMissing => "NetworkConfigMissing",
            Self::CustomNetworkConfigMissing => "CustomNetworkConfigMissing",
            Self::InvalidConfigurationField => "InvalidConfigurationField",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::IncorrectProvider => "Provider does not implement the request contract",
            Self::UnsupportedNetwork => "Unsupported network in {method} configuration",
            Self::UnspecifiedUrl => "Unspecified url in {method} configuration",
            Self::NetworkConfigMissing => "Missing {config} in {method} configuration",
            Self::CustomNetworkConfigMissing => {
                "Missing {config} in {method} configuration; it is required for a custom network"
            }
            Self::InvalidConfigurationField => "Invalid '{field}' in {method} configuration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnsRecordsErrorCode {
    InconsistentTtl,
    DnsRecordCorrupted,
}

impl DnsRecordsErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InconsistentTtl => "InconsistentTtl",
            Self::DnsRecordCorrupted => "DnsRecordCorrupted",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::InconsistentTtl => {
                "ttl for record {recordType} differs from other records of the same type"
            }
            Self::DnsRecordCorrupted => "Resolver returned a corrupted {recordType} record",
        }
    }
}

// ─── Error kinds ──────────────────────────────────────────────────────────────

/// Generates one taxonomy error struct. The kinds share shape, not a base type.
macro_rules! coded_error {
    ($(#[$meta:meta])* $name:ident, $code:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            code: $code,
            metadata: Metadata,
        }

        impl $name {
            pub fn new(code: $code) -> Self {
                Self {
                    code,
                    metadata: Metadata::new(),
                }
            }

            /// Attach a metadata value used by the message template.
            pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
                self.metadata.insert(key.into(), value.to_string());
                self
            }

            pub fn code(&self) -> $code {
                self.code
            }

            pub fn metadata(&self) -> &Metadata {
                &self.metadata
            }

            /// Look up a single metadata value.
            pub fn get(&self, key: &str) -> Option<&str> {
                self.metadata.get(key).map(String::as_str)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.code == other.code
            }
        }

        impl Eq for $name {}

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&render(self.code.template(), &self.metadata))
            }
        }

        impl std::error::Error for $name {}

        impl From<$code> for $name {
            fn from(code: $code) -> Self {
                Self::new(code)
            }
        }
    };
}

coded_error!(
    /// A production-path failure while talking to a naming service.
    ResolutionError,
    ResolutionErrorCode
);

coded_error!(
    /// Local misconfiguration, raised by callers of a provider.
    ConfigurationError,
    ConfigurationErrorCode
);

coded_error!(
    /// Malformed or missing DNS record data in an otherwise successful reply.
    DnsRecordsError,
    DnsRecordsErrorCode
);

impl ResolutionError {
    /// The transport could not complete the call.
    pub fn naming_service_down(service: impl ToString) -> Self {
        Self::new(ResolutionErrorCode::NamingServiceDown).with("method", service)
    }

    /// The remote answered with a JSON-RPC `error` object.
    pub fn service_provider_error(provider_message: impl ToString) -> Self {
        Self::new(ResolutionErrorCode::ServiceProviderError)
            .with("providerMessage", provider_message)
    }
}

fn render(template: &str, metadata: &Metadata) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                if let Some(value) = metadata.get(&after[..end]) {
                    out.push_str(value);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ─── Tagged union ─────────────────────────────────────────────────────────────

/// Which taxonomy an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Resolution,
    Configuration,
    DnsRecords,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "ResolutionError"),
            Self::Configuration => write!(f, "ConfigurationError"),
            Self::DnsRecords => write!(f, "DnsRecordsError"),
        }
    }
}

/// Every failure a provider call can surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    DnsRecords(#[from] DnsRecordsError),

    /// A failure the transport did not recognise as network-level.
    /// Carried as-is so the original type can be recovered by downcasting.
    #[error("{0}")]
    Unexpected(BoxError),
}

impl Error {
    /// The taxonomy kind, or `None` for unclassified failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Resolution(_) => Some(ErrorKind::Resolution),
            Self::Configuration(_) => Some(ErrorKind::Configuration),
            Self::DnsRecords(_) => Some(ErrorKind::DnsRecords),
            Self::Unexpected(_) => None,
        }
    }

    /// The code as a stable string, or `None` for unclassified failures.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Resolution(e) => Some(e.code().as_str()),
            Self::Configuration(e) => Some(e.code().as_str()),
            Self::DnsRecords(e) => Some(e.code().as_str()),
            Self::Unexpected(_) => None,
        }
    }

    /// Same kind and same code.
    pub fn matches(&self, kind: ErrorKind, code: &str) -> bool {
        self.kind() == Some(kind) && self.code() == Some(code)
    }

    pub fn is_resolution(&self, code: ResolutionErrorCode) -> bool {
        matches!(self, Self::Resolution(e) if e.code() == code)
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Self::Resolution(e) => Some(e.metadata()),
            Self::Configuration(e) => Some(e.metadata()),
            Self::DnsRecords(e) => Some(e.metadata()),
            Self::Unexpected(_) => None,
        }
    }

    /// Recover the original unclassified error.
    pub fn into_unexpected(self) -> Option<BoxError> {
        match self {
            Self::Unexpected(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_service_down_message() {
        let err = ResolutionError::naming_service_down("UNS");
        assert_eq!(err.code(), ResolutionErrorCode::NamingServiceDown);
        assert_eq!(err.get("method"), Some("UNS"));
        assert_eq!(err.to_string(), "UNS naming service is down at the moment");
    }

    #[test]
    fn service_provider_message_is_preserved() {
        let err = ResolutionError::service_provider_error("invalid project id");
        assert_eq!(err.to_string(), "< invalid project id >");
    }

    #[test]
    fn missing_placeholders_render_empty() {
        let err = ResolutionError::new(ResolutionErrorCode::RecordNotFound).with("recordName", "crypto.ETH.address");
        assert_eq!(err.to_string(), "No crypto.ETH.address record found for ");
    }

    #[test]
    fn equality_ignores_metadata() {
        let a = ResolutionError::naming_service_down("UNS");
        let b = ResolutionError::naming_service_down("ZNS");
        assert_eq!(a, b);
        assert_ne!(a, ResolutionError::service_provider_error("x"));
    }

    #[test]
    fn error_kind_and_code() {
        let err: Error = ConfigurationError::new(ConfigurationErrorCode::UnspecifiedUrl)
            .with("method", "ENS")
            .into();
        assert_eq!(err.kind(), Some(ErrorKind::Configuration));
        assert_eq!(err.code(), Some("UnspecifiedUrl"));
        assert!(err.matches(ErrorKind::Configuration, "UnspecifiedUrl"));
        assert!(!err.matches(ErrorKind::Resolution, "UnspecifiedUrl"));
        assert_eq!(err.to_string(), "Unspecified url in ENS configuration");
    }

    #[test]
    fn dns_records_error() {
        let err: Error = DnsRecordsError::new(DnsRecordsErrorCode::InconsistentTtl)
            .with("recordType", "A")
            .into();
        assert_eq!(err.kind(), Some(ErrorKind::DnsRecords));
        assert_eq!(err.metadata().unwrap().get("recordType").map(String::as_str), Some("A"));
    }

    #[test]
    fn unexpected_keeps_original_type() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::Unexpected(Box::new(io));
        assert_eq!(err.kind(), None);
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "boom");
        let original = err.into_unexpected().unwrap();
        assert!(original.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn unterminated_placeholder_is_kept_verbatim() {
        let metadata = Metadata::new();
        assert_eq!(render("a {b", &metadata), "a {b");
    }
}

//! The `Provider` trait — what resolution logic depends on.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::request::RequestArguments;

/// Logical name of the naming service a provider talks to.
/// Reported in `NamingServiceDown` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingService {
    Uns,
    Ens,
    Zns,
    Udapi,
}

impl fmt::Display for NamingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uns => write!(f, "UNS"),
            Self::Ens => write!(f, "ENS"),
            Self::Zns => write!(f, "ZNS"),
            Self::Udapi => write!(f, "UDAPI"),
        }
    }
}

/// Issue a named remote call without knowing the transport.
///
/// `Ok` carries the remote `result` verbatim; interpreting it is the
/// caller's job.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn request(&self, args: RequestArguments) -> Result<Value, Error>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    async fn request(&self, args: RequestArguments) -> Result<Value, Error> {
        (**self).request(args).await
    }
}

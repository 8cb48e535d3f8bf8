//! Assertions on provider failures, matched by kind and code.

use std::fmt::Debug;

use namerpc_core::error::{
    ConfigurationErrorCode, DnsRecordsErrorCode, Error, ErrorKind, ResolutionErrorCode,
};

/// Assert `result` failed with an error of `kind` carrying `code`.
///
/// # Panics
/// If `result` is `Ok`, or failed with any other error. Metadata is not
/// compared.
#[track_caller]
pub fn expect_error<T: Debug>(result: Result<T, Error>, kind: ErrorKind, code: &str) {
    match result {
        Ok(value) => panic!("Expected {kind} to be thrown but wasn't (got {value:?})"),
        Err(e) if e.matches(kind, code) => {}
        Err(e) => panic!("Expected {kind} with code {code}, got {e:?}"),
    }
}

#[track_caller]
pub fn expect_resolution_error_code<T: Debug>(result: Result<T, Error>, code: ResolutionErrorCode) {
    expect_error(result, ErrorKind::Resolution, code.as_str());
}

#[track_caller]
pub fn expect_configuration_error_code<T: Debug>(
    result: Result<T, Error>,
    code: ConfigurationErrorCode,
) {
    expect_error(result, ErrorKind::Configuration, code.as_str());
}

#[track_caller]
pub fn expect_dns_records_error_code<T: Debug>(result: Result<T, Error>, code: DnsRecordsErrorCode) {
    expect_error(result, ErrorKind::DnsRecords, code.as_str());
}

// Error types shared by the library and the CLI. Local validation failures
// (phone number, OTP format) are raised before any network traffic; the
// remote-status variants mirror the service's undocumented status codes.

use serde_json::Value;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input was not a structurally valid international-format number.
    #[error("invalid phone number `{0}`: use international format, e.g. +919912345678")]
    InvalidPhoneNumber(String),

    /// OTP must be exactly six ASCII digits.
    #[error("invalid OTP: enter the 6-digit code you received")]
    InvalidOtpFormat,

    /// A lookup was attempted without a stored installation credential.
    #[error("Please login to your account.")]
    NotAuthenticated,

    /// The service rejected the submitted OTP. The pending login request is
    /// kept so the user can retry with a fresh code.
    #[error("invalid OTP")]
    InvalidOtp,

    /// Too many wrong OTPs for this login request.
    #[error("retries limit exceeded")]
    RetryLimitExceeded,

    #[error("your account is suspended")]
    AccountSuspended,

    /// The service refused to send another OTP for now.
    #[error("you have exceeded the limit of verification attempts, please try again after some time")]
    VerificationAttemptsExceeded,

    /// The service answered with an error message of its own.
    #[error("{0}")]
    RemoteRejected(String),

    /// The service answered with a payload matching none of the known
    /// status codes; the raw body is preserved for the user to inspect.
    #[error("unrecognized response from the service: {0}")]
    UnknownRemoteResponse(Value),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

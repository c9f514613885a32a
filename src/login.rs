// Login handshake: request an OTP for a phone number, then exchange the OTP
// for a long-lived installation credential. The HTTP calls return the raw
// JSON payload; interpretation of the service's status codes is kept in
// separate pure functions so the taxonomy can be tested without a network.

use crate::device::DeviceProfile;
use crate::error::{Error, Result};
use crate::phone::{self, PhoneNumber};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const SEND_OTP_URL: &str = "https://account-asia-south1.truecaller.com/v2/sendOnboardingOtp";
const VERIFY_OTP_URL: &str = "https://account-asia-south1.truecaller.com/v1/verifyOnboardingOtp";

// The service only talks to clients presenting its mobile app identity.
pub(crate) const APP_USER_AGENT: &str = "Truecaller/11.75.5 (Android;10)";
const CLIENT_SECRET: &str = "lvc22mp3l1sfv6ujg83rd17btt";

/// The state bridging the OTP-request and OTP-verify steps. Fields the
/// service returns beyond the known ones are preserved verbatim in `extra`
/// so the payload survives persistence unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingLoginRequest {
    pub request_id: String,
    /// Full number as digits (dialing code + significant), e.g. 919912345678.
    #[serde(default)]
    pub parsed_phone_number: u64,
    #[serde(default)]
    pub status: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_ttl: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PendingLoginRequest {
    /// Whether this pending request was issued for `number`; gates offering
    /// the user a resume instead of a fresh OTP.
    pub fn matches(&self, number: &PhoneNumber) -> bool {
        format!("+{}", self.parsed_phone_number) == number.e164()
    }
}

/// The long-lived credential authorizing lookups. Never mutated, only
/// replaced by a fresh login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationCredential {
    pub installation_id: String,
    #[serde(default)]
    pub phones: Vec<CredentialPhone>,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub suspended: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPhone {
    pub country_code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InstallationCredential {
    /// Region code of the phone the credential was issued for; the default
    /// region for subsequent lookups.
    pub fn default_region(&self) -> Option<&str> {
        self.phones.first().map(|p| p.country_code.as_str())
    }
}

/// Outcome of the OTP-request step, decided from the response `status`.
#[derive(Debug)]
pub enum OtpRequestOutcome {
    /// The OTP was dispatched; persist the pending request and prompt.
    Dispatched(PendingLoginRequest),
    /// Too many OTPs requested; any stale pending request must be deleted.
    AttemptsExceeded,
    /// Anything else: surface the service's message.
    Rejected(String),
}

/// Decide what an OTP-request response means. Status 1 and 9 (and the bare
/// message "Sent") all mean the code went out.
pub fn interpret_otp_request(payload: &Value) -> Result<OtpRequestOutcome> {
    let status = payload.get("status").and_then(Value::as_i64);
    let message = payload.get("message").and_then(Value::as_str);

    if status == Some(1) || status == Some(9) || message == Some("Sent") {
        let pending = serde_json::from_value(payload.clone())
            .map_err(|_| Error::UnknownRemoteResponse(payload.clone()))?;
        return Ok(OtpRequestOutcome::Dispatched(pending));
    }
    if status == Some(6) || status == Some(5) {
        return Ok(OtpRequestOutcome::AttemptsExceeded);
    }
    Ok(OtpRequestOutcome::Rejected(
        message.unwrap_or("login request failed").to_string(),
    ))
}

/// Outcome of the OTP-verify step.
#[derive(Debug)]
pub enum VerifyOutcome {
    /// Persist the credential and delete the pending request.
    LoggedIn(InstallationCredential),
    /// Wrong code; the pending request stays usable for a retry.
    InvalidOtp,
    /// Too many wrong codes; terminal for this pending request.
    RetryLimitExceeded,
    Suspended,
    Rejected(String),
    Unrecognized(Value),
}

/// Decide what a verification response means, in priority order: success,
/// status 11 (wrong OTP), status 7 (retry limit), suspension, a service
/// message, and finally the raw payload.
pub fn interpret_verification(payload: &Value) -> VerifyOutcome {
    let status = payload.get("status").and_then(Value::as_i64);
    let suspended = payload
        .get("suspended")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if (status == Some(2) && !suspended) || payload.get("installationId").is_some() {
        if let Ok(credential) = serde_json::from_value(payload.clone()) {
            return VerifyOutcome::LoggedIn(credential);
        }
        // success markers without a usable credential fall through below
    }
    match status {
        Some(11) => VerifyOutcome::InvalidOtp,
        Some(7) => VerifyOutcome::RetryLimitExceeded,
        _ if suspended => VerifyOutcome::Suspended,
        _ => match payload.get("message").and_then(Value::as_str) {
            Some(message) => VerifyOutcome::Rejected(message.to_string()),
            None => VerifyOutcome::Unrecognized(payload.clone()),
        },
    }
}

/// Client for the two provisioning endpoints.
pub struct LoginClient {
    http: Client,
    device: DeviceProfile,
}

impl LoginClient {
    pub fn new(device: DeviceProfile) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(LoginClient { http, device })
    }

    /// Ask the service to send an OTP to `number`. Returns the response
    /// payload verbatim; run it through [`interpret_otp_request`].
    pub fn request_otp(&self, number: &PhoneNumber) -> Result<Value> {
        let body = json!({
            "countryCode": number.region_code(),
            "dialingCode": number.dialing_code(),
            "installationDetails": {
                "app": {
                    "buildVersion": 5,
                    "majorVersion": 11,
                    "minorVersion": 7,
                    "store": "GOOGLE_PLAY",
                },
                "device": {
                    "deviceId": self.device.device_id,
                    "language": "en",
                    "manufacturer": self.device.manufacturer,
                    "model": self.device.model,
                    "osName": self.device.os_name,
                    "osVersion": self.device.os_version,
                    "mobileServices": ["GMS"],
                },
                "language": "en",
            },
            "phoneNumber": number.significant(),
            "region": "region-2",
            "sequenceNo": 2,
        });
        self.post(SEND_OTP_URL, &body)
    }

    /// Submit the OTP for a pending request. The OTP must already be in
    /// 6-digit form; run the response through [`interpret_verification`].
    pub fn verify_otp(
        &self,
        number: &PhoneNumber,
        pending: &PendingLoginRequest,
        otp: &str,
    ) -> Result<Value> {
        if !phone::is_valid_otp(otp) {
            return Err(Error::InvalidOtpFormat);
        }
        let body = json!({
            "countryCode": number.region_code(),
            "dialingCode": number.dialing_code(),
            "phoneNumber": number.significant(),
            "requestId": pending.request_id,
            "token": otp,
        });
        self.post(VERIFY_OTP_URL, &body)
    }

    // The service answers some failures with a non-2xx status but a JSON
    // body carrying its own status codes, so the body is parsed regardless.
    fn post(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .header(USER_AGENT, APP_USER_AGENT)
            .header("clientsecret", CLIENT_SECRET)
            .json(body)
            .send()?;
        Ok(response.json()?)
    }
}

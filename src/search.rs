// Lookup client: single and bulk search against the remote service, using
// the installation credential as a bearer token. The service answers
// failures with a JSON body of its own, so remote errors are folded into
// the same renderable shape as successes, tagged with the HTTP status so
// callers can still tell them apart.

use crate::error::Result;
use crate::format::Format;
use crate::login::APP_USER_AGENT;
use crate::phone::PhoneNumber;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde_json::{json, Value};

const SEARCH_URL: &str = "https://search5-noneu.truecaller.com/v2/search";
const BULK_SEARCH_URL: &str = "https://search5-noneu.truecaller.com/v2/bulk";
const PLACEMENT: &str = "SEARCHRESULTS,HISTORY,DETAILS";

/// Reply from a lookup endpoint. Both arms carry a payload that renders the
/// same way; `remote_status` is set when the service answered non-2xx.
#[derive(Debug)]
pub struct SearchResponse {
    payload: Format,
    remote_status: Option<u16>,
}

impl SearchResponse {
    pub fn data(&self) -> &Format {
        &self.payload
    }

    pub fn remote_status(&self) -> Option<u16> {
        self.remote_status
    }

    pub fn is_remote_error(&self) -> bool {
        self.remote_status.is_some()
    }
}

/// Client for the two lookup endpoints.
pub struct SearchClient {
    http: Client,
    installation_id: String,
}

impl SearchClient {
    pub fn new(installation_id: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(SearchClient {
            http,
            installation_id: installation_id.into(),
        })
    }

    /// Look up a single number. The number is parsed against `region_code`
    /// to obtain the canonical significant-digits query key.
    pub fn search(&self, number: &str, region_code: &str) -> Result<SearchResponse> {
        let parsed = PhoneNumber::parse_with_region(number, region_code)?;
        self.get(
            SEARCH_URL,
            &search_params(parsed.significant(), parsed.region_code()),
        )
    }

    /// Look up a comma-joined list of numbers. The list is sent verbatim;
    /// the service does its own splitting and per-number validation.
    pub fn bulk_search(&self, numbers: &str, region_code: &str) -> Result<SearchResponse> {
        self.get(BULK_SEARCH_URL, &bulk_params(numbers, region_code))
    }

    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<SearchResponse> {
        let response = self
            .http
            .get(url)
            .query(params)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .header(USER_AGENT, APP_USER_AGENT)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.installation_id),
            )
            .send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(fold_body(status, &body))
    }
}

fn search_params(significant: &str, region_code: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", significant.to_string()),
        ("countryCode", region_code.to_string()),
        ("type", "4".to_string()),
        ("locAddr", String::new()),
        ("placement", PLACEMENT.to_string()),
        ("encoding", "json".to_string()),
    ]
}

fn bulk_params(numbers: &str, region_code: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", numbers.to_string()),
        ("countryCode", region_code.to_string()),
        ("type", "14".to_string()),
        ("placement", PLACEMENT.to_string()),
        ("encoding", "json".to_string()),
    ]
}

// A non-JSON body (HTML error pages, empty bodies) still folds into a
// renderable payload carrying the HTTP status and raw text.
fn fold_body(status: StatusCode, body: &str) -> SearchResponse {
    let payload: Value = serde_json::from_str(body)
        .unwrap_or_else(|_| json!({ "status": status.as_u16(), "message": body }));
    SearchResponse {
        payload: Format::new(payload),
        remote_status: (!status.is_success()).then_some(status.as_u16()),
    }
}

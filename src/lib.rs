// Library root
// -----------
// The binary (`main.rs`) is a thin shell over these modules.
//
// Module responsibilities:
// - `cli`: command-line argument surface (clap).
// - `phone` / `countries`: phone-number validation and the static country
//   metadata table backing it.
// - `login`: the two-step OTP handshake against the provisioning endpoints.
// - `search`: single and bulk lookups using the installation credential.
// - `format`: read-only accessors over lookup results and conversion to
//   JSON / XML / YAML / HTML / plain text.
// - `storage`: the two persisted slots (pending login request, credential).
// - `device`: the device fingerprint sent during provisioning.
// - `ui`: interactive terminal flows tying the above together.

pub mod cli;
pub mod countries;
pub mod device;
pub mod error;
pub mod format;
pub mod login;
pub mod phone;
pub mod search;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};

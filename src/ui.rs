// Terminal flows: the interactive login handshake and the dispatch of one
// CLI invocation to login / search / bulk search / installation-id display.
// Prompting uses `dialoguer`, spinners `indicatif`, styling `crossterm`.

use crate::cli::{Cli, Command, OutputFormat};
use crate::device::DeviceProfile;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::login::{
    interpret_otp_request, interpret_verification, InstallationCredential, LoginClient,
    OtpRequestOutcome, PendingLoginRequest, VerifyOutcome,
};
use crate::phone::{self, PhoneNumber};
use crate::search::SearchClient;
use crate::storage::AuthStore;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run one CLI invocation against the store in the user's home directory.
pub fn run(args: Cli) -> Result<()> {
    let store = AuthStore::in_home();
    let color = !args.no_color;

    if matches!(args.command, Some(Command::Login)) {
        let client = LoginClient::new(DeviceProfile::from_env())?;
        return login_flow(&store, &client);
    }

    if let Some(number) = args.search.as_deref() {
        let (installation_id, region) = stored_credential(&store)?;
        let client = SearchClient::new(installation_id)?;
        let response = with_spinner("Searching...", || client.search(number, &region))?;
        print!("{}", search_output(&args, response.data(), color));
        return Ok(());
    }

    if let Some(numbers) = args.bulk_search.as_deref() {
        let (installation_id, region) = stored_credential(&store)?;
        let client = SearchClient::new(installation_id)?;
        let response = with_spinner("Searching...", || client.bulk_search(numbers, &region))?;
        // bulk results are a plain mapping, always printed as JSON
        println!("{}", response.data().json(color, !args.raw));
        return Ok(());
    }

    if args.installation_id {
        let (installation_id, _) = stored_credential(&store)?;
        if args.raw {
            println!("{installation_id}");
        } else {
            print!("{}", labeled("Your InstallationId", &installation_id, color));
        }
        return Ok(());
    }

    // no operation requested
    use clap::CommandFactory;
    Cli::command().print_help()?;
    println!();
    Ok(())
}

// Lookups need the credential plus the region it was issued for; absence of
// either means the user has to log in (again).
fn stored_credential(store: &AuthStore) -> Result<(String, String)> {
    let credential = store.load_credential()?.ok_or(Error::NotAuthenticated)?;
    let region = credential
        .default_region()
        .ok_or(Error::NotAuthenticated)?
        .to_string();
    Ok((credential.installation_id, region))
}

/// The two-step login handshake: request an OTP (or resume a pending
/// request for the same number), then verify it and persist the credential.
pub fn login_flow(store: &AuthStore, client: &LoginClient) -> Result<()> {
    println!(
        "{} {}.\n",
        "Login\n\n Enter mobile number in International Format\n Example :"
            .yellow()
            .bold(),
        "+919912345678".magenta()
    );

    let raw: String = Input::new()
        .with_prompt("Enter your phone number")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            match PhoneNumber::parse(input) {
                Ok(_) => Ok(()),
                Err(_) => Err("Enter valid phone number in International Format"),
            }
        })
        .interact_text()?;
    let number = PhoneNumber::parse(&raw)?;

    let mut pending: Option<PendingLoginRequest> = None;
    if let Some(previous) = store.load_pending_request()? {
        if previous.matches(&number) {
            println!(
                "{}",
                "\nPrevious request was found for this mobile number.\n".magenta()
            );
            let reuse = Confirm::new()
                .with_prompt("Do you want to enter the previous OTP?")
                .interact()?;
            if reuse {
                pending = Some(previous);
            }
        }
    }

    let pending = match pending {
        Some(previous) => previous,
        None => {
            println!("{} {}.", "Sending OTP to".yellow(), number.e164().green());
            let payload = with_spinner("Sending OTP...", || client.request_otp(&number))?;
            let outcome = interpret_otp_request(&payload)?;
            let fresh = apply_otp_request_outcome(store, outcome)?;
            println!("{}", "Otp sent successfully.".green());
            fresh
        }
    };

    let otp: String = Input::new()
        .with_prompt("Enter Received OTP")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if phone::is_valid_otp(input) {
                Ok(())
            } else {
                Err("Enter valid 6-digits OTP")
            }
        })
        .interact_text()?;

    let payload = with_spinner("Verifying OTP...", || {
        client.verify_otp(&number, &pending, &otp)
    })?;
    let credential = apply_verify_outcome(store, interpret_verification(&payload))?;
    println!(
        "{} {}",
        "Your installationId :".yellow().bold(),
        credential.installation_id.as_str().green()
    );
    println!("{}", "Logged in successfully.".green());
    Ok(())
}

// The slot rules for the OTP-request step: a dispatched request is persisted
// so the OTP can be retried later; once the service cuts us off, any stale
// request on disk is useless and gets dropped.
fn apply_otp_request_outcome(
    store: &AuthStore,
    outcome: OtpRequestOutcome,
) -> Result<PendingLoginRequest> {
    match outcome {
        OtpRequestOutcome::Dispatched(fresh) => {
            store.save_pending_request(&fresh)?;
            Ok(fresh)
        }
        OtpRequestOutcome::AttemptsExceeded => {
            store.clear_pending_request()?;
            Err(Error::VerificationAttemptsExceeded)
        }
        OtpRequestOutcome::Rejected(message) => Err(Error::RemoteRejected(message)),
    }
}

// The slot rules for the verify step: only success persists the credential
// and consumes the pending request. A wrong OTP keeps the pending request so
// the user can retry; every other outcome leaves the slots untouched too.
fn apply_verify_outcome(
    store: &AuthStore,
    outcome: VerifyOutcome,
) -> Result<InstallationCredential> {
    match outcome {
        VerifyOutcome::LoggedIn(credential) => {
            store.save_credential(&credential)?;
            store.clear_pending_request()?;
            Ok(credential)
        }
        VerifyOutcome::InvalidOtp => Err(Error::InvalidOtp),
        VerifyOutcome::RetryLimitExceeded => Err(Error::RetryLimitExceeded),
        VerifyOutcome::Suspended => Err(Error::AccountSuspended),
        VerifyOutcome::Rejected(message) => Err(Error::RemoteRejected(message)),
        VerifyOutcome::Unrecognized(payload) => Err(Error::UnknownRemoteResponse(payload)),
    }
}

// What a single lookup prints. The -n / -e shortcuts are only taken when the
// other one is absent; asking for both falls back to the full text view.
fn search_output(args: &Cli, result: &Format, color: bool) -> String {
    match args.output_format() {
        Some(OutputFormat::Json) => format!("{}\n", result.json(color, !args.raw)),
        Some(OutputFormat::Xml) => result.xml(color),
        Some(OutputFormat::Yaml) => result.yaml(color),
        Some(OutputFormat::Html) => format!("{}\n", result.html(color)),
        Some(OutputFormat::Text) => result.text(color, true),
        None => {
            if args.name && !args.email {
                if args.raw {
                    format!("{}\n", result.name())
                } else {
                    labeled("Name", result.name(), color)
                }
            } else if args.email && !args.name {
                if args.raw {
                    format!("{}\n", result.email_id())
                } else {
                    labeled("Email", result.email_id(), color)
                }
            } else {
                result.text(color, true)
            }
        }
    }
}

fn labeled(label: &str, value: &str, color: bool) -> String {
    if color {
        format!("{} : {}\n", label.blue().bold(), value.green())
    } else {
        format!("{label} : {value}\n")
    }
}

// Spinner shown while a network call is in flight; cleared afterwards so it
// never mixes with the printed result.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = work();
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::{json, Map};

    fn pending() -> PendingLoginRequest {
        serde_json::from_value(json!({
            "status": 1,
            "requestId": "r1",
            "parsedPhoneNumber": 919_912_345_678_u64,
        }))
        .unwrap()
    }

    fn credential() -> InstallationCredential {
        InstallationCredential {
            installation_id: "abc".into(),
            phones: vec![],
            status: 2,
            suspended: false,
            extra: Map::new(),
        }
    }

    #[test]
    fn dispatched_request_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());

        let fresh = apply_otp_request_outcome(&store, OtpRequestOutcome::Dispatched(pending()))
            .unwrap();
        assert_eq!(fresh.request_id, "r1");
        let stored = store.load_pending_request().unwrap().unwrap();
        assert_eq!(stored.request_id, "r1");
    }

    #[test]
    fn exhausted_attempts_drop_the_stale_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        store.save_pending_request(&pending()).unwrap();

        let err =
            apply_otp_request_outcome(&store, OtpRequestOutcome::AttemptsExceeded).unwrap_err();
        assert!(matches!(err, Error::VerificationAttemptsExceeded));
        assert!(store.load_pending_request().unwrap().is_none());
    }

    #[test]
    fn rejected_request_leaves_the_slot_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        store.save_pending_request(&pending()).unwrap();

        let err = apply_otp_request_outcome(&store, OtpRequestOutcome::Rejected("no".into()))
            .unwrap_err();
        assert!(matches!(err, Error::RemoteRejected(_)));
        assert!(store.load_pending_request().unwrap().is_some());
    }

    #[test]
    fn login_persists_credential_and_consumes_the_pending_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        store.save_pending_request(&pending()).unwrap();

        let logged_in =
            apply_verify_outcome(&store, VerifyOutcome::LoggedIn(credential())).unwrap();
        assert_eq!(logged_in.installation_id, "abc");
        assert_eq!(
            store.load_credential().unwrap().unwrap().installation_id,
            "abc"
        );
        assert!(store.load_pending_request().unwrap().is_none());
    }

    #[test]
    fn wrong_otp_keeps_the_pending_request_for_a_retry() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        store.save_pending_request(&pending()).unwrap();

        let err = apply_verify_outcome(&store, VerifyOutcome::InvalidOtp).unwrap_err();
        assert!(matches!(err, Error::InvalidOtp));
        assert!(store.load_pending_request().unwrap().is_some());
        assert!(store.load_credential().unwrap().is_none());
    }

    #[test]
    fn terminal_verify_outcomes_touch_no_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        store.save_pending_request(&pending()).unwrap();

        for outcome in [
            VerifyOutcome::RetryLimitExceeded,
            VerifyOutcome::Suspended,
            VerifyOutcome::Rejected("no".into()),
            VerifyOutcome::Unrecognized(json!({ "status": 3 })),
        ] {
            assert!(apply_verify_outcome(&store, outcome).is_err());
            assert!(store.load_pending_request().unwrap().is_some());
            assert!(store.load_credential().unwrap().is_none());
        }
    }

    fn jane() -> Format {
        Format::new(json!({
            "data": [{
                "name": "Jane Doe",
                "internetAddresses": [{ "id": "jane@example.com" }],
            }],
        }))
    }

    fn parse_args(argv: &[&str]) -> Cli {
        Cli::parse_from(argv)
    }

    #[test]
    fn name_flag_alone_prints_the_label() {
        let args = parse_args(&["callerid", "-s", "+14155552671", "-n", "--nc"]);
        assert_eq!(
            search_output(&args, &jane(), false),
            "Name : Jane Doe\n"
        );

        let args = parse_args(&["callerid", "-s", "+14155552671", "-n", "-r", "--nc"]);
        assert_eq!(search_output(&args, &jane(), false), "Jane Doe\n");
    }

    #[test]
    fn email_flag_alone_prints_the_label() {
        let args = parse_args(&["callerid", "-s", "+14155552671", "-e", "--nc"]);
        assert_eq!(
            search_output(&args, &jane(), false),
            "Email : jane@example.com\n"
        );

        let args = parse_args(&["callerid", "-s", "+14155552671", "-e", "-r", "--nc"]);
        assert_eq!(search_output(&args, &jane(), false), "jane@example.com\n");
    }

    #[test]
    fn name_and_email_together_fall_back_to_the_text_view() {
        let args = parse_args(&["callerid", "-s", "+14155552671", "-n", "-e", "--nc"]);
        let result = jane();
        assert_eq!(search_output(&args, &result, false), result.text(false, true));

        // raw does not rescue the combination either
        let args = parse_args(&["callerid", "-s", "+14155552671", "-n", "-e", "-r", "--nc"]);
        assert_eq!(search_output(&args, &result, false), result.text(false, true));
    }
}

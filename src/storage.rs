// Persistence for the two slots the tool keeps on disk: the most recent
// unconfirmed login request and the installation credential. One JSON file
// per slot under a dot-directory in the user's home; an absent file simply
// means the slot is empty.

use crate::error::Result;
use crate::login::{InstallationCredential, PendingLoginRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub const AUTH_DIR: &str = ".callerid";
const REQUEST_FILE: &str = "request.json";
const AUTHKEY_FILE: &str = "authkey.json";

/// The credential/request store. Handshake and lookup code decide *when*
/// slots change; this type owns the how.
pub struct AuthStore {
    dir: PathBuf,
}

impl AuthStore {
    /// Store rooted in the user's home directory.
    pub fn in_home() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        AuthStore {
            dir: home.join(AUTH_DIR),
        }
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        AuthStore { dir: dir.into() }
    }

    pub fn load_pending_request(&self) -> Result<Option<PendingLoginRequest>> {
        self.load(REQUEST_FILE)
    }

    pub fn save_pending_request(&self, pending: &PendingLoginRequest) -> Result<()> {
        self.save(REQUEST_FILE, pending)
    }

    pub fn clear_pending_request(&self) -> Result<()> {
        self.clear(REQUEST_FILE)
    }

    pub fn load_credential(&self) -> Result<Option<InstallationCredential>> {
        self.load(AUTHKEY_FILE)
    }

    pub fn save_credential(&self, credential: &InstallationCredential) -> Result<()> {
        self.save(AUTHKEY_FILE, credential)
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn clear(&self, name: &str) -> Result<()> {
        let path = self.dir.join(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn pending() -> PendingLoginRequest {
        serde_json::from_value(json!({
            "status": 1,
            "message": "Sent",
            "domain": "noneu",
            "parsedPhoneNumber": 919_912_345_678_u64,
            "requestId": "r1",
            "method": "sms",
            "tokenTtl": 300,
        }))
        .unwrap()
    }

    #[test]
    fn empty_slots_read_back_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());
        assert!(store.load_pending_request().unwrap().is_none());
        assert!(store.load_credential().unwrap().is_none());
    }

    #[test]
    fn pending_request_survives_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());

        store.save_pending_request(&pending()).unwrap();
        let loaded = store.load_pending_request().unwrap().unwrap();
        assert_eq!(loaded.request_id, "r1");
        assert_eq!(loaded.parsed_phone_number, 919_912_345_678);
        // fields outside the known set survive persistence
        assert_eq!(loaded.extra.get("domain"), Some(&json!("noneu")));
    }

    #[test]
    fn clearing_the_pending_slot_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());

        store.save_pending_request(&pending()).unwrap();
        store.clear_pending_request().unwrap();
        assert!(store.load_pending_request().unwrap().is_none());
        // clearing an already-empty slot is not an error
        store.clear_pending_request().unwrap();
    }

    #[test]
    fn credential_slot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());

        let credential = InstallationCredential {
            installation_id: "abc".into(),
            phones: vec![],
            status: 2,
            suspended: false,
            extra: Map::new(),
        };
        store.save_credential(&credential).unwrap();
        let loaded = store.load_credential().unwrap().unwrap();
        assert_eq!(loaded.installation_id, "abc");
        assert_eq!(loaded.status, 2);
    }

    #[test]
    fn slots_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuthStore::at(dir.path());

        store.save_pending_request(&pending()).unwrap();
        assert!(store.load_credential().unwrap().is_none());
    }
}

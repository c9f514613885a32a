// Device fingerprint sent with the provisioning request. Every field can be
// overridden independently through the environment; unset fields fall back
// to a fixed profile, except the device id which is freshly generated.

use rand::Rng;

pub const ENV_DEVICE_ID: &str = "CALLERID_DEVICE_ID";
pub const ENV_DEVICE_MANUFACTURER: &str = "CALLERID_DEVICE_MANUFACTURER";
pub const ENV_DEVICE_MODEL: &str = "CALLERID_DEVICE_MODEL";
pub const ENV_DEVICE_OS_NAME: &str = "CALLERID_DEVICE_OS_NAME";
pub const ENV_DEVICE_OS_VERSION: &str = "CALLERID_DEVICE_OS_VERSION";

const DEFAULT_MANUFACTURER: &str = "Xiaomi";
const DEFAULT_MODEL: &str = "M2010J19SG";
const DEFAULT_OS_NAME: &str = "Android";
const DEFAULT_OS_VERSION: &str = "10";

/// The device identity presented to the provisioning endpoint.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    pub device_id: String,
    pub manufacturer: String,
    pub model: String,
    pub os_name: String,
    pub os_version: String,
}

impl DeviceProfile {
    /// Build a profile from the environment, falling back to the built-in
    /// defaults and a random device id.
    pub fn from_env() -> Self {
        DeviceProfile {
            device_id: env_or(ENV_DEVICE_ID, random_device_id),
            manufacturer: env_or(ENV_DEVICE_MANUFACTURER, || DEFAULT_MANUFACTURER.into()),
            model: env_or(ENV_DEVICE_MODEL, || DEFAULT_MODEL.into()),
            os_name: env_or(ENV_DEVICE_OS_NAME, || DEFAULT_OS_NAME.into()),
            os_version: env_or(ENV_DEVICE_OS_VERSION, || DEFAULT_OS_VERSION.into()),
        }
    }
}

fn env_or(key: &str, fallback: impl FnOnce() -> String) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback())
}

/// 16 lowercase-alphanumeric characters, matching what the service expects
/// from a real installation.
pub fn random_device_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_is_sixteen_lowercase_alphanumerics() {
        let id = random_device_id();
        assert_eq!(id.len(), 16);
        assert!(id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(random_device_id(), random_device_id());
    }

    #[test]
    fn profile_has_no_empty_fields() {
        let profile = DeviceProfile::from_env();
        assert!(!profile.device_id.is_empty());
        assert!(!profile.manufacturer.is_empty());
        assert!(!profile.model.is_empty());
        assert!(!profile.os_name.is_empty());
        assert!(!profile.os_version.is_empty());
    }
}

//! Loader for the `settings.cfg` file.
//!
//! The file is plain INI with three sections:
//!
//! ```ini
//! [PRIME]
//! PRIME_URL = https://prime.example.net
//! PRIME_USER = admin
//! PRIME_PW = secret
//!
//! [SPARK]
//! SPARK_AUTH_TOKEN = Bearer abc
//! SPARK_ROOM_ID = Y2lzY29z...
//! SPARK_URL = https://api.ciscospark.com/v1/messages
//!
//! [TROPO]
//! TROPO_AUTH_TOKEN = 1234
//! TROPO_PHONE_NR = 49151282828
//! ```
//!
//! Keys are matched case-insensitively and values are taken verbatim (no quote or
//! escape processing), so tokens survive untouched. Presence is the only check.
use std::path::Path;

use ini::{Ini, ParseOption};

use crate::error::NotifierError;
use crate::result::Result;

/// File name looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.cfg";
/// REST root below `PRIME_URL` used when `PRIME_API_PATH` is absent.
pub const DEFAULT_PRIME_API_PATH: &str = "webacs/api/v1";
/// Tropo session endpoint used when `TROPO_URL` is absent.
pub const DEFAULT_TROPO_URL: &str = "https://api.tropo.com/1.0/sessions";

/// Keys that have to be present for a complete configuration.
pub const REQUIRED_KEYS: [&str; 8] = [
    "PRIME_URL",
    "PRIME_USER",
    "PRIME_PW",
    "SPARK_AUTH_TOKEN",
    "SPARK_ROOM_ID",
    "SPARK_URL",
    "TROPO_AUTH_TOKEN",
    "TROPO_PHONE_NR",
];

/// Management API (Prime Infrastructure) access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSettings {
    /// Base URL of the Prime instance.
    pub url: String,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// REST root below `url`.
    pub api_path: String,
}

impl Default for PrimeSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            api_path: String::from(DEFAULT_PRIME_API_PATH),
        }
    }
}

impl PrimeSettings {
    fn from_ini(ini: &Ini) -> Result<Self> {
        Ok(Self {
            url: required(ini, "PRIME", "PRIME_URL")?,
            user: required(ini, "PRIME", "PRIME_USER")?,
            password: required(ini, "PRIME", "PRIME_PW")?,
            api_path: optional(ini, "PRIME", "PRIME_API_PATH", DEFAULT_PRIME_API_PATH),
        })
    }

    /// Absolute URL of the REST root, e.g. `https://prime/webacs/api/v1`.
    pub fn api_root(&self) -> String {
        let base = self.url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// Chat API (Spark) access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparkSettings {
    /// Value sent verbatim in the `Authorization` header.
    pub auth_token: String,
    /// Target room.
    pub room_id: String,
    /// Messages endpoint.
    pub url: String,
}

impl SparkSettings {
    fn from_ini(ini: &Ini) -> Result<Self> {
        Ok(Self {
            auth_token: required(ini, "SPARK", "SPARK_AUTH_TOKEN")?,
            room_id: required(ini, "SPARK", "SPARK_ROOM_ID")?,
            url: required(ini, "SPARK", "SPARK_URL")?,
        })
    }

    /// Loads only the `[SPARK]` section of `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_ini(&read_file(path.as_ref())?)
    }
}

/// Voice API (Tropo) access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TropoSettings {
    /// Session token of the Tropo application.
    pub auth_token: String,
    /// Number to dial, with country code and without `+`.
    pub phone_number: String,
    /// Session endpoint.
    pub url: String,
}

impl Default for TropoSettings {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            phone_number: String::new(),
            url: String::from(DEFAULT_TROPO_URL),
        }
    }
}

impl TropoSettings {
    fn from_ini(ini: &Ini) -> Result<Self> {
        Ok(Self {
            auth_token: required(ini, "TROPO", "TROPO_AUTH_TOKEN")?,
            phone_number: required(ini, "TROPO", "TROPO_PHONE_NR")?,
            url: optional(ini, "TROPO", "TROPO_URL", DEFAULT_TROPO_URL),
        })
    }
}

/// Complete configuration of the alarm notifier. Built once, then passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// `[PRIME]` section.
    pub prime: PrimeSettings,
    /// `[SPARK]` section.
    pub spark: SparkSettings,
    /// `[TROPO]` section.
    pub tropo: TropoSettings,
}

impl Settings {
    /// Reads and validates the settings file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_ini(&read_file(path.as_ref())?)
    }

    /// Parses settings from INI text.
    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(text, parse_option())
            .map_err(|e| NotifierError::Config(e.to_string()))?;
        Self::from_ini(&ini)
    }

    /// Reads `path` section by section. A section that fails to load keeps its
    /// defaults and its error is collected; complete sections are kept as read.
    pub fn load_lenient<P: AsRef<Path>>(path: P) -> (Self, Vec<NotifierError>) {
        match read_file(path.as_ref()) {
            Ok(ini) => Self::from_ini_lenient(&ini),
            Err(e) => (Self::default(), vec![e]),
        }
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        Ok(Self {
            prime: PrimeSettings::from_ini(ini)?,
            spark: SparkSettings::from_ini(ini)?,
            tropo: TropoSettings::from_ini(ini)?,
        })
    }

    fn from_ini_lenient(ini: &Ini) -> (Self, Vec<NotifierError>) {
        let mut errors = Vec::new();
        let prime = PrimeSettings::from_ini(ini).unwrap_or_else(|e| {
            errors.push(e);
            PrimeSettings::default()
        });
        let spark = SparkSettings::from_ini(ini).unwrap_or_else(|e| {
            errors.push(e);
            SparkSettings::default()
        });
        let tropo = TropoSettings::from_ini(ini).unwrap_or_else(|e| {
            errors.push(e);
            TropoSettings::default()
        });
        (Self { prime, spark, tropo }, errors)
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn read_file(path: &Path) -> Result<Ini> {
    Ini::load_from_file_opt(path, parse_option())
        .map_err(|e| NotifierError::Config(format!("{}: {}", path.display(), e)))
}

fn lookup<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    let properties = ini.section(Some(section))?;
    properties
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn required(ini: &Ini, section: &str, key: &str) -> Result<String> {
    lookup(ini, section, key)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| NotifierError::MissingSetting {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn optional(ini: &Ini, section: &str, key: &str, default: &str) -> String {
    lookup(ini, section, key)
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    const FULL: &str = "\
[PRIME]
PRIME_URL = https://prime.example.net/
PRIME_USER = admin
PRIME_PW = s3cr\\et

[SPARK]
SPARK_AUTH_TOKEN = Bearer abc123
SPARK_ROOM_ID = room-42
SPARK_URL = https://api.ciscospark.com/v1/messages

[TROPO]
tropo_auth_token = 987
TROPO_PHONE_NR = 49151282828
";

    #[test]
    fn parses_all_sections() {
        let settings = Settings::parse(FULL).unwrap();
        assert_eq!(settings.prime.user, "admin");
        assert_eq!(settings.prime.password, "s3cr\\et");
        assert_eq!(settings.prime.api_root(), "https://prime.example.net/webacs/api/v1");
        assert_eq!(settings.spark.auth_token, "Bearer abc123");
        assert_eq!(settings.spark.room_id, "room-42");
        assert_eq!(settings.tropo.auth_token, "987");
        assert_eq!(settings.tropo.phone_number, "49151282828");
        assert_eq!(settings.tropo.url, DEFAULT_TROPO_URL);
    }

    #[test]
    fn optional_keys_override_defaults() {
        let text = format!("{}TROPO_URL = http://127.0.0.1:9000/sessions\n", FULL)
            .replace("PRIME_PW = s3cr\\et", "PRIME_PW = pw\nPRIME_API_PATH = /api/");
        let settings = Settings::parse(&text).unwrap();
        assert_eq!(settings.prime.api_root(), "https://prime.example.net/api");
        assert_eq!(settings.tropo.url, "http://127.0.0.1:9000/sessions");
    }

    #[test]
    fn missing_key_is_reported() {
        let text = FULL.replace("SPARK_ROOM_ID = room-42\n", "");
        let err = Settings::parse(&text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        match err {
            NotifierError::MissingSetting { section, key } => {
                assert_eq!(section, "SPARK");
                assert_eq!(key, "SPARK_ROOM_ID");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("nope.cfg")).unwrap_err();
        assert!(matches!(err, NotifierError::Config(_)));
    }

    #[test]
    fn spark_section_loads_alone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[SPARK]\nSPARK_AUTH_TOKEN = tok\nSPARK_ROOM_ID = r1\nSPARK_URL = http://chat\n"
        )
        .unwrap();
        let spark = SparkSettings::load(file.path()).unwrap();
        assert_eq!(
            spark,
            SparkSettings {
                auth_token: "tok".into(),
                room_id: "r1".into(),
                url: "http://chat".into(),
            }
        );
        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn lenient_load_keeps_complete_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", FULL.replace("TROPO_PHONE_NR = 49151282828\n", "")).unwrap();

        let (settings, errors) = Settings::load_lenient(file.path());
        assert_eq!(settings.prime.url, "https://prime.example.net/");
        assert_eq!(settings.prime.user, "admin");
        assert_eq!(settings.spark.room_id, "room-42");
        assert_eq!(settings.tropo, TropoSettings::default());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            NotifierError::MissingSetting { section, key } if section == "TROPO" && key == "TROPO_PHONE_NR"
        ));
    }

    #[test]
    fn lenient_load_of_missing_file_is_blank() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, errors) = Settings::load_lenient(dir.path().join("nope.cfg"));
        assert_eq!(settings, Settings::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::Config);
    }

    #[test]
    fn blank_defaults_keep_endpoints() {
        let settings = Settings::default();
        assert!(settings.prime.url.is_empty());
        assert_eq!(settings.prime.api_path, DEFAULT_PRIME_API_PATH);
        assert_eq!(settings.tropo.url, DEFAULT_TROPO_URL);
    }
}

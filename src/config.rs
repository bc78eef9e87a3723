use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A validation error in the configuration
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.field, self.message)
    }
}

/// Privilege labels: lowercase words joined by single dashes.
static LABEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// Account numbers: at least four digits, nothing else.
static ACCOUNT_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4,}$").unwrap());

/// Seed values for the plain roster member.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PersonSeed {
    #[serde(default = "default_person_name")]
    pub name: String,
    #[serde(default = "default_person_age")]
    pub age: u32,
}

fn default_person_name() -> String {
    "Alex".to_string()
}
fn default_person_age() -> u32 {
    25
}

impl Default for PersonSeed {
    fn default() -> Self {
        Self {
            name: default_person_name(),
            age: default_person_age(),
        }
    }
}

/// Seed values for the admin roster member.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminSeed {
    #[serde(default = "default_admin_name")]
    pub name: String,
    #[serde(default = "default_admin_age")]
    pub age: u32,
    #[serde(default = "default_admin_privileges")]
    pub privileges: Vec<String>,
}

fn default_admin_name() -> String {
    "Sam".to_string()
}
fn default_admin_age() -> u32 {
    30
}
fn default_admin_privileges() -> Vec<String> {
    vec!["manage-users".to_string(), "edit-content".to_string()]
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: default_admin_name(),
            age: default_admin_age(),
            privileges: default_admin_privileges(),
        }
    }
}

/// Roster section: who the stock samples introduce.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub person: PersonSeed,
    #[serde(default)]
    pub admin: AdminSeed,
}

/// Seed values for the sample savings account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SavingsSeed {
    #[serde(default = "default_savings_holder")]
    pub holder: String,
    #[serde(default = "default_savings_number")]
    pub number: String,
    #[serde(default = "default_savings_deposit")]
    pub opening_deposit: f64,
    #[serde(default = "default_savings_rate")]
    pub interest_rate: f64,
}

fn default_savings_holder() -> String {
    "Alice Johnson".to_string()
}
fn default_savings_number() -> String {
    "1234567890".to_string()
}
fn default_savings_deposit() -> f64 {
    1000.0
}
fn default_savings_rate() -> f64 {
    2.5
}

impl Default for SavingsSeed {
    fn default() -> Self {
        Self {
            holder: default_savings_holder(),
            number: default_savings_number(),
            opening_deposit: default_savings_deposit(),
            interest_rate: default_savings_rate(),
        }
    }
}

/// Seed values for the sample checking account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckingSeed {
    #[serde(default = "default_checking_holder")]
    pub holder: String,
    #[serde(default = "default_checking_number")]
    pub number: String,
    #[serde(default = "default_checking_deposit")]
    pub opening_deposit: f64,
    #[serde(default = "default_checking_overdraft")]
    pub overdraft_limit: f64,
}

fn default_checking_holder() -> String {
    "Bob Smith".to_string()
}
fn default_checking_number() -> String {
    "0987654321".to_string()
}
fn default_checking_deposit() -> f64 {
    500.0
}
fn default_checking_overdraft() -> f64 {
    200.0
}

impl Default for CheckingSeed {
    fn default() -> Self {
        Self {
            holder: default_checking_holder(),
            number: default_checking_number(),
            opening_deposit: default_checking_deposit(),
            overdraft_limit: default_checking_overdraft(),
        }
    }
}

/// Bank section: the two accounts the banking sample opens.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BankConfig {
    #[serde(default)]
    pub savings: SavingsSeed,
    #[serde(default)]
    pub checking: CheckingSeed,
}

/// Main configuration structure. `Default` is the stock sample data, so a
/// missing or partial config file still runs every demo.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub bank: BankConfig,
}

impl DemoConfig {
    /// Load configuration from default paths
    /// Priority: project (./kata.toml) > user (~/.kata/config.toml)
    /// Starts with the stock values, then merges whatever files exist
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Try user-level config first
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".kata").join("config.toml");
            if user_config.exists() {
                let user = Self::load_from(&user_config)?;
                config.merge(user);
            }
        }

        // Try project-level config (overrides user-level)
        let project_config = Path::new("kata.toml");
        if project_config.exists() {
            let project = Self::load_from(project_config)?;
            config.merge(project);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DemoConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Stock values merged with one explicit file, skipping the default
    /// search paths
    pub fn load_with_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::load_from(path)?);
        Ok(config)
    }

    /// Merge another config into this one (other takes priority)
    /// Sections replace wholesale; a partial section arrives already filled
    /// out with the stock values, so nothing is lost
    pub fn merge(&mut self, other: DemoConfig) {
        self.roster = other.roster;
        self.bank = other.bank;
    }

    /// Validate configuration and return any errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Privilege labels must be well formed
        for (i, label) in self.roster.admin.privileges.iter().enumerate() {
            if !LABEL_PATTERN.is_match(label) {
                errors.push(ValidationError {
                    field: format!("roster.admin.privileges[{}]", i),
                    message: format!(
                        "Invalid label '{}', expected lowercase words joined by dashes",
                        label
                    ),
                });
            }
        }

        // Account numbers must be digits, long enough to mask
        for (field, number) in [
            ("bank.savings.number", &self.bank.savings.number),
            ("bank.checking.number", &self.bank.checking.number),
        ] {
            if !ACCOUNT_NUMBER_PATTERN.is_match(number) {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: format!("Invalid account number '{}', expected at least four digits", number),
                });
            }
        }

        // Opening deposits must not be negative
        for (field, deposit) in [
            ("bank.savings.opening_deposit", self.bank.savings.opening_deposit),
            ("bank.checking.opening_deposit", self.bank.checking.opening_deposit),
        ] {
            if deposit < 0.0 {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: format!("Must not be negative, got {}", deposit),
                });
            }
        }

        // Validate interest_rate range
        if !(0.0..=100.0).contains(&self.bank.savings.interest_rate) {
            errors.push(ValidationError {
                field: "bank.savings.interest_rate".to_string(),
                message: format!(
                    "Must be between 0 and 100, got {}",
                    self.bank.savings.interest_rate
                ),
            });
        }

        // Validate overdraft_limit
        if self.bank.checking.overdraft_limit < 0.0 {
            errors.push(ValidationError {
                field: "bank.checking.overdraft_limit".to_string(),
                message: format!(
                    "Must not be negative, got {}",
                    self.bank.checking.overdraft_limit
                ),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sample_values() {
        let config = DemoConfig::default();
        assert_eq!(config.roster.person.name, "Alex");
        assert_eq!(config.roster.person.age, 25);
        assert_eq!(config.roster.admin.name, "Sam");
        assert_eq!(config.roster.admin.age, 30);
        assert_eq!(
            config.roster.admin.privileges,
            vec!["manage-users".to_string(), "edit-content".to_string()]
        );
        assert_eq!(config.bank.savings.holder, "Alice Johnson");
        assert_eq!(config.bank.savings.number, "1234567890");
        assert!((config.bank.savings.opening_deposit - 1000.0).abs() < 1e-9);
        assert!((config.bank.savings.interest_rate - 2.5).abs() < 1e-9);
        assert_eq!(config.bank.checking.holder, "Bob Smith");
        assert_eq!(config.bank.checking.number, "0987654321");
        assert!((config.bank.checking.opening_deposit - 500.0).abs() < 1e-9);
        assert!((config.bank.checking.overdraft_limit - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_default_config() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_privilege_label() {
        let mut config = DemoConfig::default();
        config.roster.admin.privileges = vec!["Manage Users".to_string()];
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.contains("privileges[0]"));
        assert!(errors[0].message.contains("Invalid label"));
    }

    #[test]
    fn test_validate_rejects_dangling_dash() {
        let mut config = DemoConfig::default();
        config.roster.admin.privileges = vec!["manage-".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_empty_privileges() {
        let mut config = DemoConfig::default();
        config.roster.admin.privileges.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_short_account_number() {
        let mut config = DemoConfig::default();
        config.bank.savings.number = "123".to_string();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.contains("bank.savings.number"));
    }

    #[test]
    fn test_validate_negative_opening_deposit() {
        let mut config = DemoConfig::default();
        config.bank.checking.opening_deposit = -1.0;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.contains("checking.opening_deposit"));
    }

    #[test]
    fn test_validate_interest_rate_range() {
        let mut config = DemoConfig::default();
        config.bank.savings.interest_rate = 150.0;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.contains("interest_rate"));
        assert!(errors[0].message.contains("between 0 and 100"));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let mut config = DemoConfig::default();
        config.roster.admin.privileges = vec!["Bad Label".to_string()];
        config.bank.savings.number = "12".to_string();
        config.bank.savings.interest_rate = -3.0;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_partial_file_keeps_stock_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kata.toml");
        std::fs::write(&path, "[roster.person]\nname = \"Riley\"\n").unwrap();

        let config = DemoConfig::load_with_file(&path).unwrap();
        assert_eq!(config.roster.person.name, "Riley");
        // Unset fields come back as the stock values.
        assert_eq!(config.roster.person.age, 25);
        assert_eq!(config.roster.admin.name, "Sam");
        assert_eq!(config.bank.savings.holder, "Alice Johnson");
    }

    #[test]
    fn test_config_survives_a_toml_round_trip() {
        let config = DemoConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: DemoConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.roster.person.name, config.roster.person.name);
        assert_eq!(parsed.roster.person.age, config.roster.person.age);
        assert_eq!(parsed.roster.admin.privileges, config.roster.admin.privileges);
        assert_eq!(parsed.bank.savings.number, config.bank.savings.number);
        assert!(
            (parsed.bank.savings.interest_rate - config.bank.savings.interest_rate).abs() < 1e-9
        );
        assert!(
            (parsed.bank.checking.overdraft_limit - config.bank.checking.overdraft_limit).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_merge_takes_the_other_sections() {
        let mut config = DemoConfig::default();
        let other: DemoConfig = toml::from_str(
            "[bank.savings]\ninterest_rate = 4.0\n\n[roster.admin]\nname = \"Jo\"\n",
        )
        .unwrap();
        config.merge(other);
        assert!((config.bank.savings.interest_rate - 4.0).abs() < 1e-9);
        assert_eq!(config.roster.admin.name, "Jo");
        // Untouched fields of a replaced section are the stock values.
        assert_eq!(config.roster.admin.age, 30);
    }

    #[test]
    fn test_load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kata.toml");
        std::fs::write(&path, "[roster.person\nname = ").unwrap();
        assert!(DemoConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            field: "bank.savings.interest_rate".to_string(),
            message: "Must be between 0 and 100, got 150".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "[bank.savings.interest_rate]: Must be between 0 and 100, got 150"
        );
    }
}

//! Layered configuration loading.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::{ConfigError, TollgateConfig};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::unsupported_format(name)),
        }
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_name(extension)
    }

    fn parse(self, content: &str) -> Result<TollgateConfig, ConfigError> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Builds a [`TollgateConfig`] from defaults, a file and the environment.
///
/// Layers apply in call order, except environment overrides, which always
/// apply last inside [`load`](Self::load). A file replaces the whole
/// configuration; sections it omits fall back to their defaults, not to an
/// earlier layer.
///
/// ```no_run
/// use tollgate_config::ConfigLoader;
///
/// # fn main() -> Result<(), tollgate_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_dotenv()?
///     .with_file("tollgate.toml")?
///     .with_env_prefix("TOLLGATE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: TollgateConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the default configuration.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = TollgateConfig::default();
        self
    }

    /// Resets to the development preset.
    ///
    /// ```
    /// use tollgate_config::{ConfigLoader, LogFormat};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = TollgateConfig::development();
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or unreadable, has another extension, or
    /// does not deserialize (including unknown fields).
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::not_found(path));
        }

        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        self.config = format.parse(&content)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists and cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses configuration text in the named format (`"toml"` or `"json"`).
    ///
    /// # Errors
    ///
    /// Fails on an unknown format or a document that does not deserialize.
    ///
    /// ```
    /// use tollgate_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[request]\npayment = \"Sberbank\"\n", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.request.get("payment"), Some("Sberbank"));
    /// assert_eq!(config.request.get("name"), None);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = Format::from_name(format)?.parse(content)?;
        Ok(self)
    }

    /// Enables `PREFIX__SECTION__KEY` environment overrides.
    ///
    /// Recognized keys, shown with prefix `TOLLGATE`:
    ///
    /// | Variable                              | Effect                          |
    /// |---------------------------------------|---------------------------------|
    /// | `TOLLGATE__REQUEST__<FIELD>`          | sets field `<field>` (lowercased) |
    /// | `TOLLGATE__PIPELINE__MIDDLEWARE`      | comma-separated step names      |
    /// | `TOLLGATE__PIPELINE__HANDLERS`        | comma-separated step names      |
    /// | `TOLLGATE__LOGGING__ENABLED`          | boolean                         |
    /// | `TOLLGATE__LOGGING__LEVEL`            | level or filter directive       |
    /// | `TOLLGATE__LOGGING__FORMAT`           | `json` or `pretty`              |
    /// | `TOLLGATE__LOGGING__ANSI_ENABLED`     | boolean                         |
    /// | `TOLLGATE__LOGGING__INCLUDE_LOCATION` | boolean                         |
    ///
    /// Other keys under the prefix are ignored.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads a `.env` file into the process environment, if one exists.
    ///
    /// # Errors
    ///
    /// Fails if a `.env` file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Fails if an override does not parse or the result is invalid.
    pub fn load(mut self) -> Result<TollgateConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let vars = prefixed_vars(&prefix, env::vars_os())?;
            self.apply_env_overrides(&prefix, vars)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration as layered so far, skipping environment
    /// overrides and validation.
    #[must_use]
    pub fn load_unvalidated(self) -> TollgateConfig {
        self.config
    }

    fn apply_env_overrides<I>(&mut self, prefix: &str, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .try_for_each(|(key, value)| self.apply_env_var(&key, &value, prefix))
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let path = key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_var(key, "expected PREFIX__SECTION__KEY"))?;

        let flag = |value: &str| {
            parse_bool(value).ok_or_else(|| ConfigError::env_var(key, "expected boolean"))
        };

        let logging = &mut self.config.logging;
        match path.split("__").collect::<Vec<_>>().as_slice() {
            ["REQUEST", field] if !field.is_empty() => {
                let request = std::mem::take(&mut self.config.request);
                self.config.request = request.with_field(field.to_lowercase(), value);
            }
            ["PIPELINE", "MIDDLEWARE"] => self.config.pipeline.middleware = parse_list(value),
            ["PIPELINE", "HANDLERS"] => self.config.pipeline.handlers = parse_list(value),
            ["LOGGING", "ENABLED"] => logging.enabled = flag(value)?,
            ["LOGGING", "LEVEL"] => logging.level = value.to_lowercase(),
            ["LOGGING", "FORMAT"] => {
                logging.format = value
                    .parse()
                    .map_err(|reason: String| ConfigError::env_var(key, reason))?;
            }
            ["LOGGING", "ANSI_ENABLED"] => logging.ansi_enabled = flag(value)?,
            ["LOGGING", "INCLUDE_LOCATION"] => logging.include_location = flag(value)?,
            _ => {}
        }

        Ok(())
    }
}

/// Keeps the variables under `PREFIX__`.
///
/// Keys that are not valid UTF-8 cannot carry the prefix and are skipped. A
/// prefixed key whose value is not valid UTF-8 is an error.
fn prefixed_vars<I>(prefix: &str, vars: I) -> Result<Vec<(String, String)>, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let marker = format!("{prefix}__");
    let mut selected = Vec::new();

    for (key, value) in vars {
        let Ok(key) = key.into_string() else {
            continue;
        };
        if !key.starts_with(&marker) {
            continue;
        }
        let value = value
            .into_string()
            .map_err(|_| ConfigError::env_var(&key, "value is not valid UTF-8"))?;
        selected.push((key, value));
    }

    Ok(selected)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Splits a comma-separated step list. Blank entries are dropped, so an empty
/// string yields an empty list.
fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;

    fn override_with(vars: &[(&str, &str)]) -> Result<TollgateConfig, ConfigError> {
        let mut loader = ConfigLoader::new();
        loader.apply_env_overrides(
            "TEST",
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        )?;
        Ok(loader.load_unvalidated())
    }

    #[test]
    fn test_new_loads_defaults() {
        assert_eq!(ConfigLoader::new().load().unwrap(), TollgateConfig::default());
    }

    #[test]
    fn test_json_string_keeps_section_defaults() {
        let json = r#"{"request": {"name": "John", "age": "30"}, "pipeline": {"handlers": []}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "JSON")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.request.get("age"), Some("30"));
        assert!(config.pipeline.handlers.is_empty());
        assert_eq!(config.pipeline.middleware, vec!["age", "country", "name"]);
    }

    #[test]
    fn test_unknown_string_format() {
        let result = ConfigLoader::new().with_string("", "yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().with_file("/nonexistent/tollgate.toml");
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/tollgate.toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config, TollgateConfig::default());
    }

    #[test]
    fn test_load_validates_but_unvalidated_does_not() {
        let loader = || {
            ConfigLoader::new()
                .with_string("[logging]\nlevel = \"tollgate=loud\"\n", "toml")
                .unwrap()
        };

        assert!(matches!(loader().load(), Err(ConfigError::InvalidValue { .. })));
        assert_eq!(loader().load_unvalidated().logging.level, "tollgate=loud");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("age, country ,name"), vec!["age", "country", "name"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_request_field_override() {
        let config =
            override_with(&[("TEST__REQUEST__AGE", "18"), ("TEST__REQUEST__LOYALTY", "gold")])
                .unwrap();

        assert_eq!(config.request.get("age"), Some("18"));
        assert_eq!(config.request.get("loyalty"), Some("gold"));
        assert_eq!(config.request.get("name"), Some("John"));
    }

    #[test]
    fn test_pipeline_override() {
        let config = override_with(&[
            ("TEST__PIPELINE__HANDLERS", "sberbank,qiwi"),
            ("TEST__PIPELINE__MIDDLEWARE", ""),
        ])
        .unwrap();

        assert_eq!(config.pipeline.handlers, vec!["sberbank", "qiwi"]);
        assert!(config.pipeline.middleware.is_empty());
    }

    #[test]
    fn test_logging_override() {
        let config = override_with(&[
            ("TEST__LOGGING__LEVEL", "DEBUG"),
            ("TEST__LOGGING__FORMAT", "pretty"),
            ("TEST__LOGGING__ENABLED", "no"),
            ("TEST__LOGGING__INCLUDE_LOCATION", "yes"),
        ])
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(!config.logging.enabled);
        assert!(config.logging.include_location);
    }

    #[test]
    fn test_bad_override_values() {
        assert!(matches!(
            override_with(&[("TEST__LOGGING__ENABLED", "maybe")]),
            Err(ConfigError::EnvVar { .. })
        ));
        assert!(matches!(
            override_with(&[("TEST__LOGGING__FORMAT", "xml")]),
            Err(ConfigError::EnvVar { .. })
        ));
    }

    #[test]
    fn test_unknown_override_ignored() {
        let config = override_with(&[("TEST__SERVER__PORT", "8080")]).unwrap();
        assert_eq!(config, TollgateConfig::default());
    }

    #[test]
    fn test_prefixed_vars_selects_prefix_only() {
        let vars = vec![
            (OsString::from("TEST__LOGGING__LEVEL"), OsString::from("info")),
            (OsString::from("TESTING"), OsString::from("x")),
            (OsString::from("PATH"), OsString::from("/bin")),
        ];

        let selected = prefixed_vars("TEST", vars).unwrap();
        assert_eq!(
            selected,
            vec![("TEST__LOGGING__LEVEL".to_string(), "info".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_prefixed_vars_skips_unrelated_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("UNRELATED"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff, 0xfe]), OsString::from("x")),
            (OsString::from("TEST__REQUEST__AGE"), OsString::from("18")),
        ];

        let selected = prefixed_vars("TEST", vars).unwrap();
        assert_eq!(selected, vec![("TEST__REQUEST__AGE".to_string(), "18".to_string())]);
    }

    #[cfg(unix)]
    #[test]
    fn test_prefixed_vars_rejects_non_utf8_value() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![(
            OsString::from("TEST__REQUEST__NAME"),
            OsString::from_vec(vec![0xff, 0xfe]),
        )];

        assert!(matches!(
            prefixed_vars("TEST", vars),
            Err(ConfigError::EnvVar { .. })
        ));
    }

    #[test]
    fn test_key_without_separator_rejected() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("TESTLOGGING", "x", "TEST");
        assert!(matches!(result, Err(ConfigError::EnvVar { .. })));
    }
}

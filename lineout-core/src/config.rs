use crate::error::ConfigError;
use serde::Deserialize;
use serde::de::{self, Deserializer};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_FORMAT: &str = "YYMMDD/HHmmss.SSS";

/// Process-wide formatting settings, immutable once the pipeline starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Timestamp pattern. Recognized tokens: `YYYY`, `YY`, `MM`, `DD`,
    /// `HH`, `mm`, `ss`, `SSS`; everything else is literal.
    pub format: String,

    /// Render timestamps in UTC rather than local time.
    pub utc: bool,

    /// Emit ANSI color sequences.
    pub color: bool,

    /// Which tail entries to emit ahead of their response line.
    pub tail: TailPolicy,

    /// Append request headers to response lines when present.
    pub request_headers: bool,

    /// Append the request payload to response lines when present.
    pub request_payload: bool,

    /// Append the response payload to response lines when present.
    pub response_payload: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            utc: true,
            color: true,
            tail: TailPolicy::None,
            request_headers: false,
            request_payload: true,
            response_payload: true,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let settings: Settings =
            toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let TailPolicy::Tags(tags) = &self.tail
            && tags.iter().any(String::is_empty)
        {
            return Err(ConfigError::EmptyTailTag);
        }

        Ok(())
    }
}

/// Tail inclusion policy: suppress tails entirely, keep them all, or
/// keep only entries carrying one of the listed tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TailPolicy {
    #[default]
    None,
    All,
    Tags(Vec<String>),
}

/// Config surface: `tail = "none" | "all" | ["tag", ...]`.
impl<'de> Deserialize<'de> for TailPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Tags(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyword(s) if s == "none" => Ok(TailPolicy::None),
            Repr::Keyword(s) if s == "all" => Ok(TailPolicy::All),
            Repr::Keyword(s) => Err(de::Error::custom(format!(
                "unknown tail policy '{s}', expected \"none\", \"all\" or a tag list"
            ))),
            Repr::Tags(tags) => Ok(TailPolicy::Tags(tags)),
        }
    }
}

/// CLI surface: `none`, `all`, or a comma-separated tag list. An empty
/// tag list is rejected: it would buffer every tail entry and emit
/// none of them.
impl FromStr for TailPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(TailPolicy::None),
            "all" => Ok(TailPolicy::All),
            text => {
                let tags: Vec<String> = text
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();

                if tags.is_empty() {
                    return Err(format!(
                        "tail policy '{s}' names no tags, expected none, all or a comma-separated tag list"
                    ));
                }

                Ok(TailPolicy::Tags(tags))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();

        assert_eq!(settings.format, "YYMMDD/HHmmss.SSS");
        assert!(settings.utc);
        assert!(settings.color);
        assert_eq!(settings.tail, TailPolicy::None);
        assert!(!settings.request_headers);
        assert!(settings.request_payload);
        assert!(settings.response_payload);
    }

    #[test]
    fn tail_policy_deserializes_from_keywords_and_lists() {
        let none: Settings = toml::from_str(r#"tail = "none""#).unwrap();
        let all: Settings = toml::from_str(r#"tail = "all""#).unwrap();
        let tags: Settings = toml::from_str(r#"tail = ["user", "debug"]"#).unwrap();

        assert_eq!(none.tail, TailPolicy::None);
        assert_eq!(all.tail, TailPolicy::All);
        assert_eq!(
            tags.tail,
            TailPolicy::Tags(vec!["user".to_string(), "debug".to_string()])
        );
    }

    #[test]
    fn tail_policy_rejects_unknown_keyword() {
        let result: Result<Settings, _> = toml::from_str(r#"tail = "some""#);

        assert!(result.is_err());
    }

    #[test]
    fn tail_policy_parses_from_cli_text() {
        assert_eq!("none".parse::<TailPolicy>().unwrap(), TailPolicy::None);
        assert_eq!("all".parse::<TailPolicy>().unwrap(), TailPolicy::All);
        assert_eq!(
            "foo,bar".parse::<TailPolicy>().unwrap(),
            TailPolicy::Tags(vec!["foo".to_string(), "bar".to_string()])
        );
    }

    #[test]
    fn tail_policy_rejects_cli_text_without_tags() {
        assert!("".parse::<TailPolicy>().is_err());
        assert!("   ".parse::<TailPolicy>().is_err());
        assert!(",".parse::<TailPolicy>().is_err());
        assert!(", ,".parse::<TailPolicy>().is_err());
    }

    #[test]
    fn from_file_reads_and_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineout.toml");

        std::fs::write(
            &path,
            r#"
            utc = false
            color = false
            tail = "all"
            request_headers = true
            "#,
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();

        assert!(!settings.utc);
        assert!(!settings.color);
        assert_eq!(settings.tail, TailPolicy::All);
        assert!(settings.request_headers);
        // untouched keys keep their defaults
        assert_eq!(settings.format, DEFAULT_FORMAT);
        assert!(settings.request_payload);
    }

    #[test]
    fn from_file_reports_missing_file() {
        let result = Settings::from_file(Path::new("/nonexistent/lineout.toml"));

        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn from_file_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineout.toml");
        std::fs::write(&path, "utc = ").unwrap();

        let result = Settings::from_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn validate_rejects_empty_tail_tag() {
        let settings = Settings {
            tail: TailPolicy::Tags(vec!["user".to_string(), String::new()]),
            ..Settings::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(ConfigError::EmptyTailTag)
        ));
    }
}

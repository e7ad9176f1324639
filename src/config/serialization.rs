//! Raw YAML shape of pdd.yaml and conversion of its structured literals

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde_yaml::Value as YamlValue;

use crate::error::{Result, config};

/// Top-level document; sections other than `pdd` are ignored
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    pub pdd: Option<RawSection>,
}

/// The `pdd` section, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSection {
    pub pip_packages: Option<YamlValue>,
    #[serde(alias = "os_packages")]
    pub debian_packages: Option<YamlValue>,
    pub additional_environment: Option<RawMapping>,
    #[serde(alias = "extra_apps")]
    pub django_apps: Option<YamlValue>,
    #[serde(alias = "extra_settings")]
    pub django_settings: Option<RawMapping>,
}

/// A mapping value as written, before literal parsing
///
/// Entries keep declaration order and repeated keys, so later declarations
/// can override earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMapping {
    Entries(Vec<(YamlValue, YamlValue)>),
    Text(String),
}

impl<'de> Deserialize<'de> for RawMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawMappingVisitor;

        impl<'de> Visitor<'de> for RawMappingVisitor {
            type Value = RawMapping;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping literal")
            }

            fn visit_str<E>(self, text: &str) -> std::result::Result<RawMapping, E>
            where
                E: de::Error,
            {
                Ok(RawMapping::Text(text.to_string()))
            }

            fn visit_unit<E>(self) -> std::result::Result<RawMapping, E>
            where
                E: de::Error,
            {
                Ok(RawMapping::Entries(Vec::new()))
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<RawMapping, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<YamlValue, YamlValue>()? {
                    entries.push(entry);
                }
                Ok(RawMapping::Entries(entries))
            }
        }

        deserializer.deserialize_any(RawMappingVisitor)
    }
}

/// Interpret `value` as a list literal
///
/// A quoted string holding a flow literal (`"['a', 'b']"`) is parsed as well,
/// so literals copied from INI-style configs keep working. Null means empty.
pub fn list_literal(key: &str, value: &YamlValue) -> Result<Vec<YamlValue>> {
    match unquote_literal(key, value)? {
        YamlValue::Sequence(items) => Ok(items),
        YamlValue::Null => Ok(Vec::new()),
        _ => Err(config::invalid(format!("pdd.{key} must be a list literal"))),
    }
}

/// Interpret `value` as a mapping literal, see [`list_literal`]
///
/// Repeated keys are returned in declaration order.
pub fn mapping_literal(key: &str, value: &RawMapping) -> Result<Vec<(YamlValue, YamlValue)>> {
    let text = match value {
        RawMapping::Entries(entries) => return Ok(entries.clone()),
        RawMapping::Text(text) if looks_like_literal(text) => text,
        RawMapping::Text(_) => {
            return Err(config::invalid(format!(
                "pdd.{key} must be a mapping literal"
            )));
        }
    };
    match serde_yaml::from_str(text) {
        Ok(RawMapping::Entries(entries)) => Ok(entries),
        Ok(RawMapping::Text(_)) => Err(config::invalid(format!(
            "pdd.{key} must be a mapping literal"
        ))),
        Err(e) => Err(config::invalid(format!(
            "pdd.{key} is not a valid mapping literal: {e}"
        ))),
    }
}

fn unquote_literal(key: &str, value: &YamlValue) -> Result<YamlValue> {
    match value {
        YamlValue::String(text) if looks_like_literal(text) => serde_yaml::from_str(text)
            .map_err(|e| config::invalid(format!("pdd.{key} is not a valid literal: {e}"))),
        other => Ok(other.clone()),
    }
}

fn looks_like_literal(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'))
}

/// Render a scalar as plain text; containers and tags are rejected
pub fn scalar_text(context: &str, value: &YamlValue) -> Result<String> {
    match value {
        YamlValue::String(text) => Ok(text.clone()),
        YamlValue::Bool(flag) => Ok(flag.to_string()),
        YamlValue::Number(number) => Ok(number.to_string()),
        _ => Err(config::invalid(format!("{context} must be a plain value"))),
    }
}

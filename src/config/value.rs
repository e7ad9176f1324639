//! Typed values for settings overrides

use serde_yaml::Value as YamlValue;

use crate::error::{PddError, Result, config};

/// The right-hand side of one settings override
///
/// A plain string at the top level is an expression in the settings file's
/// own syntax and is written verbatim. Everything else is a literal that the
/// renderer formats, quoting strings where they appear inside containers.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Expression(String),
    Literal(Literal),
}

/// A literal value with a fixed rendering
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Number(String),
    Str(String),
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl SettingValue {
    /// Build a setting value from a parsed YAML value
    pub fn from_yaml(key: &str, value: &YamlValue) -> Result<Self> {
        match value {
            YamlValue::String(expression) => {
                if expression.trim().is_empty() {
                    return Err(config::invalid(format!(
                        "setting '{key}' has an empty expression"
                    )));
                }
                if expression.contains(['\n', '\r']) {
                    return Err(config::invalid(format!(
                        "setting '{key}' must be a single-line expression"
                    )));
                }
                Ok(SettingValue::Expression(expression.clone()))
            }
            other => Literal::from_yaml(key, other).map(SettingValue::Literal),
        }
    }
}

impl Literal {
    fn from_yaml(key: &str, value: &YamlValue) -> Result<Self> {
        let literal = match value {
            YamlValue::Null => Literal::None,
            YamlValue::Bool(flag) => Literal::Bool(*flag),
            YamlValue::Number(number) => Literal::Number(number_text(number)),
            YamlValue::String(text) => Literal::Str(text.clone()),
            YamlValue::Sequence(items) => Literal::List(
                items
                    .iter()
                    .map(|item| Literal::from_yaml(key, item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Mapping(entries) => Literal::Dict(
                entries
                    .iter()
                    .map(|(k, v)| Ok((Literal::from_yaml(key, k)?, Literal::from_yaml(key, v)?)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Tagged(tagged) => return Err(unsupported_tag(key, &tagged.tag)),
        };
        Ok(literal)
    }
}

/// Non-finite floats have no literal form and are spelled as `float(...)`
fn number_text(number: &serde_yaml::Number) -> String {
    if number.is_nan() {
        "float(\"nan\")".to_string()
    } else if number.is_infinite() {
        let sign = if number.as_f64().is_some_and(f64::is_sign_negative) {
            "-"
        } else {
            ""
        };
        format!("float(\"{sign}inf\")")
    } else {
        number.to_string()
    }
}

fn unsupported_tag(key: &str, tag: &serde_yaml::value::Tag) -> PddError {
    config::invalid(format!("setting '{key}' uses unsupported YAML tag {tag}"))
}

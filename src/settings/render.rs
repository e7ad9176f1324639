//! Line builders for the injection block
//!
//! The patcher never formats settings text itself; it asks a
//! [`SettingsRenderer`] for each line. [`PythonRenderer`] targets Django's
//! `settings.py`.

use crate::config::{Literal, SettingValue};

/// Formats injection lines in the target file's native syntax
pub trait SettingsRenderer {
    /// Comment line marking the start of injected content
    fn marker(&self) -> String;

    /// Line adding one app to the framework's app list unless already listed
    fn app_line(&self, app: &str) -> String;

    /// Line assigning one setting
    fn setting_line(&self, key: &str, value: &SettingValue) -> String;
}

/// Renderer for Python settings modules
#[derive(Debug, Clone)]
pub struct PythonRenderer {
    tool: String,
    apps_setting: String,
}

impl PythonRenderer {
    pub fn new(tool: impl Into<String>, apps_setting: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            apps_setting: apps_setting.into(),
        }
    }
}

impl Default for PythonRenderer {
    fn default() -> Self {
        Self::new("PDD", "INSTALLED_APPS")
    }
}

impl SettingsRenderer for PythonRenderer {
    fn marker(&self) -> String {
        format!("### {} INJECTION ###", self.tool)
    }

    fn app_line(&self, app: &str) -> String {
        let app = quote(app);
        let apps = &self.apps_setting;
        format!("{apps} += [{app}] if {app} not in {apps} else []")
    }

    fn setting_line(&self, key: &str, value: &SettingValue) -> String {
        let rendered = match value {
            SettingValue::Expression(expression) => expression.clone(),
            SettingValue::Literal(literal) => literal_text(literal),
        };
        format!("{key} = {rendered}")
    }
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::None => "None".to_string(),
        Literal::Bool(true) => "True".to_string(),
        Literal::Bool(false) => "False".to_string(),
        Literal::Number(number) => number.clone(),
        Literal::Str(text) => quote(text),
        Literal::List(items) => {
            let items: Vec<String> = items.iter().map(literal_text).collect();
            format!("[{}]", items.join(", "))
        }
        Literal::Dict(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| format!("{}: {}", literal_text(key), literal_text(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Double-quoted Python string literal
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

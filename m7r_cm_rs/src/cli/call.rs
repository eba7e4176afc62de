//! ParsedCall - validated result of argument parsing.

use std::collections::BTreeMap;

/// Presence/value of the options of one scope, keyed by option identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    values: BTreeMap<String, Option<String>>,
}

impl OptionValues {
    pub(crate) fn insert(&mut self, id: &str, value: Option<String>) {
        self.values.insert(id.to_string(), value);
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Argument value of an argument-bearing option, if given.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).and_then(|v| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A call accepted by the parser. Read-only for everything downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCall {
    executable_name: String,
    command_path: Vec<String>,
    global_options: OptionValues,
    specific_options: OptionValues,
    parameters: Vec<String>,
    call_string: String,
}

impl ParsedCall {
    pub(crate) fn new(
        executable_name: String,
        command_path: Vec<String>,
        global_options: OptionValues,
        specific_options: OptionValues,
        parameters: Vec<String>,
        call_string: String,
    ) -> Self {
        Self {
            executable_name,
            command_path,
            global_options,
            specific_options,
            parameters,
            call_string,
        }
    }

    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Matched command path; empty for the default command.
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    pub fn is_default_command(&self) -> bool {
        self.command_path.is_empty()
    }

    pub fn global_options(&self) -> &OptionValues {
        &self.global_options
    }

    pub fn specific_options(&self) -> &OptionValues {
        &self.specific_options
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn call_string(&self) -> &str {
        &self.call_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_values() {
        let mut values = OptionValues::default();
        assert!(values.is_empty());
        values.insert("verbose", None);
        values.insert("content_root", Some("/content".to_string()));

        assert!(values.has_option("verbose"));
        assert_eq!(values.value("verbose"), None);
        assert_eq!(values.value("content_root"), Some("/content"));
        assert!(!values.has_option("silent"));
    }
}

//! Positional parameter arity rules.

/// How many positional tokens a command accepts after its path and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameters {
    /// No positional parameters at all.
    None,
    /// At least `min` parameters, no upper bound.
    Min {
        min: usize,
        name: String,
        description: String,
    },
    /// Exactly one parameter.
    One { name: String, description: String },
}

impl Parameters {
    pub fn min(min: usize, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Min {
            min,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn one(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::One {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Check a positional count; the error text states the expected arity.
    pub fn check(&self, count: usize) -> Result<(), String> {
        match self {
            Parameters::None if count > 0 => Err("No parameters expected.".to_string()),
            Parameters::None => Ok(()),
            Parameters::Min { min, name, .. } if count < *min => Err(format!(
                "Wrong number of parameters. Expected at least {min} <{name}>, found {count}."
            )),
            Parameters::Min { .. } => Ok(()),
            Parameters::One { name, .. } if count != 1 => Err(format!(
                "Wrong number of parameters. Expected exactly one <{name}>, found {count}."
            )),
            Parameters::One { .. } => Ok(()),
        }
    }

    /// Index of the first surplus parameter, if the count exceeds the rule.
    pub fn surplus_index(&self, count: usize) -> Option<usize> {
        match self {
            Parameters::None if count > 0 => Some(0),
            Parameters::One { .. } if count > 1 => Some(1),
            _ => None,
        }
    }

    /// Usage fragment, e.g. `[program...]` or `<content-id>`.
    pub fn usage(&self) -> String {
        match self {
            Parameters::None => String::new(),
            Parameters::Min { min: 0, name, .. } => format!("[{name}...]"),
            Parameters::Min { name, .. } => format!("<{name}>..."),
            Parameters::One { name, .. } => format!("<{name}>"),
        }
    }

    pub fn description(&self) -> Option<(&str, &str)> {
        match self {
            Parameters::None => None,
            Parameters::Min {
                name, description, ..
            }
            | Parameters::One { name, description } => Some((name, description)),
        }
    }
}

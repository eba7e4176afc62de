/// Color mode for terminal output.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Which stream a formatted message is written to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputDestination {
    Standard,
    Error,
}

pub mod filter;

/// The component that receives the keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Table,
    Filter,
    Help,
}

impl Mode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Table => "TABLE",
            Mode::Filter => "FILTER",
            Mode::Help => "HELP",
        }
    }
}

/// Result of handling a key in a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Keep editing
    Continue,
    /// Apply the query and return to the table
    Apply,
    /// Return to the table without changes
    Cancel,
}

#[cfg(test)]
mod test;

//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_validate_input() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding `system-prompt.txt` and `user-prompt-template.txt`.
    /// Empty means the built-in templates.
    #[serde(default)]
    pub prompts_dir: String,

    /// Whether the CLI validates incident input before analysis.
    #[serde(default = "default_validate_input")]
    pub validate_input: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            prompts_dir: String::new(),
            validate_input: default_validate_input(),
        }
    }
}

impl GeneralConfig {
    /// Custom prompt directory, if one is configured.
    pub fn prompts_dir(&self) -> Option<&str> {
        (!self.prompts_dir.is_empty()).then_some(self.prompts_dir.as_str())
    }
}

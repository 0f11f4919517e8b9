use color_eyre::Result;
use dialoguer::{Input, Select};

/// Prompt for free text; an empty answer is allowed
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Let the user pick one entry; `None` when they back out with Esc or q
pub fn prompt_select(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Prompt for a secret without echoing it
pub fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", prompt))
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

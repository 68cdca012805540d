use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Theme for the migration picker and the revert confirmation
pub fn dialoguer_theme() -> ColorfulTheme {
    let accent = Style::new().cyan();

    ColorfulTheme {
        prompt_prefix: style("?".to_string()).yellow().bold(),
        prompt_style: Style::new().bold(),
        active_item_prefix: style("❯".to_string()).cyan().bold(),
        active_item_style: accent.clone().bold(),
        values_style: accent,
        success_prefix: style("✔".to_string()).green().bold(),
        error_prefix: style("✖".to_string()).red().bold(),
        ..ColorfulTheme::default()
    }
}

use crate::DialogState;
use thiserror::Error;
use tracing::debug;

pub const PRESET_NAMES: [&str; 5] = ["welcome", "confirm", "survey", "settings", "warning"];

const WELCOME: &str = include_str!("../presets/welcome.json5");
const CONFIRM: &str = include_str!("../presets/confirm.json5");
const SURVEY: &str = include_str!("../presets/survey.json5");
const SETTINGS: &str = include_str!("../presets/settings.json5");
const WARNING: &str = include_str!("../presets/warning.json5");

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("unknown preset '{0}'")]
    Unknown(String),
    #[error("preset '{name}' is malformed")]
    Parse {
        name: String,
        #[source]
        source: json5::Error,
    },
}

fn preset_source(name: &str) -> Option<&'static str> {
    match name {
        "welcome" => Some(WELCOME),
        "confirm" => Some(CONFIRM),
        "survey" => Some(SURVEY),
        "settings" => Some(SETTINGS),
        "warning" => Some(WARNING),
        _ => None,
    }
}

/// Parse one of the built-in starting dialogs.
pub fn load_preset(name: &str) -> Result<DialogState, PresetError> {
    let text = preset_source(name).ok_or_else(|| PresetError::Unknown(name.to_string()))?;
    let dialog = json5::from_str::<DialogState>(text).map_err(|source| PresetError::Parse {
        name: name.to_string(),
        source,
    })?;
    debug!(preset = name, id = %dialog.id, "loaded preset");
    Ok(dialog)
}

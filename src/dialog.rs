use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The dialog definition being edited.
///
/// This is plain data: cloning it yields a fully independent copy, which is what the
/// undo history relies on for its snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogState {
    pub id: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub can_close_with_escape: bool,
    #[serde(default)]
    pub body: Vec<BodyLine>,
    #[serde(default)]
    pub inputs: Inputs,
    #[serde(default)]
    pub buttons: Vec<DialogButton>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyLine {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    #[serde(default)]
    pub text_fields: Vec<TextField>,
    #[serde(default)]
    pub selects: Vec<SelectInput>,
    #[serde(default)]
    pub checkboxes: Vec<Checkbox>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    #[serde(default)]
    pub placeholder: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_max_lines")]
    pub max_lines: u32,
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub order: i64,
    /// Live value typed into the preview. Not part of the exported definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
}

fn default_max_length() -> u32 {
    100
}

fn default_max_lines() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub initial: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectInput {
    #[serde(default)]
    pub options: Vec<SelectOption>,
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub order: i64,
}

impl SelectInput {
    /// The option flagged `initial`, falling back to the first option.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options
            .iter()
            .find(|o| o.initial)
            .or_else(|| self.options.first())
    }

    /// Move the selection to the next option, wrapping around.
    ///
    /// With no option flagged, the first option becomes selected.
    pub fn cycle(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = match self.options.iter().position(|o| o.initial) {
            Some(idx) => (idx + 1) % self.options.len(),
            None => 0,
        };
        for (idx, opt) in self.options.iter_mut().enumerate() {
            opt.initial = idx == next;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkbox {
    #[serde(default)]
    pub initial: bool,
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogButton {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: ActionKind,
    #[serde(default)]
    pub data: String,
}

/// What a button action does when the dialog is shown in-game.
///
/// Unknown names are kept as [`ActionKind::Other`] so loading a dialog written by a newer
/// tool never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Message,
    OpenDialog,
    OpenRandomDialog,
    ConsoleCommand,
    PlayerCommand,
    SendToServer,
    Other(String),
}

impl ActionKind {
    pub const KNOWN: [ActionKind; 6] = [
        ActionKind::Message,
        ActionKind::OpenDialog,
        ActionKind::OpenRandomDialog,
        ActionKind::ConsoleCommand,
        ActionKind::PlayerCommand,
        ActionKind::SendToServer,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "message" => ActionKind::Message,
            "open_dialog" => ActionKind::OpenDialog,
            "open_random_dialog" => ActionKind::OpenRandomDialog,
            "console_command" => ActionKind::ConsoleCommand,
            "player_command" => ActionKind::PlayerCommand,
            "send_to_server" => ActionKind::SendToServer,
            other => ActionKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Message => "message",
            ActionKind::OpenDialog => "open_dialog",
            ActionKind::OpenRandomDialog => "open_random_dialog",
            ActionKind::ConsoleCommand => "console_command",
            ActionKind::PlayerCommand => "player_command",
            ActionKind::SendToServer => "send_to_server",
            ActionKind::Other(name) => name,
        }
    }
}

impl Serialize for ActionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ActionKind::from_name(&name))
    }
}

impl DialogState {
    pub fn blank() -> Self {
        Self {
            id: "new_dialog".to_string(),
            title: String::new(),
            can_close_with_escape: true,
            body: Vec::new(),
            inputs: Inputs::default(),
            buttons: Vec::new(),
        }
    }

    pub fn has_inputs(&self) -> bool {
        !self.inputs.text_fields.is_empty()
            || !self.inputs.selects.is_empty()
            || !self.inputs.checkboxes.is_empty()
    }

    pub fn text_field_mut(&mut self, key: &str) -> Option<&mut TextField> {
        self.inputs.text_fields.iter_mut().find(|f| f.key == key)
    }

    /// Current value of every input, keyed by input key, as substituted into action data.
    ///
    /// Text fields come first, then selects, then checkboxes; a later input replaces the
    /// value of an earlier one sharing its key.
    pub fn input_values(&self) -> IndexMap<String, String> {
        let mut values = IndexMap::new();
        for field in &self.inputs.text_fields {
            values.insert(
                field.key.clone(),
                field.current_value.clone().unwrap_or_default(),
            );
        }
        for select in &self.inputs.selects {
            let value = select
                .selected_option()
                .map(|o| o.value.clone())
                .unwrap_or_default();
            values.insert(select.key.clone(), value);
        }
        for checkbox in &self.inputs.checkboxes {
            values.insert(checkbox.key.clone(), checkbox.initial.to_string());
        }
        values
    }
}

impl Default for DialogState {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, initial: bool) -> SelectOption {
        SelectOption {
            value: value.to_string(),
            display: String::new(),
            initial,
        }
    }

    #[test]
    fn selected_option_falls_back_to_first() {
        let mut select = SelectInput {
            options: vec![option("a", false), option("b", false)],
            key: "k".to_string(),
            ..Default::default()
        };
        assert_eq!(select.selected_option().unwrap().value, "a");

        select.options[1].initial = true;
        assert_eq!(select.selected_option().unwrap().value, "b");

        select.options.clear();
        assert!(select.selected_option().is_none());
    }

    #[test]
    fn cycle_wraps_and_keeps_a_single_initial_flag() {
        let mut select = SelectInput {
            options: vec![option("a", false), option("b", false), option("c", true)],
            key: "k".to_string(),
            ..Default::default()
        };
        select.cycle();
        assert_eq!(select.selected_option().unwrap().value, "a");
        assert_eq!(select.options.iter().filter(|o| o.initial).count(), 1);

        select.cycle();
        assert_eq!(select.selected_option().unwrap().value, "b");
    }

    #[test]
    fn cycle_without_flag_selects_first() {
        let mut select = SelectInput {
            options: vec![option("a", false), option("b", false)],
            key: "k".to_string(),
            ..Default::default()
        };
        select.cycle();
        assert!(select.options[0].initial);
        assert!(!select.options[1].initial);
    }

    #[test]
    fn action_kind_keeps_unknown_names() {
        let action: Action =
            serde_json::from_str(r#"{ "name": "teleport", "data": "spawn" }"#).unwrap();
        assert_eq!(action.name, ActionKind::Other("teleport".to_string()));
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"name":"teleport","data":"spawn"}"#
        );

        let known: Action = serde_json::from_str(r#"{ "name": "open_dialog" }"#).unwrap();
        assert_eq!(known.name, ActionKind::OpenDialog);
        assert_eq!(known.data, "");
    }

    #[test]
    fn input_values_cover_every_input_kind() {
        let mut dialog = DialogState::blank();
        dialog.inputs.text_fields.push(TextField {
            key: "name".to_string(),
            current_value: Some("Steve".to_string()),
            ..Default::default()
        });
        dialog.inputs.text_fields.push(TextField {
            key: "empty".to_string(),
            ..Default::default()
        });
        dialog.inputs.selects.push(SelectInput {
            options: vec![option("low", false), option("high", true)],
            key: "quality".to_string(),
            ..Default::default()
        });
        dialog.inputs.checkboxes.push(Checkbox {
            initial: true,
            key: "sounds".to_string(),
            ..Default::default()
        });

        let values = dialog.input_values();
        assert_eq!(values["name"], "Steve");
        assert_eq!(values["empty"], "");
        assert_eq!(values["quality"], "high");
        assert_eq!(values["sounds"], "true");
    }

    #[test]
    fn transient_value_is_not_serialized() {
        let field = TextField {
            key: "name".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&field).unwrap();
        assert!(!json.contains("currentValue"));
        assert!(json.contains("maxLength"));
    }
}

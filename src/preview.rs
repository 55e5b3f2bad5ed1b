use crate::dialog::{ActionKind, DialogState};
use crate::markup::{self, RenderedText};
use crate::statics;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::{fmt, sync::LazyLock};
use tracing::warn;

/// Width (in preview units) the dialog layout is designed for.
pub const PREVIEW_BASE_WIDTH: f32 = 400.0;
pub const BUTTON_COLUMNS: usize = 2;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("static placeholder pattern"));

/// Size and scroll state of the surface the preview is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub scroll_offset: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: PREVIEW_BASE_WIDTH,
            scroll_offset: 0.0,
        }
    }
}

impl Viewport {
    /// Size of one preview unit, so proportions stay the same at any width.
    pub fn scale(&self) -> f32 {
        (self.width.floor() / PREVIEW_BASE_WIDTH).max(0.0)
    }

    pub fn px(&self, units: f32) -> f32 {
        units * self.scale()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleRegion {
    pub text: RenderedText,
    pub info: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputWidget {
    TextField {
        key: String,
        label: RenderedText,
        value: String,
        placeholder: String,
        max_length: u32,
        max_lines: u32,
    },
    Select {
        /// Position in `inputs.selects`, for [`cycle_select`].
        index: usize,
        key: String,
        label: RenderedText,
        selected: RenderedText,
    },
    Checkbox {
        key: String,
        label: RenderedText,
        checked: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    /// Position in `buttons`, for [`describe_button`].
    pub index: usize,
    pub label: RenderedText,
    pub tooltip: Option<RenderedText>,
}

/// Buttons laid out in full rows of [`BUTTON_COLUMNS`], with any remainder in a
/// centered row of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonGrid {
    pub rows: Vec<Vec<ButtonView>>,
    pub trailing: Vec<ButtonView>,
}

impl ButtonGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.trailing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTree {
    pub title: TitleRegion,
    pub body: Vec<RenderedText>,
    pub inputs: Vec<InputWidget>,
    pub buttons: ButtonGrid,
    pub viewport: Viewport,
}

/// Where a preview gets mounted: reports its current size and scroll position and
/// receives each rebuilt tree.
pub trait RenderTarget {
    fn viewport(&self) -> Viewport;
    fn mount(&mut self, tree: PreviewTree);
}

/// Rebuilds the preview for a target, carrying the target's scroll offset and width
/// over into every new tree.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    viewport: Viewport,
}

impl Preview {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns `false` (and does nothing) when there is no target.
    pub fn refresh(&mut self, dialog: &DialogState, target: Option<&mut dyn RenderTarget>) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.viewport = target.viewport();
        target.mount(build_tree(dialog, self.viewport));
        true
    }
}

pub fn build_tree(dialog: &DialogState, viewport: Viewport) -> PreviewTree {
    let body = dialog
        .body
        .iter()
        .filter(|line| !line.text.trim().is_empty())
        .map(|line| markup::render(line.text.as_str()))
        .collect();

    PreviewTree {
        title: TitleRegion {
            text: markup::render(dialog.title.as_str()),
            info: statics::EN_PREVIEW_TITLE_INFO,
        },
        body,
        inputs: build_inputs(dialog),
        buttons: build_buttons(dialog),
        viewport,
    }
}

fn build_inputs(dialog: &DialogState) -> Vec<InputWidget> {
    let inputs = &dialog.inputs;
    let mut widgets: Vec<(i64, InputWidget)> = Vec::new();

    for field in &inputs.text_fields {
        widgets.push((
            field.order,
            InputWidget::TextField {
                key: field.key.clone(),
                label: markup::render(field.label.as_str()),
                value: field.current_value.clone().unwrap_or_default(),
                placeholder: field.placeholder.clone(),
                max_length: field.max_length,
                max_lines: field.max_lines,
            },
        ));
    }

    for (index, select) in inputs.selects.iter().enumerate() {
        let selected = select
            .selected_option()
            .map(|o| {
                if o.display.is_empty() {
                    o.value.as_str()
                } else {
                    o.display.as_str()
                }
            })
            .unwrap_or_default();
        widgets.push((
            select.order,
            InputWidget::Select {
                index,
                key: select.key.clone(),
                label: markup::render(select.label.as_str()),
                selected: markup::render(selected),
            },
        ));
    }

    for checkbox in &inputs.checkboxes {
        widgets.push((
            checkbox.order,
            InputWidget::Checkbox {
                key: checkbox.key.clone(),
                label: markup::render(checkbox.label.as_str()),
                checked: checkbox.initial,
            },
        ));
    }

    // Stable: equal orders keep text fields, selects, checkboxes in declaration order.
    widgets.sort_by_key(|(order, _)| *order);
    widgets.into_iter().map(|(_, w)| w).collect()
}

fn build_buttons(dialog: &DialogState) -> ButtonGrid {
    let views: Vec<ButtonView> = dialog
        .buttons
        .iter()
        .enumerate()
        .map(|(index, button)| ButtonView {
            index,
            label: markup::render(button.label.as_str()),
            tooltip: button
                .tooltip
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| markup::render(t)),
        })
        .collect();

    let grid_count = views.len() / BUTTON_COLUMNS * BUTTON_COLUMNS;
    let mut views = views;
    let trailing = views.split_off(grid_count);
    let rows = views
        .chunks(BUTTON_COLUMNS)
        .map(<[ButtonView]>::to_vec)
        .collect();

    ButtonGrid { rows, trailing }
}

/// Advance the select at `select_index` to its next option. `false` if there is none.
pub fn cycle_select(dialog: &mut DialogState, select_index: usize) -> bool {
    match dialog.inputs.selects.get_mut(select_index) {
        Some(select) => {
            select.cycle();
            true
        }
        None => false,
    }
}

/// Store text typed into a preview text field. `false` if no field has that key.
pub fn set_text_value(dialog: &mut DialogState, key: &str, value: &str) -> bool {
    match dialog.text_field_mut(key) {
        Some(field) => {
            field.current_value = Some(value.to_string());
            true
        }
        None => false,
    }
}

/// Replace `{key}` with the value of that input. Unknown keys are left as written.
pub fn substitute_placeholders(template: &str, values: &IndexMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionPreview {
    pub kind: String,
    pub description: String,
}

/// What pressing a button would do, given the current input values.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionLog {
    NoActions { label: String },
    Actions(Vec<ActionPreview>),
}

impl fmt::Display for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionLog::NoActions { label } => write!(f, "Button \"{label}\" has no actions"),
            ActionLog::Actions(actions) => {
                for (i, action) in actions.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", action.kind, action.description)?;
                }
                Ok(())
            }
        }
    }
}

pub fn describe_action(kind: &ActionKind, data: &str) -> String {
    match kind {
        ActionKind::Message => format!("Send message: \"{data}\""),
        ActionKind::OpenDialog => format!("Open dialog: \"{data}\""),
        ActionKind::OpenRandomDialog => format!("Open random dialog from: {data}"),
        ActionKind::ConsoleCommand => format!("Execute console command: /{data}"),
        ActionKind::PlayerCommand => format!("Execute as player: /{data}"),
        ActionKind::SendToServer => format!("Transfer to server: \"{data}\""),
        ActionKind::Other(_) => format!("Data: {data}"),
    }
}

/// Simulate pressing the button at `button_index`. Never changes the dialog.
pub fn describe_button(dialog: &DialogState, button_index: usize) -> Option<ActionLog> {
    let button = dialog.buttons.get(button_index)?;
    if button.actions.is_empty() {
        return Some(ActionLog::NoActions {
            label: markup::strip(button.label.as_str()),
        });
    }

    let values = dialog.input_values();
    let actions = button
        .actions
        .iter()
        .map(|action| {
            let data = substitute_placeholders(&action.data, &values);
            ActionPreview {
                kind: action.name.as_str().to_string(),
                description: describe_action(&action.name, &data),
            }
        })
        .collect();
    Some(ActionLog::Actions(actions))
}

/// The dialog as pretty-printed JSON.
pub fn json_preview(dialog: &DialogState) -> String {
    serde_json::to_string_pretty(dialog).unwrap_or_else(|e| {
        warn!("json preview failed: {e}");
        String::new()
    })
}

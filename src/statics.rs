// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "MDE: MiniMessage Dialog Editor";

pub const EN_BTN_PRESETS: &str = "Presets";
pub const EN_BTN_NEW: &str = "New";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_BTN_UNDO: &str = "Undo";
pub const EN_BTN_REDO: &str = "Redo";
pub const EN_BTN_HISTORY: &str = "History";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_WINDOW_HISTORY: &str = "History";

pub const EN_ABOUT_HEADING: &str = "MDE: MiniMessage Dialog Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_SHORTCUTS: &str = "Shortcuts:";
pub const EN_ABOUT_SHORTCUT_UNDO: &str = "- Ctrl+Z: Undo";
pub const EN_ABOUT_SHORTCUT_REDO: &str = "- Ctrl+Shift+Z / Ctrl+Y: Redo";
pub const EN_ABOUT_SHORTCUT_COPY_JSON: &str = "- Ctrl+K: Copy JSON";
pub const EN_ABOUT_SHORTCUT_CLOSE: &str = "- Escape: Close open windows";
pub const EN_ABOUT_MARKUP: &str = "MiniMessage tags:";
pub const EN_ABOUT_MARKUP_EXAMPLES: [&str; 7] = [
    "<b>Bold</b>",
    "<i>Italic</i>",
    "<u>Underline</u>",
    "<color:red>Red</color>",
    "<color:#ff0000>Hex</color>",
    "<gradient:#ff0000:#0000ff>Text</gradient>",
    "<rainbow>Rainbow</rainbow>",
];
pub const EN_ABOUT_TIP_PLACEHOLDERS: &str = "Use {key} in action data to reference input values.";

pub const EN_HEADING_EDITOR: &str = "Dialog";
pub const EN_HEADING_GENERAL: &str = "General";
pub const EN_HEADING_BODY: &str = "Body";
pub const EN_HEADING_INPUTS: &str = "Inputs";
pub const EN_HEADING_BUTTONS: &str = "Buttons";
pub const EN_HEADING_CONSOLE: &str = "Console";

pub const EN_TAB_VISUAL: &str = "Visual";
pub const EN_TAB_JSON: &str = "JSON";
pub const EN_BTN_COPY_JSON: &str = "Copy JSON";

pub const EN_LABEL_ID: &str = "ID";
pub const EN_LABEL_TITLE: &str = "Title";
pub const EN_LABEL_CLOSE_ESCAPE: &str = "Can close with Escape";
pub const EN_LABEL_KEY: &str = "Key";
pub const EN_LABEL_LABEL: &str = "Label";
pub const EN_LABEL_ORDER: &str = "Order";
pub const EN_LABEL_PLACEHOLDER: &str = "Placeholder";
pub const EN_LABEL_MAX_LENGTH: &str = "Max length";
pub const EN_LABEL_MAX_LINES: &str = "Max lines";
pub const EN_LABEL_OPTIONS: &str = "Options";
pub const EN_LABEL_VALUE: &str = "Value";
pub const EN_LABEL_DISPLAY: &str = "Display";
pub const EN_LABEL_INITIAL: &str = "Initial";
pub const EN_LABEL_CHECKED: &str = "Checked";
pub const EN_LABEL_TOOLTIP: &str = "Tooltip";
pub const EN_LABEL_ACTIONS: &str = "Actions";
pub const EN_LABEL_DATA: &str = "Data";

pub const EN_HINT_MARKUP: &str = "MiniMessage text";

pub const EN_BTN_ADD_LINE: &str = "Add line";
pub const EN_BTN_ADD_TEXT_FIELD: &str = "Add text field";
pub const EN_BTN_ADD_SELECT: &str = "Add select";
pub const EN_BTN_ADD_CHECKBOX: &str = "Add checkbox";
pub const EN_BTN_ADD_OPTION: &str = "Add option";
pub const EN_BTN_ADD_BUTTON: &str = "Add button";
pub const EN_BTN_ADD_ACTION: &str = "Add action";
pub const EN_BTN_DELETE: &str = "Delete";
pub const EN_BTN_UP: &str = "Up";
pub const EN_BTN_DOWN: &str = "Down";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_CONSOLE_EMPTY: &str = "Click a button in the preview to see its actions.";
pub const EN_HISTORY_CURRENT: &str = "(current)";
pub const EN_HISTORY_TIP: &str = "Tip: Undo/Redo also works with Ctrl+Z / Ctrl+Shift+Z";

pub const EN_PREVIEW_TITLE_INFO: &str = "This is a custom screen. Click here to learn more.";

pub const EN_TOAST_UNDO: &str = "Undo successful";
pub const EN_TOAST_REDO: &str = "Redo successful";
pub const EN_TOAST_DARK: &str = "Switched to dark mode";
pub const EN_TOAST_LIGHT: &str = "Switched to light mode";
pub const EN_TOAST_JSON_COPIED: &str = "JSON copied to clipboard";

// Defaults for newly added dialog parts.
pub const NEW_TEXT_FIELD_KEY: &str = "text";
pub const NEW_SELECT_KEY: &str = "choice";
pub const NEW_CHECKBOX_KEY: &str = "toggle";
pub const NEW_BUTTON_LABEL: &str = "Button";
pub const NEW_OPTION_VALUE: &str = "option";

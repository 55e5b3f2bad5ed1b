use crate::dialog::{
    Action, ActionKind, BodyLine, Checkbox, DialogButton, SelectInput, SelectOption, TextField,
};
use crate::markup::{self, Paint, RenderedText, Style};
use crate::notify::{DEFAULT_TOAST_DURATION, NoticeKind, Notifier, Toasts};
use crate::preview::{self, ActionLog, ButtonView, InputWidget, PreviewTree, RenderTarget, Viewport};
use crate::{DialogState, EditorSession, SessionConfig, presets, statics};
use anyhow::Context;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::time::{Duration, Instant};
use tracing::info;

const THEME_NOTICE_DURATION: Duration = Duration::from_millis(2000);

// Preview sizes, in preview units (see `Viewport::px`).
const TEXT_UNITS: f32 = 9.0;
const WIDGET_WIDTH_UNITS: f32 = 200.0;
const WIDGET_HEIGHT_UNITS: f32 = 20.0;
const BUTTON_WIDTH_UNITS: f32 = 150.0;
const BUTTON_GAP_UNITS: f32 = 2.0;
const SCROLL_HEIGHT_UNITS: f32 = 300.0;
// Extra letter spacing for bold text, as a fraction of the font size.
const BOLD_SPACING: f32 = 0.08;

#[derive(Debug, Clone)]
pub struct GuiOptions {
    /// Preset to start from; a blank dialog when `None`.
    pub preset: Option<String>,
    pub dark: bool,
    pub session: SessionConfig,
}

impl Default for GuiOptions {
    fn default() -> Self {
        Self {
            preset: None,
            dark: true,
            session: SessionConfig::default(),
        }
    }
}

pub fn run_gui(options: GuiOptions) -> anyhow::Result<()> {
    let app = DialogApp::new(&options)?;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if app.theme_dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the editor window: {e}"))
}

/// Mount point for the visual preview: egui reports the available width and the scroll
/// area's offset here, and the latest tree is drawn from here.
#[derive(Debug, Default)]
struct PreviewPane {
    width: f32,
    scroll_offset: f32,
    tree: Option<PreviewTree>,
}

impl RenderTarget for PreviewPane {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            scroll_offset: self.scroll_offset,
        }
    }

    fn mount(&mut self, tree: PreviewTree) {
        self.tree = Some(tree);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum PreviewTab {
    #[default]
    Visual,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListOp {
    Delete(usize),
    MoveUp(usize),
    MoveDown(usize),
}

/// Keyboard shortcuts pressed this frame. Matching keys are consumed so text edits don't
/// run their own undo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Shortcuts {
    undo: bool,
    redo: bool,
    copy_json: bool,
    close_windows: bool,
}

impl Shortcuts {
    /// Escape is only taken while a window is open, so it still unfocuses text edits otherwise.
    fn consume(ctx: &egui::Context, windows_open: bool) -> Self {
        let mut keys = Self::default();
        ctx.input_mut(|i| {
            let ctrl_shift = egui::Modifiers {
                shift: true,
                ..egui::Modifiers::CTRL
            };
            if i.consume_key(ctrl_shift, egui::Key::Z) {
                keys.redo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Y) {
                keys.redo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::Z) {
                keys.undo = true;
            }
            if i.consume_key(egui::Modifiers::CTRL, egui::Key::K) {
                keys.copy_json = true;
            }
            if windows_open && i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                keys.close_windows = true;
            }
        });
        keys
    }
}

/// Clicks gathered while drawing the preview, applied once drawing is done.
#[derive(Default)]
struct PreviewInteractions {
    text_edits: Vec<(String, String)>,
    cycled_select: Option<usize>,
    pressed_button: Option<usize>,
}

#[derive(Clone, Copy)]
struct TextLook {
    size: f32,
    color: egui::Color32,
    strong: egui::Color32,
}

/// The main application state and GUI logic.
/// Owns the editing session (dialog + history) plus transient UI state.
struct DialogApp {
    session: EditorSession,
    toasts: Toasts,
    preview_pane: PreviewPane,
    preview_tab: PreviewTab,
    console: Option<ActionLog>,
    status: String,
    last_error: Option<String>,
    history_open: bool,
    about_open: bool,
    theme_dark: bool,
}

impl DialogApp {
    fn new(options: &GuiOptions) -> anyhow::Result<Self> {
        let initial = match options.preset.as_deref() {
            Some(name) => {
                presets::load_preset(name).with_context(|| format!("loading preset {name}"))?
            }
            None => DialogState::blank(),
        };
        let session =
            EditorSession::new(options.session, initial).context("creating editor session")?;

        Ok(Self {
            session,
            toasts: Toasts::default(),
            preview_pane: PreviewPane::default(),
            preview_tab: PreviewTab::default(),
            console: None,
            status: String::new(),
            last_error: None,
            history_open: false,
            about_open: false,
            theme_dark: options.dark,
        })
    }

    fn undo(&mut self) {
        if self.session.undo(&mut self.toasts) {
            self.status = statics::EN_TOAST_UNDO.to_string();
            self.console = None;
        }
    }

    fn redo(&mut self) {
        if self.session.redo(&mut self.toasts) {
            self.status = statics::EN_TOAST_REDO.to_string();
            self.console = None;
        }
    }

    fn load_preset(&mut self, name: &str) {
        match self.session.load_preset(name) {
            Ok(()) => {
                self.status = format!("Loaded preset {name}");
                self.console = None;
                self.last_error = None;
                self.toasts.notify(
                    &self.status,
                    NoticeKind::Success,
                    DEFAULT_TOAST_DURATION,
                );
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load preset: {e}"));
            }
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme_dark = !self.theme_dark;
        let message = if self.theme_dark {
            ctx.set_visuals(egui::Visuals::dark());
            statics::EN_TOAST_DARK
        } else {
            ctx.set_visuals(egui::Visuals::light());
            statics::EN_TOAST_LIGHT
        };
        info!(dark = self.theme_dark, "theme switched");
        self.toasts
            .notify(message, NoticeKind::Success, THEME_NOTICE_DURATION);
    }

    fn apply_list_op<T>(items: &mut Vec<T>, op: ListOp) -> bool {
        match op {
            ListOp::Delete(i) if i < items.len() => {
                items.remove(i);
                true
            }
            ListOp::MoveUp(i) if i > 0 && i < items.len() => {
                items.swap(i - 1, i);
                true
            }
            ListOp::MoveDown(i) if i + 1 < items.len() => {
                items.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    fn row_controls(ui: &mut egui::Ui, idx: usize, len: usize) -> Option<ListOp> {
        let mut op = None;
        if ui
            .add_enabled(idx > 0, egui::Button::new(statics::EN_BTN_UP).small())
            .clicked()
        {
            op = Some(ListOp::MoveUp(idx));
        }
        if ui
            .add_enabled(idx + 1 < len, egui::Button::new(statics::EN_BTN_DOWN).small())
            .clicked()
        {
            op = Some(ListOp::MoveDown(idx));
        }
        if ui.small_button(statics::EN_BTN_DELETE).clicked() {
            op = Some(ListOp::Delete(idx));
        }
        op
    }

    fn labeled_text(ui: &mut egui::Ui, label: &str, value: &mut String) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(statics::EN_HINT_MARKUP)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        })
        .inner
    }

    fn labeled_order(ui: &mut egui::Ui, order: &mut i64) -> bool {
        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_ORDER);
            ui.add(egui::DragValue::new(order).speed(1)).changed()
        })
        .inner
    }

    fn render_general_editor(ui: &mut egui::Ui, dialog: &mut DialogState) -> bool {
        let mut changed = Self::labeled_text(ui, statics::EN_LABEL_ID, &mut dialog.id);
        changed |= Self::labeled_text(ui, statics::EN_LABEL_TITLE, &mut dialog.title);
        changed |= ui
            .checkbox(
                &mut dialog.can_close_with_escape,
                statics::EN_LABEL_CLOSE_ESCAPE,
            )
            .changed();
        changed
    }

    fn render_body_editor(ui: &mut egui::Ui, body: &mut Vec<BodyLine>) -> bool {
        let mut changed = false;
        let mut op = None;
        let len = body.len();
        for (idx, line) in body.iter_mut().enumerate() {
            ui.push_id(("body_line", idx), |ui| {
                ui.horizontal(|ui| {
                    changed |= ui
                        .add(
                            egui::TextEdit::singleline(&mut line.text)
                                .hint_text(statics::EN_HINT_MARKUP)
                                .desired_width(ui.available_width() - 140.0),
                        )
                        .changed();
                    if let Some(o) = Self::row_controls(ui, idx, len) {
                        op = Some(o);
                    }
                });
            });
        }
        if let Some(op) = op {
            changed |= Self::apply_list_op(body, op);
        }
        if ui.button(statics::EN_BTN_ADD_LINE).clicked() {
            body.push(BodyLine::default());
            changed = true;
        }
        changed
    }

    fn render_text_field_editor(ui: &mut egui::Ui, field: &mut TextField) -> bool {
        let mut changed = Self::labeled_text(ui, statics::EN_LABEL_KEY, &mut field.key);
        changed |= Self::labeled_text(ui, statics::EN_LABEL_LABEL, &mut field.label);
        changed |= Self::labeled_text(ui, statics::EN_LABEL_PLACEHOLDER, &mut field.placeholder);
        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_MAX_LENGTH);
            changed |= ui
                .add(egui::DragValue::new(&mut field.max_length).range(1..=4096))
                .changed();
            ui.label(statics::EN_LABEL_MAX_LINES);
            changed |= ui
                .add(egui::DragValue::new(&mut field.max_lines).range(1..=64))
                .changed();
        });
        changed |= Self::labeled_order(ui, &mut field.order);
        changed
    }

    fn render_select_editor(ui: &mut egui::Ui, select: &mut SelectInput) -> bool {
        let mut changed = Self::labeled_text(ui, statics::EN_LABEL_KEY, &mut select.key);
        changed |= Self::labeled_text(ui, statics::EN_LABEL_LABEL, &mut select.label);
        changed |= Self::labeled_order(ui, &mut select.order);

        ui.label(statics::EN_LABEL_OPTIONS);
        let mut op = None;
        let mut make_initial = None;
        let len = select.options.len();
        for (idx, option) in select.options.iter_mut().enumerate() {
            ui.push_id(("option", idx), |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .radio(option.initial, statics::EN_LABEL_INITIAL)
                        .clicked()
                    {
                        make_initial = Some(idx);
                    }
                    ui.label(statics::EN_LABEL_VALUE);
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut option.value).desired_width(60.0))
                        .changed();
                    ui.label(statics::EN_LABEL_DISPLAY);
                    changed |= ui
                        .add(egui::TextEdit::singleline(&mut option.display).desired_width(120.0))
                        .changed();
                    if let Some(o) = Self::row_controls(ui, idx, len) {
                        op = Some(o);
                    }
                });
            });
        }
        if let Some(chosen) = make_initial {
            for (idx, option) in select.options.iter_mut().enumerate() {
                option.initial = idx == chosen;
            }
            changed = true;
        }
        if let Some(op) = op {
            changed |= Self::apply_list_op(&mut select.options, op);
        }
        if ui.small_button(statics::EN_BTN_ADD_OPTION).clicked() {
            select.options.push(SelectOption {
                value: format!("{}_{}", statics::NEW_OPTION_VALUE, len + 1),
                display: String::new(),
                initial: select.options.is_empty(),
            });
            changed = true;
        }
        changed
    }

    fn render_checkbox_editor(ui: &mut egui::Ui, checkbox: &mut Checkbox) -> bool {
        let mut changed = Self::labeled_text(ui, statics::EN_LABEL_KEY, &mut checkbox.key);
        changed |= Self::labeled_text(ui, statics::EN_LABEL_LABEL, &mut checkbox.label);
        changed |= Self::labeled_order(ui, &mut checkbox.order);
        changed |= ui
            .checkbox(&mut checkbox.initial, statics::EN_LABEL_CHECKED)
            .changed();
        changed
    }

    /// Draws one collapsible entry per item with reorder/delete controls.
    fn render_list<T>(
        ui: &mut egui::Ui,
        id: &str,
        items: &mut Vec<T>,
        title: impl Fn(&T) -> String,
        mut editor: impl FnMut(&mut egui::Ui, &mut T) -> bool,
    ) -> bool {
        let mut changed = false;
        let mut op = None;
        let len = items.len();
        for (idx, item) in items.iter_mut().enumerate() {
            ui.push_id((id, idx), |ui| {
                egui::CollapsingHeader::new(title(&*item))
                    .default_open(false)
                    .show(ui, |ui| {
                        changed |= editor(ui, item);
                        ui.horizontal(|ui| {
                            if let Some(o) = Self::row_controls(ui, idx, len) {
                                op = Some(o);
                            }
                        });
                    });
            });
        }
        if let Some(op) = op {
            changed |= Self::apply_list_op(items, op);
        }
        changed
    }

    fn render_inputs_editor(ui: &mut egui::Ui, dialog: &mut DialogState) -> bool {
        let inputs = &mut dialog.inputs;
        let mut changed = Self::render_list(
            ui,
            "text_fields",
            &mut inputs.text_fields,
            |f| format!("Text field: {}", f.key),
            Self::render_text_field_editor,
        );
        changed |= Self::render_list(
            ui,
            "selects",
            &mut inputs.selects,
            |s| format!("Select: {}", s.key),
            Self::render_select_editor,
        );
        changed |= Self::render_list(
            ui,
            "checkboxes",
            &mut inputs.checkboxes,
            |c| format!("Checkbox: {}", c.key),
            Self::render_checkbox_editor,
        );

        let next_order = dialog_next_order(dialog);
        let inputs = &mut dialog.inputs;
        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_ADD_TEXT_FIELD).clicked() {
                inputs.text_fields.push(TextField {
                    key: format!(
                        "{}{}",
                        statics::NEW_TEXT_FIELD_KEY,
                        inputs.text_fields.len() + 1
                    ),
                    max_length: 100,
                    max_lines: 1,
                    order: next_order,
                    ..Default::default()
                });
                changed = true;
            }
            if ui.button(statics::EN_BTN_ADD_SELECT).clicked() {
                inputs.selects.push(SelectInput {
                    key: format!("{}{}", statics::NEW_SELECT_KEY, inputs.selects.len() + 1),
                    order: next_order,
                    ..Default::default()
                });
                changed = true;
            }
            if ui.button(statics::EN_BTN_ADD_CHECKBOX).clicked() {
                inputs.checkboxes.push(Checkbox {
                    key: format!(
                        "{}{}",
                        statics::NEW_CHECKBOX_KEY,
                        inputs.checkboxes.len() + 1
                    ),
                    order: next_order,
                    ..Default::default()
                });
                changed = true;
            }
        });
        changed
    }

    fn render_button_editor(ui: &mut egui::Ui, button: &mut DialogButton) -> bool {
        let mut changed = Self::labeled_text(ui, statics::EN_LABEL_LABEL, &mut button.label);

        let mut tooltip = button.tooltip.clone().unwrap_or_default();
        if Self::labeled_text(ui, statics::EN_LABEL_TOOLTIP, &mut tooltip) {
            button.tooltip = (!tooltip.is_empty()).then_some(tooltip);
            changed = true;
        }

        ui.label(statics::EN_LABEL_ACTIONS);
        let mut op = None;
        let len = button.actions.len();
        for (idx, action) in button.actions.iter_mut().enumerate() {
            ui.push_id(("action", idx), |ui| {
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt("kind")
                        .selected_text(action.name.as_str())
                        .show_ui(ui, |ui| {
                            for kind in ActionKind::KNOWN {
                                let text = kind.as_str().to_string();
                                changed |= ui
                                    .selectable_value(&mut action.name, kind, text)
                                    .changed();
                            }
                        });
                    ui.label(statics::EN_LABEL_DATA);
                    changed |= ui
                        .add(
                            egui::TextEdit::singleline(&mut action.data)
                                .desired_width(ui.available_width() - 140.0),
                        )
                        .changed();
                    if let Some(o) = Self::row_controls(ui, idx, len) {
                        op = Some(o);
                    }
                });
            });
        }
        if let Some(op) = op {
            changed |= Self::apply_list_op(&mut button.actions, op);
        }
        if ui.small_button(statics::EN_BTN_ADD_ACTION).clicked() {
            button.actions.push(Action {
                name: ActionKind::Message,
                data: String::new(),
            });
            changed = true;
        }
        changed
    }

    fn render_editor_panel(ui: &mut egui::Ui, dialog: &mut DialogState) -> bool {
        let mut changed = false;
        ui.heading(statics::EN_HEADING_EDITOR);
        ui.separator();
        ui.push_id("editor_scroll", |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::CollapsingHeader::new(statics::EN_HEADING_GENERAL)
                        .default_open(true)
                        .show(ui, |ui| {
                            changed |= Self::render_general_editor(ui, dialog);
                        });
                    egui::CollapsingHeader::new(statics::EN_HEADING_BODY)
                        .default_open(true)
                        .show(ui, |ui| {
                            changed |= Self::render_body_editor(ui, &mut dialog.body);
                        });
                    egui::CollapsingHeader::new(statics::EN_HEADING_INPUTS)
                        .default_open(false)
                        .show(ui, |ui| {
                            changed |= Self::render_inputs_editor(ui, dialog);
                        });
                    egui::CollapsingHeader::new(statics::EN_HEADING_BUTTONS)
                        .default_open(false)
                        .show(ui, |ui| {
                            changed |= Self::render_list(
                                ui,
                                "buttons",
                                &mut dialog.buttons,
                                |b| markup::strip(b.label.as_str()),
                                Self::render_button_editor,
                            );
                            if ui.button(statics::EN_BTN_ADD_BUTTON).clicked() {
                                dialog.buttons.push(DialogButton {
                                    label: statics::NEW_BUTTON_LABEL.to_string(),
                                    ..Default::default()
                                });
                                changed = true;
                            }
                        });
                });
        });
        changed
    }

    /// Text format for one run of a segment. egui's default fonts have no bold face, so bold
    /// is drawn widened (and in the strong color when no color is given).
    fn segment_format(
        style: &Style,
        color: Option<egui::Color32>,
        look: TextLook,
    ) -> egui::TextFormat {
        let color = color.unwrap_or(if style.bold { look.strong } else { look.color });
        egui::TextFormat {
            font_id: egui::FontId::proportional(look.size),
            extra_letter_spacing: if style.bold { look.size * BOLD_SPACING } else { 0.0 },
            color,
            italics: style.italic,
            underline: if style.underline {
                egui::Stroke::new(1.0, color)
            } else {
                egui::Stroke::NONE
            },
            ..Default::default()
        }
    }

    fn append_rendered(job: &mut egui::text::LayoutJob, text: &RenderedText, look: TextLook) {
        // Character position within `text`, which rainbow extents are counted in.
        let mut pos = 0;
        for seg in text.segments() {
            let style = &seg.style;
            match &style.paint {
                Some(paint @ Paint::Rainbow { .. }) => {
                    let mut buf = [0u8; 4];
                    for ch in seg.text.chars() {
                        let color = paint
                            .rainbow_color(pos)
                            .map(|[r, g, b]| egui::Color32::from_rgb(r, g, b));
                        job.append(
                            ch.encode_utf8(&mut buf),
                            0.0,
                            Self::segment_format(style, color, look),
                        );
                        pos += 1;
                    }
                }
                paint => {
                    let color = match paint {
                        Some(Paint::Color(value)) => markup::parse_hex_color(value)
                            .map(|[r, g, b]| egui::Color32::from_rgb(r, g, b)),
                        _ => None,
                    };
                    job.append(&seg.text, 0.0, Self::segment_format(style, color, look));
                    pos += seg.text.chars().count();
                }
            }
        }
    }

    fn rendered_job(text: &RenderedText, look: TextLook) -> egui::text::LayoutJob {
        let mut job = egui::text::LayoutJob::default();
        Self::append_rendered(&mut job, text, look);
        job
    }

    fn render_preview_button(
        ui: &mut egui::Ui,
        view: &ButtonView,
        viewport: Viewport,
        look: TextLook,
        pressed: &mut Option<usize>,
    ) {
        let resp = ui.add_sized(
            [viewport.px(BUTTON_WIDTH_UNITS), viewport.px(WIDGET_HEIGHT_UNITS)],
            egui::Button::new(Self::rendered_job(&view.label, look)),
        );
        let resp = match &view.tooltip {
            Some(tip) => resp.on_hover_text(Self::rendered_job(tip, look)),
            None => resp,
        };
        if resp.clicked() {
            *pressed = Some(view.index);
        }
    }

    fn render_visual_preview(&mut self, ui: &mut egui::Ui) {
        self.preview_pane.width = ui.available_width();
        self.session
            .refresh_preview(Some(&mut self.preview_pane as &mut dyn RenderTarget));
        let Some(tree) = self.preview_pane.tree.clone() else {
            return;
        };

        let vp = tree.viewport;
        let look = TextLook {
            size: vp.px(TEXT_UNITS).max(1.0),
            color: ui.visuals().text_color(),
            strong: ui.visuals().strong_text_color(),
        };
        let mut actions = PreviewInteractions::default();

        ui.vertical_centered(|ui| {
            let mut title = Self::rendered_job(&tree.title.text, look);
            title.append(
                " ℹ",
                0.0,
                egui::TextFormat::simple(egui::FontId::proportional(look.size), look.color),
            );
            ui.label(title).on_hover_text(tree.title.info);
        });
        ui.add_space(vp.px(10.0));

        let output = egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .vertical_scroll_offset(vp.scroll_offset)
            .max_height(vp.px(SCROLL_HEIGHT_UNITS))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    for line in &tree.body {
                        ui.label(Self::rendered_job(line, look));
                        ui.add_space(vp.px(4.0));
                    }
                    for input in &tree.inputs {
                        Self::render_preview_input(ui, input, vp, look, &mut actions);
                        ui.add_space(vp.px(10.0));
                    }
                });
            });
        self.preview_pane.scroll_offset = output.state.offset.y;

        ui.add_space(vp.px(10.0));
        let row_w = |n: usize| {
            n as f32 * vp.px(BUTTON_WIDTH_UNITS)
                + n.saturating_sub(1) as f32 * vp.px(BUTTON_GAP_UNITS)
        };
        for row in tree.buttons.rows.iter().chain(
            std::iter::once(&tree.buttons.trailing).filter(|t| !t.is_empty()),
        ) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = vp.px(BUTTON_GAP_UNITS);
                ui.add_space(((ui.available_width() - row_w(row.len())) / 2.0).max(0.0));
                for view in row {
                    Self::render_preview_button(ui, view, vp, look, &mut actions.pressed_button);
                }
            });
            ui.add_space(vp.px(BUTTON_GAP_UNITS));
        }

        let dialog = self.session.dialog_mut();
        for (key, value) in &actions.text_edits {
            preview::set_text_value(dialog, key, value);
        }
        if let Some(index) = actions.cycled_select {
            preview::cycle_select(dialog, index);
        }
        if let Some(index) = actions.pressed_button {
            self.console = preview::describe_button(self.session.dialog(), index);
        }
    }

    fn render_preview_input(
        ui: &mut egui::Ui,
        input: &InputWidget,
        vp: Viewport,
        look: TextLook,
        actions: &mut PreviewInteractions,
    ) {
        match input {
            InputWidget::TextField {
                key,
                label,
                value,
                placeholder,
                max_length,
                max_lines,
            } => {
                ui.label(Self::rendered_job(label, look));
                let mut buf = value.clone();
                let editor = if *max_lines > 1 {
                    egui::TextEdit::multiline(&mut buf).desired_rows(*max_lines as usize)
                } else {
                    egui::TextEdit::singleline(&mut buf)
                };
                let resp = ui.add(
                    editor
                        .hint_text(placeholder.as_str())
                        .char_limit(*max_length as usize)
                        .font(egui::FontId::proportional(look.size))
                        .desired_width(vp.px(WIDGET_WIDTH_UNITS)),
                );
                if resp.changed() {
                    actions.text_edits.push((key.clone(), buf));
                }
            }
            InputWidget::Select {
                index,
                label,
                selected,
                ..
            } => {
                let mut job = Self::rendered_job(label, look);
                job.append(
                    " ",
                    0.0,
                    egui::TextFormat::simple(egui::FontId::proportional(look.size), look.color),
                );
                Self::append_rendered(&mut job, selected, look);
                if ui
                    .add_sized(
                        [vp.px(WIDGET_WIDTH_UNITS), vp.px(WIDGET_HEIGHT_UNITS)],
                        egui::Button::new(job),
                    )
                    .clicked()
                {
                    actions.cycled_select = Some(*index);
                }
            }
            InputWidget::Checkbox { label, checked, .. } => {
                let mut shown = *checked;
                ui.add_enabled(
                    false,
                    egui::Checkbox::new(&mut shown, Self::rendered_job(label, look)),
                );
            }
        }
    }

    fn copy_json(&mut self, ctx: &egui::Context) {
        ctx.copy_text(preview::json_preview(self.session.dialog()));
        info!(id = %self.session.dialog().id, "dialog JSON copied");
        self.toasts.notify(
            statics::EN_TOAST_JSON_COPIED,
            NoticeKind::Success,
            DEFAULT_TOAST_DURATION,
        );
    }

    fn render_json_preview(&mut self, ui: &mut egui::Ui) {
        if ui.button(statics::EN_BTN_COPY_JSON).clicked() {
            self.copy_json(ui.ctx());
        }
        let json = preview::json_preview(self.session.dialog());
        ui.push_id("json_scroll", |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut json.as_str())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
        });
    }

    fn render_console(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(statics::EN_HEADING_CONSOLE);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                    self.console = None;
                }
            });
        });
        ui.separator();
        match &self.console {
            None => {
                ui.weak(statics::EN_CONSOLE_EMPTY);
            }
            Some(log @ ActionLog::NoActions { .. }) => {
                ui.label(egui::RichText::new(log.to_string()).italics().weak());
            }
            Some(ActionLog::Actions(list)) => {
                for action in list {
                    ui.horizontal(|ui| {
                        ui.monospace(&action.kind);
                        ui.label(&action.description);
                    });
                }
            }
        }
    }

    fn render_history_window(&mut self, ctx: &egui::Context) {
        let mut open = self.history_open;
        let history = self.session.history();
        egui::Window::new(statics::EN_WINDOW_HISTORY)
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let entries: Vec<&DialogState> = history.entries().collect();
                let current = history.cursor();
                ui.label(format!("{} / {}", entries.len(), history.max_size()));
                let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
                ui.push_id("history_table", |ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                        .column(Column::initial(40.0).resizable(false))
                        .column(Column::initial(140.0).resizable(true))
                        .column(Column::remainder().resizable(true))
                        .column(Column::initial(70.0).resizable(false))
                        .header(row_h, |mut header| {
                            header.col(|ui| {
                                ui.strong("#");
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_LABEL_ID);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_LABEL_TITLE);
                            });
                            header.col(|ui| {
                                ui.strong("");
                            });
                        })
                        .body(|body| {
                            body.rows(row_h, entries.len(), |mut row| {
                                let idx = row.index();
                                let entry = entries[idx];
                                row.col(|ui| {
                                    ui.monospace((idx + 1).to_string());
                                });
                                row.col(|ui| {
                                    ui.label(&entry.id);
                                });
                                row.col(|ui| {
                                    ui.label(markup::strip(entry.title.as_str()));
                                });
                                row.col(|ui| {
                                    if current == Some(idx) {
                                        ui.strong(statics::EN_HISTORY_CURRENT);
                                    }
                                });
                            });
                        });
                });
                ui.separator();
                ui.label(statics::EN_HISTORY_TIP);
            });
        self.history_open = open;
    }

    fn render_about_window(&mut self, ctx: &egui::Context) {
        let mut open = self.about_open;
        egui::Window::new(statics::EN_WINDOW_ABOUT)
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.heading(statics::EN_ABOUT_HEADING);
                ui.label(format!(
                    "{} {}",
                    statics::EN_ABOUT_VERSION,
                    env!("CARGO_PKG_VERSION")
                ));
                ui.separator();
                ui.label(statics::EN_ABOUT_SHORTCUTS);
                ui.label(statics::EN_ABOUT_SHORTCUT_UNDO);
                ui.label(statics::EN_ABOUT_SHORTCUT_REDO);
                ui.label(statics::EN_ABOUT_SHORTCUT_COPY_JSON);
                ui.label(statics::EN_ABOUT_SHORTCUT_CLOSE);
                ui.separator();
                ui.label(statics::EN_ABOUT_MARKUP);
                for example in statics::EN_ABOUT_MARKUP_EXAMPLES {
                    ui.monospace(example);
                }
                ui.label(statics::EN_ABOUT_TIP_PLACEHOLDERS);
            });
        self.about_open = open;
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in self.toasts.iter() {
                    let color = match toast.kind {
                        NoticeKind::Info => ui.visuals().text_color(),
                        NoticeKind::Success => egui::Color32::from_rgb(16, 185, 129),
                        NoticeKind::Warning => egui::Color32::YELLOW,
                        NoticeKind::Error => egui::Color32::RED,
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.colored_label(color, &toast.message);
                    });
                }
            });
    }
}

fn dialog_next_order(dialog: &DialogState) -> i64 {
    let inputs = &dialog.inputs;
    inputs
        .text_fields
        .iter()
        .map(|f| f.order)
        .chain(inputs.selects.iter().map(|s| s.order))
        .chain(inputs.checkboxes.iter().map(|c| c.order))
        .max()
        .map_or(1, |o| o + 1)
}

impl eframe::App for DialogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let keys = Shortcuts::consume(ctx, self.history_open || self.about_open);
        if keys.undo {
            self.undo();
        }
        if keys.redo {
            self.redo();
        }
        if keys.copy_json {
            self.copy_json(ctx);
        }
        if keys.close_windows {
            self.history_open = false;
            self.about_open = false;
        }

        self.session.tick(now);
        self.toasts.prune(now);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let mut chosen = None;
                ui.menu_button(statics::EN_BTN_PRESETS, |ui| {
                    if ui.button(statics::EN_BTN_NEW).clicked() {
                        chosen = Some(None);
                        ui.close();
                    }
                    ui.separator();
                    for name in presets::PRESET_NAMES {
                        if ui.button(name).clicked() {
                            chosen = Some(Some(name));
                            ui.close();
                        }
                    }
                });
                match chosen {
                    Some(Some(name)) => self.load_preset(name),
                    Some(None) => {
                        self.session.edit(now, |d| *d = DialogState::blank());
                        self.session.commit_now();
                        self.console = None;
                    }
                    None => {}
                }

                ui.separator();
                let status = self.session.history().status();
                if ui
                    .add_enabled(status.can_undo, egui::Button::new(statics::EN_BTN_UNDO))
                    .clicked()
                {
                    self.undo();
                }
                if ui
                    .add_enabled(status.can_redo, egui::Button::new(statics::EN_BTN_REDO))
                    .clicked()
                {
                    self.redo();
                }
                if ui.button(statics::EN_BTN_HISTORY).clicked() {
                    self.history_open = true;
                }

                ui.separator();
                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.toggle_theme(ctx);
                }
                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if self.history_open {
            self.render_history_window(ctx);
        }
        if self.about_open {
            self.render_about_window(ctx);
        }

        egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(460.0)
            .show(ctx, |ui| {
                if Self::render_editor_panel(ui, self.session.dialog_mut()) {
                    self.session.mark_changed(now);
                }
            });

        egui::TopBottomPanel::bottom("console_panel")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                self.render_console(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut self.preview_tab,
                    PreviewTab::Visual,
                    statics::EN_TAB_VISUAL,
                );
                ui.selectable_value(&mut self.preview_tab, PreviewTab::Json, statics::EN_TAB_JSON);
            });
            ui.separator();
            match self.preview_tab {
                PreviewTab::Visual => self.render_visual_preview(ui),
                PreviewTab::Json => self.render_json_preview(ui),
            }
        });

        self.render_toasts(ctx);

        let wake = [
            self.session.time_until_commit(now),
            self.toasts.next_expiry(now),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(after) = wake {
            ctx.request_repaint_after(after);
        }
    }
}

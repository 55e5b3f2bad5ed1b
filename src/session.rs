use crate::DialogState;
use crate::debounce::Debouncer;
use crate::history::{DEFAULT_HISTORY_CAPACITY, History, HistoryError};
use crate::notify::{NoticeKind, Notifier};
use crate::presets::{self, PresetError};
use crate::preview::{Preview, RenderTarget};
use crate::statics;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(500);
pub const UNDO_NOTICE_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub history_capacity: usize,
    /// Quiet period after the last edit before it is recorded in history.
    pub commit_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            commit_delay: DEFAULT_COMMIT_DELAY,
        }
    }
}

/// One editing session: the live dialog plus its undo history and preview state.
///
/// Edits mutate the dialog in place and schedule a debounced commit; `tick` records the
/// snapshot once edits go quiet, so a burst of keystrokes becomes a single undo step.
#[derive(Debug)]
pub struct EditorSession {
    dialog: DialogState,
    history: History<DialogState>,
    pending_commit: Debouncer<()>,
    preview: Preview,
}

impl EditorSession {
    pub fn new(config: SessionConfig, initial: DialogState) -> Result<Self, HistoryError> {
        let mut history = History::new(config.history_capacity)?;
        history.push(&initial);
        Ok(Self {
            dialog: initial,
            history,
            pending_commit: Debouncer::new(config.commit_delay),
            preview: Preview::default(),
        })
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// Direct access for bindings that report changes themselves via [`Self::mark_changed`].
    pub fn dialog_mut(&mut self) -> &mut DialogState {
        &mut self.dialog
    }

    pub fn history(&self) -> &History<DialogState> {
        &self.history
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn edit(&mut self, now: Instant, f: impl FnOnce(&mut DialogState)) {
        f(&mut self.dialog);
        self.mark_changed(now);
    }

    pub fn mark_changed(&mut self, now: Instant) {
        self.pending_commit.schedule((), now);
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending_commit.is_pending()
    }

    pub fn time_until_commit(&self, now: Instant) -> Option<Duration> {
        self.pending_commit.time_until_due(now)
    }

    /// Record the dialog if the commit delay has elapsed. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.pending_commit.poll(now).is_some() {
            self.record();
            return true;
        }
        false
    }

    /// Record the dialog immediately, dropping any pending debounce.
    pub fn commit_now(&mut self) {
        self.pending_commit.cancel();
        self.record();
    }

    fn record(&mut self) {
        if self.history.current() == Some(&self.dialog) {
            debug!("session: dialog unchanged, nothing to record");
            return;
        }
        self.history.push(&self.dialog);
    }

    /// Replace the live dialog without touching history.
    pub fn load_state(&mut self, state: DialogState) {
        self.dialog = state;
    }

    pub fn undo(&mut self, notifier: &mut dyn Notifier) -> bool {
        if self.pending_commit.flush().is_some() {
            self.record();
        }
        let Some(state) = self.history.undo() else {
            return false;
        };
        self.load_state(state);
        notifier.notify(
            statics::EN_TOAST_UNDO,
            NoticeKind::Info,
            UNDO_NOTICE_DURATION,
        );
        true
    }

    pub fn redo(&mut self, notifier: &mut dyn Notifier) -> bool {
        if self.pending_commit.flush().is_some() {
            self.record();
        }
        let Some(state) = self.history.redo() else {
            return false;
        };
        self.load_state(state);
        notifier.notify(
            statics::EN_TOAST_REDO,
            NoticeKind::Info,
            UNDO_NOTICE_DURATION,
        );
        true
    }

    /// Switch to a built-in preset. The switch is itself an undoable step.
    pub fn load_preset(&mut self, name: &str) -> Result<(), PresetError> {
        let dialog = presets::load_preset(name)?;
        if self.pending_commit.flush().is_some() {
            self.record();
        }
        info!(preset = name, "session: loading preset");
        self.dialog = dialog;
        self.record();
        Ok(())
    }

    /// Forget all history and start over from the current dialog.
    pub fn reset_history(&mut self) {
        self.pending_commit.cancel();
        self.history.clear();
        self.history.push(&self.dialog);
    }

    pub fn refresh_preview(&mut self, target: Option<&mut dyn RenderTarget>) -> bool {
        self.preview.refresh(&self.dialog, target)
    }
}

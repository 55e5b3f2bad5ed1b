use mde::notify::{NoticeKind, Notifier};
use mde::session::UNDO_NOTICE_DURATION;
use mde::{DialogState, EditorSession, SessionConfig, statics};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const DELAY: Duration = Duration::from_millis(500);

#[derive(Default)]
struct RecordingNotifier {
    seen: Vec<(String, NoticeKind, Duration)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, kind: NoticeKind, duration: Duration) {
        self.seen.push((message.to_string(), kind, duration));
    }
}

fn session() -> Result<EditorSession> {
    Ok(EditorSession::new(
        SessionConfig {
            history_capacity: 10,
            commit_delay: DELAY,
        },
        DialogState::blank(),
    )?)
}

#[test]
fn initial_state_is_recorded() -> Result<()> {
    let s = session()?;
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.history().current(), Some(&DialogState::blank()));
    assert!(!s.history().can_undo());
    Ok(())
}

#[test]
fn burst_of_edits_becomes_one_undo_step() -> Result<()> {
    let mut s = session()?;
    let t0 = Instant::now();
    for (i, word) in ["H", "He", "Hel", "Hell", "Hello"].iter().enumerate() {
        let now = t0 + Duration::from_millis(100 * i as u64);
        s.edit(now, |d| d.title = word.to_string());
    }

    let last_edit = t0 + Duration::from_millis(400);
    assert!(!s.tick(last_edit + DELAY - Duration::from_millis(1)));
    assert_eq!(
        s.time_until_commit(last_edit + Duration::from_millis(100)),
        Some(Duration::from_millis(400))
    );
    assert!(s.tick(last_edit + DELAY));
    assert!(!s.has_pending_commit());

    assert_eq!(s.history().len(), 2);
    assert_eq!(
        s.history().current().map(|d| d.title.as_str()),
        Some("Hello")
    );
    Ok(())
}

#[test]
fn unchanged_dialog_is_not_recorded_again() -> Result<()> {
    let mut s = session()?;
    let t0 = Instant::now();
    s.mark_changed(t0);
    assert!(s.tick(t0 + DELAY));
    assert_eq!(s.history().len(), 1);
    Ok(())
}

#[test]
fn undo_and_redo_restore_and_notify() -> Result<()> {
    let mut s = session()?;
    let mut notes = RecordingNotifier::default();
    let t0 = Instant::now();

    s.edit(t0, |d| d.title = "First".to_string());
    s.tick(t0 + DELAY);

    assert!(s.undo(&mut notes));
    assert_eq!(s.dialog(), &DialogState::blank());
    assert!(!s.undo(&mut notes));

    assert!(s.redo(&mut notes));
    assert_eq!(s.dialog().title, "First");
    assert!(!s.redo(&mut notes));

    assert_eq!(
        notes.seen,
        vec![
            (
                statics::EN_TOAST_UNDO.to_string(),
                NoticeKind::Info,
                UNDO_NOTICE_DURATION
            ),
            (
                statics::EN_TOAST_REDO.to_string(),
                NoticeKind::Info,
                UNDO_NOTICE_DURATION
            ),
        ]
    );
    Ok(())
}

#[test]
fn undo_flushes_pending_edit_first() -> Result<()> {
    let mut s = session()?;
    let mut notes = RecordingNotifier::default();

    s.edit(Instant::now(), |d| d.id = "typed".to_string());
    assert!(s.has_pending_commit());

    assert!(s.undo(&mut notes));
    assert_eq!(s.dialog().id, "new_dialog");
    assert!(s.redo(&mut notes));
    assert_eq!(s.dialog().id, "typed");
    Ok(())
}

#[test]
fn preset_switch_is_undoable() -> Result<()> {
    let mut s = session()?;
    let mut notes = RecordingNotifier::default();

    s.load_preset("warning")?;
    assert_eq!(s.dialog().id, "warning_dialog");
    assert_eq!(s.history().len(), 2);

    assert!(s.undo(&mut notes));
    assert_eq!(s.dialog(), &DialogState::blank());
    Ok(())
}

#[test]
fn unknown_preset_leaves_session_alone() -> Result<()> {
    let mut s = session()?;
    assert!(s.load_preset("nope").is_err());
    assert_eq!(s.dialog(), &DialogState::blank());
    assert_eq!(s.history().len(), 1);
    Ok(())
}

#[test]
fn reset_history_starts_over_from_current_dialog() -> Result<()> {
    let mut s = session()?;
    s.load_preset("confirm")?;
    s.reset_history();
    assert_eq!(s.history().len(), 1);
    assert!(!s.history().can_undo());
    assert_eq!(s.history().current(), Some(s.dialog()));
    Ok(())
}

#[test]
fn zero_history_size_is_rejected() {
    let config = SessionConfig {
        history_capacity: 0,
        ..Default::default()
    };
    assert!(EditorSession::new(config, DialogState::blank()).is_err());
}

use mde::History;
use mde::history::HistoryError;
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, PartialEq)]
struct Doc {
    title: String,
    lines: Vec<String>,
}

fn doc(title: &str) -> Doc {
    Doc {
        title: title.to_string(),
        lines: vec![format!("{title} body")],
    }
}

fn abc() -> Result<History<Doc>> {
    let mut h = History::new(50)?;
    for t in ["A", "B", "C"] {
        h.push(&doc(t));
    }
    Ok(h)
}

#[test]
fn push_after_undo_discards_redo_branch() -> Result<()> {
    let mut h = abc()?;
    assert_eq!(h.cursor(), Some(2));

    assert_eq!(h.undo(), Some(doc("B")));
    assert_eq!(h.cursor(), Some(1));

    h.push(&doc("D"));
    let titles: Vec<&str> = h.entries().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "D"]);
    assert_eq!(h.cursor(), Some(2));
    assert!(!h.can_redo());
    Ok(())
}

#[test]
fn undo_then_redo_returns_to_same_state() -> Result<()> {
    let mut h = abc()?;
    let before = h.current().cloned();
    h.undo();
    assert_eq!(h.redo(), before);
    assert_eq!(h.cursor(), Some(2));
    Ok(())
}

#[test]
fn boundaries_return_none_and_leave_cursor() -> Result<()> {
    let mut h = History::<Doc>::new(5)?;
    assert_eq!(h.undo(), None);
    assert_eq!(h.redo(), None);
    assert_eq!(h.cursor(), None);

    h.push(&doc("A"));
    assert_eq!(h.undo(), None);
    assert_eq!(h.redo(), None);
    assert_eq!(h.cursor(), Some(0));

    h.push(&doc("B"));
    assert_eq!(h.redo(), None);
    assert_eq!(h.cursor(), Some(1));
    Ok(())
}

#[test]
fn capacity_evicts_oldest_and_keeps_cursor_on_newest() -> Result<()> {
    let mut h = History::new(3)?;
    for i in 0..10 {
        h.push(&doc(&i.to_string()));
        assert!(h.len() <= 3);
        assert_eq!(h.cursor(), Some(h.len() - 1));
    }
    let titles: Vec<&str> = h.entries().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["7", "8", "9"]);

    assert_eq!(h.undo(), Some(doc("8")));
    assert_eq!(h.undo(), Some(doc("7")));
    assert_eq!(h.undo(), None);
    Ok(())
}

#[test]
fn pushed_and_returned_states_are_independent_copies() -> Result<()> {
    let mut h = History::new(10)?;
    let mut live = doc("A");
    h.push(&live);
    live.lines.push("edited after push".to_string());
    h.push(&live);

    let mut restored = h.undo().ok_or("expected an entry to undo to")?;
    assert_eq!(restored, doc("A"));
    restored.title = "scribbled".to_string();

    assert_eq!(h.current(), Some(&doc("A")));
    assert_eq!(h.redo(), Some(live));
    Ok(())
}

#[test]
fn flags_track_cursor_position() -> Result<()> {
    let mut h = abc()?;
    assert!(h.can_undo() && !h.can_redo());
    h.undo();
    assert!(h.can_undo() && h.can_redo());
    h.undo();
    assert!(!h.can_undo() && h.can_redo());

    let status = h.status();
    assert_eq!(status.position, Some(0));
    assert_eq!(status.len, 3);
    Ok(())
}

#[test]
fn clear_empties_log() -> Result<()> {
    let mut h = abc()?;
    h.clear();
    assert!(h.is_empty());
    assert_eq!(h.cursor(), None);
    assert!(!h.can_undo() && !h.can_redo());
    Ok(())
}

#[test]
fn zero_capacity_is_a_construction_error() {
    assert_eq!(
        History::<Doc>::new(0).err(),
        Some(HistoryError::ZeroCapacity)
    );
}

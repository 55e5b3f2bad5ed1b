use mde::markup::{self, Paint, RenderedText, Style, render, strip};
use pretty_assertions::assert_eq;

fn parts(text: &RenderedText) -> Vec<(String, Style)> {
    text.segments()
        .iter()
        .map(|s| (s.text.clone(), s.style.clone()))
        .collect()
}

fn color(value: &str) -> Style {
    Style {
        paint: Some(Paint::Color(value.to_string())),
        ..Default::default()
    }
}

#[test]
fn bold_wraps_text() {
    let bold = Style {
        bold: true,
        ..Default::default()
    };
    assert_eq!(parts(&render("<b>Hi</b>")), vec![("Hi".to_string(), bold)]);
}

#[test]
fn named_color_maps_through_palette() {
    assert_eq!(
        parts(&render("<color:red>Hi</color>")),
        vec![("Hi".to_string(), color("#FF5555"))]
    );
    assert_eq!(
        parts(&render("<color:GOLD>Hi</color>")),
        vec![("Hi".to_string(), color("#FFAA00"))]
    );
}

#[test]
fn hex_color_is_kept_literally() {
    assert_eq!(
        parts(&render("<color:#123456>Hi</color>")),
        vec![("Hi".to_string(), color("#123456"))]
    );
}

#[test]
fn unknown_color_name_passes_through() {
    assert_eq!(
        parts(&render("<color:crimson>Hi</color>")),
        vec![("Hi".to_string(), color("crimson"))]
    );
}

#[test]
fn missing_or_empty_input_renders_nothing() {
    assert!(render(None).is_empty());
    assert!(render("").is_empty());
}

#[test]
fn gradient_uses_first_endpoint() {
    assert_eq!(
        parts(&render("<gradient:#ff0000:#0000ff>Fade</gradient>")),
        vec![("Fade".to_string(), color("#ff0000"))]
    );
}

#[test]
fn rainbow_is_marked_as_rainbow() {
    let text = render("<rainbow>Colors</rainbow>");
    assert_eq!(text.plain_text(), "Colors");
    assert_eq!(
        text.segments()[0].style.paint,
        Some(Paint::Rainbow { start: 0, len: 6 })
    );
}

#[test]
fn rainbow_sweeps_once_across_styled_children() {
    let text = render("<rainbow>ab<b>cd</b>ef</rainbow>");
    let spans: Vec<(&str, Option<&Paint>)> = text
        .segments()
        .iter()
        .map(|s| (s.text.as_str(), s.style.paint.as_ref()))
        .collect();
    let sweep = Paint::Rainbow { start: 0, len: 6 };
    assert_eq!(
        spans,
        vec![("ab", Some(&sweep)), ("cd", Some(&sweep)), ("ef", Some(&sweep))]
    );

    // Colors are taken per character over the whole span, not per segment.
    assert_eq!(sweep.rainbow_color(0), Some(markup::rainbow_color_at(0.0)));
    assert_eq!(sweep.rainbow_color(2), Some(markup::rainbow_color_at(0.4)));
    assert_eq!(sweep.rainbow_color(5), Some(markup::rainbow_color_at(1.0)));
    assert_ne!(sweep.rainbow_color(2), sweep.rainbow_color(0));
}

#[test]
fn rainbow_extent_counts_from_its_own_start() {
    let text = render("xy<rainbow>abc</rainbow>z");
    assert_eq!(
        text.segments()[1].style.paint,
        Some(Paint::Rainbow { start: 2, len: 3 })
    );
    assert_eq!(text.segments()[2].style.paint, None);
}

#[test]
fn gradient_endpoint_stops_at_an_earlier_tag() {
    // The endpoint swallows only the opening `<b>`; the text after it survives.
    let text = render("<gradient:#ff0000:<b>x</b>>text</gradient>");
    assert_eq!(text.plain_text(), "x>text");
    assert_eq!(parts(&text), vec![("x>text".to_string(), color("#ff0000"))]);
}

#[test]
fn gradient_endpoint_swallowing_a_color_ends_the_gradient_early() {
    // The stray color closer left behind ends the innermost span, which is the gradient.
    let text = render("<gradient:#00ff00:<color:red>x</color>>rest</gradient>");
    assert_eq!(
        parts(&text),
        vec![
            ("x".to_string(), color("#00ff00")),
            (">rest".to_string(), Style::default()),
        ]
    );
}

#[test]
fn unknown_tags_stay_literal() {
    let text = render("<blink>x</blink>");
    assert_eq!(
        parts(&text),
        vec![("<blink>x</blink>".to_string(), Style::default())]
    );
}

#[test]
fn formatting_inside_color_keeps_both() {
    let text = render("<color:red>a<b>b</b></color>");
    let bold_red = Style {
        bold: true,
        ..color("#FF5555")
    };
    assert_eq!(
        parts(&text),
        vec![
            ("a".to_string(), color("#FF5555")),
            ("b".to_string(), bold_red),
        ]
    );
}

#[test]
fn same_tag_nesting_is_not_canonicalized() {
    // The non-greedy match closes at the first `</b>`; the rest stays literal.
    let text = render("<b><b>x</b></b>");
    let bold = Style {
        bold: true,
        ..Default::default()
    };
    assert_eq!(
        parts(&text),
        vec![
            ("<b>x".to_string(), bold),
            ("</b>".to_string(), Style::default()),
        ]
    );
}

#[test]
fn tags_span_newlines() {
    let text = render("<i>one\ntwo</i>");
    assert_eq!(text.plain_text(), "one\ntwo");
    assert!(text.segments().iter().all(|s| s.style.italic));
}

#[test]
fn plain_text_drops_recognized_tags() {
    let text = render("<u>A</u> <color:#00ff00>B</color> <rainbow>C</rainbow>");
    assert_eq!(text.plain_text(), "A B C");
}

#[test]
fn strip_removes_supported_tags_and_click() {
    assert_eq!(
        strip("<b>Hi</b> <click:run_command:/spawn>there</click> <gradient:#000000:#ffffff>you</gradient>"),
        "Hi there you"
    );
}

#[test]
fn strip_is_identity_on_plain_text() {
    assert_eq!(strip("Just words, no tags."), "Just words, no tags.");
    assert_eq!(strip(None), "");
}

#[test]
fn strip_keeps_unknown_tags() {
    assert_eq!(strip("<blink>x</blink>"), "<blink>x</blink>");
}

#[test]
fn strip_is_idempotent() {
    for input in [
        "<<b>b>x</b>",
        "<color:<i>red</i>>y</color>",
        "<b><i><u>deep</u></i></b>",
        "<rainbow>r</rainbow><click:x>c</click>",
    ] {
        let once = strip(input);
        assert_eq!(strip(once.as_str()), once, "input: {input}");
    }
}

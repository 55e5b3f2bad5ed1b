use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Named MiniMessage colors and their hex values.
pub const PALETTE: [(&str, &str); 16] = [
    ("black", "#000000"),
    ("dark_blue", "#0000AA"),
    ("dark_green", "#00AA00"),
    ("dark_aqua", "#00AAAA"),
    ("dark_red", "#AA0000"),
    ("dark_purple", "#AA00AA"),
    ("gold", "#FFAA00"),
    ("gray", "#AAAAAA"),
    ("dark_gray", "#555555"),
    ("blue", "#5555FF"),
    ("green", "#55FF55"),
    ("aqua", "#55FFFF"),
    ("red", "#FF5555"),
    ("light_purple", "#FF55FF"),
    ("yellow", "#FFFF55"),
    ("white", "#FFFFFF"),
];

/// Stops of the rainbow treatment: red, orange, yellow, green, blue, violet.
pub const RAINBOW_STOPS: [&str; 6] = [
    "#FF0000", "#FFA500", "#FFFF00", "#008000", "#0000FF", "#EE82EE",
];

/// Tag passes, in the order they are applied. Each one scans the output of the previous.
static BOLD: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<b>(.*?)</b>"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<i>(.*?)</i>"));
static UNDERLINE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<u>(.*?)</u>"));
static NAMED_COLOR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<color:([A-Za-z0-9_]+)>(.*?)</color>"));
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?s)<color:(#[0-9a-fA-F]{6})>(.*?)</color>"));
// The second endpoint ends at the first `>` or at the first marker, whichever comes first.
// A marker stands for a whole tag emitted by an earlier pass, so reaching one means reaching
// that tag's closing `>`; the marker is consumed with the endpoint.
static GRADIENT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(&format!(
        r"(?s)<gradient:(#[0-9a-fA-F]{{6}}):[^>\x{{{MARKER_BASE:X}}}-\x{{{MARKER_LAST:X}}}]*?(?:>|[\x{{{MARKER_BASE:X}}}-\x{{{MARKER_LAST:X}}}])(.*?)</gradient>"
    ))
});
static RAINBOW: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?s)<rainbow>(.*?)</rainbow>"));

static STRIP: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"</?b>",
        r"</?i>",
        r"</?u>",
        r"<color:[^>]+>",
        r"</color>",
        r"<gradient:[^>]+>",
        r"</gradient>",
        r"</?rainbow>",
        r"<click:[^>]+>",
        r"</click>",
    ]
    .into_iter()
    .map(pattern)
    .collect()
});

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static markup pattern")
}

// Matched tags are swapped for single code points from Supplementary Private Use Area-A,
// each indexing the marker table. Later passes see them as ordinary text.
const MARKER_BASE: u32 = 0xF0000;
const MARKER_LAST: u32 = 0xFFFFD;

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A color value: `#RRGGBB`, or an unrecognized name passed through verbatim.
    Color(String),
    /// One rainbow sweep over `len` characters starting at character `start` of the
    /// rendered text. Every segment inside the span carries the same extent.
    Rainbow { start: usize, len: usize },
}

impl Paint {
    /// Rainbow color of the character at `pos` (counted over the whole rendered text).
    /// `None` for plain colors.
    pub fn rainbow_color(&self, pos: usize) -> Option<[u8; 3]> {
        let &Paint::Rainbow { start, len } = self else {
            return None;
        };
        let offset = pos.saturating_sub(start);
        let fraction = if len > 1 {
            offset as f32 / (len - 1) as f32
        } else {
            0.0
        };
        Some(rainbow_color_at(fraction))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub paint: Option<Paint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Markup rendered to a flat run of styled segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedText {
    segments: Vec<Segment>,
}

impl RenderedText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn push(&mut self, ch: char, style: &Style) {
        match self.segments.last_mut() {
            Some(last) if last.style == *style => last.text.push(ch),
            _ => self.segments.push(Segment {
                text: ch.to_string(),
                style: style.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Bold,
    Italic,
    Underline,
    Span,
}

#[derive(Debug, Clone)]
enum Marker {
    Open(Kind, Option<Paint>),
    Close(Kind),
    Literal(char),
}

#[derive(Default)]
struct MarkerTable {
    markers: Vec<Marker>,
}

impl MarkerTable {
    fn alloc(&mut self, marker: Marker) -> Option<char> {
        let code = MARKER_BASE + u32::try_from(self.markers.len()).ok()?;
        if code > MARKER_LAST {
            return None;
        }
        let ch = char::from_u32(code)?;
        self.markers.push(marker);
        Some(ch)
    }

    fn lookup(&self, ch: char) -> Option<&Marker> {
        let code = u32::from(ch);
        if !(MARKER_BASE..=MARKER_LAST).contains(&code) {
            return None;
        }
        self.markers.get((code - MARKER_BASE) as usize)
    }

    /// Replace every match of `re` with open/close markers around capture `content`.
    fn wrap(
        &mut self,
        text: &str,
        re: &Regex,
        content: usize,
        kind: Kind,
        paint: impl Fn(&Captures) -> Option<Paint>,
    ) -> String {
        re.replace_all(text, |caps: &Captures| {
            let inner = caps.get(content).map_or("", |m| m.as_str());
            let open = self.alloc(Marker::Open(kind, paint(caps)));
            let close = self.alloc(Marker::Close(kind));
            match (open, close) {
                (Some(open), Some(close)) => format!("{open}{inner}{close}"),
                // Out of markers: leave the tag as literal text.
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
    }
}

/// Look up a palette color by name, ignoring case.
pub fn palette_hex(name: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Parse `#RRGGBB` into RGB bytes.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Color of the rainbow treatment at `fraction` (0.0 = start, 1.0 = end of the text).
pub fn rainbow_color_at(fraction: f32) -> [u8; 3] {
    let stops: Vec<[u8; 3]> = RAINBOW_STOPS
        .iter()
        .filter_map(|s| parse_hex_color(s))
        .collect();
    let last = stops.len().saturating_sub(1);
    let pos = fraction.clamp(0.0, 1.0) * last as f32;
    let lo = (pos.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let t = pos - lo as f32;
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    let (a, b) = (stops[lo], stops[hi]);
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Render MiniMessage markup into styled segments.
///
/// Supported tags are applied as separate global passes in a fixed order (bold, italic,
/// underline, named color, hex color, gradient, rainbow), each over the output of the
/// previous one. Matching is non-greedy and spans newlines. Anything a pass does not
/// match, including unknown or unbalanced tags, stays literal.
pub fn render<'a>(markup: impl Into<Option<&'a str>>) -> RenderedText {
    let Some(markup) = markup.into().filter(|s| !s.is_empty()) else {
        return RenderedText::default();
    };

    let mut table = MarkerTable::default();

    // Input that already uses marker code points is protected as literal text.
    let mut text = String::with_capacity(markup.len());
    for ch in markup.chars() {
        let code = u32::from(ch);
        if (MARKER_BASE..=MARKER_LAST).contains(&code) {
            text.push(table.alloc(Marker::Literal(ch)).unwrap_or(ch));
        } else {
            text.push(ch);
        }
    }

    text = table.wrap(&text, &BOLD, 1, Kind::Bold, |_| None);
    text = table.wrap(&text, &ITALIC, 1, Kind::Italic, |_| None);
    text = table.wrap(&text, &UNDERLINE, 1, Kind::Underline, |_| None);
    text = table.wrap(&text, &NAMED_COLOR, 2, Kind::Span, |caps| {
        let name = &caps[1];
        let value = palette_hex(name).map_or_else(|| name.to_string(), str::to_string);
        Some(Paint::Color(value))
    });
    text = table.wrap(&text, &HEX_COLOR, 2, Kind::Span, |caps| {
        Some(Paint::Color(caps[1].to_string()))
    });
    text = table.wrap(&text, &GRADIENT, 2, Kind::Span, |caps| {
        Some(Paint::Color(caps[1].to_string()))
    });
    text = table.wrap(&text, &RAINBOW, 1, Kind::Span, |_| {
        Some(Paint::Rainbow { start: 0, len: 0 })
    });

    fold(&text, &table)
}

/// Turn the marker stream into segments. Formatting closers end their own kind; span
/// closers end the innermost open span, whichever pass produced it.
fn fold(text: &str, table: &MarkerTable) -> RenderedText {
    let mut out = RenderedText::default();
    let (mut bold, mut italic, mut underline) = (0usize, 0usize, 0usize);
    let mut spans: Vec<Option<Paint>> = Vec::new();
    let mut style = Style::default();
    // Characters emitted so far, and the (start, len) of every closed rainbow span.
    let mut pos = 0usize;
    let mut rainbows: Vec<(usize, usize)> = Vec::new();

    for ch in text.chars() {
        match table.lookup(ch) {
            Some(Marker::Literal(c)) => {
                out.push(*c, &style);
                pos += 1;
            }
            Some(Marker::Open(kind, paint)) => {
                match kind {
                    Kind::Bold => bold += 1,
                    Kind::Italic => italic += 1,
                    Kind::Underline => underline += 1,
                    Kind::Span => spans.push(match paint {
                        Some(Paint::Rainbow { .. }) => {
                            Some(Paint::Rainbow { start: pos, len: 0 })
                        }
                        other => other.clone(),
                    }),
                }
                style = current_style(bold, italic, underline, &spans);
            }
            Some(Marker::Close(kind)) => {
                match kind {
                    Kind::Bold => bold = bold.saturating_sub(1),
                    Kind::Italic => italic = italic.saturating_sub(1),
                    Kind::Underline => underline = underline.saturating_sub(1),
                    Kind::Span => {
                        if let Some(Some(Paint::Rainbow { start, .. })) = spans.pop() {
                            rainbows.push((start, pos - start));
                        }
                    }
                }
                style = current_style(bold, italic, underline, &spans);
            }
            None => {
                out.push(ch, &style);
                pos += 1;
            }
        }
    }

    // Spans still open at the end run to the end of the text.
    for span in spans.into_iter().flatten() {
        if let Paint::Rainbow { start, .. } = span {
            rainbows.push((start, pos - start));
        }
    }
    for segment in &mut out.segments {
        if let Some(Paint::Rainbow { start, len }) = &mut segment.style.paint
            && let Some(&(_, span_len)) = rainbows.iter().find(|(s, _)| *s == *start)
        {
            *len = span_len;
        }
    }

    out
}

fn current_style(bold: usize, italic: usize, underline: usize, spans: &[Option<Paint>]) -> Style {
    Style {
        bold: bold > 0,
        italic: italic > 0,
        underline: underline > 0,
        paint: spans.iter().rev().find_map(Clone::clone),
    }
}

/// Remove supported tag syntax (including `<click:...>`), keeping the enclosed text.
///
/// Removal repeats until nothing changes, so stripping twice is the same as stripping once.
pub fn strip<'a>(markup: impl Into<Option<&'a str>>) -> String {
    let Some(markup) = markup.into() else {
        return String::new();
    };

    let mut text = markup.to_string();
    loop {
        let mut next = text.clone();
        for re in STRIP.iter() {
            next = re.replace_all(&next, "").into_owned();
        }
        if next == text {
            return text;
        }
        text = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(text: &RenderedText) -> Vec<(&str, &Style)> {
        text.segments()
            .iter()
            .map(|s| (s.text.as_str(), &s.style))
            .collect()
    }

    #[test]
    fn palette_lookup_ignores_case() {
        assert_eq!(palette_hex("RED"), Some("#FF5555"));
        assert_eq!(palette_hex("Dark_Purple"), Some("#AA00AA"));
        assert_eq!(palette_hex("crimson"), None);
    }

    #[test]
    fn parse_hex_color_rejects_garbage() {
        assert_eq!(parse_hex_color("#ffd000"), Some([0xFF, 0xD0, 0x00]));
        assert_eq!(parse_hex_color("ffd000"), None);
        assert_eq!(parse_hex_color("#ffd00"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ffé000"), None);
    }

    #[test]
    fn rainbow_endpoints_match_stops() {
        assert_eq!(rainbow_color_at(0.0), [0xFF, 0x00, 0x00]);
        assert_eq!(rainbow_color_at(1.0), [0xEE, 0x82, 0xEE]);
        assert_eq!(rainbow_color_at(-3.0), rainbow_color_at(0.0));
    }

    #[test]
    fn adjacent_segments_with_same_style_merge() {
        let text = render("a<b></b>b");
        assert_eq!(text.segments().len(), 1);
        assert_eq!(text.plain_text(), "ab");
    }

    #[test]
    fn misnested_formatting_follows_marker_order() {
        let text = render("<b>a<i>b</b>c</i>");
        let got = styles(&text);
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].0, "a");
        assert!(got[0].1.bold && !got[0].1.italic);
        assert_eq!(got[1].0, "b");
        assert!(got[1].1.bold && got[1].1.italic);
        assert_eq!(got[2].0, "c");
        assert!(!got[2].1.bold && got[2].1.italic);
    }

    #[test]
    fn marker_code_points_in_input_stay_literal() {
        let input = "x\u{F0000}<b>y</b>";
        let text = render(input);
        assert_eq!(text.plain_text(), "x\u{F0000}y");
    }
}

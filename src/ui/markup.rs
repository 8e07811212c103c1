use crate::markup::{ColorCode, Format, Segment, parse};
use ratatui::prelude::*;

/// Terminal colour for a markup colour code (classic palette).
pub fn color(code: ColorCode) -> Color {
    let (r, g, b) = match code {
        ColorCode::Black => (0x00, 0x00, 0x00),
        ColorCode::DarkBlue => (0x00, 0x00, 0xAA),
        ColorCode::DarkGreen => (0x00, 0xAA, 0x00),
        ColorCode::DarkAqua => (0x00, 0xAA, 0xAA),
        ColorCode::DarkRed => (0xAA, 0x00, 0x00),
        ColorCode::DarkPurple => (0xAA, 0x00, 0xAA),
        ColorCode::Gold => (0xFF, 0xAA, 0x00),
        ColorCode::Gray => (0xAA, 0xAA, 0xAA),
        ColorCode::DarkGray => (0x55, 0x55, 0x55),
        ColorCode::Blue => (0x55, 0x55, 0xFF),
        ColorCode::Green => (0x55, 0xFF, 0x55),
        ColorCode::Aqua => (0x55, 0xFF, 0xFF),
        ColorCode::Red => (0xFF, 0x55, 0x55),
        ColorCode::LightPurple => (0xFF, 0x55, 0xFF),
        ColorCode::Yellow => (0xFF, 0xFF, 0x55),
        ColorCode::White => (0xFF, 0xFF, 0xFF),
    };
    Color::Rgb(r, g, b)
}

fn modifier(format: Format) -> Modifier {
    match format {
        Format::Obfuscated => Modifier::empty(),
        Format::Bold => Modifier::BOLD,
        Format::Strikethrough => Modifier::CROSSED_OUT,
        Format::Underline => Modifier::UNDERLINED,
        Format::Italic => Modifier::ITALIC,
    }
}

/// Renders tooltip markup as terminal lines, one per `§p`.
pub fn to_lines(input: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    for seg in parse(input) {
        match seg {
            Segment::LineBreak => lines.push(Line::from(std::mem::take(&mut spans))),
            Segment::Text(run) => {
                let mut style = Style::default();
                if let Some(c) = run.color {
                    style = style.fg(color(c));
                }
                for f in run.formats {
                    style = style.add_modifier(modifier(f));
                }
                spans.push(Span::styled(run.text, style));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}

/// Title and optional body as one block of text.
pub fn tooltip_text(title: &str, body: Option<&str>) -> Text<'static> {
    let mut lines = to_lines(title);
    if let Some(body) = body {
        lines.extend(to_lines(body));
    }
    Text::from(lines)
}

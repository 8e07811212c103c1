//! Parser for the `§` colour/format mini-language used in item tooltips.
//!
//! The parser turns a tooltip string into a flat list of [`Segment`]s that
//! carry the style active for each run of plain text. Renderers (HTML in
//! [`html`], terminal spans in `ui::markup`) only walk that list.

pub mod html;
pub mod rarity;

pub use html::to_html;
pub use rarity::rarity_to_code;

/// Marker that introduces a one-character control code.
pub const SECTION: char = '§';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ColorCode {
    pub const ALL: [ColorCode; 16] = [
        ColorCode::Black,
        ColorCode::DarkBlue,
        ColorCode::DarkGreen,
        ColorCode::DarkAqua,
        ColorCode::DarkRed,
        ColorCode::DarkPurple,
        ColorCode::Gold,
        ColorCode::Gray,
        ColorCode::DarkGray,
        ColorCode::Blue,
        ColorCode::Green,
        ColorCode::Aqua,
        ColorCode::Red,
        ColorCode::LightPurple,
        ColorCode::Yellow,
        ColorCode::White,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        let idx = c.to_digit(16)?;
        // Codes are lower-case only; `§A` is not a colour.
        if c.is_ascii_uppercase() {
            return None;
        }
        Some(Self::ALL[idx as usize])
    }

    pub fn as_char(self) -> char {
        let idx = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        char::from_digit(idx as u32, 16).unwrap_or('0')
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorCode::Black => "black",
            ColorCode::DarkBlue => "dark-blue",
            ColorCode::DarkGreen => "dark-green",
            ColorCode::DarkAqua => "dark-aqua",
            ColorCode::DarkRed => "dark-red",
            ColorCode::DarkPurple => "dark-purple",
            ColorCode::Gold => "gold",
            ColorCode::Gray => "gray",
            ColorCode::DarkGray => "dark-gray",
            ColorCode::Blue => "blue",
            ColorCode::Green => "green",
            ColorCode::Aqua => "aqua",
            ColorCode::Red => "red",
            ColorCode::LightPurple => "light-purple",
            ColorCode::Yellow => "yellow",
            ColorCode::White => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `§k`, accepted and stacked but renders nothing.
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
}

impl Format {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'k' => Some(Format::Obfuscated),
            'l' => Some(Format::Bold),
            'm' => Some(Format::Strikethrough),
            'n' => Some(Format::Underline),
            'o' => Some(Format::Italic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    Color(ColorCode),
    Format(Format),
    Reset,
    Paragraph,
}

impl Code {
    fn from_char(c: char) -> Option<Self> {
        if let Some(color) = ColorCode::from_char(c) {
            return Some(Code::Color(color));
        }
        if let Some(format) = Format::from_char(c) {
            return Some(Code::Format(format));
        }
        match c {
            'r' => Some(Code::Reset),
            'p' => Some(Code::Paragraph),
            _ => None,
        }
    }
}

/// A run of plain text together with the style active when it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub color: Option<ColorCode>,
    pub formats: Vec<Format>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(Run),
    LineBreak,
}

/// Splits `input` into styled runs and line breaks.
///
/// A colour code replaces the active colour, format codes accumulate,
/// `§r` clears both, and `§p` emits a line break and clears both as well.
/// Unknown codes are consumed without effect.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut color: Option<ColorCode> = None;
    let mut formats: Vec<Format> = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch == SECTION {
            chars.next();
            match chars.next().and_then(Code::from_char) {
                Some(Code::Color(c)) => color = Some(c),
                Some(Code::Format(f)) => formats.push(f),
                Some(Code::Reset) => {
                    color = None;
                    formats.clear();
                }
                Some(Code::Paragraph) => {
                    segments.push(Segment::LineBreak);
                    color = None;
                    formats.clear();
                }
                None => {}
            }
            continue;
        }

        let mut text = String::new();
        while let Some(&c) = chars.peek() {
            if c == SECTION {
                break;
            }
            text.push(c);
            chars.next();
        }
        segments.push(Segment::Text(Run {
            text,
            color,
            formats: formats.clone(),
        }));
    }

    segments
}

/// Returns the text of `input` with every control code removed.
pub fn strip(input: &str) -> String {
    parse(input)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Text(run) => Some(run.text),
            Segment::LineBreak => None,
        })
        .collect()
}

use super::{ColorCode, Format, Run, Segment, parse};

impl ColorCode {
    /// CSS value used for the colour in rendered HTML.
    pub fn css_var(self) -> String {
        format!("var(--mc-{})", self.name())
    }
}

impl Format {
    fn css(self) -> &'static str {
        match self {
            Format::Obfuscated => "",
            Format::Bold => "font-weight: bold;",
            Format::Strikethrough => "text-decoration: line-through;",
            Format::Underline => "text-decoration: underline;",
            Format::Italic => "font-style: italic;",
        }
    }
}

/// Renders tooltip markup as inline-styled HTML spans.
///
/// Text is escaped; style values come from a closed set and are not.
pub fn to_html(input: &str) -> String {
    render(&parse(input))
}

pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::LineBreak => out.push_str("<br>"),
            Segment::Text(run) => {
                out.push_str("<span style=\"");
                out.push_str(&style_attr(run));
                out.push_str("\">");
                out.push_str(&escape(&run.text));
                out.push_str("</span>");
            }
        }
    }
    out
}

fn style_attr(run: &Run) -> String {
    let mut style = String::new();
    if let Some(color) = run.color {
        style.push_str("color: ");
        style.push_str(&color.css_var());
        style.push(';');
    }
    for f in &run.formats {
        style.push_str(f.css());
    }
    style
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

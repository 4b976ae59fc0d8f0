//! Styled text runs and the inline markup that produces them.
//!
//! Markup is plain text interleaved with tags. A tag is a space separated list
//! of style tokens between `<` and `>`; it closes the text collected so far and
//! sets the style of the text that follows:
//!
//! - colour names: `white`, `light_gray`, `gray`, `dark_gray`, `black`, `red`,
//!   `pink`, `orange`, `yellow`, `green`, `magenta`, `cyan`, `blue`
//!   (case-insensitive), or `#rrggbb`
//! - `shadow`, `bold`
//! - `break`: closes the current run without changing the style
//!
//! `\<` starts a literal tag: everything up to and including the next `>` is
//! kept as text. Each tag starts from the default style (white, no shadow, not
//! bold), so `<cyan shadow>a<bold>b` renders `b` white and bold.

use crate::components::boundingbox::BoundingBox;
use log::warn;
use raylib::prelude::Color;
use std::fmt;

/// Half extent of one glyph cell at scale 1.
pub const GLYPH_HALF_EXTENT: f32 = 10.0 / 16.0;
/// Width a narrow glyph gives back to the run's bounding box, in glyph half extents.
const NARROW_BOX_SHRINK: f32 = 0.575;
/// Vertical slack added above the glyph half extent.
const BOX_VERTICAL_PAD: f32 = 0.25;

/// Characters drawn closer to their neighbours.
pub const CURSOR_CHAR: char = '\u{f0}';

pub fn is_narrow(c: char) -> bool {
    matches!(c, ' ' | 'i' | 'l' | 'I' | 't' | 'f' | '\'' | ',' | ':' | CURSOR_CHAR)
}

/// One leaf of the text tree.
#[derive(Clone, Debug)]
pub struct StyledRun {
    pub text: String,
    pub color: Color,
    pub shadow: bool,
    pub bold: bool,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            shadow: false,
            bold: false,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let len = self.text.chars().count() as f32;
        let narrow = self.text.chars().filter(|c| is_narrow(*c)).count() as f32;
        let lr = GLYPH_HALF_EXTENT * len - GLYPH_HALF_EXTENT * NARROW_BOX_SHRINK * narrow;
        BoundingBox::rectangle(lr, GLYPH_HALF_EXTENT + BOX_VERTICAL_PAD)
    }
}

/// Rose tree of styled runs.
#[derive(Clone, Debug)]
pub enum TextComponent {
    Composite(Vec<TextComponent>),
    Run(StyledRun),
}

impl Default for TextComponent {
    fn default() -> Self {
        TextComponent::Composite(Vec::new())
    }
}

impl TextComponent {
    /// Parse markup into a flat composite of runs.
    pub fn parse(markup: &str) -> Self {
        let mut parser = MarkupParser::default();
        let mut chars = markup.chars().peekable();
        while let Some(c) = chars.next() {
            if parser.literal_tag {
                parser.buffer.push(c);
                if c == '>' {
                    parser.literal_tag = false;
                }
                continue;
            }
            match c {
                '\\' if chars.peek() == Some(&'<') => {
                    chars.next();
                    parser.buffer.push('<');
                    parser.literal_tag = true;
                }
                '<' => {
                    parser.flush();
                    let mut tag = String::new();
                    for t in chars.by_ref() {
                        if t == '>' {
                            break;
                        }
                        tag.push(t);
                    }
                    parser.apply_tag(&tag);
                }
                _ => parser.buffer.push(c),
            }
        }
        parser.flush();
        TextComponent::Composite(parser.runs.into_iter().map(TextComponent::Run).collect())
    }

    /// Leaves in drawing order.
    pub fn runs(&self) -> Vec<&StyledRun> {
        let mut out = Vec::new();
        self.collect_runs(&mut out);
        out
    }

    fn collect_runs<'a>(&'a self, out: &mut Vec<&'a StyledRun>) {
        match self {
            TextComponent::Run(run) => out.push(run),
            TextComponent::Composite(children) => {
                for child in children {
                    child.collect_runs(out);
                }
            }
        }
    }

    /// Concatenated text without markup.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }

    /// Aggregate box: widths add up, height is the tallest child.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            TextComponent::Run(run) => run.bounding_box(),
            TextComponent::Composite(children) if children.is_empty() => BoundingBox::EMPTY,
            TextComponent::Composite(children) => {
                let mut bb = BoundingBox::new(0.0, 0.0, f32::NEG_INFINITY, f32::INFINITY);
                for child in children.iter().map(TextComponent::bounding_box) {
                    bb.left_x += child.left_x;
                    bb.right_x += child.right_x;
                    bb.top_y = bb.top_y.max(child.top_y);
                    bb.bottom_y = bb.bottom_y.min(child.bottom_y);
                }
                bb
            }
        }
    }
}

#[derive(Default)]
struct MarkupParser {
    runs: Vec<StyledRun>,
    buffer: String,
    style: Option<StyledRun>,
    literal_tag: bool,
}

impl MarkupParser {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let mut run = self.style.clone().unwrap_or_else(|| StyledRun::plain(""));
        run.text = std::mem::take(&mut self.buffer);
        self.runs.push(run);
    }

    fn apply_tag(&mut self, tag: &str) {
        let mut style = StyledRun::plain("");
        for token in tag.split(' ').filter(|t| !t.is_empty()) {
            let lower = token.to_ascii_lowercase();
            match lower.as_str() {
                "shadow" => style.shadow = true,
                "bold" => style.bold = true,
                "break" => {
                    // keep whatever style was active before the tag
                    self.flush();
                    return;
                }
                _ => match parse_color(&lower) {
                    Some(color) => style.color = color,
                    None => warn!("Unknown text markup token '{}'", token),
                },
            }
        }
        self.style = Some(style);
    }
}

/// Named colour or `#rrggbb`.
pub fn parse_color(token: &str) -> Option<Color> {
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        return Some(Color::new(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
            255,
        ));
    }
    let color = match token.to_ascii_lowercase().as_str() {
        "white" => Color::new(255, 255, 255, 255),
        "light_gray" => Color::new(192, 192, 192, 255),
        "gray" => Color::new(128, 128, 128, 255),
        "dark_gray" => Color::new(64, 64, 64, 255),
        "black" => Color::new(0, 0, 0, 255),
        "red" => Color::new(255, 0, 0, 255),
        "pink" => Color::new(255, 175, 175, 255),
        "orange" => Color::new(255, 200, 0, 255),
        "yellow" => Color::new(255, 255, 0, 255),
        "green" => Color::new(0, 255, 0, 255),
        "magenta" => Color::new(255, 0, 255, 255),
        "cyan" => Color::new(0, 255, 255, 255),
        "blue" => Color::new(0, 0, 255, 255),
        _ => return None,
    };
    Some(color)
}

/// Fill `{}` placeholders in order. `\{}` is kept as a literal `{}`; surplus
/// placeholders are left as they are.
pub fn composed(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        let (before, after) = rest.split_at(idx);
        if let Some(stripped) = before.strip_suffix('\\') {
            out.push_str(stripped);
            out.push_str("{}");
        } else {
            out.push_str(before);
            match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str("{}"),
            }
        }
        rest = &after[2..];
    }
    out.push_str(rest);
    out
}

use serde::{Deserialize, Serialize};

/// Engine defaults applied when neither the run nor its paragraph sets a value.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A solid border drawn around a paragraph, table, or cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Stroke thickness in points.
    pub thickness: f64,
    pub color: Rgb,
}

/// A set of text style overrides.
///
/// Every field is optional: an unset field inherits from the enclosing
/// scope. A text run's effective style is its own overrides layered over
/// its paragraph's style layered over the engine defaults, so setting bold
/// on a paragraph after its runs were added embolden every run that does
/// not override bold itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    font_family: Option<String>,
    font_size: Option<f64>,
    bold: Option<bool>,
    italic: Option<bool>,
    text_color: Option<Rgb>,
    background_color: Option<Rgb>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = Some(family.into());
    }

    pub fn set_font_size(&mut self, points: f64) {
        self.font_size = Some(points);
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = Some(bold);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = Some(italic);
    }

    pub fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
        self.text_color = Some(Rgb::new(r, g, b));
    }

    pub fn set_background_color(&mut self, r: u8, g: u8, b: u8) {
        self.background_color = Some(Rgb::new(r, g, b));
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn italic(&self) -> Option<bool> {
        self.italic
    }

    pub fn text_color(&self) -> Option<Rgb> {
        self.text_color
    }

    pub fn background_color(&self) -> Option<Rgb> {
        self.background_color
    }

    /// Layer `self` over `base`: set fields win, unset fields fall through.
    pub fn layered_over(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_family: self
                .font_family
                .clone()
                .or_else(|| base.font_family.clone()),
            font_size: self.font_size.or(base.font_size),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            text_color: self.text_color.or(base.text_color),
            background_color: self.background_color.or(base.background_color),
        }
    }

    /// Fill any remaining unset fields with engine defaults.
    pub fn resolve(&self) -> ResolvedTextStyle {
        ResolvedTextStyle {
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            bold: self.bold.unwrap_or(false),
            italic: self.italic.unwrap_or(false),
            text_color: self.text_color.unwrap_or(Rgb::BLACK),
            background_color: self.background_color,
        }
    }
}

/// A fully-resolved style with every field concrete, ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub text_color: Rgb,
    pub background_color: Option<Rgb>,
}

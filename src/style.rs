use ratatui::style::{Color, Modifier, Style as RatStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ViewError;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    LightBlue,
    LightCyan,
    LightYellow,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::LightBlue => Color::LightBlue,
                NamedColor::LightCyan => Color::LightCyan,
                NamedColor::LightYellow => Color::LightYellow,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Style definition for a single element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ThemeColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ThemeColor>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub reverse: bool,
}

impl ElementStyle {
    pub fn fg(color: NamedColor) -> Self {
        Self { fg: Some(ThemeColor::Named(color)), ..Default::default() }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_bg(mut self, color: NamedColor) -> Self {
        self.bg = Some(ThemeColor::Named(color));
        self
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn to_ratatui(&self) -> RatStyle {
        let mut style = RatStyle::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.reverse {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

/// Complete theme configuration. Missing entries of a theme file are taken
/// from the light theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,

    // Table fields
    pub cell: ElementStyle,
    pub header: ElementStyle,
    pub cursor: ElementStyle,
    pub header_cursor: ElementStyle,
    /// Patched over the field style of a matching field
    pub cell_match: ElementStyle,
    pub border: ElementStyle,

    // Lines around the table
    pub title_bar: ElementStyle,
    pub filter_line: ElementStyle,
    pub filter_prompt: ElementStyle,
    pub footer: ElementStyle,

    // Messages
    pub message_warning: ElementStyle,

    pub help: ElementStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme (default)
    pub fn light() -> Self {
        use NamedColor::*;
        Self {
            name: "light".to_string(),
            cell: ElementStyle::fg(Black),
            header: ElementStyle::fg(Blue).with_bold(),
            cursor: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            header_cursor: ElementStyle::fg(Yellow).with_bg(Blue).with_bold(),
            cell_match: ElementStyle::plain().with_underline().with_bg(LightYellow),
            border: ElementStyle::fg(Gray),
            title_bar: ElementStyle::fg(White).with_bg(Blue).with_bold(),
            filter_line: ElementStyle::fg(Black).with_bg(Gray),
            filter_prompt: ElementStyle::fg(Blue).with_bold(),
            footer: ElementStyle::fg(White).with_bg(Blue),
            message_warning: ElementStyle::fg(Yellow).with_bg(Blue).with_bold(),
            help: ElementStyle::fg(Black).with_bg(LightCyan),
        }
    }

    /// Dark theme with black background
    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            cell: ElementStyle::fg(White).with_bg(Black),
            header: ElementStyle::fg(LightCyan).with_bg(Black).with_bold(),
            cursor: ElementStyle::fg(Black).with_bg(LightCyan).with_bold(),
            header_cursor: ElementStyle::fg(Black).with_bg(LightYellow).with_bold(),
            cell_match: ElementStyle::plain().with_underline().with_bg(DarkGray),
            border: ElementStyle::fg(DarkGray).with_bg(Black),
            title_bar: ElementStyle::fg(Black).with_bg(LightBlue).with_bold(),
            filter_line: ElementStyle::fg(White).with_bg(DarkGray),
            filter_prompt: ElementStyle::fg(LightCyan).with_bold(),
            footer: ElementStyle::fg(Black).with_bg(LightBlue),
            message_warning: ElementStyle::fg(Red).with_bg(LightBlue).with_bold(),
            help: ElementStyle::fg(White).with_bg(DarkGray),
        }
    }

    /// Monochrome theme, only text attributes
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            cell: ElementStyle::plain(),
            header: ElementStyle::plain().with_bold(),
            cursor: ElementStyle::plain().with_reverse(),
            header_cursor: ElementStyle::plain().with_reverse().with_bold(),
            cell_match: ElementStyle::plain().with_underline(),
            border: ElementStyle::plain(),
            title_bar: ElementStyle::plain().with_reverse(),
            filter_line: ElementStyle::plain(),
            filter_prompt: ElementStyle::plain().with_bold(),
            footer: ElementStyle::plain().with_reverse(),
            message_warning: ElementStyle::plain().with_reverse().with_bold(),
            help: ElementStyle::plain().with_reverse(),
        }
    }

    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ViewError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewError::Theme(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ViewError> {
        toml::from_str(content).map_err(|e| ViewError::Theme(format!("failed to parse theme: {}", e)))
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "mono" | "monochrome" => Some(Self::mono()),
            _ => None,
        }
    }

    /// A built-in theme name or the path of a theme file
    pub fn resolve(name_or_path: &str) -> Result<Self, ViewError> {
        match Self::by_name(name_or_path) {
            Some(theme) => Ok(theme),
            None => Self::from_file(Path::new(name_or_path)),
        }
    }
}

/// Runtime style manager
pub struct Style {
    pub theme: Theme,
}

impl Style {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }

    /// The style of a table field
    pub fn field(&self, is_header: bool, is_cursor: bool, is_match: bool) -> RatStyle {
        let base = match (is_header, is_cursor) {
            (true, true) => &self.theme.header_cursor,
            (false, true) => &self.theme.cursor,
            (true, false) => &self.theme.header,
            (false, false) => &self.theme.cell,
        };

        let style = base.to_ratatui();
        if is_match {
            style.patch(self.theme.cell_match.to_ratatui())
        } else {
            style
        }
    }

    pub fn border(&self) -> RatStyle {
        self.theme.border.to_ratatui()
    }

    pub fn title_bar(&self) -> RatStyle {
        self.theme.title_bar.to_ratatui()
    }

    pub fn filter_line(&self) -> RatStyle {
        self.theme.filter_line.to_ratatui()
    }

    pub fn filter_prompt(&self) -> RatStyle {
        self.theme.filter_prompt.to_ratatui()
    }

    pub fn footer(&self) -> RatStyle {
        self.theme.footer.to_ratatui()
    }

    pub fn message_warning(&self) -> RatStyle {
        self.theme.message_warning.to_ratatui()
    }

    pub fn help(&self) -> RatStyle {
        self.theme.help.to_ratatui()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_themes() {
        for name in ["light", "dark", "mono"] {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(&theme.name, name);
        }
        assert!(Theme::by_name("unknown").is_none());
    }

    #[test]
    fn test_mono_has_no_colors() {
        let style = Style::with_theme(Theme::mono());

        let cursor = style.field(false, true, false);
        assert_eq!(cursor.fg, None);
        assert_eq!(cursor.bg, None);
        assert!(cursor.add_modifier.contains(Modifier::REVERSED));

        let header_cursor = style.field(true, true, false);
        assert!(header_cursor.add_modifier.contains(Modifier::BOLD | Modifier::REVERSED));
    }

    #[test]
    fn test_match_is_patched() {
        let style = Style::with_theme(Theme::light());
        let field = style.field(false, false, true);

        assert_eq!(field.fg, Some(Color::Black));
        assert_eq!(field.bg, Some(Color::LightYellow));
        assert!(field.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_partial_theme_file() {
        let theme = Theme::from_toml(
            r#"
            name = "custom"
            [cursor]
            fg = "red"
            bg = [0, 43, 54]
            bold = true
            "#,
        )
        .unwrap();

        assert_eq!(theme.name, "custom");
        assert_eq!(theme.cursor.fg, Some(ThemeColor::Named(NamedColor::Red)));
        assert_eq!(theme.cursor.bg, Some(ThemeColor::Rgb([0, 43, 54])));
        assert_eq!(theme.header, Theme::light().header);
    }

    #[test]
    fn test_resolve_theme_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "name = \"file\"").unwrap();
        writeln!(file, "[header]").unwrap();
        writeln!(file, "fg = 42").unwrap();

        let theme = Theme::resolve(file.path().to_str().unwrap()).unwrap();
        assert_eq!(theme.name, "file");
        assert_eq!(theme.header.fg, Some(ThemeColor::Indexed(42)));
    }

    #[test]
    fn test_invalid_theme() {
        assert!(matches!(Theme::from_toml("cursor = 3"), Err(ViewError::Theme(_))));
        assert!(matches!(Theme::resolve("/nonexistent/theme.toml"), Err(ViewError::Theme(_))));
    }
}

use anyhow::Context;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

use crate::api::{CalendarTab, DEFAULT_BASE_URL};
use crate::formatting::{is_valid_time_format, BoxChars, DEFAULT_TIME_FORMAT};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Seconds between automatic refreshes
    pub refresh_interval: u32,
    pub time_format: String,
    pub api_base_url: String,
    /// Season override; the backend picks the current season when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    /// Calendar tour shown on startup (main, others or all)
    pub default_tour: String,
    pub display: DisplayConfig,
}

/// Named accent theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub selection_fg: Color,
    pub header_fg: Color,
}

pub const THEME_ORANGE: Theme = Theme {
    name: "orange",
    selection_fg: Color::Rgb(255, 165, 0),
    header_fg: Color::Rgb(255, 204, 128),
};
pub const THEME_GREEN: Theme = Theme {
    name: "green",
    selection_fg: Color::Rgb(0, 200, 83),
    header_fg: Color::Rgb(159, 226, 191),
};
pub const THEME_BLUE: Theme = Theme {
    name: "blue",
    selection_fg: Color::Rgb(66, 135, 245),
    header_fg: Color::Rgb(160, 196, 255),
};
pub const THEME_PURPLE: Theme = Theme {
    name: "purple",
    selection_fg: Color::Rgb(171, 71, 188),
    header_fg: Color::Rgb(206, 147, 216),
};
pub const THEME_CYAN: Theme = Theme {
    name: "cyan",
    selection_fg: Color::Rgb(0, 188, 212),
    header_fg: Color::Rgb(128, 222, 234),
};
pub const THEME_RED: Theme = Theme {
    name: "red",
    selection_fg: Color::Rgb(229, 57, 53),
    header_fg: Color::Rgb(239, 154, 154),
};
pub const THEME_YELLOW: Theme = Theme {
    name: "yellow",
    selection_fg: Color::Rgb(253, 216, 53),
    header_fg: Color::Rgb(255, 241, 118),
};
pub const THEME_WHITE: Theme = Theme {
    name: "white",
    selection_fg: Color::Rgb(250, 250, 250),
    header_fg: Color::Rgb(189, 189, 189),
};

pub const THEMES: [Theme; 8] = [
    THEME_ORANGE,
    THEME_GREEN,
    THEME_BLUE,
    THEME_PURPLE,
    THEME_CYAN,
    THEME_RED,
    THEME_YELLOW,
    THEME_WHITE,
];

pub fn theme_by_name(name: &str) -> Option<Theme> {
    THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
        .cloned()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    #[serde(rename = "theme", skip_serializing_if = "Option::is_none")]
    pub theme_name: Option<String>,
    #[serde(skip)]
    pub theme: Option<Theme>,
    #[serde(deserialize_with = "deserialize_color", serialize_with = "serialize_color")]
    pub selection_fg: Color,
    #[serde(
        deserialize_with = "deserialize_color_optional",
        serialize_with = "serialize_color_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub unfocused_selection_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color", serialize_with = "serialize_color")]
    pub header_fg: Color,
    #[serde(deserialize_with = "deserialize_color", serialize_with = "serialize_color")]
    pub live_fg: Color,
    #[serde(deserialize_with = "deserialize_color", serialize_with = "serialize_color")]
    pub error_fg: Color,
    #[serde(skip)]
    pub box_chars: BoxChars,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            refresh_interval: 60,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            season: None,
            default_tour: CalendarTab::Main.as_str().to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            use_unicode: true,
            theme_name: None,
            theme: None,
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            unfocused_selection_fg: None,
            header_fg: Color::Rgb(159, 226, 191), // Seafoam
            live_fg: Color::Rgb(0, 200, 83),
            error_fg: Color::Red,
            box_chars: BoxChars::unicode(),
        }
    }
}

impl Config {
    /// Calendar tab to open on startup, falling back to the main tour
    pub fn default_tab(&self) -> CalendarTab {
        self.default_tour.parse().unwrap_or_default()
    }
}

impl DisplayConfig {
    /// Selection colour, preferring the active theme
    pub fn selection_color(&self) -> Color {
        self.theme
            .as_ref()
            .map(|t| t.selection_fg)
            .unwrap_or(self.selection_fg)
    }

    /// Unfocused selection colour, 50% darker than the selection colour if not set
    pub fn unfocused_selection_color(&self) -> Color {
        match (&self.theme, self.unfocused_selection_fg) {
            (None, Some(color)) => color,
            _ => darken_color(self.selection_color(), 0.5),
        }
    }

    pub fn header_color(&self) -> Color {
        self.theme
            .as_ref()
            .map(|t| t.header_fg)
            .unwrap_or(self.header_fg)
    }

    /// Switch to a named theme; `None` or an unknown name clears it
    pub fn apply_theme(&mut self, name: Option<&str>) {
        self.theme = name.and_then(theme_by_name);
        self.theme_name = self.theme.as_ref().map(|t| t.name.to_string());
    }

    pub fn set_use_unicode(&mut self, use_unicode: bool) {
        self.use_unicode = use_unicode;
        self.box_chars = BoxChars::from_use_unicode(use_unicode);
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

fn serialize_color<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&color_to_string(*color))
}

fn serialize_color_optional<S>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match color {
        Some(c) => serializer.serialize_str(&color_to_string(*c)),
        None => serializer.serialize_none(),
    }
}

/// Inverse of `parse_color`: RGB as `#rrggbb`, everything else by name
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        Color::Black => "black".to_string(),
        Color::Red => "red".to_string(),
        Color::Green => "green".to_string(),
        Color::Yellow => "yellow".to_string(),
        Color::Blue => "blue".to_string(),
        Color::Magenta => "magenta".to_string(),
        Color::Cyan => "cyan".to_string(),
        Color::Gray => "gray".to_string(),
        Color::DarkGray => "darkgray".to_string(),
        Color::LightRed => "lightred".to_string(),
        Color::LightGreen => "lightgreen".to_string(),
        Color::LightYellow => "lightyellow".to_string(),
        Color::LightBlue => "lightblue".to_string(),
        Color::LightMagenta => "lightmagenta".to_string(),
        Color::LightCyan => "lightcyan".to_string(),
        Color::White => "white".to_string(),
        _ => "white".to_string(),
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "lightred" => return Some(Color::LightRed),
        "lightgreen" => return Some(Color::LightGreen),
        "lightyellow" => return Some(Color::LightYellow),
        "lightblue" => return Some(Color::LightBlue),
        "lightmagenta" => return Some(Color::LightMagenta),
        "lightcyan" => return Some(Color::LightCyan),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Parse config text, resolving derived display fields
pub fn parse(content: &str) -> Option<Config> {
    let mut config: Config = toml::from_str(content).ok()?;
    if !is_valid_time_format(&config.time_format) {
        tracing::warn!(
            "Invalid time_format {:?}, using {}",
            config.time_format,
            DEFAULT_TIME_FORMAT
        );
        config.time_format = DEFAULT_TIME_FORMAT.to_string();
    }
    config.display.box_chars = BoxChars::from_use_unicode(config.display.use_unicode);
    let theme_name = config.display.theme_name.clone();
    config.display.apply_theme(theme_name.as_deref());
    Some(config)
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    parse(&content).unwrap_or_default()
}

pub fn write(config: &Config) -> anyhow::Result<()> {
    let config_path = get_config_path().context("Could not determine config directory")?;
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

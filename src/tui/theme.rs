use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::{Priority, ProjectStatus, TaskStatus};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            surface: Color::Rgb(0x1A, 0x0B, 0x2E),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))?;
    let value = u32::from_str_radix(digits, 16).ok()?;
    let [_, r, g, b] = value.to_be_bytes();
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Start from the default palette and apply `[ui.colors]` overrides.
    /// Bad values and unknown slot names are logged and skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (slot, value) in &ui.colors {
            match (theme.slot_mut(slot), parse_hex_color(value)) {
                (Some(target), Some(color)) => *target = color,
                (None, _) => tracing::warn!(slot = %slot, "unknown theme color slot"),
                (Some(_), None) => {
                    tracing::warn!(slot = %slot, value = %value, "ignoring invalid theme color")
                }
            }
        }
        theme
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Color> {
        let slot = match name {
            "background" => &mut self.background,
            "surface" => &mut self.surface,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "yellow" => &mut self.yellow,
            "green" => &mut self.green,
            "cyan" => &mut self.cyan,
            "purple" => &mut self.purple,
            "blue" => &mut self.blue,
            "selection_bg" => &mut self.selection_bg,
            "selection_border" => &mut self.selection_border,
            "search_match_bg" => &mut self.search_match_bg,
            "search_match_fg" => &mut self.search_match_fg,
            _ => return None,
        };
        Some(slot)
    }

    /// Badge color for a priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Critical => self.red,
            Priority::High => self.yellow,
            Priority::Medium => self.cyan,
            Priority::Low => self.dim,
        }
    }

    pub fn project_status_color(&self, status: ProjectStatus) -> Color {
        match status {
            ProjectStatus::Planning => self.purple,
            ProjectStatus::Pending => self.text,
            ProjectStatus::InProgress => self.highlight,
            ProjectStatus::Completed => self.green,
        }
    }

    pub fn task_status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Pending => self.text,
            TaskStatus::InProgress => self.highlight,
            TaskStatus::Completed => self.dim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#3D1438"), Some(Color::Rgb(0x3D, 0x14, 0x38)));
        assert_eq!(parse_hex_color("#ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("3D1438"), None);
        assert_eq!(parse_hex_color("#3D14"), None);
        assert_eq!(parse_hex_color("#3D143G"), None);
        assert_eq!(parse_hex_color("#+D1438"), None);
    }

    #[test]
    fn config_overrides_apply_per_slot() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("highlight".into(), "not-a-color".into());
        ui.colors.insert("nonsense".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Invalid value keeps the default
        assert_eq!(theme.highlight, Color::Rgb(0xFB, 0x41, 0x96));
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn badge_colors() {
        let theme = Theme::default();
        assert_eq!(theme.priority_color(Priority::Critical), theme.red);
        assert_eq!(theme.priority_color(Priority::Low), theme.dim);
        assert_eq!(
            theme.project_status_color(ProjectStatus::Completed),
            theme.green
        );
        assert_eq!(
            theme.task_status_color(TaskStatus::InProgress),
            theme.highlight
        );
    }
}

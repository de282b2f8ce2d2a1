//! Score and game-over labels
//!
//! The simulation only emits `GameEvent`s; this turns them into label text
//! and positions. Actual glyph drawing belongs to the host (DOM on the web),
//! which reports rendered sizes back through `TextMeasure`.

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::GameEvent;

pub const GAME_OVER_TEXT: &str = "Game Over!";
pub const FONT_FAMILY: &str = "Arial";

pub const SCORE_COLOR: u32 = 0xffffff;
pub const GAME_OVER_COLOR: u32 = 0xff0000;

/// Score label text
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

/// Top-left corner that centers a box of `size` in the field
pub fn centered(field: Vec2, size: Vec2) -> Vec2 {
    field / 2.0 - size / 2.0
}

/// Reports the rendered size of a text run
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

/// Font-metric estimate for hosts that can't lay out text (headless runs)
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMetrics {
    /// Average advance per glyph, in ems
    pub advance: f32,
    /// Line box height, in ems
    pub line_height: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        // Roughly Arial
        Self {
            advance: 0.55,
            line_height: 1.15,
        }
    }
}

impl TextMeasure for EstimatedMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        Vec2::new(
            glyphs * self.advance * font_size,
            self.line_height * font_size,
        )
    }
}

/// A positioned text label
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Top-left corner in field coordinates
    pub pos: Vec2,
    /// Rendered size as last measured
    pub size: Vec2,
}

/// All on-screen text for one run
#[derive(Debug, Clone)]
pub struct Hud {
    pub score: Label,
    /// Present once the run has ended
    pub game_over: Option<Label>,
    field: Vec2,
    game_over_font_size: f32,
}

impl Hud {
    pub fn new(config: &GameConfig, measure: &dyn TextMeasure) -> Self {
        let text = score_text(0);
        let size = measure.measure(&text, config.score_font_size);
        Self {
            score: Label {
                text,
                font_size: config.score_font_size,
                color: SCORE_COLOR,
                pos: Vec2::splat(config.hud_margin),
                size,
            },
            game_over: None,
            field: Vec2::new(config.field_width, config.field_height),
            game_over_font_size: config.game_over_font_size,
        }
    }

    /// Update labels for a simulation event. Returns true if anything changed.
    pub fn apply(&mut self, event: &GameEvent, measure: &dyn TextMeasure) -> bool {
        match *event {
            GameEvent::BlockSpawned { .. } => false,
            GameEvent::BlockScored { score, .. } => {
                self.set_score(score, measure);
                true
            }
            GameEvent::GameOver { score, .. } => {
                self.set_score(score, measure);
                self.show_game_over(measure);
                true
            }
        }
    }

    fn set_score(&mut self, score: u64, measure: &dyn TextMeasure) {
        self.score.text = score_text(score);
        self.score.size = measure.measure(&self.score.text, self.score.font_size);
    }

    fn show_game_over(&mut self, measure: &dyn TextMeasure) {
        if self.game_over.is_some() {
            return;
        }
        let size = measure.measure(GAME_OVER_TEXT, self.game_over_font_size);
        self.game_over = Some(Label {
            text: GAME_OVER_TEXT.to_string(),
            font_size: self.game_over_font_size,
            color: GAME_OVER_COLOR,
            pos: centered(self.field, size),
            size,
        });
    }
}

/// Format 0xRRGGBB as a CSS color
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xff_ffff)
}

/// Frame drawn around the field
pub const FIELD_BORDER: &str = "2px solid #333";

/// Inline style for the element that hosts the canvas and the labels
///
/// The border sits on the container, not the canvas: absolutely positioned
/// labels are placed relative to the container's padding box, which is where
/// the canvas starts, so label positions stay in field coordinates.
pub fn container_style() -> String {
    format!(
        "position: relative; display: inline-block; border: {};",
        FIELD_BORDER
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    /// Fixed-size measurer so positions are exact
    struct FixedMetrics(Vec2);

    impl TextMeasure for FixedMetrics {
        fn measure(&self, _text: &str, _font_size: f32) -> Vec2 {
            self.0
        }
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(0), "Score: 0");
        assert_eq!(score_text(42), "Score: 42");
    }

    #[test]
    fn test_centered() {
        let pos = centered(Vec2::new(800.0, 600.0), Vec2::new(240.0, 56.0));
        assert_eq!(pos, Vec2::new(280.0, 272.0));
    }

    #[test]
    fn test_estimated_metrics_scale_with_font() {
        let metrics = EstimatedMetrics::default();
        let small = metrics.measure(GAME_OVER_TEXT, 48.0);
        let large = metrics.measure(GAME_OVER_TEXT, 64.0);
        assert!(large.x > small.x);
        assert!(large.y > small.y);
        assert_eq!(metrics.measure("", 48.0).x, 0.0);
    }

    #[test]
    fn test_hud_initial_layout() {
        let hud = Hud::new(&GameConfig::default(), &EstimatedMetrics::default());
        assert_eq!(hud.score.text, "Score: 0");
        assert_eq!(hud.score.pos, Vec2::new(10.0, 10.0));
        assert_eq!(hud.score.font_size, 24.0);
        assert!(hud.game_over.is_none());

        let hud = Hud::new(
            &GameConfig::from_preset(Preset::Wide),
            &EstimatedMetrics::default(),
        );
        assert_eq!(hud.score.pos, Vec2::new(20.0, 20.0));
        assert_eq!(hud.score.font_size, 32.0);
    }

    #[test]
    fn test_hud_follows_events() {
        let metrics = FixedMetrics(Vec2::new(240.0, 56.0));
        let mut hud = Hud::new(&GameConfig::default(), &metrics);

        assert!(!hud.apply(&GameEvent::BlockSpawned { id: 1, x: 3.0 }, &metrics));
        assert!(hud.apply(&GameEvent::BlockScored { id: 1, score: 1 }, &metrics));
        assert_eq!(hud.score.text, "Score: 1");

        assert!(hud.apply(&GameEvent::GameOver { block_id: 2, score: 1 }, &metrics));
        let label = hud.game_over.as_ref().expect("game over label");
        assert_eq!(label.text, "Game Over!");
        assert_eq!(label.font_size, 48.0);
        assert_eq!(label.color, GAME_OVER_COLOR);
        assert_eq!(label.pos, Vec2::new(280.0, 272.0));
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(0xff0000), "#ff0000");
        assert_eq!(css_color(0x1099bb), "#1099bb");
        assert_eq!(css_color(0xffffff), "#ffffff");
    }

    #[test]
    fn test_container_carries_the_border() {
        let style = container_style();
        assert!(style.contains("position: relative"));
        assert!(style.contains(&format!("border: {}", FIELD_BORDER)));
    }
}

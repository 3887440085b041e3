//! Match settings
//!
//! Constructed once at match start. A full reset re-derives every entity
//! from these values. Persisted as a JSON document whose field names match
//! the web settings panel.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PADDLE_HEIGHT, MIN_PADDLE_HEIGHT};

/// Rule variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// First to the target score
    #[default]
    Classic,
    /// Countdown; higher score at zero wins
    #[serde(rename = "time")]
    Timed,
    /// First point wins
    #[serde(rename = "sudden")]
    SuddenDeath,
    Multiball,
    Curve,
    Power,
    /// No terminal condition
    Endless,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Timed => "time",
            Mode::SuddenDeath => "sudden",
            Mode::Multiball => "multiball",
            Mode::Curve => "curve",
            Mode::Power => "power",
            Mode::Endless => "endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "time" | "timed" => Some(Mode::Timed),
            "sudden" | "sudden-death" => Some(Mode::SuddenDeath),
            "multiball" => Some(Mode::Multiball),
            "curve" => Some(Mode::Curve),
            "power" => Some(Mode::Power),
            "endless" => Some(Mode::Endless),
            _ => None,
        }
    }

    /// Modes that end when a score reaches the configured target
    pub fn uses_target_score(&self) -> bool {
        matches!(
            self,
            Mode::Classic | Mode::Multiball | Mode::Curve | Mode::Power
        )
    }
}

/// AI opponent tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl AiDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiDifficulty::Easy => "easy",
            AiDifficulty::Normal => "normal",
            AiDifficulty::Hard => "hard",
            AiDifficulty::Insane => "insane",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(AiDifficulty::Easy),
            "normal" | "med" => Some(AiDifficulty::Normal),
            "hard" => Some(AiDifficulty::Hard),
            "insane" => Some(AiDifficulty::Insane),
            _ => None,
        }
    }

    /// Top paddle speed (pixels/s)
    pub fn top_speed(&self) -> f32 {
        match self {
            AiDifficulty::Easy => 360.0,
            AiDifficulty::Normal => 480.0,
            AiDifficulty::Hard => 640.0,
            AiDifficulty::Insane => 920.0,
        }
    }

    /// Amplitude of the tracking wobble (pixels)
    pub fn jitter(&self) -> f32 {
        match self {
            AiDifficulty::Easy => 18.0,
            AiDifficulty::Normal => 12.0,
            AiDifficulty::Hard => 8.0,
            AiDifficulty::Insane => 4.0,
        }
    }

    /// Distance from target inside which the paddle holds still (pixels)
    pub fn dead_zone(&self) -> f32 {
        match self {
            AiDifficulty::Easy => 10.0,
            AiDifficulty::Normal => 8.0,
            AiDifficulty::Hard => 6.0,
            AiDifficulty::Insane => 4.0,
        }
    }
}

/// Top/bottom boundary behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    /// Reflect off top and bottom
    #[default]
    Open,
    /// Leave through one edge, re-enter through the other
    Wrap,
    /// Reflect, plus static obstacles in midfield
    Solid,
}

impl WallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WallMode::Open => "open",
            WallMode::Wrap => "wrap",
            WallMode::Solid => "solid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(WallMode::Open),
            "wrap" => Some(WallMode::Wrap),
            "solid" => Some(WallMode::Solid),
            _ => None,
        }
    }
}

/// Errors from reading or writing a settings document
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings i/o failed: {err}"),
            Self::Parse(err) => write!(f, "settings document is malformed: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Human players: 0 = AI vs AI, 1 = human left vs AI right, 2 = both human
    pub players: u8,
    /// AI tier for computer-controlled paddles
    pub ai: AiDifficulty,
    /// Rule variant
    pub mode: Mode,
    /// Points needed to win (target-score modes)
    pub target: u32,
    /// Countdown length in seconds (timed mode)
    pub timer_sec: f32,
    /// Serve speed (pixels/s)
    pub ball_speed: f32,
    /// Multiplier applied to ball speed on each paddle contact
    pub speed_growth: f32,
    /// Base paddle height (pixels)
    #[serde(rename = "paddleH")]
    pub paddle_height: f32,
    /// Top/bottom boundary behaviour
    pub walls: WallMode,
    /// Serve toward the side that just conceded (otherwise toward the scorer)
    pub serve_toward_conceder: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players: 1,
            ai: AiDifficulty::Normal,
            mode: Mode::Classic,
            target: 7,
            timer_sec: 120.0,
            ball_speed: 380.0,
            speed_growth: 1.04,
            paddle_height: 100.0,
            walls: WallMode::Open,
            serve_toward_conceder: true,
        }
    }
}

/// Clamp with a fallback for non-finite input
fn clamp_finite(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

impl Settings {
    pub const MAX_PLAYERS: u8 = 2;
    pub const TARGET_RANGE: (u32, u32) = (1, 50);
    pub const TIMER_RANGE: (f32, f32) = (15.0, 600.0);
    pub const BALL_SPEED_RANGE: (f32, f32) = (120.0, 1200.0);
    pub const GROWTH_RANGE: (f32, f32) = (1.0, 1.25);

    /// Clamp every numeric field into its safe range
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();
        self.players = self.players.min(Self::MAX_PLAYERS);
        self.target = self
            .target
            .clamp(Self::TARGET_RANGE.0, Self::TARGET_RANGE.1);
        self.timer_sec = clamp_finite(
            self.timer_sec,
            Self::TIMER_RANGE.0,
            Self::TIMER_RANGE.1,
            defaults.timer_sec,
        );
        self.ball_speed = clamp_finite(
            self.ball_speed,
            Self::BALL_SPEED_RANGE.0,
            Self::BALL_SPEED_RANGE.1,
            defaults.ball_speed,
        );
        self.speed_growth = clamp_finite(
            self.speed_growth,
            Self::GROWTH_RANGE.0,
            Self::GROWTH_RANGE.1,
            defaults.speed_growth,
        );
        self.paddle_height = clamp_finite(
            self.paddle_height,
            MIN_PADDLE_HEIGHT,
            MAX_PADDLE_HEIGHT,
            defaults.paddle_height,
        );
        self
    }

    /// Parse a settings document, merging it onto defaults
    ///
    /// Missing fields keep their defaults and unknown fields are ignored.
    /// Numeric fields are clamped after parsing.
    pub fn try_import_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitize())
    }

    /// Parse a settings document, falling back to defaults on any error
    pub fn import_json(json: &str) -> Self {
        match Self::try_import_json(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring settings document: {err}");
                Self::default()
            }
        }
    }

    /// Serialize as a pretty-printed document
    pub fn export_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Is the paddle on this side driven by the AI?
    pub fn is_ai(&self, side: crate::sim::Side) -> bool {
        use crate::sim::Side;
        match (self.players, side) {
            (0, _) => true,
            (1, Side::Right) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.players, 1);
        assert_eq!(s.mode, Mode::Classic);
        assert_eq!(s.target, 7);
        assert_eq!(s.walls, WallMode::Open);
        assert!(s.serve_toward_conceder);
    }

    #[test]
    fn test_import_merges_onto_defaults() {
        let s = Settings::import_json(r#"{"mode":"sudden","ballSpeed":500,"touchControls":false}"#);
        assert_eq!(s.mode, Mode::SuddenDeath);
        assert_eq!(s.ball_speed, 500.0);
        // Untouched fields keep defaults
        assert_eq!(s.target, 7);
        assert_eq!(s.ai, AiDifficulty::Normal);
    }

    #[test]
    fn test_import_clamps_out_of_range() {
        let s = Settings::import_json(
            r#"{"target":999,"timerSec":1,"speedGrowth":3.0,"paddleH":5,"players":9}"#,
        );
        assert_eq!(s.target, 50);
        assert_eq!(s.timer_sec, 15.0);
        assert_eq!(s.speed_growth, 1.25);
        assert_eq!(s.paddle_height, MIN_PADDLE_HEIGHT);
        assert_eq!(s.players, 2);
    }

    #[test]
    fn test_malformed_document_falls_back_to_defaults() {
        assert_eq!(Settings::import_json("{not json"), Settings::default());
        // One bad field poisons the whole document
        assert_eq!(
            Settings::import_json(r#"{"mode":"power","walls":"bouncy"}"#),
            Settings::default()
        );
        assert_eq!(
            Settings::import_json(r#"{"target":"seven"}"#),
            Settings::default()
        );
        assert!(Settings::try_import_json("42").is_err());
    }

    #[test]
    fn test_export_round_trip_keeps_field_names() {
        let s = Settings {
            mode: Mode::Timed,
            walls: WallMode::Wrap,
            ..Default::default()
        };
        let json = s.export_json().unwrap();
        assert!(json.contains("\"timerSec\""));
        assert!(json.contains("\"paddleH\""));
        assert!(json.contains("\"time\""));
        assert_eq!(Settings::import_json(&json), s);
    }

    #[test]
    fn test_sanitize_non_finite() {
        let s = Settings {
            ball_speed: f32::NAN,
            timer_sec: f32::INFINITY,
            ..Default::default()
        }
        .sanitize();
        assert_eq!(s.ball_speed, 380.0);
        assert_eq!(s.timer_sec, 120.0);
    }

    #[test]
    fn test_ai_assignment() {
        let mut s = Settings::default();
        assert!(!s.is_ai(Side::Left));
        assert!(s.is_ai(Side::Right));
        s.players = 2;
        assert!(!s.is_ai(Side::Right));
        s.players = 0;
        assert!(s.is_ai(Side::Left) && s.is_ai(Side::Right));
    }

    #[test]
    fn test_difficulty_monotonic() {
        let tiers = [
            AiDifficulty::Easy,
            AiDifficulty::Normal,
            AiDifficulty::Hard,
            AiDifficulty::Insane,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].top_speed() < pair[1].top_speed());
            assert!(pair[0].jitter() > pair[1].jitter());
            assert!(pair[0].dead_zone() > pair[1].dead_zone());
        }
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(Mode::from_str("TIME"), Some(Mode::Timed));
        assert_eq!(Mode::Timed.as_str(), "time");
        assert_eq!(AiDifficulty::from_str("insane"), Some(AiDifficulty::Insane));
        assert_eq!(WallMode::from_str("solid"), Some(WallMode::Solid));
        assert_eq!(WallMode::from_str("sticky"), None);
        assert!(Mode::Power.uses_target_score());
        assert!(!Mode::Timed.uses_target_score());
        assert!(!Mode::Endless.uses_target_score());
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{RulerError, RulerResult};

pub const RULER_OPTIONS_JSON_SCHEMA_V1: u32 = 1;

/// Public ruler bootstrap configuration.
///
/// Serializable so hosts can keep ruler setup next to the rest of their
/// configuration. Every field has a default; `end_time: None` means "now"
/// at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_time_label_format")]
    pub time_label_format: String,
    #[serde(default = "default_date_label_format")]
    pub date_label_format: String,
    #[serde(default = "default_cursor_width")]
    pub cursor_width: f64,
    #[serde(default = "default_cursor_height")]
    pub cursor_height: f64,
    #[serde(default = "default_scroll_speed_px_per_ms")]
    pub scroll_speed_px_per_ms: f64,
    #[serde(default = "default_seek_duration_ms")]
    pub default_seek_duration_ms: f64,
}

impl Default for RulerOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            end_time: None,
            stroke_color: default_stroke_color(),
            background: default_background(),
            time_label_format: default_time_label_format(),
            date_label_format: default_date_label_format(),
            cursor_width: default_cursor_width(),
            cursor_height: default_cursor_height(),
            scroll_speed_px_per_ms: default_scroll_speed_px_per_ms(),
            default_seek_duration_ms: default_seek_duration_ms(),
        }
    }
}

impl RulerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Time under the viewport centre once the ruler is ready.
    #[must_use]
    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Sets the chrono strftime patterns for hour and date labels.
    #[must_use]
    pub fn with_label_formats(mut self, time: impl Into<String>, date: impl Into<String>) -> Self {
        self.time_label_format = time.into();
        self.date_label_format = date.into();
        self
    }

    #[must_use]
    pub fn with_cursor_size(mut self, width: f64, height: f64) -> Self {
        self.cursor_width = width;
        self.cursor_height = height;
        self
    }

    #[must_use]
    pub fn with_scroll_speed(mut self, px_per_ms: f64) -> Self {
        self.scroll_speed_px_per_ms = px_per_ms;
        self
    }

    #[must_use]
    pub fn with_default_seek_duration_ms(mut self, duration_ms: f64) -> Self {
        self.default_seek_duration_ms = duration_ms;
        self
    }

    pub fn to_json_contract_v1_pretty(&self) -> RulerResult<String> {
        let payload = RulerOptionsJsonContractV1 {
            schema_version: RULER_OPTIONS_JSON_SCHEMA_V1,
            options: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            RulerError::InvalidData(format!("failed to serialize ruler options contract v1: {e}"))
        })
    }

    /// Accepts either bare options or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> RulerResult<Self> {
        if let Ok(payload) = serde_json::from_str::<RulerOptionsJsonContractV1>(input) {
            if payload.schema_version != RULER_OPTIONS_JSON_SCHEMA_V1 {
                return Err(RulerError::InvalidData(format!(
                    "unsupported ruler options schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.options);
        }
        serde_json::from_str::<Self>(input).map_err(|e| {
            RulerError::InvalidData(format!("failed to parse ruler options json: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerOptionsJsonContractV1 {
    pub schema_version: u32,
    pub options: RulerOptions,
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    40
}

fn default_stroke_color() -> String {
    "white".to_owned()
}

fn default_background() -> String {
    "grey".to_owned()
}

fn default_time_label_format() -> String {
    "%-H:%M".to_owned()
}

fn default_date_label_format() -> String {
    "%-m/%-d".to_owned()
}

fn default_cursor_width() -> f64 {
    20.0
}

fn default_cursor_height() -> f64 {
    32.0
}

fn default_scroll_speed_px_per_ms() -> f64 {
    0.5
}

fn default_seek_duration_ms() -> f64 {
    1000.0
}

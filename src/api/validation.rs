use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};

use crate::core::Viewport;
use crate::error::{RulerError, RulerResult};
use crate::render::{Color, LabelFormats};

use super::RulerOptions;

/// Options after validation, with colors parsed and defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ResolvedOptions {
    pub viewport: Viewport,
    pub end_time: NaiveDateTime,
    pub stroke: Color,
    pub background: Color,
    pub label_formats: LabelFormats,
    pub cursor_width: f64,
    pub cursor_height: f64,
    pub scroll_speed_px_per_ms: f64,
    pub default_seek_duration_ms: f64,
}

pub(super) fn validate_ruler_options(options: &RulerOptions) -> RulerResult<ResolvedOptions> {
    let viewport = Viewport::new(options.width, options.height);
    if !viewport.is_valid() {
        return Err(RulerError::InvalidViewport {
            width: options.width,
            height: options.height,
        });
    }

    let stroke = Color::parse(&options.stroke_color)?;
    let background = Color::parse(&options.background)?;

    validate_label_format("time label format", &options.time_label_format)?;
    validate_label_format("date label format", &options.date_label_format)?;

    for (name, value) in [
        ("cursor width", options.cursor_width),
        ("cursor height", options.cursor_height),
        ("scroll speed", options.scroll_speed_px_per_ms),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(RulerError::InvalidData(format!(
                "{name} must be finite and > 0"
            )));
        }
    }
    if !options.default_seek_duration_ms.is_finite() || options.default_seek_duration_ms < 0.0 {
        return Err(RulerError::InvalidData(
            "default seek duration must be finite and >= 0".to_owned(),
        ));
    }

    Ok(ResolvedOptions {
        viewport,
        end_time: options
            .end_time
            .unwrap_or_else(|| Local::now().naive_local()),
        stroke,
        background,
        label_formats: LabelFormats {
            time: options.time_label_format.clone(),
            date: options.date_label_format.clone(),
        },
        cursor_width: options.cursor_width,
        cursor_height: options.cursor_height,
        scroll_speed_px_per_ms: options.scroll_speed_px_per_ms,
        default_seek_duration_ms: options.default_seek_duration_ms,
    })
}

fn validate_label_format(name: &str, pattern: &str) -> RulerResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(RulerError::InvalidData(format!(
            "{name} `{pattern}` is not a valid strftime pattern"
        )));
    }
    Ok(())
}

//! Window configuration for the desktop app.

use std::env;

use app::APP_NAME;
use macroquad::window::{Conf, screen_dpi_scale};

const DEFAULT_WINDOW_WIDTH: i32 = 1000;
const DEFAULT_WINDOW_HEIGHT: i32 = 720;
const MIN_UI_SCALE: f32 = 0.5;
const MAX_UI_SCALE: f32 = 4.0;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Linux desktop sessions may not scale low-DPI framebuffers automatically.
        high_dpi: true,
        ..Default::default()
    }
}

/// `SKIRMISH_UI_SCALE` wins over the display's DPI scale.
pub fn runtime_ui_scale() -> f32 {
    let override_value = env::var("SKIRMISH_UI_SCALE").ok();
    resolve_ui_scale(screen_dpi_scale(), override_value.as_deref())
}

fn resolve_ui_scale(dpi_scale: f32, override_value: Option<&str>) -> f32 {
    let scale = override_value
        .and_then(|raw| raw.parse::<f32>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(if dpi_scale.is_finite() && dpi_scale > 1.0 { dpi_scale } else { 1.0 });
    scale.clamp(MIN_UI_SCALE, MAX_UI_SCALE)
}

#[cfg(test)]
mod tests {
    use super::{build_window_conf, resolve_ui_scale};

    #[test]
    fn enables_high_dpi_rendering() {
        let conf = build_window_conf();
        assert!(conf.high_dpi);
        assert_eq!(conf.window_width, 1000);
        assert_eq!(conf.window_height, 720);
    }

    #[test]
    fn override_beats_dpi_and_is_clamped() {
        assert_eq!(resolve_ui_scale(2.0, None), 2.0);
        assert_eq!(resolve_ui_scale(0.8, None), 1.0);
        assert_eq!(resolve_ui_scale(2.0, Some("1.5")), 1.5);
        assert_eq!(resolve_ui_scale(1.0, Some("9")), 4.0);
        assert_eq!(resolve_ui_scale(1.0, Some("wide")), 1.0);
    }
}

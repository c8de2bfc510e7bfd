//! Rendering for the main game frame and UI panels.

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{combat_log_lines, session_lines, stats_panel_lines, status_text};
use app::app_loop::{AppMode, AppState, DamagePopup, POPUP_LIFETIME};
use app::board::BoardProjection;
use macroquad::prelude::*;
use skirmish_core::content::get_unit_stats;
use skirmish_core::{Game, TerrainKind, UnitKind, UnitSnapshot};

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_HEIGHT: f32 = 18.0;
const STATS_FONT_SIZE: f32 = 18.0;
const STATS_LINE_STEP: f32 = 20.0;
const HP_BAR_HEIGHT: f32 = 4.0;
const POPUP_RISE: f32 = 24.0;
// Each variation step darkens the base color by this fraction.
const VARIATION_SHADE: f32 = 0.06;

pub fn draw_frame(game: &Game, app_state: &AppState, layout: &FrameLayout, ui_scale: f32) {
    draw_panel_borders(layout, ui_scale);
    draw_status_panel(game, app_state, layout.status, ui_scale);
    let projection = BoardProjection::fit(
        layout.board.x,
        layout.board.y,
        layout.board.width,
        layout.board.height,
        game.grid_size(),
    );
    draw_board(game, &projection);
    draw_units(&game.unit_snapshots(), &projection, ui_scale);
    draw_popups(&app_state.popups, &projection, ui_scale);
    draw_stats_panel(game, layout.stats, ui_scale);
    draw_combat_log(game, layout.combat_log, ui_scale);

    if app_state.mode == AppMode::GameOver {
        draw_game_over_overlay(&projection, ui_scale);
    }
}

fn draw_panel_borders(layout: &FrameLayout, ui_scale: f32) {
    for panel in [layout.status, layout.board, layout.stats, layout.combat_log] {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            scaled(BORDER_THICKNESS, ui_scale),
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(game: &Game, app_state: &AppState, panel: PanelRect, ui_scale: f32) {
    let status = status_text(app_state.mode, game.turn());
    draw_text(
        &status,
        panel.x + scaled(PANEL_PAD_X, ui_scale),
        panel.y + scaled(PANEL_PAD_Y, ui_scale),
        scaled(20.0, ui_scale),
        WHITE,
    );
}

fn draw_board(game: &Game, projection: &BoardProjection) {
    for cell in game.terrain_snapshot() {
        let (x, y) = projection.cell_origin(cell.pos);
        for layer in &cell.layers {
            let color = terrain_color(layer.terrain, layer.variation);
            match layer.terrain {
                TerrainKind::Grass | TerrainKind::Road | TerrainKind::Wall => {
                    draw_rectangle(x, y, projection.tile, projection.tile, color);
                }
                TerrainKind::Flowers => {
                    let radius = projection.tile * 0.08;
                    for (fx, fy) in [(0.3, 0.3), (0.7, 0.45), (0.4, 0.75)] {
                        draw_circle(
                            x + projection.tile * fx,
                            y + projection.tile * fy,
                            radius,
                            color,
                        );
                    }
                }
                TerrainKind::Bush | TerrainKind::Tree => {
                    let (cx, cy) = projection.cell_center(cell.pos);
                    let scale = if layer.terrain == TerrainKind::Tree { 0.45 } else { 0.3 };
                    draw_circle(cx, cy, projection.tile * scale, color);
                }
            }
        }
    }
}

fn draw_units(units: &[UnitSnapshot], projection: &BoardProjection, ui_scale: f32) {
    for unit in units.iter().filter(|unit| unit.hp > 0) {
        let (x, y) = projection.cell_origin(unit.pos);
        let (cx, cy) = projection.cell_center(unit.pos);
        let (glyph, color) = unit_glyph_and_color(unit.kind);

        draw_circle(cx, cy, projection.tile * 0.35, color);
        let font_size = projection.tile * 0.6;
        let glyph = glyph.to_string();
        let dims = measure_text(&glyph, None, font_size as u16, 1.0);
        draw_text(&glyph, cx - dims.width / 2.0, cy + dims.height / 2.0, font_size, BLACK);

        let bar_height = scaled(HP_BAR_HEIGHT, ui_scale);
        let bar_y = y + projection.tile - bar_height;
        draw_rectangle(x, bar_y, projection.tile, bar_height, DARKGRAY);
        draw_rectangle(
            x,
            bar_y,
            projection.tile * hp_fraction(unit.hp, unit.max_hp),
            bar_height,
            if unit.kind == UnitKind::Player { GREEN } else { RED },
        );
    }
}

fn draw_popups(popups: &[DamagePopup], projection: &BoardProjection, ui_scale: f32) {
    for popup in popups {
        let (cx, cy) = projection.cell_center(popup.pos);
        let (rise, alpha) = popup_motion(popup.age);
        let color = Color { a: alpha, ..YELLOW };
        draw_text(
            &format!("-{}", popup.damage),
            cx - projection.tile * 0.25,
            cy - scaled(rise, ui_scale),
            scaled(22.0, ui_scale),
            color,
        );
    }
}

fn draw_stats_panel(game: &Game, panel: PanelRect, ui_scale: f32) {
    let text_x = panel.x + scaled(PANEL_PAD_X, ui_scale);
    let mut text_y = panel.y + scaled(PANEL_PAD_Y, ui_scale);

    let mut raw_lines = stats_panel_lines(&game.player_snapshot());
    raw_lines.extend(session_lines(game.seed(), game.snapshot_hash()));
    let visible_lines = fit_lines_to_panel(
        &raw_lines,
        panel.height,
        scaled(STATS_LINE_STEP, ui_scale),
        scaled(PANEL_PAD_Y, ui_scale),
    );
    for line in visible_lines {
        draw_text(&line, text_x, text_y, scaled(STATS_FONT_SIZE, ui_scale), WHITE);
        text_y += scaled(STATS_LINE_STEP, ui_scale);
    }
}

fn draw_combat_log(game: &Game, panel: PanelRect, ui_scale: f32) {
    let text_x = panel.x + scaled(PANEL_PAD_X, ui_scale);
    draw_text(
        "Combat log",
        text_x,
        panel.y + scaled(20.0, ui_scale),
        scaled(24.0, ui_scale),
        YELLOW,
    );

    // Newest entry on top.
    let entries: Vec<_> = game.combat_log().collect();
    let lines: Vec<String> = entries.into_iter().rev().flat_map(combat_log_lines).collect();
    let visible_lines = fit_lines_to_panel(
        &lines,
        panel.height - scaled(20.0, ui_scale),
        scaled(LINE_HEIGHT, ui_scale),
        scaled(PANEL_PAD_Y, ui_scale),
    );
    for (index, line) in visible_lines.iter().enumerate() {
        draw_text(
            line,
            text_x,
            panel.y + scaled(20.0, ui_scale) + (index as f32 + 1.0) * scaled(LINE_HEIGHT, ui_scale),
            scaled(18.0, ui_scale),
            LIGHTGRAY,
        );
    }
}

fn draw_game_over_overlay(projection: &BoardProjection, ui_scale: f32) {
    let size = projection.board_size();
    draw_rectangle(
        projection.origin_x,
        projection.origin_y,
        size,
        size,
        Color { r: 0.0, g: 0.0, b: 0.0, a: 0.6 },
    );
    for (text, font_size, offset) in
        [("GAME OVER", 48.0, -10.0), ("Press R to restart", 24.0, 30.0)]
    {
        let font_size = scaled(font_size, ui_scale);
        let dims = measure_text(text, None, font_size as u16, 1.0);
        draw_text(
            text,
            projection.origin_x + (size - dims.width) / 2.0,
            projection.origin_y + size / 2.0 + scaled(offset, ui_scale),
            font_size,
            if offset < 0.0 { RED } else { WHITE },
        );
    }
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

fn terrain_color(kind: TerrainKind, variation: u8) -> Color {
    let base = match kind {
        TerrainKind::Grass => Color::from_rgba(86, 152, 72, 255),
        TerrainKind::Road => Color::from_rgba(170, 140, 96, 255),
        TerrainKind::Wall => Color::from_rgba(120, 120, 128, 255),
        TerrainKind::Tree => Color::from_rgba(34, 92, 40, 255),
        TerrainKind::Bush => Color::from_rgba(58, 120, 52, 255),
        TerrainKind::Flowers => Color::from_rgba(232, 196, 64, 255),
    };
    let shade = 1.0 - VARIATION_SHADE * f32::from(variation);
    Color { r: base.r * shade, g: base.g * shade, b: base.b * shade, a: base.a }
}

fn unit_glyph_and_color(kind: UnitKind) -> (char, Color) {
    let color = match kind {
        UnitKind::Player => SKYBLUE,
        UnitKind::Warrior => ORANGE,
        UnitKind::Archer => PINK,
    };
    (get_unit_stats(kind).symbol, color)
}

fn hp_fraction(hp: i32, max_hp: i32) -> f32 {
    if max_hp <= 0 {
        return 0.0;
    }
    (hp as f32 / max_hp as f32).clamp(0.0, 1.0)
}

/// Rise in unscaled pixels and alpha for a popup of the given age.
fn popup_motion(age: f32) -> (f32, f32) {
    let progress = (age / POPUP_LIFETIME).clamp(0.0, 1.0);
    (POPUP_RISE * progress, 1.0 - progress)
}

fn scaled(value: f32, ui_scale: f32) -> f32 {
    value * ui_scale
}

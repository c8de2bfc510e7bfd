//! Layout model for the game's on-screen panels: a status bar on top, the
//! board on the left and a side column with stats and the combat log.

use taffy::prelude::*;
use taffy::{Layout, TaffyError, TaffyTree};

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    board: NodeId,
    side_col: NodeId,
    stats: NodeId,
    combat_log: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub board: PanelRect,
    pub stats: PanelRect,
    pub combat_log: PanelRect,
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> Result<LayoutNodes, TaffyError> {
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(40.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(20.0) },
        ..Default::default()
    })?;
    let board = taffy.new_leaf(Style { flex_grow: 2.0, ..Default::default() })?;
    let stats = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(200.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(20.0) },
        ..Default::default()
    })?;
    let combat_log = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let side_col = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 1.0,
            margin: taffy::Rect { left: length(20.0), right: zero(), top: zero(), bottom: zero() },
            ..Default::default()
        },
        &[stats, combat_log],
    )?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: percent(1.0) },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[board, side_col],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(20.0),
                right: length(20.0),
                top: length(20.0),
                bottom: length(20.0),
            },
            ..Default::default()
        },
        &[status, main_row],
    )?;
    Ok(LayoutNodes { root, status, main_row, board, side_col, stats, combat_log })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<FrameLayout, TaffyError> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_main = taffy.layout(nodes.main_row)?;
    let l_side = taffy.layout(nodes.side_col)?;

    Ok(FrameLayout {
        status: panel_rect(taffy.layout(nodes.status)?, &[l_root]),
        board: panel_rect(taffy.layout(nodes.board)?, &[l_root, l_main]),
        stats: panel_rect(taffy.layout(nodes.stats)?, &[l_root, l_main, l_side]),
        combat_log: panel_rect(taffy.layout(nodes.combat_log)?, &[l_root, l_main, l_side]),
    })
}

fn panel_rect(layout: &Layout, parents: &[&Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}

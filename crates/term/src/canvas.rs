//! FrameCanvas: the engine's drawing surface backed by a terminal framebuffer.
//!
//! The engine draws in canvas pixels (32×32 per tile, board at x=200). This
//! module maps those rectangles onto character cells, 2 columns × 1 row per
//! tile to compensate for the usual glyph aspect ratio, and clips everything
//! to the board frame so pieces above the top row stay hidden.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{shape_for, GameEvents, Renderer};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, PieceKind, Vector2, BOARD_HEIGHT, BOARD_POS, BOARD_WIDTH, TILE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Values shown next to the board, fed by [`GameEvents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub lines: u32,
    pub speed: f64,
    pub preview: Option<PieceKind>,
    pub dead: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            speed: crate::types::DEFAULT_DROP_SPEED,
            preview: None,
            dead: false,
        }
    }
}

const CELL_W: u16 = 2;
const CELL_H: u16 = 1;
const BOARD_COLS: u16 = BOARD_WIDTH as u16 * CELL_W;
const BOARD_ROWS: u16 = BOARD_HEIGHT as u16 * CELL_H;
const FRAME_W: u16 = BOARD_COLS + 2;
const FRAME_H: u16 = BOARD_ROWS + 2;
const PANEL_GAP: u16 = 2;
const PANEL_MIN_W: u16 = 10;

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Terminal-backed [`Renderer`] and [`GameEvents`] sink.
#[derive(Debug, Clone)]
pub struct FrameCanvas {
    fb: FrameBuffer,
    viewport: Viewport,
    /// Top-left corner of the board frame (border included).
    frame_x: u16,
    frame_y: u16,
    hud: Hud,
}

impl FrameCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let mut canvas = Self {
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            frame_x: 0,
            frame_y: 0,
            hud: Hud::default(),
        };
        canvas.resize(viewport);
        canvas
    }

    /// Adapt to a new terminal size and recenter the board.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.fb.resize(viewport.width, viewport.height);

        let panel_w = PANEL_GAP + PANEL_MIN_W;
        let total_w = if viewport.width >= FRAME_W + panel_w {
            FRAME_W + panel_w
        } else {
            FRAME_W
        };
        self.frame_x = viewport.width.saturating_sub(total_w) / 2;
        self.frame_y = viewport.height.saturating_sub(FRAME_H) / 2;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Terminal cell holding the top-left of board tile `(x, y)`.
    pub fn tile_origin(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if !Vector2::new(x, y).inside(Vector2::new(BOARD_WIDTH, BOARD_HEIGHT)) {
            return None;
        }
        Some((
            self.frame_x + 1 + x as u16 * CELL_W,
            self.frame_y + 1 + y as u16 * CELL_H,
        ))
    }

    /// Draw the frame, side panel and overlay on top of what the engine drew.
    ///
    /// Call once per frame after `tick`.
    pub fn finish_frame(&mut self) {
        self.fb
            .draw_border(self.frame_x, self.frame_y, FRAME_W, FRAME_H, BORDER);
        self.draw_side_panel();
        if self.hud.dead {
            self.draw_overlay("GAME OVER", 0);
            self.draw_overlay("R: restart", 1);
        }
    }

    fn draw_side_panel(&mut self) {
        let panel_x = self.frame_x.saturating_add(FRAME_W + PANEL_GAP);
        if panel_x.saturating_add(PANEL_MIN_W) > self.viewport.width {
            return;
        }

        let hud = self.hud;
        let mut y = self.frame_y.saturating_add(1);
        self.fb.put_str(panel_x, y, "SCORE", LABEL);
        self.fb.put_u32(panel_x, y + 1, hud.score, VALUE);
        y = y.saturating_add(3);

        self.fb.put_str(panel_x, y, "LINES", LABEL);
        self.fb.put_u32(panel_x, y + 1, hud.lines, VALUE);
        y = y.saturating_add(3);

        self.fb.put_str(panel_x, y, "SPEED", LABEL);
        self.fb.put_tenths(panel_x, y + 1, hud.speed, VALUE);
        y = y.saturating_add(3);

        self.fb.put_str(panel_x, y, "NEXT", LABEL);
        y = y.saturating_add(2);
        if let Some(kind) = hud.preview {
            self.draw_preview(kind, panel_x, y);
        }
    }

    /// Mini rendering of the preview shape; offsets span -2..=2.
    fn draw_preview(&mut self, kind: PieceKind, x: u16, y: u16) {
        let shape = shape_for(kind);
        let style = CellStyle::new(Rgb::from(shape.color()), Rgb::new(0, 0, 0));
        for tile in shape.tiles() {
            let cx = x as i32 + (tile.x + 1) * CELL_W as i32;
            let cy = y as i32 + tile.y + 1;
            if cx < 0 || cy < 0 {
                continue;
            }
            self.fb
                .fill_rect(cx as u16, cy as u16, CELL_W, CELL_H, '█', style);
        }
    }

    fn draw_overlay(&mut self, text: &str, line: u16) {
        let mid_y = self.frame_y.saturating_add(FRAME_H / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = self
            .frame_x
            .saturating_add(FRAME_W.saturating_sub(text_w) / 2);
        self.fb.put_str(x, mid_y, text, OVERLAY);
    }

    /// Map a canvas-pixel span to board-local terminal cells, clipped.
    fn map_span(start_px: i32, len_px: i32, origin_px: i32, tile_px: i32, cell: u16, limit: u16) -> (u16, u16) {
        let cell = cell as i32;
        let lo = ((start_px - origin_px) * cell).div_euclid(tile_px);
        let hi = ((start_px + len_px - origin_px) * cell + tile_px - 1).div_euclid(tile_px);
        let lo = lo.clamp(0, limit as i32) as u16;
        let hi = hi.clamp(0, limit as i32) as u16;
        (lo, hi.max(lo))
    }
}

impl Renderer for FrameCanvas {
    /// Also restores the viewport size, since the terminal renderer swaps
    /// its previous frame back into the canvas.
    fn clear(&mut self) {
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.clear(CellStyle::default().cell(' '));
    }

    fn draw_filled_rect(&mut self, position: Vector2, size: Vector2, color: Color) {
        if size.x <= 0 || size.y <= 0 {
            return;
        }
        let (x0, x1) = Self::map_span(position.x, size.x, BOARD_POS.x, TILE_SIZE.x, CELL_W, BOARD_COLS);
        let (y0, y1) = Self::map_span(position.y, size.y, BOARD_POS.y, TILE_SIZE.y, CELL_H, BOARD_ROWS);
        if x0 == x1 || y0 == y1 {
            return;
        }

        let rgb = Rgb::from(color);
        self.fb.fill_rect(
            self.frame_x + 1 + x0,
            self.frame_y + 1 + y0,
            x1 - x0,
            y1 - y0,
            ' ',
            CellStyle::new(rgb, rgb),
        );
    }
}

impl GameEvents for FrameCanvas {
    fn on_death(&mut self) {
        self.hud.dead = true;
    }

    fn on_score(&mut self, score: u32) {
        self.hud.score = score;
    }

    fn on_speed(&mut self, speed: f64) {
        self.hud.speed = speed;
    }

    fn on_preview(&mut self, kind: PieceKind) {
        self.hud.preview = Some(kind);
    }

    fn on_lines_cleared(&mut self, rows: u32) {
        self.hud.lines = self.hud.lines.saturating_add(rows);
    }

    fn on_restart(&mut self) {
        self.hud = Hud::default();
    }
}

//! TermView: draws a game snapshot into a terminal framebuffer.
//!
//! Pure apart from the framebuffer it is handed, so it can be unit-tested.
//! The session talks to it through [`GameView`]; those calls only update the
//! panel state (score, next piece, splash) that the next render shows.

use crate::core::{GameSnapshot, Tetromino};
use crate::engine::GameView;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::layout::{Borders, CanvasLayout};
use crate::types::{ConfigError, ShapeKind, Square};

/// Side panel width in terminal columns
const PANEL_COLS: u16 = 12;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where things land on screen for the current viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    /// Square height in rows; squares are twice as wide in columns
    size: u16,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

#[derive(Debug, Clone)]
pub struct TermView {
    columns: u16,
    rows: u16,
    viewport: Viewport,
    layout: CanvasLayout,
    next: Option<Tetromino>,
    score: u32,
    game_over: bool,
}

impl TermView {
    pub fn new(columns: u16, rows: u16, viewport: Viewport) -> Self {
        // Layout works in units of two columns so squares come out square.
        let layout = CanvasLayout::new(columns, rows).with_borders(Borders {
            top: 1,
            right: 1 + (PANEL_COLS as i32 + 1) / 2,
            bottom: 2,
            left: 1,
        });
        Self {
            columns,
            rows,
            viewport,
            layout,
            next: None,
            score: 0,
            game_over: false,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn next(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    pub fn is_game_over_shown(&self) -> bool {
        self.game_over
    }

    fn geometry(&self) -> Option<Geometry> {
        let dims = self
            .layout
            .calculate(self.viewport.width as i32 / 2, self.viewport.height as i32);
        if dims.square_size <= 0 {
            return None;
        }
        let size = u16::try_from(dims.square_size).ok()?;
        let frame_w = self.columns * size * 2 + 2;
        let frame_h = self.rows * size + 2;
        let total_w = frame_w + 2 + PANEL_COLS;

        Some(Geometry {
            size,
            start_x: self.viewport.width.saturating_sub(total_w) / 2,
            start_y: self.viewport.height.saturating_sub(frame_h + 1) / 2,
            frame_w,
            frame_h,
        })
    }

    /// Top-left screen position of board square `(col, row)`
    pub fn square_origin(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        let g = self.geometry()?;
        Some((g.start_x + 1 + col * g.size * 2, g.start_y + 1 + row * g.size))
    }

    pub fn render(&self, snap: &GameSnapshot) -> FrameBuffer {
        let mut fb = FrameBuffer::new(self.viewport.width, self.viewport.height);
        self.render_into(snap, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.resize(self.viewport.width, self.viewport.height);
        fb.clear(Glyph::default());

        let Some(g) = self.geometry() else {
            fb.put_str_centered(self.viewport.height / 2, "terminal too small", Style::default());
            return;
        };

        fb.draw_box(g.start_x, g.start_y, g.frame_w, g.frame_h, Style::default());

        for row in 0..self.rows.min(snap.rows) {
            for col in 0..self.columns.min(snap.columns) {
                let glyph = match snap.square_at(col as i32, row as i32) {
                    Some(square) => Glyph::new('█', Style::new(square_color(square), BOARD_BG)),
                    None => Glyph::new('·', Style::new(Rgb::new(90, 90, 100), BOARD_BG)),
                };
                self.fill_square(fb, &g, col, row, glyph);
            }
        }

        self.draw_panel(fb, &g);
        fb.put_str(
            g.start_x,
            g.start_y + g.frame_h,
            "←→ move ↑ rotate ␣ drop q quit",
            Style::new(Rgb::new(130, 130, 130), Rgb::default()),
        );

        if self.game_over {
            self.draw_splash(fb, &g);
        }
    }

    fn fill_square(&self, fb: &mut FrameBuffer, g: &Geometry, col: u16, row: u16, glyph: Glyph) {
        let x = g.start_x + 1 + col * g.size * 2;
        let y = g.start_y + 1 + row * g.size;
        fb.fill_rect(x, y, g.size * 2, g.size, glyph);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, g: &Geometry) {
        let x = g.start_x + g.frame_w + 2;
        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::default());

        let mut y = g.start_y;
        fb.put_str(x, y, "SCORE", label);
        y += 1;
        fb.put_str(x, y, &self.score.to_string(), value);
        y += 2;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        if let Some(next) = self.next {
            let color = square_color(Square::Piece(next.kind()));
            for &(dc, dr) in next.spec().base_coords(0) {
                let (dc, dr) = (dc as u16, dr as u16);
                fb.fill_rect(x + dc * 2, y + dr, 2, 1, Glyph::new('█', Style::new(color, Rgb::default())));
            }
        }
    }

    fn draw_splash(&self, fb: &mut FrameBuffer, g: &Geometry) {
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(120, 20, 20)).bold();
        let mid = g.start_y + g.frame_h / 2;
        for (dy, text) in [" GAME OVER ", " r restart "].iter().enumerate() {
            let w = text.chars().count() as u16;
            let x = g.start_x + g.frame_w.saturating_sub(w) / 2;
            fb.put_str(x, mid + dy as u16, text, style);
        }
    }
}

impl GameView for TermView {
    fn check_targets(&self) -> Result<(), ConfigError> {
        match self.geometry() {
            Some(_) => Ok(()),
            None => Err(ConfigError::MissingTarget("viewport")),
        }
    }

    fn show_next_tetromino(&mut self, next: &Tetromino) {
        self.next = Some(*next);
    }

    fn remove_next_tetromino(&mut self) {
        self.next = None;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_game_over_splash(&mut self, visible: bool) {
        self.game_over = visible;
    }
}

fn square_color(square: Square) -> Rgb {
    match square {
        Square::Piece(ShapeKind::Line) => Rgb::new(80, 220, 220),
        Square::Piece(ShapeKind::Square) => Rgb::new(240, 220, 80),
        Square::Piece(ShapeKind::T) => Rgb::new(200, 120, 220),
        Square::Piece(ShapeKind::SRight) => Rgb::new(100, 220, 120),
        Square::Piece(ShapeKind::SLeft) => Rgb::new(220, 80, 80),
        Square::Piece(ShapeKind::LRight) => Rgb::new(255, 165, 0),
        Square::Piece(ShapeKind::LLeft) => Rgb::new(80, 120, 220),
        Square::Mushroom => Rgb::new(150, 110, 70),
    }
}

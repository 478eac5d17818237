//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::leaderboard::format_time;
use crate::core::{GameSnapshot, Leaderboard, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, SessionState};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Renders the start menu, the playfield and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the board frame in screen coordinates
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        scores: Option<&Leaderboard>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        if snap.state == SessionState::Start {
            self.draw_menu(fb, snap, scores, viewport);
            return;
        }

        let frame = self.frame_for(snap, viewport);
        self.draw_playfield(fb, snap, frame);
        self.draw_side_panel(fb, snap, scores, viewport, frame);

        match snap.state {
            SessionState::Paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "p: resume"]);
            }
            SessionState::Over => {
                self.draw_overlay(fb, frame, &["GAME OVER", "enter: again", "esc: menu"]);
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        scores: Option<&Leaderboard>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scores, viewport, &mut fb);
        fb
    }

    fn frame_for(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = (snap.cols as u16) * self.cell_w + 2;
        let h = (snap.rows as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_playfield(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', bg);
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                match snap.cell(row, col) {
                    Some(kind) => self.draw_block(fb, frame, row as i32, col as i32, kind),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_cell(fb, frame, row as i32, col as i32, '·', dot);
                    }
                }
            }
        }

        let Some(active) = snap.active else {
            return;
        };

        // Ghost first so the active piece paints over any overlap.
        if let Some(ghost_row) = snap.ghost_row.filter(|_| snap.state == SessionState::Playing) {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            let landed = Piece {
                row: ghost_row,
                ..active
            };
            for (row, col) in landed.cells() {
                self.fill_cell(fb, frame, row, col, '░', ghost);
            }
        }

        for (row, col) in active.cells() {
            self.draw_block(fb, frame, row, col, active.kind);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, row: i32, col: i32, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, row, col, '█', style);
    }

    /// Paint one board cell; cells above the board are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i32,
        col: i32,
        ch: char,
        style: CellStyle,
    ) {
        if row < 0 || col < 0 {
            return;
        }
        let px = frame.x + 1 + (col as u16) * self.cell_w;
        let py = frame.y + 1 + (row as u16) * self.cell_h;
        if px >= frame.x + frame.w - 1 || py >= frame.y + frame.h - 1 {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: Option<&Leaderboard>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        if !snap.player.is_empty() {
            fb.put_str(panel_x, y, &snap.player, label);
            y = y.saturating_add(2);
        }

        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "TIME", label);
        fb.put_str(
            panel_x,
            y.saturating_add(1),
            &format_time(snap.elapsed_ms / 1000),
            value,
        );
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next);
            y = y.saturating_add(next.shape.height() as u16 + 1);
        }

        if snap.state == SessionState::Over {
            if let Some(scores) = scores {
                self.draw_scores(fb, panel_x, y.saturating_add(1), scores);
            }
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        let style = CellStyle::new(piece_color(piece.kind), SCREEN_BG).bold();
        for (row, col) in piece.shape.cells() {
            let px = x + (col as u16) * self.cell_w;
            let py = y + (row as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_scores(&self, fb: &mut FrameBuffer, x: u16, y: u16, scores: &Leaderboard) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.put_str(x, y, "BEST TIMES", label);
        if scores.entries().is_empty() {
            fb.put_str(x, y + 1, "-", value.dim());
            return;
        }
        for (i, entry) in scores.entries().iter().enumerate() {
            let line = y + 1 + i as u16;
            fb.put_u32(x, line, (i as u32) + 1, value.dim());
            fb.put_str(x + 2, line, &entry.formatted_time, value);
            fb.put_str(x + 3 + entry.formatted_time.len() as u16, line, &entry.name, value);
        }
    }

    fn draw_menu(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        scores: Option<&Leaderboard>,
        viewport: Viewport,
    ) {
        let title = CellStyle::new(Rgb::new(240, 220, 80), SCREEN_BG).bold();
        let text = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut lines: Vec<(String, CellStyle)> = vec![
            ("BLOCKFALL".to_string(), title),
            (String::new(), text),
        ];
        if !snap.player.is_empty() {
            lines.push((format!("player: {}", snap.player), text));
        }
        lines.push(("enter: start   q: quit".to_string(), text));
        if let Some(scores) = scores {
            lines.push((String::new(), text));
            lines.push(("BEST TIMES".to_string(), title));
            for (i, entry) in scores.entries().iter().enumerate() {
                lines.push((
                    format!("{}. {} {}", i + 1, entry.formatted_time, entry.name),
                    text,
                ));
            }
        }

        let top = viewport.height.saturating_sub(lines.len() as u16) / 2;
        for (i, (line, style)) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = viewport.width.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, line, *style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let w = text.chars().count() as u16;
            let x = frame.x.saturating_add(frame.w.saturating_sub(w) / 2);
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameSession, HighScoreEntry};
    use crate::types::Intent;

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn playing() -> GameSession {
        let mut game = GameSession::new(GameConfig::default(), 7);
        game.start("ann");
        game
    }

    #[test]
    fn menu_shows_title_and_scores() {
        let game = GameSession::new(GameConfig::default(), 7);
        let mut scores = Leaderboard::new();
        scores.record(HighScoreEntry::new("zed", 125));

        let fb = GameView::default().render(&game.snapshot(), Some(&scores), Viewport::new(60, 24));
        let text = screen(&fb);
        assert!(text.contains("BLOCKFALL"));
        assert!(text.contains("02:05 zed"));
        assert!(!text.contains('┌'));
    }

    #[test]
    fn playfield_has_border_sized_to_board() {
        let fb = GameView::default().render(&playing().snapshot(), None, Viewport::new(60, 24));

        let top = (0..fb.height())
            .find(|&y| fb.row_text(y).contains('┌'))
            .unwrap();
        let row = fb.row_text(top);
        let width = row.chars().filter(|&c| c == '─').count();
        assert_eq!(width, 10 * 2);
        assert!(fb.row_text(top + 21).contains('└'));
    }

    #[test]
    fn side_panel_lists_stats_and_player() {
        let text = screen(&GameView::default().render(
            &playing().snapshot(),
            None,
            Viewport::new(60, 24),
        ));
        for label in ["ann", "SCORE", "LEVEL", "LINES", "TIME", "NEXT", "00:00"] {
            assert!(text.contains(label), "missing {label}");
        }
    }

    #[test]
    fn paused_and_over_overlays() {
        let mut game = playing();
        game.apply_intent(Intent::Pause);
        let text = screen(&GameView::default().render(&game.snapshot(), None, Viewport::new(60, 24)));
        assert!(text.contains("PAUSED"));

        let mut snap = game.snapshot();
        snap.state = SessionState::Over;
        let scores = Leaderboard::from_entries(vec![HighScoreEntry::new("ann", 3)]);
        let text = screen(&GameView::default().render(&snap, Some(&scores), Viewport::new(60, 24)));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("BEST TIMES"));
    }

    #[test]
    fn active_piece_is_drawn_inside_frame() {
        let mut game = playing();
        game.apply_intent(Intent::SoftDrop);
        game.apply_intent(Intent::SoftDrop);
        let fb = GameView::default().render(&game.snapshot(), None, Viewport::new(60, 24));
        let blocks = screen(&fb).chars().filter(|&c| c == '█').count();
        // Active piece plus the NEXT preview, two columns per cell.
        assert_eq!(blocks, 4 * 2 * 2);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let game = playing();
        let view = GameView::default();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (20, 10)] {
            let _ = view.render(&game.snapshot(), None, Viewport::new(w, h));
        }
    }
}

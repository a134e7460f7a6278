//! Play field rendering.
//!
//! The scene is laid out in logical pixels (288x512 by default) and sampled
//! onto the terminal grid. Sprites that failed to load are skipped.

use crate::assets::{BackgroundTheme, BirdColor, PipeColor};
use crate::core::collision::Rect as SceneRect;
use crate::core::config::Window;
use crate::core::game::Phase;
use crate::ui::layout::{create_game_layout, render_info_panel_frame, render_status_bar};
use crate::ui::FrameView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FLOOR_COLOR: Color = Color::Rgb(222, 216, 149);
const CONTROLS: [(&str, &str); 2] = [("[Space/Up/Click]", "Flap"), ("[Esc]", "Quit")];

pub fn draw_scene(frame: &mut Frame, view: &FrameView<'_>) {
    let area = frame.size();
    let layout = create_game_layout(frame, area, " Flappy ", Color::Cyan);
    render_play_field(frame, layout.content, view);
    render_fps_overlay(frame, layout.content, view.telemetry.fps);
    render_status(frame, layout.status_bar, view);
    if layout.info_panel.width > 0 {
        render_info_panel(frame, layout.info_panel, view);
    }
}

/// Character grid the scene is painted onto, back to front.
struct Canvas {
    cols: usize,
    rows: usize,
    sx: f64,
    sy: f64,
    cells: Vec<(char, Style)>,
}

impl Canvas {
    fn new(area: Rect, window: Window) -> Self {
        let cols = area.width as usize;
        let rows = area.height as usize;
        Self {
            cols,
            rows,
            sx: cols as f64 / window.width,
            sy: rows as f64 / window.height,
            cells: vec![(' ', Style::default()); cols * rows],
        }
    }

    /// Cell ranges covered by a logical rectangle, clipped to the grid.
    fn span(&self, rect: &SceneRect) -> (usize, usize, usize, usize) {
        let clip = |v: f64, max: usize| v.max(0.0).min(max as f64) as usize;
        (
            clip((rect.x * self.sx).floor(), self.cols),
            clip((rect.right() * self.sx).ceil(), self.cols),
            clip((rect.y * self.sy).floor(), self.rows),
            clip((rect.bottom() * self.sy).ceil(), self.rows),
        )
    }

    fn fill(&mut self, rect: &SceneRect, ch: char, style: Style) {
        let (c0, c1, r0, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols + col] = (ch, style);
            }
        }
    }

    fn tint(&mut self, rect: &SceneRect, bg: Color) {
        let (c0, c1, r0, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                let cell = &mut self.cells[row * self.cols + col];
                cell.1 = cell.1.bg(bg);
            }
        }
    }

    fn text_centered(&mut self, row: usize, text: &str, style: Style) {
        if row >= self.rows {
            return;
        }
        let len = text.chars().count();
        let start = self.cols.saturating_sub(len) / 2;
        for (i, ch) in text.chars().enumerate().take(self.cols) {
            let cell = &mut self.cells[row * self.cols + start + i];
            *cell = (ch, style.bg(cell.1.bg.unwrap_or(Color::Reset)));
        }
    }

    fn row_of(&self, y: f64) -> usize {
        (y * self.sy).floor().max(0.0) as usize
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        let cols = self.cols.max(1);
        self.cells
            .chunks(cols)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|(ch, style)| Span::styled(ch.to_string(), *style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, view: &FrameView<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let images = view.images;
    let session = view.session;
    let window = view.config.window;
    let mut canvas = Canvas::new(area, window);

    if images.background.loaded {
        let full = SceneRect::new(0.0, 0.0, window.width, window.height);
        canvas.tint(&full, background_color(images.theme.background));
    }

    if images.pipe.loaded {
        let style = Style::default().fg(pipe_color(images.theme.pipe));
        for pair in session.pipes.pairs() {
            canvas.fill(&session.pipes.upper_rect(pair), '█', style);
            canvas.fill(&session.pipes.lower_rect(pair), '█', style);
        }
    }

    if images.base.loaded {
        let floor = &session.floor;
        let ground = SceneRect::new(0.0, floor.y, window.width, window.height - floor.y);
        canvas.fill(&ground, '▒', Style::default().fg(FLOOR_COLOR));
    }

    let player = &session.player;
    if images.player[player.sprite_index()].loaded {
        let glyph = if player.vel_y < -0.5 {
            '▲'
        } else if player.vel_y > 1.0 {
            '▼'
        } else {
            '►'
        };
        let style = Style::default()
            .fg(bird_color(images.theme.bird))
            .add_modifier(Modifier::BOLD);
        canvas.fill(&player.rect(), glyph, style);
    }

    let banner = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    match view.phase {
        Phase::Splash if images.welcome_message.loaded => {
            let row = canvas.row_of(session.welcome.rect.y);
            canvas.text_centered(row, "GET READY!", banner);
            canvas.text_centered(row + 2, "tap to flap", Style::default().fg(Color::White));
        }
        Phase::GameOver if images.game_over.loaded => {
            let row = canvas.row_of(session.game_over.rect.y);
            canvas.text_centered(row, "GAME OVER", banner);
        }
        _ => {}
    }

    if view.phase != Phase::Splash && images.can_draw_number(session.score.value()) {
        let row = canvas.row_of(session.score.y);
        canvas.text_centered(row, &session.score.value().to_string(), banner);
    }

    frame.render_widget(Paragraph::new(canvas.into_lines()), area);
}

fn render_fps_overlay(frame: &mut Frame, area: Rect, fps: f64) {
    let text = format!("FPS: {}", fps as u32);
    let width = text.len() as u16;
    if area.width < width || area.height == 0 {
        return;
    }
    let overlay = Paragraph::new(Span::styled(text, Style::default().fg(Color::White)));
    frame.render_widget(
        overlay,
        Rect {
            width,
            height: 1,
            ..area
        },
    );
}

fn render_status(frame: &mut Frame, area: Rect, view: &FrameView<'_>) {
    let score = view.session.score.value();
    let (text, color) = match view.phase {
        Phase::Splash => ("Press Space to start!".to_string(), Color::Yellow),
        Phase::Play => (format!("Score: {}", score), Color::Green),
        Phase::GameOver => {
            let landed = view.session.player.rests_on(view.session.floor.y);
            if landed {
                (format!("Crashed with {} - tap to play again", score), Color::Red)
            } else {
                ("Crashed!".to_string(), Color::Red)
            }
        }
    };
    render_status_bar(frame, area, &text, color, &CONTROLS);
}

fn render_info_panel(frame: &mut Frame, area: Rect, view: &FrameView<'_>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let telemetry = view.telemetry;
    let latency = telemetry
        .latency_ms
        .map(|ms| format!("{:.1} ms", ms))
        .unwrap_or_else(|| "--".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled(" Phase: ", label),
            Span::styled(format!("{:?}", view.phase), value.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(view.session.score.value().to_string(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" FPS: ", label),
            Span::styled(format!("{:.1}", telemetry.fps), value),
        ]),
        Line::from(vec![
            Span::styled(" Latency: ", label),
            Span::styled(latency, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(" Bandwidth: ", label),
            Span::styled(
                format!("{:.2} KB/s", telemetry.bandwidth_kbps),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn background_color(theme: BackgroundTheme) -> Color {
    match theme {
        BackgroundTheme::Day => Color::Rgb(78, 192, 202),
        BackgroundTheme::Night => Color::Rgb(0, 135, 147),
    }
}

fn pipe_color(color: PipeColor) -> Color {
    match color {
        PipeColor::Green => Color::Green,
        PipeColor::Red => Color::Red,
    }
}

fn bird_color(color: BirdColor) -> Color {
    match color {
        BirdColor::Red => Color::LightRed,
        BirdColor::Blue => Color::LightBlue,
        BirdColor::Yellow => Color::Yellow,
    }
}

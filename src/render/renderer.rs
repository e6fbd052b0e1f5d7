use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{BoardSize, Cell, FinalScore, Grid, Phase, SnakeEngine};

/// Terminal columns used to draw one cell
const COLUMNS_PER_CELL: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Split the screen into header, game area and footer
    fn layout(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    /// Size of the playable area for a terminal of `area`, in the same pixel
    /// units the engine measures boards in
    pub fn playable_board(area: Rect, cell_scale: u32) -> BoardSize {
        let game_area = Self::layout(area)[1];
        let inner = Block::default().borders(Borders::ALL).inner(game_area);
        let across = (inner.width / COLUMNS_PER_CELL) as u32;
        let down = inner.height as u32;
        BoardSize::new(across * cell_scale, down * cell_scale)
    }

    pub fn render(&self, frame: &mut Frame, engine: &SnakeEngine, last_game: Option<&FinalScore>) {
        let [header, game_area, footer] = Self::layout(frame.area());

        let stats = self.render_stats(engine);
        frame.render_widget(stats, header);

        match (engine.phase(), engine.grid()) {
            (Phase::Running, Some(grid)) => {
                let board = self.render_grid(engine, grid);
                frame.render_widget(board, game_area);
            }
            (Phase::GameOver, _) => {
                let game_over = self.render_game_over(engine, last_game);
                frame.render_widget(game_over, game_area);
            }
            _ => {
                let start = self.render_start(engine);
                frame.render_widget(start, game_area);
            }
        }

        let controls = self.render_controls(engine.phase());
        frame.render_widget(controls, footer);
    }

    fn render_grid(&self, engine: &SnakeEngine, grid: Grid) -> Paragraph<'_> {
        let snake = engine.snake();
        let head = snake.map(|snake| snake.head());
        let food = engine.food();
        let mut lines = Vec::with_capacity(grid.height() as usize);

        for y in 0..grid.height() as i32 {
            let mut spans = Vec::with_capacity(grid.width() as usize);

            for x in 0..grid.width() as i32 {
                let cell = Cell::new(x, y);

                let span = if Some(cell) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.is_some_and(|snake| snake.contains(cell)) {
                    Span::styled("□ ", Style::default().fg(Color::Yellow))
                } else if Some(cell) == food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Classic Snake Game "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &SnakeEngine) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Current Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                engine.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                engine.high_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start(&self, engine: &SnakeEngine) -> Paragraph<'_> {
        let prompt = match engine.grid() {
            Some(grid) => Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" to Start Game ({}x{})", grid.width(), grid.height()),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            None => Line::from(Span::styled(
                "Waiting for a board large enough to play on...",
                Style::default().fg(Color::Gray),
            )),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Classic Snake Game",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            prompt,
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_game_over(
        &self,
        engine: &SnakeEngine,
        last_game: Option<&FinalScore>,
    ) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(result) = last_game {
            if result.new_record {
                text.push(Line::from(Span::styled(
                    "New high score!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            if let Some(err) = &result.save_error {
                text.push(Line::from(Span::styled(
                    format!("High score not saved: {err}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to Play Again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let start = if phase == Phase::Running {
            Span::styled("Game Running...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled("Enter", Style::default().fg(Color::Green))
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            start,
            Span::raw(" | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Rect, Size},
    Terminal,
};
use std::io::{self, stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{
    BoardSize, EngineError, FinalScore, FoodPlacer, GameConfig, ScoreKeeper, SnakeEngine,
    StartOutcome, TickOutcome,
};
use crate::input::{InputHandler, KeyAction};
use crate::persistence::HighScoreStore;
use crate::render::Renderer;

/// Interactive terminal session: hosts the engine and plays the timer,
/// input, sizing and rendering roles around it
pub struct HumanMode {
    config: GameConfig,
    engine: SnakeEngine,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    last_game: Option<FinalScore>,
    /// Board size reported while a game was running, applied once it ends
    deferred_board: Option<BoardSize>,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid game configuration")?;

        let placer = match config.seed {
            Some(seed) => FoodPlacer::seeded(seed),
            None => FoodPlacer::new(),
        };

        let mut scores = ScoreKeeper::new(store);
        match scores.load() {
            Ok(high_score) => info!("Loaded high score {}", high_score),
            Err(err) => warn!("Failed to load high score, starting from 0: {err}"),
        }

        let mut engine = SnakeEngine::new(config.cell_scale, placer, scores);
        if config.board.is_some() {
            engine
                .set_board_size(config.board)
                .context("Failed to set initial board size")?;
        }

        Ok(Self {
            config,
            engine,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            last_game: None,
            deferred_board: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if self.config.board.is_none() {
            self.fit_to_initial_size(terminal.size())?;
        }

        // One input subscription for the whole session
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.config.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while a game is running
                _ = tick_timer.tick() => {
                    if self.engine.is_running() {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, self.last_game.as_ref());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        if !self.engine.request_direction(direction) {
                            debug!("Ignored turn {:?}", direction);
                        }
                    }
                    KeyAction::Start => self.start_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(width, height) if self.config.board.is_none() => {
                self.fit_to_terminal(width, height);
            }
            _ => {}
        }
    }

    /// Size the board from the terminal's first measurement
    fn fit_to_initial_size(&mut self, size: io::Result<Size>) -> Result<()> {
        let size = size.context("Failed to read terminal size")?;
        self.fit_to_terminal(size.width, size.height);
        Ok(())
    }

    /// Report the board that fits a terminal of `width` x `height`
    fn fit_to_terminal(&mut self, width: u16, height: u16) {
        let board =
            Renderer::playable_board(Rect::new(0, 0, width, height), self.config.cell_scale);
        self.report_board_size(board);
    }

    fn report_board_size(&mut self, board: BoardSize) {
        match self.engine.set_board_size(Some(board)) {
            Ok(()) => self.deferred_board = None,
            Err(EngineError::ResizeWhileRunning) => {
                debug!("Deferring resize to {:?} until the game ends", board);
                self.deferred_board = Some(board);
            }
            Err(err) => warn!("Failed to resize board: {err}"),
        }
    }

    fn start_game(&mut self) {
        match self.engine.start() {
            StartOutcome::Started => self.last_game = None,
            StartOutcome::AlreadyRunning => {}
            StartOutcome::AwaitingBoardSize => {
                debug!("Start ignored, board size unknown");
            }
            StartOutcome::BoardExhausted => {
                warn!("Board has no room for food; game ended at once");
            }
        }
    }

    fn update_game(&mut self) {
        match self.engine.tick() {
            TickOutcome::Collided { final_score, .. }
            | TickOutcome::BoardFilled { final_score } => {
                self.last_game = Some(final_score);

                if let Some(board) = self.deferred_board.take() {
                    self.report_board_size(board);
                }
            }
            TickOutcome::Moved { .. } | TickOutcome::Inactive => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase};
    use crate::persistence::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn seeded(config: GameConfig) -> GameConfig {
        GameConfig {
            seed: Some(3),
            ..config
        }
    }

    #[test]
    fn test_game_initialization() {
        let store = MemoryStore::with_high_score(4);
        let mode = HumanMode::new(GameConfig::default(), Box::new(store)).unwrap();

        assert_eq!(mode.engine.phase(), Phase::Idle);
        assert_eq!(mode.engine.high_score(), 4);
        assert_eq!(mode.engine.grid().unwrap().width(), 24);
    }

    #[test]
    fn test_start_and_steer() {
        let mut mode =
            HumanMode::new(seeded(GameConfig::small()), Box::new(MemoryStore::new())).unwrap();

        mode.handle_event(key(KeyCode::Enter));
        assert!(mode.engine.is_running());

        mode.handle_event(key(KeyCode::Up));
        mode.update_game();
        assert_eq!(mode.engine.direction(), Direction::Up);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_is_recorded_and_restart_clears_it() {
        let mut mode =
            HumanMode::new(seeded(GameConfig::small()), Box::new(MemoryStore::new())).unwrap();
        mode.handle_event(key(KeyCode::Enter));

        while mode.engine.is_running() {
            mode.update_game();
        }
        assert!(mode.last_game.is_some());

        mode.handle_event(key(KeyCode::Char('r')));
        assert!(mode.engine.is_running());
        assert!(mode.last_game.is_none());
        assert_eq!(mode.engine.score(), 0);
    }

    #[test]
    fn test_initial_size_sets_board() {
        let mut mode = HumanMode::new(
            seeded(GameConfig::fit_to_host()),
            Box::new(MemoryStore::new()),
        )
        .unwrap();

        mode.fit_to_initial_size(Ok(Size::new(40, 20))).unwrap();

        assert_eq!(
            mode.engine.board_size(),
            Some(BoardSize::new(19 * 20, 12 * 20))
        );
    }

    #[test]
    fn test_unreadable_initial_size_is_an_error() {
        let mut mode = HumanMode::new(
            seeded(GameConfig::fit_to_host()),
            Box::new(MemoryStore::new()),
        )
        .unwrap();

        let failure = io::Error::new(io::ErrorKind::Other, "no tty");
        assert!(mode.fit_to_initial_size(Err(failure)).is_err());
        assert_eq!(mode.engine.board_size(), None);
    }

    #[test]
    fn test_resize_while_running_is_deferred() {
        let mut mode = HumanMode::new(
            seeded(GameConfig::fit_to_host()),
            Box::new(MemoryStore::new()),
        )
        .unwrap();

        mode.handle_event(key(KeyCode::Enter));
        assert!(!mode.engine.is_running());

        mode.handle_event(Event::Resize(40, 20));
        mode.handle_event(key(KeyCode::Enter));
        assert!(mode.engine.is_running());

        mode.handle_event(Event::Resize(60, 30));
        assert_eq!(mode.engine.grid().unwrap().width(), 19);
        assert!(mode.deferred_board.is_some());

        while mode.engine.is_running() {
            mode.update_game();
        }

        assert!(mode.deferred_board.is_none());
        assert_eq!(
            mode.engine.board_size(),
            Some(BoardSize::new(29 * 20, 22 * 20))
        );
    }
}

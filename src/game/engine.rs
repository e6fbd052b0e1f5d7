use log::{debug, info, warn};

use super::{
    direction::{Direction, DirectionController},
    error::EngineError,
    food::FoodPlacer,
    grid::{BoardSize, Cell, Grid},
    score::{FinalScore, ScoreKeeper},
    snake::Snake,
};

/// Direction every game starts in
const START_DIRECTION: Direction = Direction::Right;

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started yet
    Idle,
    Running,
    GameOver,
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Result of [`SnakeEngine::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A game is already in progress; nothing changed
    AlreadyRunning,
    /// The board size is not known yet; retry once it is
    AwaitingBoardSize,
    /// The board has no room for food next to the snake, so the game ended
    /// immediately
    BoardExhausted,
}

/// Result of [`SnakeEngine::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No game is running
    Inactive,
    /// The snake moved one cell, growing if it ate
    Moved { grew: bool },
    Collided {
        collision: CollisionType,
        final_score: FinalScore,
    },
    /// The snake ate and now covers the entire board
    BoardFilled { final_score: FinalScore },
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            TickOutcome::Collided { .. } | TickOutcome::BoardFilled { .. }
        )
    }
}

/// State of one game, from `start` until the next `start`
#[derive(Debug, Clone)]
struct Round {
    grid: Grid,
    snake: Snake,
    /// Always set while running
    food: Option<Cell>,
}

/// The game engine: owns the snake, runs the tick algorithm, and moves
/// between idle, running and game over.
///
/// The host drives it: it reports the board size, starts games, forwards
/// direction requests, and calls [`SnakeEngine::tick`] on a timer.
pub struct SnakeEngine {
    cell_scale: u32,
    board: Option<BoardSize>,
    grid: Option<Grid>,
    phase: Phase,
    round: Option<Round>,
    steering: DirectionController,
    placer: FoodPlacer,
    scores: ScoreKeeper,
    ticks: u64,
}

impl SnakeEngine {
    /// Create an idle engine. No board size is known until
    /// [`SnakeEngine::set_board_size`] is called.
    pub fn new(cell_scale: u32, placer: FoodPlacer, scores: ScoreKeeper) -> Self {
        Self {
            cell_scale,
            board: None,
            grid: None,
            phase: Phase::Idle,
            round: None,
            steering: DirectionController::new(START_DIRECTION),
            placer,
            scores,
            ticks: 0,
        }
    }

    /// Report the playable area in pixels, or `None` when it is unknown.
    ///
    /// The board is fixed for the duration of a game, so this fails while
    /// running; the new size can be reported again after the game ends.
    pub fn set_board_size(&mut self, board: Option<BoardSize>) -> Result<(), EngineError> {
        if self.phase == Phase::Running {
            return Err(EngineError::ResizeWhileRunning);
        }

        self.board = board;
        self.grid = board.and_then(|board| Grid::from_board(board, self.cell_scale));
        debug!("Board resized to {:?}, grid {:?}", board, self.grid);
        Ok(())
    }

    /// Start a new game on the current board
    pub fn start(&mut self) -> StartOutcome {
        if self.phase == Phase::Running {
            return StartOutcome::AlreadyRunning;
        }

        let Some(grid) = self.grid else {
            debug!("Start requested before the board size is known");
            return StartOutcome::AwaitingBoardSize;
        };

        let snake = Snake::new(grid.center(), START_DIRECTION, 1);
        self.steering.reset(START_DIRECTION);
        self.scores.reset();
        self.ticks = 0;

        match self.placer.place(snake.cells(), grid) {
            Ok(food) => {
                info!(
                    "Game started on a {}x{} grid at {:?}",
                    grid.width(),
                    grid.height(),
                    snake.head()
                );
                self.round = Some(Round {
                    grid,
                    snake,
                    food: Some(food),
                });
                self.phase = Phase::Running;
                StartOutcome::Started
            }
            Err(err) => {
                warn!("Cannot start: {err}");
                self.round = Some(Round {
                    grid,
                    snake,
                    food: None,
                });
                self.phase = Phase::GameOver;
                StartOutcome::BoardExhausted
            }
        }
    }

    /// Request a turn for the next tick. Returns whether it was accepted;
    /// turns along the current axis are dropped.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.steering.request(direction)
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Inactive;
        }
        let Some(round) = self.round.as_mut() else {
            return TickOutcome::Inactive;
        };

        let direction = self.steering.commit();
        let new_head = round.snake.head().moved_in_direction(direction);
        self.ticks += 1;

        if !round.grid.contains(new_head) {
            return self.collide(CollisionType::Wall);
        }

        // Decided before the collision check: the tail only stays in the
        // collision set when it stays on the board.
        let will_eat = round.food == Some(new_head);

        if round.snake.collides(new_head, will_eat) {
            return self.collide(CollisionType::SelfCollision);
        }

        round.snake.advance(new_head, will_eat);

        if !will_eat {
            return TickOutcome::Moved { grew: false };
        }

        self.scores.increment();

        match self.placer.place(round.snake.cells(), round.grid) {
            Ok(food) => {
                round.food = Some(food);
                TickOutcome::Moved { grew: true }
            }
            Err(err) => {
                info!("Board filled: {err}");
                round.food = None;
                TickOutcome::BoardFilled {
                    final_score: self.finish(),
                }
            }
        }
    }

    fn collide(&mut self, collision: CollisionType) -> TickOutcome {
        info!(
            "Game over after {} ticks: {:?}, score {}",
            self.ticks,
            collision,
            self.scores.score()
        );
        TickOutcome::Collided {
            collision,
            final_score: self.finish(),
        }
    }

    fn finish(&mut self) -> FinalScore {
        self.phase = Phase::GameOver;
        self.scores.finalize()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Board size last reported by the host
    pub fn board_size(&self) -> Option<BoardSize> {
        self.board
    }

    /// Grid of the current or last game, else the grid the next game will use
    pub fn grid(&self) -> Option<Grid> {
        self.round.as_ref().map(|round| round.grid).or(self.grid)
    }

    /// Snake of the current or last game
    pub fn snake(&self) -> Option<&Snake> {
        self.round.as_ref().map(|round| &round.snake)
    }

    pub fn food(&self) -> Option<Cell> {
        self.round.as_ref().and_then(|round| round.food)
    }

    pub fn direction(&self) -> Direction {
        self.steering.current()
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scores_mut(&mut self) -> &mut ScoreKeeper {
        &mut self.scores
    }
}

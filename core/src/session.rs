use chrono::prelude::*;
use chrono::TimeDelta;
use rand::prelude::*;

use crate::*;

/// Input from a front end, already translated to 0-indexed cell coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Primary (`flag_intent == false`) or secondary action on a tile
    Position { x: Coord, y: Coord, flag_intent: bool },
    /// Toggles a flag whatever the flag mode, for front ends with a separate flag input
    Flag { x: Coord, y: Coord },
    ToggleFlagMode,
    Reset,
    Quit,
    /// No event available this tick
    None,
}

/// What the driving loop should do after an event was handled
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A running game: the field, flag mode, and the elapsed-time clock.
///
/// Flag mode swaps the primary and secondary actions for front ends with a single button.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    field: Field,
    flag_mode: bool,
    started_at: DateTime<Utc>,
    last_stop_at: DateTime<Utc>,
    clock_running: bool,
    rng: SmallRng,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Same seed, same sequence of grids across resets.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.height, config.width, config.mines)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let field = Field::new(Grid::generate(
            config,
            RandomMinefieldGenerator::new(rng.random()),
        ));
        Ok(Self::start(config, field, rng))
    }

    /// Starts a session on a prepared field, resets generate random grids of the same shape.
    pub fn with_field(field: Field) -> Self {
        let grid = field.grid();
        let config = GameConfig::new_unchecked(grid.height(), grid.width(), grid.mine_count());
        Self::start(config, field, SmallRng::from_rng(&mut rand::rng()))
    }

    fn start(config: GameConfig, field: Field, rng: SmallRng) -> Self {
        let now = Utc::now();
        log::debug!("Session started at {}", now);
        Self {
            config,
            field,
            flag_mode: false,
            started_at: now,
            last_stop_at: now,
            clock_running: true,
            rng,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> Phase {
        self.field.phase()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.field.flags_remaining()
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn last_stop_at(&self) -> DateTime<Utc> {
        self.last_stop_at
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    /// Time since the session started, frozen once the game ended
    pub fn elapsed(&self) -> TimeDelta {
        let until = if self.clock_running {
            Utc::now()
        } else {
            self.last_stop_at
        };
        until - self.started_at
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed().num_seconds().max(0) as u32
    }

    pub fn handle(&mut self, event: Event) -> Control {
        match event {
            Event::Position { x, y, flag_intent } => {
                self.play((x, y), flag_intent ^ self.flag_mode);
            }
            Event::Flag { x, y } => self.play((x, y), true),
            Event::ToggleFlagMode if self.field.ended() => {
                log::debug!("Ignoring flag mode toggle, game has ended");
            }
            Event::ToggleFlagMode => {
                self.flag_mode = !self.flag_mode;
                log::debug!("Flag mode {}", if self.flag_mode { "on" } else { "off" });
            }
            Event::Reset => self.reset(),
            Event::Quit => return Control::Quit,
            Event::None => {}
        }
        Control::Continue
    }

    fn play(&mut self, coords: Coord2, flag: bool) {
        let outcome = self.field.play(coords, flag);
        if !outcome.has_update() {
            log::trace!("Nothing to do at {:?}", coords);
            return;
        }
        log::debug!("Played {:?}: {:?}", coords, outcome);
        if self.field.ended() {
            self.stop_clock();
        }
    }

    /// Fresh field with the same configuration and a restarted clock
    pub fn reset(&mut self) {
        let generator = RandomMinefieldGenerator::new(self.rng.random());
        self.field = Field::new(Grid::generate(self.config, generator));
        self.flag_mode = false;
        let now = Utc::now();
        self.started_at = now;
        self.last_stop_at = now;
        self.clock_running = true;
        log::debug!("Session reset at {}", now);
    }

    fn stop_clock(&mut self) {
        if !self.clock_running {
            return;
        }
        self.last_stop_at = Utc::now();
        self.clock_running = false;
        log::debug!(
            "Game ended as {:?} at {}",
            self.field.phase(),
            self.last_stop_at
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(height: Coord, width: Coord, mines: &[Coord2]) -> Session {
        Session::with_field(Field::new(
            Grid::from_mine_coords(height, width, mines).unwrap(),
        ))
    }

    fn click(x: Coord, y: Coord) -> Event {
        Event::Position {
            x,
            y,
            flag_intent: false,
        }
    }

    fn right_click(x: Coord, y: Coord) -> Event {
        Event::Position {
            x,
            y,
            flag_intent: true,
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert!(matches!(
            Session::new(GameConfig::new_unchecked(2, 2, 5)),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn new_session_is_playing_with_running_clock() {
        let session = Session::with_seed(GameConfig::beginner(), 3).unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.flags_remaining(), 10);
        assert_eq!(session.field().unresolved(), 81);
        assert!(session.is_clock_running());
        assert_eq!(session.started_at(), session.last_stop_at());
    }

    #[test]
    fn flag_mode_inverts_primary_action() {
        let mut session = session(2, 2, &[(0, 0)]);

        session.handle(Event::ToggleFlagMode);
        assert!(session.flag_mode());
        session.handle(click(1, 1));
        assert!(session.field().grid()[(1, 1)].is_flagged());

        session.handle(right_click(1, 0));
        assert!(session.field().grid()[(1, 0)].is_visible());
    }

    #[test]
    fn explicit_flag_ignores_flag_mode() {
        let mut session = session(1, 2, &[(1, 0)]);

        session.handle(Event::ToggleFlagMode);
        session.handle(Event::Flag { x: 1, y: 0 });
        assert!(session.field().grid()[(1, 0)].is_flagged());
        assert_eq!(session.phase(), Phase::Playing);

        session.handle(Event::ToggleFlagMode);
        session.handle(Event::Flag { x: 1, y: 0 });
        assert!(session.field().grid()[(1, 0)].is_hidden());
        assert_eq!(session.flags_remaining(), 1);
    }

    #[test]
    fn secondary_action_flags_without_flag_mode() {
        let mut session = session(2, 2, &[(0, 0)]);
        session.handle(right_click(0, 0));
        assert_eq!(session.flags_remaining(), 0);
    }

    #[test]
    fn loss_stops_the_clock() {
        let mut session = session(2, 2, &[(0, 0)]);

        session.handle(click(0, 0));

        assert_eq!(session.phase(), Phase::Lost);
        assert!(!session.is_clock_running());
        let frozen = session.elapsed();
        assert_eq!(session.elapsed(), frozen);
        assert_eq!(frozen, session.last_stop_at() - session.started_at());
    }

    #[test]
    fn win_stops_the_clock_once() {
        let mut session = session(1, 2, &[(0, 0)]);

        session.handle(click(1, 0));
        session.handle(right_click(0, 0));
        assert_eq!(session.phase(), Phase::Won);
        let stopped_at = session.last_stop_at();

        session.handle(click(0, 0));
        assert_eq!(session.last_stop_at(), stopped_at);
        assert_eq!(session.phase(), Phase::Won);
    }

    #[test]
    fn flag_mode_is_frozen_after_game_end() {
        let mut session = session(2, 2, &[(0, 0)]);
        session.handle(click(0, 0));

        session.handle(Event::ToggleFlagMode);

        assert!(!session.flag_mode());
    }

    #[test]
    fn reset_restarts_field_and_clock() {
        let mut session = session(3, 4, &[(0, 0), (3, 2)]);
        session.handle(Event::ToggleFlagMode);
        session.handle(click(0, 0));
        session.handle(right_click(3, 2));
        assert_eq!(session.phase(), Phase::Lost);

        assert_eq!(session.handle(Event::Reset), Control::Continue);

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.field().size(), (4, 3));
        assert_eq!(session.field().mine_count(), 2);
        assert_eq!(session.flags_remaining(), 2);
        assert_eq!(session.field().unresolved(), 12);
        assert!(!session.flag_mode());
        assert!(session.is_clock_running());
        assert_eq!(session.started_at(), session.last_stop_at());
        assert!(
            session
                .field()
                .grid()
                .rows()
                .flatten()
                .all(|tile| tile.is_hidden())
        );
    }

    #[test]
    fn quit_and_none() {
        let mut session = session(2, 2, &[]);
        let before = session.field().clone();

        assert_eq!(session.handle(Event::None), Control::Continue);
        assert_eq!(session.handle(Event::Quit), Control::Quit);
        assert_eq!(session.field(), &before);
    }

    #[test]
    fn out_of_range_position_is_ignored() {
        let mut session = session(2, 2, &[(0, 0)]);
        let before = session.field().clone();

        session.handle(click(5, 0));
        session.handle(right_click(0, 2));

        assert_eq!(session.field(), &before);
    }
}

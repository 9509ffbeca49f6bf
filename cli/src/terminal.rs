use msweep_core::{
    Coord, Coord2, Event, Frontend, Grid, Phase, Session, Tile, TileValue, Visibility,
};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const HELP: &str = "\
Commands (coordinates start at 1):
  plot x y   reveal a tile, chord a numbered one, or flag it in flag mode
  flag x y   toggle a flag, even in flag mode
  flag, mode toggle flag mode
  reset      start over with a new grid
  quit       leave the game";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for a list of commands")]
    Unknown(String),
    #[error("Expected `{0} x y`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate `{0}`, expected a number from 1 to 255")]
    InvalidCoord(String),
    #[error("({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: Coord,
        height: Coord,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Event),
    Help,
}

fn parse_coord(word: Option<&str>, command: &'static str) -> Result<Coord, CommandError> {
    let word = word.ok_or(CommandError::MissingCoords(command))?;
    match word.parse::<Coord>() {
        Ok(coord) if coord > 0 => Ok(coord - 1),
        _ => Err(CommandError::InvalidCoord(word.to_owned())),
    }
}

/// Parses one line of input, `bounds` is `(width, height)` of the grid on screen.
pub fn parse_command(line: &str, bounds: Coord2) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Command::Play(Event::None));
    };

    let (name, is_flag) = match command.to_lowercase().as_str() {
        "plot" | "p" => ("plot", false),
        "flag" | "f" => ("flag", true),
        "mode" | "m" => return Ok(Command::Play(Event::ToggleFlagMode)),
        "reset" | "r" => return Ok(Command::Play(Event::Reset)),
        "quit" | "q" | "exit" => return Ok(Command::Play(Event::Quit)),
        "help" | "h" | "?" => return Ok(Command::Help),
        _ => return Err(CommandError::Unknown(command.to_owned())),
    };

    let mut words = words.peekable();
    if is_flag && words.peek().is_none() {
        return Ok(Command::Play(Event::ToggleFlagMode));
    }

    let x = parse_coord(words.next(), name)?;
    let y = parse_coord(words.next(), name)?;
    let (width, height) = bounds;
    if x >= width || y >= height {
        return Err(CommandError::OutOfRange {
            x: usize::from(x) + 1,
            y: usize::from(y) + 1,
            width,
            height,
        });
    }

    let event = if is_flag {
        Event::Flag { x, y }
    } else {
        Event::Position {
            x,
            y,
            flag_intent: false,
        }
    };
    Ok(Command::Play(event))
}

fn tile_symbol(tile: Tile) -> char {
    match (tile.visibility(), tile.value()) {
        (Visibility::Flagged, _) => 'F',
        (Visibility::Hidden, _) => '#',
        (Visibility::Visible, TileValue::Mine) => '*',
        (Visibility::Visible, TileValue::Count(0)) => '.',
        (Visibility::Visible, TileValue::Count(count)) => char::from(b'0' + count),
    }
}

/// Plain-text front end reading one command per line.
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    bounds: Coord2,
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            bounds: (0, 0),
        }
    }

    /// Says goodbye when the player leaves a game still in progress
    pub fn finish(&mut self, session: &Session) -> io::Result<()> {
        if !session.field().ended() {
            writeln!(self.output, "Bye!")?;
        }
        self.output.flush()
    }

    fn write_grid(&mut self, grid: &Grid) -> io::Result<()> {
        let label_width = grid.height().to_string().len();
        write!(self.output, "{:label_width$} ", "")?;
        for x in 1..=grid.width() {
            write!(self.output, "{} ", x % 10)?;
        }
        writeln!(self.output)?;

        for (y, row) in grid.rows().enumerate() {
            write!(self.output, "{:>label_width$} ", y + 1)?;
            for tile in row {
                write!(self.output, "{} ", tile_symbol(tile))?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn render(&mut self, session: &Session) -> io::Result<()> {
        self.bounds = session.field().size();

        writeln!(self.output, "Minesweeper")?;
        writeln!(self.output)?;
        self.write_grid(session.field().grid())?;
        writeln!(self.output)?;
        writeln!(self.output, "Flags: {}", session.flags_remaining())?;
        writeln!(
            self.output,
            "Flag mode is {}",
            if session.flag_mode() { "ON" } else { "OFF" }
        )?;
        writeln!(self.output, "Time: {}s", session.elapsed_secs())?;

        match session.phase() {
            Phase::Playing => {}
            Phase::Won => writeln!(
                self.output,
                "Game Over! Congratulations, cleared in {}s. Type `reset` or `quit`.",
                session.elapsed_secs()
            )?,
            Phase::Lost => writeln!(
                self.output,
                "Game Over! Better luck next time. Type `reset` or `quit`."
            )?,
        }
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Event> {
        write!(self.output, "$ ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("Input closed");
            writeln!(self.output)?;
            return Ok(Event::Quit);
        }

        match parse_command(&line, self.bounds) {
            Ok(Command::Play(event)) => Ok(event),
            Ok(Command::Help) => {
                writeln!(self.output, "{HELP}")?;
                Ok(Event::None)
            }
            Err(err) => {
                log::debug!("Rejected input {:?}: {}", line.trim_end(), err);
                writeln!(self.output, "{err}")?;
                Ok(Event::None)
            }
        }
    }
}

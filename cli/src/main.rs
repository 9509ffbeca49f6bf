use clap::{CommandFactory, Parser, ValueEnum};
use msweep_core::{CellCount, Coord, GameConfig, Session, run};
use std::io;

mod terminal;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Difficulty {
    /// 9x9 with 10 mines
    Beginner,
    /// 16x16 with 40 mines
    Intermediate,
    /// 24x24 with 99 mines
    Expert,
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => GameConfig::beginner(),
            Difficulty::Intermediate => GameConfig::intermediate(),
            Difficulty::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[arg(required_unless_present = "difficulty")]
    height: Option<Coord>,

    /// Number of columns
    #[arg(required_unless_present = "difficulty")]
    width: Option<Coord>,

    /// Number of mines
    #[arg(required_unless_present = "difficulty")]
    mines: Option<CellCount>,

    /// Use a preset instead of giving the dimensions
    #[arg(short, long, conflicts_with_all = ["height", "width", "mines"])]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

impl Args {
    fn config(&self) -> Option<GameConfig> {
        match (self.difficulty, self.height, self.width, self.mines) {
            (Some(difficulty), ..) => Some(difficulty.into()),
            (None, Some(height), Some(width), Some(mines)) => {
                Some(GameConfig::new_unchecked(height, width, mines))
            }
            _ => None,
        }
    }
}

fn print_usage() {
    println!("{}", Args::command().render_usage());
}

fn play(args: &Args, config: GameConfig) -> anyhow::Result<()> {
    let session = match args.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            log::debug!("Rejected {:?}: {}", config, err);
            println!("{err}");
            print_usage();
            return Ok(());
        }
    };

    let stdin = io::stdin();
    let mut frontend = terminal::TerminalFrontend::new(stdin.lock(), io::stdout());
    run(&mut session, &mut frontend)?;
    frontend.finish(&session)?;
    Ok(())
}

fn main() {
    // Every exit is a normal one, including bad arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let Some(config) = args.config() else {
        print_usage();
        return;
    };
    log::debug!("Starting {:?}, seed: {:?}", config, args.seed);

    if let Err(err) = play(&args, config) {
        log::error!("Terminal session failed: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_dimensions() {
        let args = Args::try_parse_from(["msweep", "4", "5", "6"]).unwrap();
        assert_eq!(args.config(), Some(GameConfig::new_unchecked(4, 5, 6)));
    }

    #[test]
    fn difficulty_preset() {
        let args = Args::try_parse_from(["msweep", "--difficulty", "expert", "-s", "7"]).unwrap();
        assert_eq!(args.config(), Some(GameConfig::expert()));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn missing_or_malformed_arguments_are_rejected() {
        assert!(Args::try_parse_from(["msweep"]).is_err());
        assert!(Args::try_parse_from(["msweep", "9", "9"]).is_err());
        assert!(Args::try_parse_from(["msweep", "9", "nine", "10"]).is_err());
        assert!(Args::try_parse_from(["msweep", "-1", "9", "10"]).is_err());
        assert!(Args::try_parse_from(["msweep", "9", "9", "10", "-d", "beginner"]).is_err());
    }

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }
}

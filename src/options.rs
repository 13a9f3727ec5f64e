use docopt::Docopt;
use serde_derive::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{Height, Width};

pub const USAGE: &str = "Mazes

Draw a perfect maze as ASCII art, carved with the recursive backtracker.

Usage:
    mazes_driver [options]
    mazes_driver --help

Options:
    --help                 Show this screen.
    -w <w>, --width=<w>    Width of the maze in cells [default: 10].
    -h <h>, --height=<h>   Height of the maze in cells [default: 10].
    -s <s>, --seed=<s>     Seed for the random carving, the same seed draws the same maze.
                           Defaults to the current time.
    --start-x=<x>          x coordinate of the cell the carving starts from [default: 0].
    --start-y=<y>          y coordinate of the cell the carving starts from [default: 0].
    --text-out=<path>      Write the maze to this file instead of standard output.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_start_x: u32,
    flag_start_y: u32,
    flag_text_out: String,
}

/// Everything the driver needs to draw one maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeOptions {
    pub width: Width,
    pub height: Height,
    pub seed: u64,
    pub start: Cartesian2DCoordinate,
    pub text_out: Option<String>,
}

impl MazeOptions {
    /// Parse the process arguments.
    pub fn from_env() -> Result<MazeOptions> {
        MazeOptions::parse(Docopt::new(USAGE)?)
    }

    /// Parse the given arguments, the first being the program name.
    pub fn from_argv<I, S>(argv: I) -> Result<MazeOptions>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        MazeOptions::parse(Docopt::new(USAGE)?.argv(argv))
    }

    fn parse(docopt: Docopt) -> Result<MazeOptions> {
        let args: MazeArgs = docopt.help(true).deserialize()?;

        Ok(MazeOptions {
            width: Width(args.flag_width),
            height: Height(args.flag_height),
            seed: args.flag_seed.unwrap_or_else(time_seed),
            start: Cartesian2DCoordinate::new(args.flag_start_x, args.flag_start_y),
            text_out: if args.flag_text_out.is_empty() {
                None
            } else {
                Some(args.flag_text_out)
            },
        })
    }
}

/// Seconds since the unix epoch, for runs that do not ask for a particular maze.
///
/// A clock set before the epoch gives seed 0. The seed is printed with the maze, so that run
/// can still be repeated with `--seed=0`.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

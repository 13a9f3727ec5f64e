use ascii_mazes::{
    errors::*,
    maze::Maze,
    options::{MazeOptions, USAGE},
};
use error_chain::ChainedError;
use log::info;
use std::{
    fs::File,
    io,
    io::prelude::*,
    process,
};

fn main() {

    env_logger::init();

    let options = match MazeOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            if let ErrorKind::DocOptFailure(ref docopt_error) = *e.kind() {
                exit_with_usage(docopt_error);
            }
            exit_with_error(&e);
        }
    };
    info!("drawing maze with {:?}", options);

    if let Err(e) = draw_maze(&options) {
        exit_with_error(&e);
    }
}

fn draw_maze(options: &MazeOptions) -> Result<()> {
    let maze = Maze::generate_from(options.width, options.height, options.seed, Some(options.start))?;

    match options.text_out {
        None => print!("{}", maze),
        Some(ref path) => {
            info!("writing maze to {}", path);
            write_text_to_file(&maze.to_string(), path)
                .chain_err(|| format!("Failed to write maze to text file {}", path))?;
        }
    }

    Ok(())
}

// `--help` is not an error, anything else that docopt rejects gets the usage text.
fn exit_with_usage(docopt_error: &docopt::Error) -> ! {
    if !docopt_error.fatal() {
        docopt_error.exit();
    }
    eprintln!("Invalid arguments: {}\n\n{}", docopt_error, USAGE);
    process::exit(1)
}

fn exit_with_error(e: &Error) -> ! {
    eprint!("{}", e.display_chain());
    process::exit(1)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

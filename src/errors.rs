// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::*;

error_chain! {

    foreign_links {
        DocOptFailure(::docopt::Error);
        Io(::std::io::Error);
    }

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must both be at least 1",
                    width, height)
        }
        InvalidCoordinate(x: u32, y: u32) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of the grid", x, y)
        }
    }
}

// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
use error_chain::error_chain;

use crate::cells::Cartesian3DCoordinate;

error_chain! {

    errors {
        InvalidDimension(x: isize, y: isize, z: isize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions ({}, {}, {}): every extent must be positive and the cell count addressable",
                    x, y, z)
        }

        InvalidStartCoordinate(coord: Cartesian3DCoordinate) {
            description("start coordinate is outside the grid")
            display("start coordinate {} is outside the grid", coord)
        }

        // A bug in the neighbour or bounds logic, never a recoverable condition.
        InvariantViolation(reason: String) {
            description("maze generation invariant violated")
            display("maze generation invariant violated: {}", reason)
        }
    }
}

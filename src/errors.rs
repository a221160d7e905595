// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        // A maze needs at least one row and one column.
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid maze dimension")
            display("invalid maze dimensions {} rows x {} columns, both must be at least 1",
                    rows, columns)
        }

        ImageTooLarge(rows: usize, columns: usize, cell_side_pixels: u32) {
            description("maze image too large")
            display("a {} x {} maze with {} pixel cells is too large for an image",
                    rows, columns, cell_side_pixels)
        }
    }
}

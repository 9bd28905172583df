use coded_errors::{chain, CodedError};
use std::error::Error;
use std::io;

fn run_query() -> Result<(), Box<dyn Error + Send + Sync>> {
    // The code is safe to show an end user; it could also serve as a
    // translation key. The cause is for our logs only.
    Err(Box::new(
        CodedError::new()
            .with_code("InternalServerError")
            .with_internal(io::Error::other(
                "could not execute sql query: database connection timed out",
            )),
    ))
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    let Err(err) = run_query() else {
        println!("Success!");
        return;
    };

    // 1. What the client sees: the cause is hidden by default.
    println!("write error to http: {}", err);

    // 2. What the logs see: recover the typed error and show the cause.
    if let Some(coded) = chain::find_coded(&*err) {
        println!("write error to stdout: {}", coded.clone().show_internal());
    }

    // Output:
    // write error to http: InternalServerError
    // write error to stdout: InternalServerError: could not execute sql query: database connection timed out
}

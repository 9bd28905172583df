use coded_errors::{coded, CodedError};
use std::io;

fn load_profile(id: u32) -> coded_errors::Result<()> {
    let timeout = CodedError::new()
        .with_code("DbTimeout")
        .with_internal(io::Error::other(format!("read timed out fetching profile {}", id)));
    Err(coded!("InternalServerError", timeout))
}

fn main() {
    println!("--- Diagnostic Logging Example ---\n");

    let Err(err) = load_profile(42) else {
        return;
    };

    println!("1. [EXTERNAL RESPONSE] {}", err);

    println!("\n2. [INTERNAL LOG]");
    err.with_diagnostic_log(|log| {
        println!("   Code:   {}", log.code());
        println!("   Shown:  {}", log.is_internal_shown());
        for (depth, cause) in log.causes().iter().enumerate() {
            println!("   Cause{}: {}", depth, cause);
        }
        match log.to_zeroizing_string() {
            Ok(line) => println!("   Line:   {}", &*line),
            Err(_) => println!("   Line:   <cause could not be formatted>"),
        }
    });
}

use coded_errors::{chain, Cause, CodedError};
use std::io;
use std::sync::Arc;

// Generic codes sent back to a client.
const INTERNAL_SERVER_ERROR: CodedError = CodedError::sentinel("InternalServerError");
const USER_NOT_FOUND: CodedError = CodedError::sentinel("UserNotFound");

fn main() {
    println!("--- Sentinel Matching Example ---\n");

    // Specific internal errors that only belong in logs.
    let username_not_found: Cause = Arc::new(io::Error::other(
        "the given username does not exist in the database",
    ));
    let invalid_password = io::Error::other("the given password does not match");

    let err = CodedError::new()
        .with_code("UserNotFound")
        .with_shared_internal(Arc::clone(&username_not_found));

    println!("is coded: {}", chain::is(&err, Some(&CodedError::new())));
    println!(
        "is internal server error: {}",
        chain::is(&err, Some(&INTERNAL_SERVER_ERROR))
    );
    println!("is user not found: {}", chain::is(&err, Some(&USER_NOT_FOUND)));
    println!(
        "is username not found in db: {}",
        chain::is(&err, Some(&*username_not_found))
    );
    println!(
        "is invalid password: {}",
        chain::is(&err, Some(&invalid_password))
    );

    // Output:
    // is coded: true
    // is internal server error: false
    // is user not found: true
    // is username not found in db: true
    // is invalid password: false
}

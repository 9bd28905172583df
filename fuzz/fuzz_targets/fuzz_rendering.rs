#![no_main]

use coded_errors::{chain, CodedError};
use libfuzzer_sys::fuzz_target;
use std::io;

fuzz_target!(|data: (String, String, bool)| {
    let (code, cause, shown) = data;

    let mut err = CodedError::new()
        .with_code(code.clone())
        .with_internal(io::Error::other(cause.clone()));
    if shown {
        err = err.show_internal();
    }

    let display = err.to_string();
    if shown {
        assert_eq!(display, format!("{}: {}", code, cause));
    } else {
        assert_eq!(display, code);
    }

    let rendered = err
        .diagnostic_log()
        .to_zeroizing_string()
        .expect("io::Error display never fails");
    assert!(rendered.len() < 4096);

    assert!(chain::is(&err, Some(&CodedError::new())));
});

use std::io;

use mason::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::InvalidNameError { name: "My App!".to_string() };
    assert_eq!(
        err.to_string(),
        "Invalid application name \"My App!\": use only letters, digits and spaces."
    );

    let err = Error::ProcessError {
        path: "a/b.txt".to_string(),
        reason: "permission denied".to_string(),
    };
    assert_eq!(err.to_string(), "Could not process 'a/b.txt': permission denied.");
}

use progdir::error::Error;
use std::path::Path;
use walkdir::WalkDir;

#[test]
fn test_error_conversion() {
    let walk_err = WalkDir::new(Path::new("/no/such/progdir/template"))
        .into_iter()
        .find_map(|entry| entry.err())
        .expect("walking a missing directory fails");
    let err: Error = walk_err.into();

    match err {
        Error::WalkError(_) => (),
        _ => panic!("Expected WalkError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::CheckTypeError {
        path: "src/main.rs.contain--Check".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "\"src/main.rs.contain--Check\": has no valid check-type suffix"
    );

    let err = Error::TargetExistsError {
        target: "prog".to_string(),
    };
    assert_eq!(err.to_string(), "The target directory \"prog\" already exists");
}

#[test]
fn test_check_pattern_error_display() {
    let source = regex::Regex::new("(unclosed").unwrap_err();
    let err = Error::CheckPatternError {
        path: "f.matches--Check".to_string(),
        source,
    };
    assert!(err
        .to_string()
        .starts_with("File checks for \"f.matches--Check\" could not be made: "));
}

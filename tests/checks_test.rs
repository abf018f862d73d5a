use progdir::checks::{split_check_type, verify_check_types, CheckKind, ContentCheck, CHECK_TYPES};
use std::path::Path;

const TEST_PATH: &str = "test/file/path";
const TEST_TEXT: &str = "start\nline 1\nline 2\nend\n";

fn run(kind: CheckKind, pattern: &str) -> Option<String> {
    ContentCheck::new(kind, pattern.as_bytes())
        .unwrap()
        .diagnose(Path::new(TEST_PATH), TEST_TEXT.as_bytes())
}

#[test]
fn test_check_type_registry() {
    assert!(verify_check_types().is_ok());
    assert_eq!(CHECK_TYPES.len(), CheckKind::ALL.len());
    for kind in CheckKind::ALL {
        assert!(kind.info().is_some(), "{kind:?} is not registered");
    }
}

#[test]
fn test_split_check_type() {
    let (ct, rest) = split_check_type("xxx.doesNotContain").unwrap();
    assert_eq!(ct.kind, CheckKind::DoesNotContain);
    assert_eq!(rest, "xxx");

    let (ct, rest) = split_check_type("a.b.matches").unwrap();
    assert_eq!(ct.kind, CheckKind::Matches);
    assert_eq!(rest, "a.b");

    assert!(split_check_type("xxx.contain").is_none());
}

#[test]
fn test_begins() {
    assert_eq!(run(CheckKind::Begins, "start\nline 1"), None);
    assert_eq!(
        run(CheckKind::Begins, "start\nbad line").unwrap(),
        format!(
            "\"{TEST_PATH}\" has unexpected content\n\
             \tit should start with:\nstart\nbad line\n\
             \tactually starts with:\n{TEST_TEXT}"
        )
    );
}

#[test]
fn test_ends() {
    assert_eq!(run(CheckKind::Ends, "line 2\nend\n"), None);
    assert_eq!(
        run(CheckKind::Ends, "line 2\nbad ending\n").unwrap(),
        format!(
            "\"{TEST_PATH}\" has unexpected content\n\
             \tit should end with:\nline 2\nbad ending\n\n\
             \tactually ends with:\n{TEST_TEXT}"
        )
    );
}

#[test]
fn test_contains() {
    assert_eq!(run(CheckKind::Contains, "line 2\n"), None);
    assert_eq!(
        run(CheckKind::Contains, "line 3\n").unwrap(),
        format!("\"{TEST_PATH}\" has unexpected content\n\tdoes not contain:\nline 3\n")
    );
}

#[test]
fn test_does_not_contain() {
    assert_eq!(run(CheckKind::DoesNotContain, "line 3\n"), None);
    assert_eq!(
        run(CheckKind::DoesNotContain, "line 2\n").unwrap(),
        format!("\"{TEST_PATH}\" has unexpected content\n\tcontains:\nline 2\n")
    );
}

#[test]
fn test_contains_pair_is_exclusive() {
    for pattern in ["", "s", "line", "line 1\nline 2", "nope", "end\n\n", TEST_TEXT] {
        let contains = ContentCheck::new(CheckKind::Contains, pattern.as_bytes()).unwrap();
        let lacks = ContentCheck::new(CheckKind::DoesNotContain, pattern.as_bytes()).unwrap();
        assert_ne!(
            contains.passes(TEST_TEXT.as_bytes()),
            lacks.passes(TEST_TEXT.as_bytes()),
            "pattern {pattern:?}"
        );
    }
}

#[test]
fn test_matches() {
    assert_eq!(run(CheckKind::Matches, "(?m)^line 2$"), None);
    assert_eq!(
        run(CheckKind::Matches, "(?m)^line 3$").unwrap(),
        format!("\"{TEST_PATH}\" has unexpected content\n\tdoes not match:\n(?m)^line 3$")
    );
}

#[test]
fn test_does_not_match() {
    assert_eq!(run(CheckKind::DoesNotMatch, "line 3\n"), None);
    assert_eq!(
        run(CheckKind::DoesNotMatch, "(?m)^line 2$").unwrap(),
        format!("\"{TEST_PATH}\" has unexpected content\n\tmatches:\n(?m)^line 2$")
    );
}

#[test]
fn test_bad_regex_fails_at_construction() {
    assert!(ContentCheck::new(CheckKind::Matches, b"(unclosed").is_err());
    assert!(ContentCheck::new(CheckKind::DoesNotMatch, b"[z-a]").is_err());
    // plain text checks never look at the pattern syntax
    assert!(ContentCheck::new(CheckKind::Contains, b"(unclosed").is_ok());
}

#[test]
fn test_long_content_is_shortened() {
    let content = format!("{}{}", "a".repeat(50), "b".repeat(50));
    let path = Path::new("long");

    let begins = ContentCheck::new(CheckKind::Begins, b"x").unwrap();
    let message = begins.diagnose(path, content.as_bytes()).unwrap();
    assert!(message.ends_with(&format!("{}...", "a".repeat(40))));

    let ends = ContentCheck::new(CheckKind::Ends, b"x").unwrap();
    let message = ends.diagnose(path, content.as_bytes()).unwrap();
    assert!(message.ends_with(&format!("...{}", "b".repeat(40))));
}

#[test]
fn test_checks_are_repeatable() {
    let check = ContentCheck::new(CheckKind::Begins, b"start\nbad").unwrap();
    let first = check.diagnose(Path::new(TEST_PATH), TEST_TEXT.as_bytes());
    let second = check.diagnose(Path::new(TEST_PATH), TEST_TEXT.as_bytes());
    assert_eq!(first, second);
}

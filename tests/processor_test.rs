use progdir::config::Permissions;
use progdir::macros::MacroCache;
use progdir::processor::{walk, CheckCollector, Checker, Creator, Strategy};
use progdir::status::Report;
use progdir::template::{Template, TemplateEntry, TemplateSource};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_template(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn template(template_dir: &Path, target: &Path) -> Template {
    let mut macros = MacroCache::new("${", "}").unwrap();
    macros.add_program_macros("prog");
    Template::new(
        TemplateSource::FileSystem(template_dir.to_path_buf()),
        target,
        macros,
    )
}

#[derive(Default)]
struct Recorder {
    entries: Vec<TemplateEntry>,
}

impl Strategy for Recorder {
    fn visit(&mut self, _template: &Template, entry: &TemplateEntry, _report: &mut Report<'_>) {
        self.entries.push(entry.clone());
    }
}

#[test_log::test]
fn test_walk_order_and_entries() {
    let temp_dir = TempDir::new().unwrap();
    let tmpl = temp_dir.path().join("tmpl");
    write_template(
        &tmpl,
        &[
            ("b.txt", "b"),
            ("a/z.txt", "z"),
            ("a/y.txt--Optional--Generate", "y"),
            ("a/z.txt.contains.2--Check", "z"),
        ],
    );
    let target = temp_dir.path().join("prog");
    let template = template(&tmpl, &target);

    let mut recorder = Recorder::default();
    let mut out = Vec::new();
    let mut report = Report::new(&mut out);
    walk(&template, &mut recorder, &mut report).unwrap();
    assert!(report.status().is_success());

    let paths: Vec<&str> = recorder
        .entries
        .iter()
        .map(|e| e.template_path.as_str())
        .collect();
    assert_eq!(
        paths,
        [
            "",
            "a",
            "a/y.txt--Optional--Generate",
            "a/z.txt",
            "a/z.txt.contains.2--Check",
            "b.txt"
        ]
    );

    let root = &recorder.entries[0];
    assert!(root.is_template_root);

    let dir = &recorder.entries[1];
    assert!(dir.is_dir);
    assert_eq!(dir.target_path, target.join("a"));

    let optional = &recorder.entries[2];
    assert!(optional.is_optional && optional.is_generated);
    assert_eq!(optional.target_path, target.join("a").join("y.txt"));

    let check = &recorder.entries[4];
    assert!(check.is_check_descriptor());
    assert_eq!(check.target_path, target.join("a").join("z.txt"));
}

#[test]
fn test_bad_entry_does_not_stop_the_walk() {
    let temp_dir = TempDir::new().unwrap();
    let tmpl = temp_dir.path().join("tmpl");
    write_template(&tmpl, &[("a.txt.contain--Check", "x"), ("b.txt", "b")]);
    let template = template(&tmpl, &temp_dir.path().join("prog"));

    let mut recorder = Recorder::default();
    let mut out = Vec::new();
    let status = {
        let mut report = Report::new(&mut out);
        walk(&template, &mut recorder, &mut report).unwrap();
        report.status()
    };

    assert!(!status.is_success());
    assert_eq!(recorder.entries.last().unwrap().template_path, "b.txt");
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("has no valid check-type suffix"), "{output}");
}

#[test]
fn test_collector_keeps_discovery_order() {
    let temp_dir = TempDir::new().unwrap();
    let tmpl = temp_dir.path().join("tmpl");
    write_template(
        &tmpl,
        &[
            ("f", "start\nmiddle\nend\n"),
            ("f.begins--Check", "start"),
            ("f.contains.1--Check", "middle"),
            ("f.contains.2--Check--Generate", "${ProgName}"),
            ("f.ends--Check", "end\n"),
        ],
    );
    let target = temp_dir.path().join("prog");
    let template = template(&tmpl, &target);

    let mut collector = CheckCollector::new();
    let mut out = Vec::new();
    let mut report = Report::new(&mut out);
    walk(&template, &mut collector, &mut report).unwrap();
    assert!(report.status().is_success());

    let registry = collector.into_registry();
    assert_eq!(registry.len(), 1);
    let kinds: Vec<_> = registry
        .checks_for(&target.join("f"))
        .iter()
        .map(|c| format!("{:?}", c.kind()))
        .collect();
    assert_eq!(kinds, ["Begins", "Contains", "Contains", "Ends"]);
    assert!(registry.checks_for(&target.join("g")).is_empty());

    // the generated check looks for the program name
    let generated = &registry.checks_for(&target.join("f"))[2];
    assert!(generated.passes(b"a prog b"));
    assert!(!generated.passes(b"${ProgName}"));
}

#[test]
fn test_collector_reports_bad_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let tmpl = temp_dir.path().join("tmpl");
    write_template(
        &tmpl,
        &[
            ("f.matches--Check", "(unclosed"),
            ("f.matches.1--Check", "^ok"),
        ],
    );
    let target = temp_dir.path().join("prog");
    let template = template(&tmpl, &target);

    let mut collector = CheckCollector::new();
    let mut out = Vec::new();
    let status = {
        let mut report = Report::new(&mut out);
        walk(&template, &mut collector, &mut report).unwrap();
        report.status()
    };

    assert!(!status.is_success());
    assert_eq!(collector.into_registry().checks_for(&target.join("f")).len(), 1);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("could not be made"), "{output}");
}

#[test]
fn test_creator_and_checker() {
    let temp_dir = TempDir::new().unwrap();
    let tmpl = temp_dir.path().join("tmpl");
    write_template(
        &tmpl,
        &[
            ("docs/readme--Generate", "# ${ProgName}\n"),
            ("docs/readme.begins--Check--Generate", "# ${ProgName}"),
            ("main.rs", "fn main() {}\n"),
        ],
    );
    let target = temp_dir.path().join("prog");
    let template = template(&tmpl, &target);
    let perms = Permissions::default();

    let mut out = Vec::new();
    let mut report = Report::new(&mut out);
    let mut creator = Creator::new(perms);
    assert!(creator.create_root(&target, &mut report));
    walk(&template, &mut creator, &mut report).unwrap();
    assert!(report.status().is_success());

    assert_eq!(
        fs::read_to_string(target.join("docs").join("readme")).unwrap(),
        "# prog\n"
    );
    assert!(!target.join("docs").join("readme.begins").exists());
    assert!(!target
        .join("docs")
        .join("readme.begins--Check--Generate")
        .exists());

    let mut collector = CheckCollector::new();
    walk(&template, &mut collector, &mut report).unwrap();
    let registry = collector.into_registry();
    let mut checker = Checker::new(&registry, perms);
    assert!(checker.check_dir(&target, &mut report));
    walk(&template, &mut checker, &mut report).unwrap();
    assert!(report.status().is_success());

    fs::write(target.join("docs").join("readme"), "# other\n").unwrap();
    walk(&template, &mut checker, &mut report).unwrap();
    assert!(!report.status().is_success());
}

#[test]
fn test_checker_on_missing_root() {
    let registry = Default::default();
    let checker = Checker::new(&registry, Permissions::default());
    let mut out = Vec::new();
    let mut report = Report::new(&mut out);

    let missing = PathBuf::from("/no/such/progdir/target");
    assert!(!checker.check_dir(&missing, &mut report));
    assert!(!report.status().is_success());
}

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("form_core_cli")
        .unwrap()
        .env("FORM_CORE_CLI_SCRIPT", "1")
        .env("FORM_CORE_HOME", home.path())
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_builds_and_saves_a_form() {
    let home = TempDir::new().unwrap();
    let input = "\
new \"Contact Us\"
add text --id name
set name label Full name
set name required
add email --id email
add section 0 --id intro
show
save
exit
";

    script(&home, input)
        .success()
        .stdout(contains("Created form `Contact Us`"))
        .stdout(contains("Added section field `intro` at position 0."))
        .stdout(contains("[section] New Section"))
        .stdout(contains("| Full name* (text) | New Email field (email)"));

    let saved = std::fs::read_to_string(home.path().join("forms").join("contact_us.json")).unwrap();
    assert!(saved.contains("\"title\": \"Contact Us\""));
    assert!(saved.contains("\"label\": \"Full name\""));
}

#[test]
fn script_mode_fills_and_submits() {
    let home = TempDir::new().unwrap();
    let input = "\
new Signup
add text --id name
set name required
add checklist --id topics
set topics options A, B
set topics required
fill
submit
value name Jo
value topics A
submit
exit
";

    script(&home, input)
        .success()
        .stdout(contains("Submission rejected: 2 problem(s)."))
        .stdout(contains("name: This field is required"))
        .stdout(contains("accepted with 2 answer(s)."));

    let submissions = home.path().join("submissions");
    let form_dirs: Vec<_> = std::fs::read_dir(&submissions).unwrap().collect();
    assert_eq!(form_dirs.len(), 1);
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = TempDir::new().unwrap();
    script(&home, "sumbit\nexit\n")
        .success()
        .stdout(contains("Unknown command `sumbit`"))
        .stdout(contains("Suggestion: `submit`?"));
}

#[test]
fn commands_needing_a_form_explain_themselves() {
    let home = TempDir::new().unwrap();
    script(&home, "add text\nfill\nexit\n")
        .success()
        .stdout(contains("No form loaded. Use `new` or `open` first."));
}

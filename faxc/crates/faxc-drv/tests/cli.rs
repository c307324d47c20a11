use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn faxc() -> Command {
    Command::cargo_bin("faxc").unwrap()
}

fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn returning_zero_emits_a_main_definition() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int main() { return 0; }");
    let output = dir.path().join("out.ll");

    faxc().arg(&input).arg(&output).assert().success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("define i32 @main() {"));
    assert!(ir.contains("ret i32"));
}

#[test]
fn a_called_function_produces_two_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "main.fax",
        "int add(int a, int b) { return a + b; } int main() { return add(2, 3); }",
    );
    let output = dir.path().join("out.ll");

    faxc().arg(&input).arg(&output).assert().success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("define i32 @add"));
    assert!(ir.contains("define i32 @main"));
    assert!(ir.contains("call i32 @add"));
}

#[test]
fn a_for_loop_lowers_to_a_cond_body_incr_end_quadruple() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(
        &dir,
        "main.fax",
        "int main() { int i; int s = 0; for (i = 0; i < 5; i = i + 1) { s = s + i; } return s; }",
    );
    let output = dir.path().join("out.ll");

    faxc().arg(&input).arg(&output).assert().success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("alloca i32"));
    assert!(ir.matches("label").count() >= 4);
}

#[test]
fn an_undeclared_identifier_is_a_semantic_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int main() { return x; }");

    faxc()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("semantic error:"));
}

#[test]
fn a_wrong_argument_count_is_a_semantic_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int f(int a) {} int main() { return f(1, 2); }");

    faxc()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("semantic error:"));
}

#[test]
fn assigning_to_a_literal_is_a_syntactic_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int main() { 1 = 2; }");

    faxc()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("parser error:"));
}

#[test]
fn empty_input_compiles_to_just_the_prologue() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "empty.fax", "");
    let output = dir.path().join("out.ll");

    faxc().arg(&input).arg(&output).assert().success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("declare i32 @printf"));
    assert!(ir.contains("declare i32 @scanf"));
    assert!(!ir.contains("define"));
}

#[test]
fn output_file_defaults_to_output_dot_ll() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int main() { return 0; }");

    faxc().current_dir(&dir).arg(&input).assert().success();

    assert!(dir.path().join("output.ll").exists());
}

#[test]
fn verbose_flag_dumps_tokens_and_the_ast_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.fax", "int main() { return 0; }");

    faxc()
        .arg(&input)
        .arg(dir.path().join("out.ll"))
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("-- tokens --"))
        .stdout(predicate::str::contains("-- symbols --"));
}

#[test]
fn missing_input_file_is_a_usage_error() {
    faxc().assert().failure();
}

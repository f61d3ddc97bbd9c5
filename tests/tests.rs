use std::io::Write;
use std::process::{Command, Output, Stdio};

const SHELL_BIN: &str = env!("CARGO_BIN_EXE_shell");

fn run_script_with(capacity: Option<&str>, script: &str) -> Output {
    let mut command = Command::new(SHELL_BIN);
    if let Some(capacity) = capacity {
        command.arg(capacity);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn shell");

    child
        .stdin
        .as_mut()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("failed to write the script");

    child.wait_with_output().expect("failed to wait for shell")
}

fn run_script(script: &str) -> String {
    let output = run_script_with(None, script);
    assert!(output.status.success(), "shell exited with failure");
    String::from_utf8(output.stdout).expect("shell output is UTF-8")
}

#[test]
fn starts_in_home() {
    let stdout = run_script("pwd\n");
    assert!(stdout.contains("/home\n"));
}

#[test]
fn standard_layout_is_present() {
    let stdout = run_script("cd /\nls\n");
    assert!(stdout.contains("bin/"));
    assert!(stdout.contains("dev/"));
    assert!(stdout.contains("home/"));
    assert!(stdout.contains("mnt/"));
}

#[test]
fn scenario_round_trip() {
    let stdout = run_script(
        "cd /\n\
         mkdir work\n\
         touch work/note\n\
         write work/note hi\n\
         cd work\n\
         pwd\n\
         cat note\n\
         ls\n",
    );
    assert!(stdout.contains("/work\n"));
    assert!(stdout.contains("hi\n"));
    assert!(stdout.contains("note\n"));
}

#[test]
fn cat_marks_empty_files() {
    let stdout = run_script("touch f\ncat f\n");
    assert!(stdout.contains("(empty)\n"));
}

#[test]
fn echo_redirects_compose_append() {
    let stdout = run_script(
        "echo hi > f\n\
         echo ho >> f\n\
         cat f\n",
    );
    assert!(stdout.contains("hiho\n"));
}

#[test]
fn cp_duplicates_content() {
    let stdout = run_script(
        "touch f\n\
         write f payload\n\
         cp f g\n\
         cat g\n",
    );
    assert!(stdout.contains("payload\n"));
}

#[test]
fn mv_renames_in_place() {
    let stdout = run_script(
        "touch old\n\
         write old payload\n\
         mv old new\n\
         cat new\n\
         ls\n",
    );
    assert!(stdout.contains("payload\n"));
    assert!(stdout.contains("new\n"));
    assert!(!stdout.contains("old\n"));
}

#[test]
fn tree_indents_nested_entries() {
    let stdout = run_script(
        "mkdir a\n\
         touch a/f\n\
         tree\n",
    );
    assert!(stdout.contains("a/\n  f\n"));
}

#[test]
fn errors_are_reported_and_recovered() {
    let output = run_script_with(None, "cat missing\npwd\n");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("shell stderr is UTF-8");
    assert!(stderr.contains("no such file or directory"));

    let stdout = String::from_utf8(output.stdout).expect("shell output is UTF-8");
    assert!(stdout.contains("/home\n"));
}

#[test]
fn unknown_commands_are_reported() {
    let output = run_script_with(None, "frobnicate\n");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("shell stderr is UTF-8");
    assert!(stderr.contains("unknown command"));
}

#[test]
fn tiny_pool_is_fatal_at_startup() {
    // The standard layout does not fit in four slots; exhaustion must
    // terminate the process with a diagnostic.
    let output = run_script_with(Some("4"), "");
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("shell stderr is UTF-8");
    assert!(stderr.contains("node pool exhausted"));
}

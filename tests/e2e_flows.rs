mod common;

use common::{fixture_document, serve_chat_once, TestEnv};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;

#[test]
fn section_edit_round_trip_through_fake_ollama() {
    let env = TestEnv::new();
    let reply = "<think>\nThe user wants a formal headline.\n</think>\n```json\n{\"home\": {\"headline\": \"Hello, valued client.\", \"subheadline\": \"We help you use AI.\\nNo hype.\"}}\n```";
    let (url, server) = serve_chat_once(reply);

    env.cmd()
        .args(["llama3", "--ollama-url", url.as_str()])
        .write_stdin("Make the home headline more formal\ny\nn\n")
        .assert()
        .success()
        .stdout(contains("Editing section: home"))
        .stdout(contains("-    \"headline\": \"Hi there\","))
        .stdout(contains("+    \"headline\": \"Hello, valued client.\","))
        .stdout(contains("content/site.json updated."));

    let request = server.join().expect("server thread");
    assert_eq!(request["model"], json!("llama3"));
    assert_eq!(request["stream"], json!(false));
    let user = request["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("\"headline\": \"Hi there\""));
    assert!(!user.contains("siteTitle"));

    let mut expected = fixture_document();
    expected["home"]["headline"] = json!("Hello, valued client.");
    assert_eq!(env.content(), expected);
    assert!(env.raw_content().ends_with("}\n"));

    let audit = env.audit_lines();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0]["data"]["scope"], json!("section:home"));
    assert_eq!(audit[0]["data"]["model"], json!("llama3"));
}

#[test]
fn tampered_protected_fields_are_rejected_end_to_end() {
    let env = TestEnv::new();
    let before = env.raw_content();
    let mut tampered = fixture_document();
    tampered["meta"]["email"] = json!("someone-else@example.com");
    tampered["nav"] = json!([{"label": "Home", "href": "/"}]);
    let (url, server) = serve_chat_once(&tampered.to_string());

    env.cmd()
        .args(["--ollama-url", url.as_str()])
        .write_stdin("Make the whole site warmer\ny\n")
        .assert()
        .success()
        .stdout(contains("Validation failed:"))
        .stdout(contains("Protected field 'meta.email' was changed."))
        .stdout(contains("Protected field 'nav' was changed."))
        .stdout(contains("No changes written."));

    server.join().expect("server thread");
    assert_eq!(env.raw_content(), before);
    assert!(env.audit_lines().is_empty());
}

#[test]
fn removed_sections_are_rejected_end_to_end() {
    let env = TestEnv::new();
    let before = env.raw_content();
    let mut trimmed = fixture_document();
    trimmed.as_object_mut().unwrap().remove("about");
    let (url, server) = serve_chat_once(&trimmed.to_string());

    env.cmd()
        .args(["--ollama-url", url.as_str()])
        .write_stdin("Shorten the site\ny\n")
        .assert()
        .success()
        .stdout(contains("Top-level keys removed: about"));

    server.join().expect("server thread");
    assert_eq!(env.raw_content(), before);
}

#[test]
fn prose_reply_is_shown_and_nothing_is_written() {
    let env = TestEnv::new();
    let before = env.raw_content();
    let (url, server) = serve_chat_once("Sure! Here is the updated copy: not json");

    env.cmd()
        .args(["--ollama-url", url.as_str()])
        .write_stdin("Polish the about bio\ny\n")
        .assert()
        .success()
        .stdout(contains("invalid JSON"))
        .stdout(contains("Sure! Here is the updated copy: not json"));

    server.join().expect("server thread");
    assert_eq!(env.raw_content(), before);
}

#[test]
fn identical_reply_is_a_no_op() {
    let env = TestEnv::new();
    let before = env.raw_content();
    let about = json!({"about": fixture_document()["about"]});
    let (url, server) = serve_chat_once(&about.to_string());

    env.cmd()
        .args(["--ollama-url", url.as_str()])
        .write_stdin("Polish the about bio\n")
        .assert()
        .success()
        .stdout(contains("No changes detected."))
        .stdout(contains("Apply these changes?").not());

    server.join().expect("server thread");
    assert_eq!(env.raw_content(), before);
}

#[test]
fn snapshot_outside_a_repository_only_warns() {
    let env = TestEnv::new();
    let (url, server) = serve_chat_once(r#"{"bio": "Jose brings a decade of experience."}"#);

    env.cmd()
        .args(["--ollama-url", url.as_str()])
        .env("GIT_CEILING_DIRECTORIES", env.site.parent().unwrap())
        .write_stdin("Polish the about bio\ny\ny\n")
        .assert()
        .success()
        .stdout(contains("⚠"))
        .stdout(contains("Done."));

    server.join().expect("server thread");
    assert_eq!(
        env.content()["about"]["bio"],
        json!("Jose brings a decade of experience.")
    );
}

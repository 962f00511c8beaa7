#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Integration tests for the dangling-link collector.

mod common;

use boxup_cli::clean;

use common::{ScriptedPrompt, TestEnv, test_logger};

#[test]
fn clean_removes_exactly_the_dangling_links() {
    let env = TestEnv::new();
    let log = test_logger();

    // A valid link, a dangling link, and a regular file.
    let kept_target = env.home_file("kept-target", "data");
    env.home_link("valid-link", &kept_target);
    env.home_link("dangling-link", &env.home().join("no-such-target"));
    env.home_file("regular-file", "data");

    let removed = clean::clean(&env.home(), true, &ScriptedPrompt::new(&[]), &log).unwrap();

    assert_eq!(removed, 1);
    assert!(!env.home().join("dangling-link").is_symlink());
    assert!(env.home().join("valid-link").is_symlink());
    assert!(env.home().join("regular-file").is_file());
    assert!(env.home().join("kept-target").is_file());
}

#[test]
fn clean_prompts_without_force() {
    let env = TestEnv::new();
    let log = test_logger();
    env.home_link("dangling-link", &env.home().join("no-such-target"));

    let prompt = ScriptedPrompt::new(&[true]);
    let removed = clean::clean(&env.home(), false, &prompt, &log).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(prompt.asked().len(), 1);
    assert!(prompt.asked()[0].contains("dangling-link"));
}

#[test]
fn clean_keeps_declined_links() {
    let env = TestEnv::new();
    let log = test_logger();
    env.home_link("dangling-link", &env.home().join("no-such-target"));

    let removed =
        clean::clean(&env.home(), false, &ScriptedPrompt::new(&[false]), &log).unwrap();

    assert_eq!(removed, 0);
    assert!(env.home().join("dangling-link").is_symlink());
}

#[test]
fn clean_after_store_removal_cleans_the_stale_link() {
    let env = TestEnv::new();
    let log = test_logger();

    // Simulate a stored file whose store-side copy was later deleted.
    let stored = env.box_dir().join(".vimrc");
    std::fs::write(&stored, "X").unwrap();
    env.home_link(".vimrc", &stored);
    std::fs::remove_file(&stored).unwrap();

    let removed = clean::clean(&env.home(), true, &ScriptedPrompt::new(&[]), &log).unwrap();

    assert_eq!(removed, 1);
    assert!(!env.home().join(".vimrc").is_symlink());
}

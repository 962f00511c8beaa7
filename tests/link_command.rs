#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the link reconciliation flow.
//!
//! These exercise the File Set Collector and the Link Reconciliation Engine
//! together against a real (temporary) file system, covering idempotence,
//! directory protection, backups, force mode, and scope precedence.

mod common;

use boxup_cli::collect;
use boxup_cli::link::{self, LinkOptions};

use common::{ScriptedPrompt, TestEnv, test_logger};

/// Collect global then box files, in the order the link command does.
fn collect_all(env: &TestEnv, with_global: bool) -> Vec<collect::TrackedFile> {
    let mut files = Vec::new();
    if with_global {
        files.extend(collect::collect_files(&env.global_dir()).expect("collect global"));
    }
    files.extend(collect::collect_files(&env.box_dir()).expect("collect box"));
    files
}

const FORCE: LinkOptions = LinkOptions {
    force: true,
    backup: false,
};

#[test]
fn link_creates_symlinks_for_fresh_home() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "set nocompatible");
    env.box_file(".bashrc", "export EDITOR=vim");
    let log = test_logger();

    let files = collect_all(&env, false);
    let stats = link::reconcile(&files, &env.home(), FORCE, &ScriptedPrompt::new(&[]), &log)
        .expect("reconcile");

    assert_eq!(stats.created, 2);
    assert_eq!(
        std::fs::read_link(env.home().join(".vimrc")).unwrap(),
        env.box_dir().join(".vimrc")
    );
    assert_eq!(
        std::fs::read_to_string(env.home().join(".bashrc")).unwrap(),
        "export EDITOR=vim"
    );
}

#[test]
fn link_is_idempotent() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "x");
    env.box_file(".gitconfig", "y");
    let log = test_logger();
    let files = collect_all(&env, false);

    let first =
        link::reconcile(&files, &env.home(), FORCE, &ScriptedPrompt::new(&[]), &log).unwrap();
    assert_eq!(first.created, 2);

    // Second run must be a pure no-op: every entry skips as already linked
    // and no prompt is ever consulted.
    let prompt = ScriptedPrompt::new(&[]);
    let second = link::reconcile(
        &files,
        &env.home(),
        LinkOptions::default(),
        &prompt,
        &log,
    )
    .unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.already_linked, 2);
    assert!(prompt.asked().is_empty());
}

#[test]
fn link_never_clobbers_a_directory() {
    let env = TestEnv::new();
    env.box_file(".config", "store copy");
    std::fs::create_dir(env.home().join(".config")).unwrap();
    std::fs::write(env.home().join(".config/app.ini"), "user data").unwrap();
    let log = test_logger();

    let files = collect_all(&env, false);
    let stats = link::reconcile(
        &files,
        &env.home(),
        LinkOptions {
            force: true,
            backup: true,
        },
        &ScriptedPrompt::new(&[]),
        &log,
    )
    .unwrap();

    assert_eq!(stats.skipped_dirs, 1);
    assert!(env.home().join(".config").is_dir());
    assert_eq!(
        std::fs::read_to_string(env.home().join(".config/app.ini")).unwrap(),
        "user data"
    );
}

#[test]
fn link_backup_preserves_original_content() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "from store");
    env.home_file(".vimrc", "original content");
    let log = test_logger();

    let files = collect_all(&env, false);
    link::reconcile(
        &files,
        &env.home(),
        LinkOptions {
            force: true,
            backup: true,
        },
        &ScriptedPrompt::new(&[]),
        &log,
    )
    .unwrap();

    assert!(env.home().join(".vimrc").is_symlink());
    assert_eq!(
        std::fs::read_to_string(env.home().join(".vimrc.bk")).unwrap(),
        "original content"
    );
}

#[test]
fn link_force_never_prompts() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "store");
    env.box_file(".bashrc", "store");
    env.home_file(".vimrc", "old");
    env.home_file(".bashrc", "old");
    let log = test_logger();

    let prompt = ScriptedPrompt::new(&[]);
    let files = collect_all(&env, false);
    let stats = link::reconcile(&files, &env.home(), FORCE, &prompt, &log).unwrap();

    assert!(prompt.asked().is_empty(), "force must bypass prompts");
    assert_eq!(stats.created, 2);
}

#[test]
fn link_prompts_once_per_occupied_target() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "store");
    env.home_file(".vimrc", "old");
    let log = test_logger();

    let prompt = ScriptedPrompt::new(&[true]);
    let files = collect_all(&env, false);
    link::reconcile(&files, &env.home(), LinkOptions::default(), &prompt, &log).unwrap();

    let asked = prompt.asked();
    assert_eq!(asked.len(), 1);
    assert!(asked[0].contains(".vimrc"));
}

#[test]
fn box_scope_wins_over_global_scope() {
    let env = TestEnv::new();
    env.global_file(".gitconfig", "global copy");
    env.box_file(".gitconfig", "box copy");
    let log = test_logger();

    let files = collect_all(&env, true);
    link::reconcile(&files, &env.home(), FORCE, &ScriptedPrompt::new(&[]), &log).unwrap();

    let target = env.home().join(".gitconfig");
    assert_eq!(
        std::fs::read_link(&target).unwrap(),
        env.box_dir().join(".gitconfig"),
        "box-scope link is created second and wins"
    );
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "box copy");
}

#[test]
fn global_only_files_still_get_linked() {
    let env = TestEnv::new();
    env.global_file(".profile", "global");
    env.box_file(".vimrc", "box");
    let log = test_logger();

    let files = collect_all(&env, true);
    let stats =
        link::reconcile(&files, &env.home(), FORCE, &ScriptedPrompt::new(&[]), &log).unwrap();

    assert_eq!(stats.created, 2);
    assert_eq!(
        std::fs::read_link(env.home().join(".profile")).unwrap(),
        env.global_dir().join(".profile")
    );
}

#[test]
fn collector_rejects_missing_scope_before_mutation() {
    let env = TestEnv::new();
    std::fs::remove_dir_all(env.box_dir()).unwrap();

    let err = collect::collect_files(&env.box_dir()).unwrap_err();
    assert!(err.to_string().contains("is not a directory"));
}

#[test]
fn swap_files_are_not_linked() {
    let env = TestEnv::new();
    env.box_file(".vimrc", "real");
    env.box_file(".vimrc.swp", "swap");
    env.box_file(".vimrc.bk", "backup");
    let log = test_logger();

    let files = collect_all(&env, false);
    let stats =
        link::reconcile(&files, &env.home(), FORCE, &ScriptedPrompt::new(&[]), &log).unwrap();

    assert_eq!(stats.created, 1);
    assert!(env.home().join(".vimrc").is_symlink());
    assert!(!env.home().join(".vimrc.swp").exists());
    assert!(!env.home().join(".vimrc.bk").exists());
}

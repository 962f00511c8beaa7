// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed configuration store plus a fake
// home directory, and a fluent builder so each integration test can set up
// an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use boxup_cli::collect::TrackedFile;
use boxup_cli::logging::Logger;
use boxup_cli::prompt::{Answer, Confirm};

/// An isolated store-plus-home environment backed by a
/// [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped. Layout:
///
/// ```text
/// <tmp>/conf/global/
/// <tmp>/conf/boxes/work/laptop/
/// <tmp>/home/
/// ```
pub struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    /// Create a new environment with the standard directory layout.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        for dir in ["conf/global", "conf/boxes/work/laptop", "home"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create layout dir");
        }
        Self { root }
    }

    pub fn conf(&self) -> PathBuf {
        self.root.path().join("conf")
    }

    pub fn global_dir(&self) -> PathBuf {
        self.conf().join("global")
    }

    pub fn box_dir(&self) -> PathBuf {
        self.conf().join("boxes/work/laptop")
    }

    pub fn pkg_dir(&self) -> PathBuf {
        let dir = self.box_dir().join("pkg");
        std::fs::create_dir_all(&dir).expect("create pkg dir");
        dir
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Write a file into the box-scope store and return its tracked entry.
    pub fn box_file(&self, name: &str, content: &str) -> TrackedFile {
        let dir = self.box_dir();
        std::fs::write(dir.join(name), content).expect("write box file");
        TrackedFile {
            dir,
            name: name.into(),
        }
    }

    /// Write a file into the global-scope store and return its tracked entry.
    pub fn global_file(&self, name: &str, content: &str) -> TrackedFile {
        let dir = self.global_dir();
        std::fs::write(dir.join(name), content).expect("write global file");
        TrackedFile {
            dir,
            name: name.into(),
        }
    }

    /// Write a file into the fake home directory.
    pub fn home_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.home().join(name);
        std::fs::write(&path, content).expect("write home file");
        path
    }

    /// Create a symlink in the fake home directory.
    #[cfg(unix)]
    pub fn home_link(&self, name: &str, points_to: &Path) -> PathBuf {
        let path = self.home().join(name);
        std::os::unix::fs::symlink(points_to, &path).expect("create home symlink");
        path
    }
}

/// A quiet logger for tests; without an installed subscriber the events go
/// nowhere.
pub fn test_logger() -> Logger {
    Logger::new("test")
}

/// [`Confirm`] double replaying a fixed sequence of answers, then `false`.
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Confirm for ScriptedPrompt {
    fn confirm(&self, question: &str, _default: Answer) -> io::Result<bool> {
        self.asked.borrow_mut().push(question.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
    }
}

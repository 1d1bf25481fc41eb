//! Shared test utilities for integration tests
//!
//! Provides frame-directory fixtures used across multiple test files.

#![allow(dead_code)]

use assert_fs::prelude::*;
use camino::Utf8PathBuf;

/// Create a temp directory holding empty files with the given names.
pub fn make_frames(names: &[&str]) -> assert_fs::TempDir
{
    // Initialize the temporary shot directory
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    for name in names
    {
        tmp.child(name)
            .touch()
            .expect("touch frame");
    }

    tmp
}

/// A shot with a gap at frame 3, a second pass, a stray note and a subdir.
pub fn make_shot_fixture() -> assert_fs::TempDir
{
    let tmp = make_frames(&[
        "shot_001.exr",
        "shot_002.exr",
        "shot_004.exr",
        "shot_001_matte.exr",
        "shot_002_matte.exr",
        "notes.txt",
    ]);

    // Directories never join a sequence even when their name looks like one
    tmp.child("shot_003.exr")
        .create_dir_all()
        .expect("mkdir");

    tmp
}

/// UTF-8 path of a fixture root.
pub fn root_of(tmp: &assert_fs::TempDir) -> Utf8PathBuf
{
    Utf8PathBuf::from_path_buf(
        tmp.path()
            .to_path_buf(),
    )
    .expect("utf8 temp dir")
}

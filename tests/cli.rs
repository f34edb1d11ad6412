use std::process::{Command, Output};

fn ffchapters(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ffchapters"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("FFCHAPTERS_FFMPEG")
        .output()
        .expect("run CLI")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn generate_prints_ffmetadata() {
    let output = ffchapters(&[
        "generate",
        "--chapters",
        "tests/fixtures/chapters.csv",
        "--author",
        "Jane = Doe",
        "--title",
        "Pilot",
    ]);

    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        stderr(&output)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        include_str!("fixtures/expected/chapters.ffmeta"),
    );
    assert!(stderr(&output).contains("assuming the start of the file"));
}

#[test]
fn generate_degrades_on_unresolvable_gaps() {
    let output = ffchapters(&["generate", "--chapters", "tests/fixtures/gaps.tsv"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("startTime \"eventually\" is not a valid time"), "{err}");
    assert!(err.contains("cannot be resolved"), "{err}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(";FFMETADATA1\n\n[CHAPTER]"), "{stdout}");
    assert!(stdout.contains("START=NaN\nEND=600000\ntitle=C"), "{stdout}");
    assert!(stdout.contains("START=\nEND=\ntitle=B"), "{stdout}");
}

#[test]
fn generate_json() {
    let output = ffchapters(&[
        "generate",
        "--chapters",
        "tests/fixtures/chapters.csv",
        "--format",
        "json",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["tags"].as_array().map(Vec::len), Some(0));
    assert_eq!(value["chapters"][3]["start_time"], 1_215_500);
    assert_eq!(value["chapters"][1]["title"], "Part 1\\; the beginning");
}

#[test]
fn missing_chapter_file_fails() {
    let output = ffchapters(&["generate", "--chapters", "tests/fixtures/missing.csv"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Chapter file not found"));
}

#[test]
fn embed_fails_when_ffmpeg_cannot_start() {
    let dir = tempfile::tempdir().unwrap();
    let ffmpeg = dir.path().join("not-ffmpeg");
    let output = ffchapters(&[
        "embed",
        "--chapters",
        "tests/fixtures/chapters.csv",
        "--input",
        "in.mkv",
        "--output",
        "out.mkv",
        "--ffmpeg",
        ffmpeg.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to start"));
}

#[cfg(unix)]
#[test]
fn embed_mirrors_ffmpeg_exit_code() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake-ffmpeg");
    let args_file = dir.path().join("args");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$@\" > '{}'\ncat \"$5\" >> '{}'\nexit 7\n",
            args_file.display(),
            args_file.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ffchapters"))
        .args([
            "embed",
            "--chapters",
            "tests/fixtures/chapters.csv",
            "--title",
            "Pilot",
            "--input",
            "in.mkv",
            "--output",
            "out.mkv",
            "--overwrite",
        ])
        .env("FFCHAPTERS_FFMPEG", &script)
        .env_remove("RUST_LOG")
        .output()
        .expect("run CLI");

    assert_eq!(output.status.code(), Some(7), "{}", stderr(&output));

    let seen = fs::read_to_string(&args_file).unwrap();
    assert!(seen.starts_with("-y -i in.mkv -i "), "{seen}");
    assert!(seen.contains("-map 0 -map_metadata 1 -map_chapters 1 -codec copy out.mkv"));
    assert!(seen.contains(";FFMETADATA1\ntitle=Pilot\n"));
}

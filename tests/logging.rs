use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use capture_target::logging::{cleanup_old_logs, init_logging, LogLevel};

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("capture_target_test_{}_{}_{}", label, std::process::id(), nanos));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn write_aged(path: &Path, age_days: u64) {
    fs::write(path, "line\n").unwrap();
    let modified = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}

#[test]
fn cleanup_deletes_only_expired_log_files() {
    let temp = TempDir::new("log_cleanup");
    let expired_rotated = temp.path.join("capture_target.log.2024-01-31");
    let expired_plain = temp.path.join("old.log");
    let recent = temp.path.join("capture_target.log.2024-03-01");
    let expired_other = temp.path.join("settings.json");

    write_aged(&expired_rotated, 40);
    write_aged(&expired_plain, 31);
    write_aged(&recent, 2);
    write_aged(&expired_other, 90);
    fs::create_dir(temp.path.join("archive.log")).unwrap();

    let deleted = cleanup_old_logs(&temp.path, 30).unwrap();

    assert_eq!(deleted, 2);
    assert!(!expired_rotated.exists());
    assert!(!expired_plain.exists());
    assert!(recent.exists());
    assert!(expired_other.exists());
    assert!(temp.path.join("archive.log").is_dir());
}

#[test]
fn cleanup_of_missing_directory_is_an_error() {
    let temp = TempDir::new("log_cleanup_missing");
    assert!(cleanup_old_logs(&temp.path.join("absent"), 30).is_err());
}

#[test]
fn second_init_reloads_the_level() {
    init_logging(LogLevel::Info, false).unwrap();
    init_logging(LogLevel::Debug, false).unwrap();
    init_logging(LogLevel::Off, false).unwrap();
}

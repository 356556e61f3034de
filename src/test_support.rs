use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return what it logged at
/// warn level and above.
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (value, logs)
}

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path());
    temp_dir
}

pub(crate) fn create_test_repo_with_remote() -> TempDir {
    let temp_dir = create_test_repo();
    let path = temp_dir.path();

    // Add remote pointing to itself (simulates a remote for fetch in tests).
    let path_str = path.to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &path_str]);

    temp_dir
}

/// A repository that plays the role of the remote being mirrored.
///
/// Lives at `<tempdir>/upstream.git` (a regular repository, so branches
/// can be committed to) with `main` checked out plus the given branches.
pub(crate) struct UpstreamRepo {
    _temp_dir: TempDir,
    pub(crate) path: PathBuf,
}

impl UpstreamRepo {
    pub(crate) fn with_branches(branches: &[&str]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("upstream.git");
        std::fs::create_dir(&path).unwrap();
        init_repo(&path);

        for branch in branches {
            if *branch != "main" {
                git(&path, &["branch", branch]);
            }
        }

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// The location string to hand to the mirror tool.
    pub(crate) fn location(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    /// Add a commit on `branch`, leaving `main` checked out afterwards.
    pub(crate) fn commit_on(&self, branch: &str, file: &str) {
        git(&self.path, &["checkout", "-q", branch]);
        std::fs::write(self.path.join(file), format!("{}\n", file)).unwrap();
        git(&self.path, &["add", "."]);
        git(&self.path, &["commit", "-q", "-m", &format!("Add {}", file)]);
        git(&self.path, &["checkout", "-q", "main"]);
    }
}

fn init_repo(path: &Path) {
    git(path, &["init", "-q"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-q", "-m", "Initial commit"]);
}

/// Local branch names of a repository, sorted.
pub(crate) fn local_branches(repo: &Path) -> Vec<String> {
    let stdout = git(repo, &["for-each-ref", "--format=%(refname:short)", "refs/heads/"]);
    let mut names: Vec<String> = stdout.lines().map(str::to_string).collect();
    names.sort();
    names
}

/// Full upstream ref of a local branch, empty if it tracks nothing.
pub(crate) fn upstream_ref(repo: &Path, branch: &str) -> String {
    git(
        repo,
        &[
            "for-each-ref",
            "--format=%(upstream)",
            &format!("refs/heads/{}", branch),
        ],
    )
    .trim()
    .to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).to_string()
}

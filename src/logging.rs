use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Cross-platform log directory
pub fn get_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("manifest-client").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("manifest-client"))
}

/// Append-only log file shared by every writer handed to the subscriber
#[derive(Clone)]
pub struct LogFile {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl LogFile {
    /// Create a timestamped log file in `log_dir` and point `latest.log` at it
    pub fn create_in(log_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("manifest-client_{}.log", timestamp));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let latest_path = log_dir.join("latest.log");

        #[cfg(unix)]
        {
            let _ = std::fs::remove_file(&latest_path);
            let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
        }

        #[cfg(windows)]
        {
            let pointer_content = format!("Current log file: {}\n", log_path.display());
            let _ = std::fs::write(&latest_path, pointer_content);
        }

        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path: log_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.file.lock() {
            Ok(mut file) => file.write(buf),
            // A poisoned lock only means another writer panicked mid-line
            Err(poisoned) => poisoned.into_inner().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.file.lock() {
            Ok(mut file) => file.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn wants_stderr(rust_log: Option<&str>) -> bool {
    rust_log.map_or(false, |filter| !filter.trim().is_empty())
}

/// Initialize tracing into a log file, plus compact stderr output when `RUST_LOG` is set.
///
/// `RUST_LOG` overrides the default `info` filter. Returns the log file path
/// so the caller can announce it.
pub fn init_tracing() -> Option<PathBuf> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_file = LogFile::create_in(&get_log_dir()).ok();
    let log_path = log_file.as_ref().map(|f| f.path().to_path_buf());

    // Status lines already go to stdout; mirror the log on stderr only when asked
    let rust_log = std::env::var("RUST_LOG").ok();
    let stderr_layer = wants_stderr(rust_log.as_deref()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .compact()
    });

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_target(true)
            .with_ansi(false)
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if initialized {
        tracing::debug!(target: "manifest_client::logging", "Logging initialized");
    }

    log_path
}

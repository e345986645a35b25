//! Unix socket transport for the line protocol.
//!
//! Connections are served one at a time in accept order, each running the
//! same request/response loop as stdin/stdout against the shared finder.

use super::serve_lines;
use crate::finder::Finder;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use termcolor::NoColor;
use tracing::{debug, info, warn};

/// Bound socket; the socket file is removed when this is dropped
pub struct SocketServer {
    listener: UnixListener,
    path: PathBuf,
}

impl SocketServer {
    /// Bind `path`, replacing a stale socket file left by a previous run
    pub fn bind(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove stale socket {}", path.display()))?;
        }

        let listener = UnixListener::bind(path)
            .with_context(|| format!("Failed to bind to {}", path.display()))?;

        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        info!("listening on {}", path.display());
        Ok(Self {
            listener,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serve connections until `max_connections` have been handled, or
    /// forever when it is `None`. Failed accepts do not count.
    pub fn run(&self, finder: &Finder, max_connections: Option<usize>) -> Result<()> {
        let handled = serve_incoming(finder, self.listener.incoming(), max_connections);
        debug!(handled, "listener stopped");
        Ok(())
    }
}

fn serve_incoming<I>(finder: &Finder, incoming: I, max_connections: Option<usize>) -> usize
where
    I: IntoIterator<Item = io::Result<UnixStream>>,
{
    let mut handled = 0;
    for stream in incoming {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("accept error: {}", e);
                continue;
            }
        };

        if let Err(e) = handle_connection(finder, stream) {
            warn!("connection error: {:#}", e);
        }

        handled += 1;
        if max_connections.is_some_and(|max| handled >= max) {
            break;
        }
    }
    handled
}

impl Drop for SocketServer {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn handle_connection(finder: &Finder, stream: UnixStream) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = NoColor::new(BufWriter::new(stream));
    let stats = serve_lines(finder, &mut reader, &mut writer, false)?;
    debug!(queries = stats.queries, "connection closed");
    Ok(())
}

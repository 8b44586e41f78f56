//! Hot reload of the portal config file.
//!
//! The parent directory is watched rather than the file itself. Editors that
//! save by writing a temporary file and renaming it over the original replace
//! the inode, and a watch on the old inode would go silent after the first save.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::PortalConfig;

/// Sends every valid revision of the config file to the portal.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<PortalConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiver for validated configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<PortalConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let directory = watched_directory(&self.path);
        let file_name = self.path.file_name().map(OsString::from).ok_or_else(|| {
            notify::Error::generic("config path has no file name").add_path(self.path.clone())
        })?;

        let tx = self.update_tx;
        let path = self.path.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !concerns_file(&event, &file_name) {
                        return;
                    }
                    tracing::info!(kind = ?event.kind, "Config file changed, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            let _ = tx.send(config);
                        }
                        Err(e) => tracing::error!(
                            error = %e,
                            "Config reload failed, keeping current settings"
                        ),
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, directory = ?directory, "Config watcher started");
        Ok(watcher)
    }
}

fn watched_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True when the event creates or modifies (including renames onto) the config file.
fn concerns_file(event: &Event, file_name: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind, RenameMode};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_watched_directory() {
        assert_eq!(watched_directory(Path::new("portal.toml")), PathBuf::from("."));
        assert_eq!(
            watched_directory(Path::new("/etc/portal/portal.toml")),
            PathBuf::from("/etc/portal")
        );
    }

    #[test]
    fn test_only_config_file_events_reload() {
        let name = OsString::from("portal.toml");

        assert!(concerns_file(
            &event(EventKind::Create(CreateKind::File), "/etc/portal/portal.toml"),
            &name
        ));
        assert!(concerns_file(
            &event(
                EventKind::Modify(ModifyKind::Name(RenameMode::To)),
                "/etc/portal/portal.toml"
            ),
            &name
        ));
        assert!(!concerns_file(
            &event(EventKind::Create(CreateKind::File), "/etc/portal/.portal.toml.swp"),
            &name
        ));
        assert!(!concerns_file(
            &event(EventKind::Remove(RemoveKind::File), "/etc/portal/portal.toml"),
            &name
        ));
    }
}

//! File-backed config reload through the watcher.

use std::time::Duration;

use device_portal::config::{ConfigWatcher, NotFoundPolicy};

#[tokio::test]
async fn test_rename_over_config_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.toml");
    std::fs::write(&path, "[routing]\nnot_found = \"empty\"\n").unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _handle = watcher.run().unwrap();

    // Two editor-style saves: the second proves the watch survives the first rename.
    for (round, policy) in [("view", NotFoundPolicy::View), ("empty", NotFoundPolicy::Empty)] {
        let staged = dir.path().join(format!("portal.toml.{round}"));
        std::fs::write(&staged, format!("[routing]\nnot_found = \"{round}\"\n")).unwrap();
        std::fs::rename(&staged, &path).unwrap();

        let received = tokio::time::timeout(Duration::from_secs(10), async {
            while let Some(config) = updates.recv().await {
                if config.routing.not_found == policy {
                    return config;
                }
            }
            panic!("watcher channel closed");
        })
        .await
        .expect("Config update should arrive after rename");
        assert_eq!(received.routing.not_found, policy);
    }
}

#[tokio::test]
async fn test_invalid_revision_is_not_sent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.toml");
    std::fs::write(&path, "").unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _handle = watcher.run().unwrap();

    std::fs::write(&path, "[routing]\nmax_history = 0\n").unwrap();
    std::fs::write(&path, "[routing]\nnot_found = \"view\"\n").unwrap();

    tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(config) = updates.recv().await {
            assert!(config.routing.max_history > 0, "invalid config was sent");
            if config.routing.not_found == NotFoundPolicy::View {
                return;
            }
        }
        panic!("watcher channel closed");
    })
    .await
    .expect("Config update should arrive");
}

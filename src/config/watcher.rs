use super::types::{Config, ConfigDelta};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use winit::event_loop::EventLoopProxy;

/// Custom user event for the winit event loop.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// The config file changed and the new contents validated.
    ConfigReloaded(Config, ConfigDelta),
}

/// Where reload events go. The app hands in its event loop proxy.
pub trait ReloadSink: Send + 'static {
    /// Deliver an event; `false` once the receiving side is gone.
    fn deliver(&self, event: UserEvent) -> bool;
}

impl ReloadSink for EventLoopProxy<UserEvent> {
    fn deliver(&self, event: UserEvent) -> bool {
        self.send_event(event).is_ok()
    }
}

/// Tracks the last applied config and turns file events into reloads.
struct ReloadTracker {
    path: PathBuf,
    applied: Config,
}

impl ReloadTracker {
    fn touches_config(&self, event: &notify::Event) -> bool {
        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == self.path.file_name())
    }

    /// Re-read the file after a relevant event. Returns the reload to send,
    /// or `None` when the file is unreadable, invalid, or unchanged.
    fn on_event(&mut self, event: &notify::Event) -> Option<UserEvent> {
        if !self.touches_config(event) {
            return None;
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| log::warn!("Cannot read {}: {e}", self.path.display()))
            .ok()?;
        self.reload_from(&contents)
    }

    fn reload_from(&mut self, contents: &str) -> Option<UserEvent> {
        let next = match Config::from_toml(contents) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Ignoring config edit, layout keeps previous settings: {e}");
                return None;
            }
        };
        let delta = self.applied.diff(&next);
        if delta.is_empty() {
            return None;
        }
        let resized = next.window.width != self.applied.window.width
            || next.window.height != self.applied.window.height;
        if resized {
            log::info!("Window size in config changed; it applies on next launch");
        }
        self.applied = next.clone();
        Some(UserEvent::ConfigReloaded(next, delta))
    }
}

/// Watches the config file and forwards validated changes to the event loop.
///
/// Stops watching when dropped.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Start watching `path`, diffing against `applied`.
    pub fn new(path: &Path, applied: Config, sink: impl ReloadSink) -> Result<Self, notify::Error> {
        let mut tracker = ReloadTracker {
            path: path.to_path_buf(),
            applied,
        };
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    if let Some(reload) = tracker.on_event(&event) {
                        log::info!("Config reloaded from {}", tracker.path.display());
                        if !sink.deliver(reload) {
                            log::debug!("Event loop closed, dropping config reload");
                        }
                    }
                }
                Err(e) => log::warn!("File watcher error: {e}"),
            }
        })?;

        // Editors often save by rename, so watch the directory.
        let watch_dir = path.parent().unwrap_or(path);
        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self { _watcher: watcher })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resize::ResizeStrategy;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use std::sync::mpsc;
    use std::time::Duration;

    impl ReloadSink for mpsc::Sender<UserEvent> {
        fn deliver(&self, event: UserEvent) -> bool {
            self.send(event).is_ok()
        }
    }

    fn tracker(path: &Path) -> ReloadTracker {
        ReloadTracker {
            path: path.to_path_buf(),
            applied: Config::default(),
        }
    }

    fn event(kind: EventKind, path: &Path) -> notify::Event {
        notify::Event::new(kind).add_path(path.to_path_buf())
    }

    #[test]
    fn strategy_change_produces_layout_delta() {
        let mut t = tracker(Path::new("config.toml"));
        let reload = t.reload_from("[layout]\nresize_strategy = \"fixed_pixel\"\n");
        let Some(UserEvent::ConfigReloaded(config, delta)) = reload else {
            panic!("expected a reload");
        };
        assert_eq!(config.layout.resize_strategy, ResizeStrategy::FixedPixel);
        assert!(delta.layout_changed);
        assert!(!delta.interaction_changed);
        assert!(!delta.window_changed);
    }

    #[test]
    fn unchanged_contents_do_not_reload() {
        let mut t = tracker(Path::new("config.toml"));
        assert!(t.reload_from("").is_none());
        assert!(t.reload_from("[interaction]\nhit_margin = 6.0\n").is_some());
        // Same edit saved twice.
        assert!(t.reload_from("[interaction]\nhit_margin = 6.0\n").is_none());
    }

    #[test]
    fn invalid_edit_keeps_applied_config() {
        let mut t = tracker(Path::new("config.toml"));
        assert!(t.reload_from("[interaction]\nhit_margin = -1.0\n").is_none());
        assert!(t.reload_from("[layout\n").is_none());
        assert_eq!(t.applied, Config::default());
    }

    #[test]
    fn unrelated_files_and_removals_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[interaction]\nhit_margin = 9.0\n").unwrap();
        let mut t = tracker(&path);

        let other = dir.path().join("notes.txt");
        assert!(t.on_event(&event(EventKind::Create(CreateKind::File), &other)).is_none());
        assert!(t.on_event(&event(EventKind::Remove(RemoveKind::File), &path)).is_none());
        assert!(t
            .on_event(&event(EventKind::Modify(ModifyKind::Any), &path))
            .is_some());
    }

    #[test]
    fn missing_file_on_event_is_not_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut t = tracker(&path);
        assert!(t.on_event(&event(EventKind::Create(CreateKind::File), &path)).is_none());
    }

    #[test]
    fn watcher_delivers_reload_for_file_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[layout]\nresize_strategy = \"proportional\"\n").unwrap();

        let (tx, rx) = mpsc::channel::<UserEvent>();
        let _watcher = ConfigWatcher::new(&path, Config::default(), tx).unwrap();

        std::thread::sleep(Duration::from_millis(200));
        std::fs::write(&path, "[layout]\nresize_strategy = \"fixed_offset\"\n").unwrap();

        let UserEvent::ConfigReloaded(config, delta) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(config.layout.resize_strategy, ResizeStrategy::FixedOffset);
        assert!(delta.layout_changed);
    }
}

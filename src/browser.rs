//! Best-effort browser launch

use std::thread;

use crate::logger;

/// Ask the OS to open `url` in the default browser.
///
/// Any failure is ignored. Returns whether the launcher reported success.
pub fn open_in_browser(url: &str) -> bool {
    open::that(url).is_ok()
}

/// Launch on a detached thread; the runtime never waits for it on shutdown.
pub fn spawn_open(url: String) {
    spawn_launcher(move || {
        let _ = open_in_browser(&url);
    });
}

fn spawn_launcher<F>(launch: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = thread::Builder::new()
        .name("browser-launch".to_string())
        .spawn(launch)
    {
        logger::log_warning(&format!("Could not start browser launcher: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_hung_launcher_does_not_block_runtime_shutdown() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async move {
            spawn_launcher(move || {
                let _ = release_rx.recv();
            });
        });

        let started = Instant::now();
        drop(runtime);
        assert!(started.elapsed() < Duration::from_secs(1));

        drop(release_tx);
    }
}

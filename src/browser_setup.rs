//! Chromium discovery, launch and teardown
//!
//! A harvest owns exactly one browser. [`BrowserSession`] ties the browser
//! process, its CDP handler task and its profile directory together so that
//! all three are released on every exit path.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};
use uuid::Uuid;

use crate::utils::constants::CHROME_USER_AGENT;

/// Find a Chrome/Chromium executable on this machine.
///
/// `CHROMIUM_PATH` overrides everything else.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!(
                "Using browser from CHROMIUM_PATH environment variable: {}",
                path.display()
            );
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH environment variable points to non-existent file: {}",
            path.display()
        );
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
        ]
    };

    if let Some(path) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!("Found browser using 'which' command: {found}");
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    warn!("No Chrome/Chromium executable found. Will download and use fetcher.");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download a managed Chromium build into the user cache directory.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("Downloading managed Chromium browser...");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir();
            warn!(
                "Could not determine user cache directory, using {}",
                fallback.display()
            );
            fallback
        })
        .join("shopscrape")
        .join("chromium");

    tokio::fs::create_dir_all(&cache_dir)
        .await
        .context("Failed to create cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );

    let revision_info = fetcher.fetch().await.context("Failed to fetch browser")?;
    info!(
        "Downloaded Chromium to: {}",
        revision_info.folder_path.display()
    );

    Ok(revision_info.executable_path)
}

/// A launched browser with its handler task and profile directory
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    /// Profile directory to delete on shutdown; `None` once removed or caller-owned
    owned_profile_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Open a new tab at `url`.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        self.browser
            .new_page(url)
            .await
            .with_context(|| format!("Failed to open page {url}"))
    }

    /// Close the browser, stop its handler and remove the temporary profile.
    ///
    /// Failures are logged, never returned: teardown must not mask the
    /// outcome of the harvest itself.
    pub async fn shutdown(mut self) {
        log::debug!(target: "shopscrape::cleanup", "Closing browser");
        if let Err(e) = self.browser.close().await {
            log::warn!(target: "shopscrape::cleanup", "Failed to close browser: {e}");
        }

        // Wait for the process to exit so the profile directory is unlocked
        if let Err(e) = self.browser.wait().await {
            log::warn!(target: "shopscrape::cleanup", "Failed to wait for browser exit: {e}");
        }

        self.handler.abort();
        self.remove_profile_dir();
        log::info!(target: "shopscrape::cleanup", "Browser session closed");
    }

    fn remove_profile_dir(&mut self) {
        if let Some(dir) = self.owned_profile_dir.take() {
            log::debug!(target: "shopscrape::cleanup", "Removing profile directory {}", dir.display());
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                log::warn!(
                    target: "shopscrape::cleanup",
                    "Failed to remove profile directory {}: {e}",
                    dir.display()
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Browser::drop kills the process; the handler has to be stopped here
        self.handler.abort();
        if self.owned_profile_dir.is_some() {
            log::warn!(
                target: "shopscrape::cleanup",
                "BrowserSession dropped without shutdown(), cleaning up in Drop"
            );
            self.remove_profile_dir();
        }
    }
}

/// Find or download Chromium and launch it.
///
/// When `chrome_data_dir` is `None` a unique temporary profile is created and
/// removed again when the session ends. A caller-supplied directory is left
/// in place.
pub async fn launch_browser(
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
) -> Result<BrowserSession> {
    let chrome_path = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let (user_data_dir, owned_profile_dir) = match chrome_data_dir {
        Some(dir) => (dir, None),
        None => {
            let dir = std::env::temp_dir().join(format!("shopscrape_chrome_{}", Uuid::new_v4()));
            (dir.clone(), Some(dir))
        }
    };

    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir)
        .chrome_executable(chrome_path);

    if headless {
        config_builder = config_builder.headless_mode(HeadlessMode::default());
    } else {
        config_builder = config_builder.with_head();
    }

    let browser_config = config_builder
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--no-sandbox")
        .arg("--disable-setuid-sandbox")
        .arg("--disable-extensions")
        .arg("--disable-popup-blocking")
        .arg("--disable-background-timer-throttling")
        .arg("--disable-backgrounding-occluded-windows")
        .arg("--password-store=basic")
        .arg("--use-mock-keychain")
        .arg("--hide-scrollbars")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser (headless: {headless})");
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let error_msg = e.to_string();
                // chromiumoxide cannot decode some newer CDP events; those are harmless
                if error_msg.contains("data did not match any variant of untagged enum Message")
                    || error_msg.contains("Failed to deserialize WS response")
                {
                    trace!("Suppressed benign CDP serialization error: {error_msg}");
                } else {
                    error!("Browser handler error: {:?}", e);
                }
            }
        }
        info!("Browser handler task completed");
    });

    Ok(BrowserSession {
        browser,
        handler,
        owned_profile_dir,
    })
}

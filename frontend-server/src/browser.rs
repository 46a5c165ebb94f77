//! Best-effort launch of the desktop browser.

use tokio::process::Command;

/// Program and arguments that open `url` with the platform's default handler.
pub fn opener(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        (
            "cmd",
            vec!["/C".into(), "start".into(), String::new(), url.to_string()],
        )
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Open `url` in the default browser. Failures are logged, never fatal.
pub fn open_browser(url: &str) {
    let (program, args) = opener(url);

    match Command::new(program).args(&args).spawn() {
        Ok(_) => tracing::info!(url = %url, "Opened browser"),
        Err(e) => tracing::warn!(url = %url, program, "Could not open browser: {}", e),
    }
}

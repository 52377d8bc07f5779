// Environment detection utilities

/// Check if we're running somewhere a browser can't be launched
///
/// Headless mode is detected when:
/// - SSH_TTY or SSH_CONNECTION environment variables are set (SSH session)
/// - CI environment is detected
/// - TERM is set to "dumb"
/// - On Linux/BSD: neither DISPLAY nor WAYLAND_DISPLAY is set
///
/// Note: macOS and Windows don't use DISPLAY, so it isn't checked there
pub fn is_headless_environment() -> bool {
    detect_headless(|key| std::env::var(key).ok())
}

fn detect_headless<F>(var: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if var("SSH_TTY").is_some() || var("SSH_CONNECTION").is_some() {
        tracing::debug!("Headless detected: SSH session");
        return true;
    }

    if var("CI").is_some() {
        tracing::debug!("Headless detected: CI environment");
        return true;
    }

    if var("TERM").as_deref() == Some("dumb") {
        tracing::debug!("Headless detected: TERM is 'dumb'");
        return true;
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if var("DISPLAY").is_none() && var("WAYLAND_DISPLAY").is_none() {
            tracing::debug!("Headless detected: no DISPLAY or WAYLAND_DISPLAY");
            return true;
        }
    }

    tracing::debug!("Not headless: detected graphical environment");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_ssh_session_is_headless() {
        assert!(detect_headless(env(&[
            ("SSH_CONNECTION", "10.0.0.1 22 10.0.0.2 22"),
            ("DISPLAY", ":0"),
        ])));
    }

    #[test]
    fn test_ci_is_headless() {
        assert!(detect_headless(env(&[("CI", "true"), ("DISPLAY", ":0")])));
    }

    #[test]
    fn test_dumb_terminal_is_headless() {
        assert!(detect_headless(env(&[("TERM", "dumb"), ("DISPLAY", ":0")])));
    }

    #[test]
    fn test_desktop_session_is_not_headless() {
        assert!(!detect_headless(env(&[
            ("TERM", "xterm-256color"),
            ("DISPLAY", ":0"),
        ])));
        assert!(!detect_headless(env(&[("WAYLAND_DISPLAY", "wayland-0")])));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_missing_display_is_headless() {
        assert!(detect_headless(env(&[("TERM", "xterm-256color")])));
    }
}

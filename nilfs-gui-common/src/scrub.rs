//! Cleanup of privileged command output before it is shown to the user

use once_cell::sync::Lazy;
use regex::Regex;

/// Line echoed by gksu when it passes the password to sudo
const CREDENTIAL_ECHO: &str = "GNOME_SUDO_PASS\n";

static BAD_PASSWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sudo: \d+ incorrect password attempts?\s*").expect("valid regex"));

/// Remove elevation wrapper noise from command output
///
/// Strips every credential-echo line and every "incorrect password attempt"
/// notice. Applying it twice gives the same result as applying it once.
pub fn scrub_output(output: &str) -> String {
    let mut text = output.to_string();

    // Removing one artifact can splice two halves of another together
    loop {
        let next = BAD_PASSWORD_RE
            .replace_all(&text.replace(CREDENTIAL_ECHO, ""), "")
            .into_owned();
        if next == text {
            return text;
        }
        text = next;
    }
}

/// Scrubbed output, or `None` when nothing but whitespace is left
pub fn response_text(output: &str) -> Option<String> {
    let text = scrub_output(output);
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_known_artifacts() {
        let raw = "GNOME_SUDO_PASS\nsudo: 1 incorrect password attempt\nDone.\n";
        assert_eq!(scrub_output(raw), "Done.\n");
    }

    #[test]
    fn test_scrub_is_idempotent() {
        let samples = [
            "GNOME_SUDO_PASS\nsudo: 1 incorrect password attempt\nDone.\n",
            "GNOME_SUDOGNOME_SUDO_PASS\n_PASS\nok",
            "sudo: 3 incorrect password attempts\n",
            "mount: /mnt/x: wrong fs type\n",
            "",
        ];
        for raw in samples {
            let once = scrub_output(raw);
            assert_eq!(scrub_output(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_response_text_whitespace_only() {
        assert_eq!(response_text("GNOME_SUDO_PASS\n  \n"), None);
        assert_eq!(response_text(""), None);
        assert_eq!(
            response_text("umount: /mnt/x: target is busy.\n").as_deref(),
            Some("umount: /mnt/x: target is busy.\n")
        );
    }
}

//! The three share tiers.

use std::io::{self, IsTerminal, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;

use super::{ShareError, ShareTarget, ShareTier};
use crate::core::storage::KeyValueStore;

// ============================================================================
// System clipboard
// ============================================================================

/// Pipes the text into a platform clipboard program.
pub struct SystemClipboard {
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    /// `command` overrides detection (e.g. `["wl-copy"]`).
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self { command }
    }

    fn candidates(&self) -> Vec<Vec<String>> {
        match &self.command {
            Some(command) => vec![command.clone()],
            None => detected_commands(),
        }
    }
}

/// Clipboard programs worth trying on this platform, most specific first.
fn detected_commands() -> Vec<Vec<String>> {
    let to_argv = |argv: &[&str]| argv.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    if cfg!(target_os = "macos") {
        return vec![to_argv(&["pbcopy"])];
    }
    if cfg!(windows) {
        return vec![to_argv(&["clip"])];
    }

    let mut commands = Vec::new();
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        commands.push(to_argv(&["wl-copy"]));
    }
    if std::env::var_os("DISPLAY").is_some() {
        commands.push(to_argv(&["xclip", "-selection", "clipboard"]));
        commands.push(to_argv(&["xsel", "--clipboard", "--input"]));
    }
    commands
}

fn run_clipboard_command(argv: &[String], text: &str) -> Result<(), ShareError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ShareError::Unavailable("empty clipboard command".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let status = feed_and_wait(&mut child, text)?;
    if status.success() {
        Ok(())
    } else {
        Err(ShareError::Unavailable(format!("{program} exited with {status}")))
    }
}

/// Writes `text` to the child's stdin, then always reaps the child, even
/// when it exited before reading everything.
fn feed_and_wait(child: &mut Child, text: &str) -> Result<ExitStatus, ShareError> {
    // Dropping stdin closes the pipe so the program sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait();
    written?;
    Ok(status?)
}

impl ShareTarget for SystemClipboard {
    fn tier(&self) -> ShareTier {
        ShareTier::SystemClipboard
    }

    fn write(&self, text: &str) -> Result<(), ShareError> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            return Err(ShareError::Unavailable("no clipboard program detected".to_string()));
        }

        let mut last_error = None;
        for argv in candidates {
            debug!("Trying clipboard command {:?}", argv);
            match run_clipboard_command(&argv, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("Clipboard command {:?} failed: {}", argv, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(ShareError::AllTiersFailed))
    }
}

// ============================================================================
// Terminal clipboard (OSC 52)
// ============================================================================

/// `ESC ] 52 ; c ; <base64> BEL`, understood by most modern terminals.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Asks the terminal itself to set the clipboard. Nothing is drawn.
///
/// The escape sequence has no acknowledgement, so on a TTY this tier always
/// reports success, even on terminals that ignore OSC 52. Tiers after it only
/// run when stdout is not a terminal or the tier is disabled with
/// `share.terminal_clipboard = false`.
pub struct TerminalClipboard {
    sink: Mutex<Box<dyn Write + Send>>,
    require_tty: bool,
}

impl TerminalClipboard {
    pub fn stdout() -> Self {
        Self {
            sink: Mutex::new(Box::new(io::stdout())),
            require_tty: true,
        }
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            require_tty: false,
        }
    }
}

impl ShareTarget for TerminalClipboard {
    fn tier(&self) -> ShareTier {
        ShareTier::TerminalClipboard
    }

    fn write(&self, text: &str) -> Result<(), ShareError> {
        if self.require_tty && !io::stdout().is_terminal() {
            return Err(ShareError::Unavailable("stdout is not a terminal".to_string()));
        }

        let mut sink = self
            .sink
            .lock()
            .map_err(|_| ShareError::Unavailable("terminal writer poisoned".to_string()))?;
        sink.write_all(osc52_sequence(text).as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

// ============================================================================
// Persistent slot
// ============================================================================

/// Last resort: keep the text in the key-value store for manual recovery.
pub struct PersistentSlot {
    store: KeyValueStore,
    key: String,
}

impl PersistentSlot {
    pub fn new(store: KeyValueStore, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }
}

impl ShareTarget for PersistentSlot {
    fn tier(&self) -> ShareTier {
        ShareTier::PersistentSlot
    }

    fn write(&self, text: &str) -> Result<(), ShareError> {
        self.store.set(&self.key, text)?;
        Ok(())
    }
}

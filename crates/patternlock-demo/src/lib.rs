//! Host screen for the pattern lock widget.
//!
//! [`LockScreen`] is the finish-callback side of the two-phase protocol:
//! in setup mode the first sufficiently long gesture becomes the pending
//! candidate and a matching second gesture confirms it as the secret; in
//! authenticate mode a gesture is accepted exactly when it matches the
//! stored secret. The widget itself never interprets patterns.

use patternlock_core::GestureResult;

/// Minimum number of cells a new pattern must connect.
pub const MIN_PATTERN_CELLS: usize = 4;

/// Which side of the protocol the screen is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Registering a new pattern (draw, then confirm).
    Setup,
    /// Verifying gestures against the stored secret.
    Authenticate,
}

/// The host-side setup/confirm/authenticate controller.
#[derive(Debug)]
pub struct LockScreen {
    mode: Mode,
    /// First accepted setup gesture, awaiting confirmation.
    candidate: Option<String>,
    /// Confirmed secret in dash-joined form. Empty until setup completes.
    secret: String,
    tips: String,
}

impl Default for LockScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LockScreen {
    /// Create a screen in setup mode.
    pub fn new() -> Self {
        let mut screen = Self {
            mode: Mode::Setup,
            candidate: None,
            secret: String::new(),
            tips: String::new(),
        };
        screen.enter_setup();
        screen
    }

    /// Switch to setup mode, dropping any candidate and stored secret.
    pub fn enter_setup(&mut self) {
        self.mode = Mode::Setup;
        self.candidate = None;
        self.secret.clear();
        self.tips = "Draw an unlock pattern".to_string();
    }

    /// Switch to authenticate mode, keeping the stored secret.
    pub fn enter_authenticate(&mut self) {
        self.mode = Mode::Authenticate;
        self.candidate = None;
        self.tips = "Draw pattern to unlock".to_string();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current user-facing hint.
    pub fn tips(&self) -> &str {
        &self.tips
    }

    /// The confirmed secret, empty until setup completes.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether a candidate is pending confirmation.
    pub fn awaiting_confirmation(&self) -> bool {
        self.candidate.is_some()
    }

    /// The widget's finish callback. Returns the accept/reject decision
    /// the widget uses for error coloring.
    pub fn on_finish(&mut self, result: &GestureResult) -> bool {
        match self.mode {
            Mode::Setup => self.on_setup_finish(result),
            Mode::Authenticate => self.on_authenticate_finish(result),
        }
    }

    fn on_setup_finish(&mut self, result: &GestureResult) -> bool {
        if let Some(candidate) = &self.candidate {
            if result.as_str() == candidate {
                self.secret = candidate.clone();
                self.candidate = None;
                self.mode = Mode::Authenticate;
                self.tips = "Password has setup successfully!".to_string();
                log::info!("pattern confirmed, switching to authenticate mode");
                return true;
            }
            self.tips = "Try again".to_string();
            return false;
        }

        if result.len() < MIN_PATTERN_CELLS {
            self.tips = "Connect at least 4 dots, Try again.".to_string();
            return false;
        }

        self.candidate = Some(result.as_str().to_string());
        self.tips = "Draw pattern again to confirm".to_string();
        true
    }

    fn on_authenticate_finish(&mut self, result: &GestureResult) -> bool {
        if result.as_str() == self.secret {
            self.tips = "Unlock successful".to_string();
            log::info!("unlock successful");
            return true;
        }
        self.tips = "Try again".to_string();
        false
    }
}

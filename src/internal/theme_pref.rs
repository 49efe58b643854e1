use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use strum_macros::{Display, EnumString};

/// Binary display preference. The `Display`/`FromStr` forms are the literal
/// strings written to persistent storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Storage seam for the persisted theme preference.
///
/// Injected into the application root so tests can substitute
/// [`MemoryPreferenceStore`] for the file-backed implementation. Writes are
/// best-effort: failures are logged, never surfaced.
pub trait PreferenceStore {
    fn read(&self) -> Option<ThemeMode>;
    fn write(&self, mode: ThemeMode);
}

/// File-backed store: a single file holding `light` or `dark`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the user config dir, e.g. `~/.config/tui-article-app/theme`.
    pub fn in_config_dir() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tui-article-app");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        Ok(Self::new(config_dir.join("theme")))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self) -> Option<ThemeMode> {
        let content = fs::read_to_string(&self.path).ok()?;
        ThemeMode::from_str(content.trim()).ok()
    }

    fn write(&self, mode: ThemeMode) {
        if let Err(e) = fs::write(&self.path, mode.to_string()) {
            tracing::error!("Failed to persist theme preference: {}", e);
        }
    }
}

/// In-memory store used by tests and as a fallback when no config directory
/// is available.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    mode: RefCell<Option<ThemeMode>>,
    writes: Cell<usize>,
}

impl MemoryPreferenceStore {
    pub fn with_mode(mode: ThemeMode) -> Self {
        Self {
            mode: RefCell::new(Some(mode)),
            writes: Cell::new(0),
        }
    }

    /// Number of completed writes, for observing persistence in tests.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self) -> Option<ThemeMode> {
        *self.mode.borrow()
    }

    fn write(&self, mode: ThemeMode) {
        *self.mode.borrow_mut() = Some(mode);
        self.writes.set(self.writes.get() + 1);
    }
}

// Shared handles delegate, so a test can keep a handle to the fake it
// injected and observe writes from the outside.
impl<S: PreferenceStore + ?Sized> PreferenceStore for std::rc::Rc<S> {
    fn read(&self) -> Option<ThemeMode> {
        (**self).read()
    }

    fn write(&self, mode: ThemeMode) {
        (**self).write(mode)
    }
}

/// Detect the terminal's background mode as the default when no preference
/// has been stored yet.
pub fn detect_environment_mode() -> ThemeMode {
    // COLORFGBG is "foreground;background"; background values 0-7 are
    // typically dark, 8-15 light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG")
        && let Some(bg) = colorfgbg.split(';').next_back()
        && let Ok(bg_val) = bg.parse::<u8>()
    {
        return if bg_val < 8 {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        };
    }

    // Dark backgrounds are the common default for terminals.
    ThemeMode::Dark
}

/// Session-lifetime owner of the active theme mode and its storage.
///
/// `initialize` runs once per session: stored value if present, environment
/// default otherwise. `toggle` flips the active mode and writes it back in
/// the same step, so the displayed and persisted values never diverge.
pub struct ThemePreference {
    mode: ThemeMode,
    store: Box<dyn PreferenceStore>,
}

impl ThemePreference {
    pub fn initialize(store: Box<dyn PreferenceStore>) -> Self {
        let mode = store.read().unwrap_or_else(detect_environment_mode);
        tracing::info!("Theme preference initialized: {}", mode);
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggle();
        self.store.write(self.mode);
        self.mode
    }
}

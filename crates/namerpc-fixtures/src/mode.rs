//! The process-wide live-mode toggle.

use std::env;
use std::sync::OnceLock;

/// Environment variable that switches fixtures off.
pub const LIVE_ENV: &str = "LIVE";

/// Whether fixtures answer calls or the real network does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureMode {
    #[default]
    Recorded,
    Live,
}

impl FixtureMode {
    /// Mode for this process. `LIVE` is read once; later changes to the
    /// environment are ignored.
    pub fn from_env() -> Self {
        static MODE: OnceLock<FixtureMode> = OnceLock::new();
        *MODE.get_or_init(|| {
            let mode = Self::from_flag(env::var(LIVE_ENV).ok().as_deref());
            tracing::debug!(?mode, "fixture mode");
            mode
        })
    }

    /// Interpret a raw `LIVE` value. Any non-empty value means live,
    /// `0` and `false` included.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            None | Some("") => Self::Recorded,
            Some(_) => Self::Live,
        }
    }

    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

pub fn is_live() -> bool {
    FixtureMode::from_env().is_live()
}

/// Returns `true` when the calling test should bail out because it only
/// makes sense against fixtures.
///
/// ```rust,ignore
/// if pending_in_live() {
///     return;
/// }
/// ```
pub fn pending_in_live() -> bool {
    if is_live() {
        tracing::info!("disabled in live mode");
        return true;
    }
    false
}

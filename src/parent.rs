//! Parent (host) applications a tool may run under.
//!
//! A parent application is the digital-content-creation program embedding the
//! current process, or `Standalone` when nothing embeds it. Detection runs a
//! fixed-priority probe table once per process; callers thread the resolved
//! value through [`crate::AppContext`] instead of re-probing.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable that forces the detected parent application.
pub const ENV_PARENT_APPLICATION: &str = "MECO_PARENT_APPLICATION";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentApplication {
    All,
    Houdini,
    Katana,
    Mari,
    Maya,
    Nuke,
    Photoshop,
    Standalone,
    ZBrush,
}

impl ParentApplication {
    pub const ALL_VALUES: [ParentApplication; 9] = [
        ParentApplication::All,
        ParentApplication::Houdini,
        ParentApplication::Katana,
        ParentApplication::Mari,
        ParentApplication::Maya,
        ParentApplication::Nuke,
        ParentApplication::Photoshop,
        ParentApplication::Standalone,
        ParentApplication::ZBrush,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParentApplication::All => "all",
            ParentApplication::Houdini => "houdini",
            ParentApplication::Katana => "katana",
            ParentApplication::Mari => "mari",
            ParentApplication::Maya => "maya",
            ParentApplication::Nuke => "nuke",
            ParentApplication::Photoshop => "photoshop",
            ParentApplication::Standalone => "standalone",
            ParentApplication::ZBrush => "zbrush",
        }
    }

    /// Concrete host programs, sorted by name. `All` and `Standalone` are
    /// placeholders rather than hosts and are left out.
    pub fn selectable() -> Vec<ParentApplication> {
        let mut hosts: Vec<ParentApplication> = Self::ALL_VALUES
            .into_iter()
            .filter(|app| !matches!(app, ParentApplication::All | ParentApplication::Standalone))
            .collect();
        hosts.sort_by_key(|app| app.as_str());
        hosts
    }

    /// Whether an application declaring `declared` may run under `self`.
    ///
    /// `All` on the query side matches everything; on the declaration side it
    /// only matches when literally requested.
    pub fn admits(&self, declared: &[ParentApplication]) -> bool {
        matches!(self, ParentApplication::All) || declared.contains(self)
    }
}

impl fmt::Display for ParentApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ParentApplication {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        for app in Self::ALL_VALUES {
            if app.as_str() == lowered {
                return Ok(app);
            }
        }
        bail!(
            "Unknown parent application: {value} (expected one of {})",
            Self::ALL_VALUES.map(|app| app.as_str()).join(", ")
        )
    }
}

impl FromStr for ParentApplication {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ParentApplication::try_from(s)
    }
}

/// Answers whether a given host's embedding runtime is present.
pub trait HostProbe {
    fn is_embedded_in(&self, host: ParentApplication) -> bool;
}

impl<F> HostProbe for F
where
    F: Fn(ParentApplication) -> bool,
{
    fn is_embedded_in(&self, host: ParentApplication) -> bool {
        self(host)
    }
}

struct ProbeSpec {
    host: ParentApplication,
    env_var: &'static str,
}

// Priority order matters: the first host whose runtime is present wins.
const PROBE_SPECS: &[ProbeSpec] = &[
    ProbeSpec {
        host: ParentApplication::Houdini,
        env_var: "HFS",
    },
    ProbeSpec {
        host: ParentApplication::Katana,
        env_var: "KATANA_ROOT",
    },
    ProbeSpec {
        host: ParentApplication::Mari,
        env_var: "MARI_ROOT",
    },
    ProbeSpec {
        host: ParentApplication::Maya,
        env_var: "MAYA_LOCATION",
    },
    ProbeSpec {
        host: ParentApplication::Nuke,
        env_var: "NUKE_ROOT",
    },
];

/// Probes the process environment for each host's embedding variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvProbe;

impl HostProbe for EnvProbe {
    fn is_embedded_in(&self, host: ParentApplication) -> bool {
        PROBE_SPECS
            .iter()
            .filter(|probe| probe.host == host)
            .any(|probe| env_non_empty(probe.env_var).is_some())
    }
}

/// Resolve the parent application by running `probe` over the fixed priority
/// order (Houdini, Katana, Mari, Maya, Nuke). Falls back to `Standalone`.
pub fn detect_parent_application(probe: &dyn HostProbe) -> ParentApplication {
    PROBE_SPECS
        .iter()
        .map(|probe| probe.host)
        .find(|host| probe.is_embedded_in(*host))
        .unwrap_or(ParentApplication::Standalone)
}

/// Resolve the current parent application from the environment.
///
/// `MECO_PARENT_APPLICATION` takes precedence when it names a known value;
/// unknown values are ignored with a warning.
pub fn current_parent_application() -> ParentApplication {
    if let Some(raw) = env_non_empty(ENV_PARENT_APPLICATION) {
        match ParentApplication::try_from(raw.as_str()) {
            Ok(app) => return app,
            Err(err) => tracing::warn!("ignoring {ENV_PARENT_APPLICATION}: {err}"),
        }
    }
    detect_parent_application(&EnvProbe)
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

//! Preset tiers selecting which manifests are loaded.
use std::fmt;

/// Provisioning preset. Each tier includes every lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Preset {
    /// Command-line essentials.
    Minimal,
    /// Minimal plus server tooling.
    Server,
    /// Server plus a graphical desktop.
    Desktop,
}

/// Manifest file for each tier, lowest first.
const MANIFESTS: [(Preset, &str); 3] = [
    (Preset::Minimal, "minimal.json"),
    (Preset::Server, "server.json"),
    (Preset::Desktop, "desktop.json"),
];

impl Preset {
    /// Parse an interactive menu choice. Only the exact strings `"1"`, `"2"`
    /// and `"3"` are accepted.
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Minimal),
            "2" => Some(Self::Server),
            "3" => Some(Self::Desktop),
            _ => None,
        }
    }

    /// Manifest file names to load for this preset, in load order.
    pub fn manifest_files(self) -> impl Iterator<Item = &'static str> {
        MANIFESTS
            .into_iter()
            .filter(move |(tier, _)| *tier <= self)
            .map(|(_, file)| file)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Server => write!(f, "server"),
            Self::Desktop => write!(f, "desktop"),
        }
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::format_bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Flat,
    PackVersion,
    AssetBundle,
}

/// One deletable directory found by a scan. The path is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub kind: EntryKind,
    pub in_use: Option<bool>,
    pub is_latest: bool,
}

impl Entry {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>, size_bytes: u64, kind: EntryKind) -> Self {
        Self { label: label.into(), path: path.into(), size_bytes, kind, in_use: None, is_latest: false }
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use.unwrap_or(false)
    }

    /// Versions of a pack are shown with the pack name in front.
    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::PackVersion => {
                let parent = self.path.parent().and_then(Path::file_name).map(|n| n.to_string_lossy());
                match parent {
                    Some(parent) => format!("{}/{}", parent, self.label),
                    None => self.label.clone(),
                }
            },
            EntryKind::Flat | EntryKind::AssetBundle => self.label.clone(),
        }
    }
}

/// A named group owning its installed versions, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub versions: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Entry(Entry),
    Component(Component),
}

impl Candidate {
    pub fn is_in_use(&self) -> bool {
        match self {
            Candidate::Entry(entry) => entry.is_in_use(),
            Candidate::Component(_) => false,
        }
    }

    /// Flattens components into one candidate for the whole pack followed by one per version.
    pub fn from_components(components: Vec<Component>) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for component in components {
            let versions = component.versions.clone();
            candidates.push(Candidate::Component(component));
            candidates.extend(versions.into_iter().map(Candidate::Entry));
        }
        candidates
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Entry(entry) => {
                let indent = if entry.kind == EntryKind::PackVersion { "    " } else { "" };
                write!(f, "{}{}  {}", indent, entry.display_name(), format_bytes(entry.size_bytes))?;
                if entry.is_latest {
                    write!(f, "  [latest]")?;
                }
                if entry.is_in_use() {
                    write!(f, "  [in use]")?;
                }
                Ok(())
            },
            Candidate::Component(component) => write!(
                f,
                "{} (all {} versions)  {}",
                component.name,
                component.versions.len(),
                format_bytes(component.size_bytes)
            ),
        }
    }
}

/// A path queued for removal together with the label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub label: String,
    pub path: PathBuf,
}

impl Target {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { label: label.into(), path: path.into() }
    }
}

impl From<&Entry> for Target {
    fn from(entry: &Entry) -> Self {
        Self::new(entry.display_name(), entry.path.clone())
    }
}

impl From<&Candidate> for Target {
    fn from(candidate: &Candidate) -> Self {
        match candidate {
            Candidate::Entry(entry) => entry.into(),
            Candidate::Component(component) => Self::new(component.name.clone(), component.path.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalResult {
    pub removed_count: u32,
    pub freed_bytes: u64,
    pub failures: Vec<Failure>,
}

impl RemovalResult {
    pub fn summary(&self) -> String {
        format!("Removed {} item(s), freeing {}", self.removed_count, format_bytes(self.freed_bytes))
    }
}

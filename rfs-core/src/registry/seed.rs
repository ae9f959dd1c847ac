//! Seed manifests describing an initial node tree.
//!
//! ```json
//! {
//!   "entries": [
//!     { "type": "file", "name": "README", "lines": ["hello"] },
//!     { "type": "directory", "name": "docs", "protected": true, "entries": [] }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RfsError, RfsResult};

/// Root of a seed manifest: the entries placed in the root directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedTree {
    #[serde(default)]
    pub entries: Vec<SeedNode>,
}

/// One node in a seed manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeedNode {
    File {
        name: String,
        #[serde(default)]
        lines: Vec<String>,
        #[serde(default)]
        protected: bool,
    },
    Directory {
        name: String,
        #[serde(default)]
        entries: Vec<SeedNode>,
        #[serde(default)]
        protected: bool,
    },
}

impl SeedNode {
    pub fn name(&self) -> &str {
        match self {
            SeedNode::File { name, .. } | SeedNode::Directory { name, .. } => name,
        }
    }

    pub fn is_protected(&self) -> bool {
        match self {
            SeedNode::File { protected, .. } | SeedNode::Directory { protected, .. } => *protected,
        }
    }
}

impl SeedTree {
    /// The default tree: a README and a directory of poetry.
    pub fn demo() -> Self {
        Self {
            entries: vec![
                SeedNode::File {
                    name: "README".to_string(),
                    lines: vec!["This file system contains a collection of poetry.".to_string()],
                    protected: false,
                },
                SeedNode::Directory {
                    name: "Coleridge".to_string(),
                    entries: vec![SeedNode::File {
                        name: "Kubla_Khan".to_string(),
                        lines: [
                            "In Xanadu did Kubla Khan",
                            "A stately pleasure-dome decree:",
                            "Where Alph, the sacred river, ran",
                            "Through caverns measureless to man",
                            "Down to a sunless sea.",
                        ]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                        protected: false,
                    }],
                    protected: false,
                },
            ],
        }
    }

    /// Check that sibling names are non-empty, unique and not `..`.
    pub fn validate(&self) -> RfsResult<()> {
        validate_level(&self.entries, "/")
    }
}

fn validate_level(entries: &[SeedNode], path: &str) -> RfsResult<()> {
    let mut seen = std::collections::HashSet::new();
    for entry in entries {
        let name = entry.name();
        if name.is_empty() || name == ".." || name.contains('/') {
            return Err(RfsError::Seed(format!("invalid name {:?} in {}", name, path)));
        }
        if !seen.insert(name) {
            return Err(RfsError::Seed(format!("duplicate name {:?} in {}", name, path)));
        }
        if let SeedNode::Directory { entries, .. } = entry {
            let child = if path == "/" {
                format!("/{}", name)
            } else {
                format!("{}/{}", path, name)
            };
            validate_level(entries, &child)?;
        }
    }
    Ok(())
}

/// Parse and validate a seed manifest.
pub fn load_seed<R: Read>(reader: R) -> RfsResult<SeedTree> {
    let tree: SeedTree = serde_json::from_reader(reader)?;
    tree.validate()?;
    Ok(tree)
}

/// Load a seed manifest from a JSON file.
pub fn load_seed_from_path<P: AsRef<Path>>(path: P) -> RfsResult<SeedTree> {
    let file = File::open(path)?;
    load_seed(BufReader::new(file))
}

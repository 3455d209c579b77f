//! Program assembly
//!
//! A script is a flat list of modes. The program wraps them in a root mode
//! whose scope knows every declared mode and whose body activates the entry
//! modes in declaration order. When two modes share an id the last
//! declaration wins and the earlier one is dropped from the program.

use super::types::{Mode, Stmt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

pub const ROOT_MODE_ID: &str = "program";

#[derive(Debug, Clone)]
pub struct Program {
    root: Rc<Mode>,
}

/// On-disk shape of a parsed script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramFile {
    pub modes: Vec<Mode>,
}

impl Program {
    pub fn from_modes(modes: Vec<Mode>) -> Self {
        let mut body = Vec::new();
        let mut submodes = HashMap::new();

        for mode in modes {
            let mode = Rc::new(mode);
            if let Some(replaced) = submodes.insert(mode.id.clone(), Rc::clone(&mode)) {
                warn!(mode = %mode.id, "Duplicate mode id, the last declaration wins");
                body.retain(|stmt| !matches!(stmt, Stmt::Mode(m) if Rc::ptr_eq(m, &replaced)));
            }
            if mode.is_entry {
                body.push(Stmt::Mode(mode));
            }
        }

        let root = Mode {
            id: ROOT_MODE_ID.to_string(),
            body,
            submodes,
            ..Default::default()
        };

        Self {
            root: Rc::new(root),
        }
    }

    /// Parse the JSON tree emitted by the parser front end
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: ProgramFile = serde_json::from_str(json)?;
        Ok(Self::from_modes(file.modes))
    }

    pub fn root(&self) -> &Rc<Mode> {
        &self.root
    }

    /// First entry mode, in declaration order
    pub fn first_mode(&self) -> Option<&str> {
        self.root.body.iter().find_map(|stmt| match stmt {
            Stmt::Mode(mode) => Some(mode.id.as_str()),
            _ => None,
        })
    }

    /// Number of declared modes
    pub fn mode_count(&self) -> usize {
        self.root.submodes.len()
    }
}

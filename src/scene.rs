//! JSON scene descriptions
//!
//! A scene is an intrinsic size plus a list of paint commands:
//!
//! ```json
//! { "width": 4, "height": 4,
//!   "commands": [ { "op": "fill", "color": "#FF0000" } ] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drawable::CommandDrawable;
use crate::rendering::PaintCommand;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub commands: Vec<PaintCommand>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn into_drawable(self) -> CommandDrawable {
        CommandDrawable::new(self.width, self.height, self.commands)
    }
}

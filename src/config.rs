// config.rs - configuration of sokomad
//
// sokomad - Sokoban puzzle core
// Copyright (C) 2022  Mateusz Szpakowski
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA

//! Game configuration read from TOML file. Missing file or missing keys
//! fall back to defaults.

use std::fs;
use std::io;
use std::path::{Path,PathBuf};
use log::info;
use serde::Deserialize;
use thiserror::Error as ThisError;

/// Default number of columns of level area.
pub const DEFAULT_GRID_WIDTH: usize = 20;
/// Default number of rows of level area.
pub const DEFAULT_GRID_HEIGHT: usize = 17;

#[derive(ThisError,Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Grid size {0}x{1} is empty")]
    EmptyGrid(usize, usize),
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub session: SessionConfig,
}

/// Dimensions of every level.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct SessionConfig {
    /// Level set file.
    pub levels: Option<PathBuf>,
    /// Index of level to start from.
    pub start_level: usize,
}

// TOML schema

#[derive(Deserialize,Debug,Default)]
struct TomlConfig {
    #[serde(default)]
    grid: TomlGrid,
    #[serde(default)]
    session: TomlSession,
}

#[derive(Deserialize,Debug)]
struct TomlGrid {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
}

#[derive(Deserialize,Debug,Default)]
struct TomlSession {
    #[serde(default)]
    levels: Option<String>,
    #[serde(default)]
    start_level: usize,
}

fn default_width() -> usize { DEFAULT_GRID_WIDTH }
fn default_height() -> usize { DEFAULT_GRID_HEIGHT }

impl Default for TomlGrid {
    fn default() -> Self {
        TomlGrid{ width: default_width(), height: default_height() }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig{
            grid: GridConfig{ width: DEFAULT_GRID_WIDTH, height: DEFAULT_GRID_HEIGHT },
            session: SessionConfig{ levels: None, start_level: 0 },
        }
    }
}

impl GameConfig {
    /// Parse config from TOML text.
    pub fn from_str(text: &str) -> Result<GameConfig, ConfigError> {
        let cfg = toml::from_str::<TomlConfig>(text)?;
        if cfg.grid.width == 0 || cfg.grid.height == 0 {
            return Err(ConfigError::EmptyGrid(cfg.grid.width, cfg.grid.height));
        }
        Ok(GameConfig{
            grid: GridConfig{ width: cfg.grid.width, height: cfg.grid.height },
            session: SessionConfig{
                levels: cfg.session.levels.map(PathBuf::from),
                start_level: cfg.session.start_level,
            },
        })
    }

    /// Load config from file. If file doesn't exist, default config is returned.
    /// Relative level set path is resolved against directory of config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        let mut config = Self::from_str(&fs::read_to_string(path)?)?;
        if let (Some(levels), Some(dir)) = (config.session.levels.as_ref(), path.parent()) {
            if levels.is_relative() {
                config.session.levels = Some(dir.join(levels));
            }
        }
        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}

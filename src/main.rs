// main.rs - sokomad executable
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

use std::error::Error;
use std::path::PathBuf;
use clap::{Parser,Subcommand};
use log::{info,warn};
use sokomadlib::*;
use sokomadlib::config::GameConfig;

/// Sokoban level checker and move script player.
#[derive(Parser,Debug)]
#[command(name = "sokomad")]
#[command(version)]
struct Args {
    /// Config file
    #[arg(short, long, default_value = "sokomad.toml")]
    config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand,Debug)]
enum Cmd {
    /// Check all levels of level set
    Check {
        /// Level set file (text or XML); default from config
        levelset: Option<PathBuf>,
    },
    /// Play level set using move script
    Play {
        /// Level set file (text or XML); default from config
        levelset: Option<PathBuf>,
        /// Index of start level
        #[arg(short, long)]
        level: Option<usize>,
        /// Commands: l,r,u,d - move, z - undo, ! - restart, > - next, < - previous
        #[arg(short, long, default_value = "")]
        moves: String,
    },
}

fn levelset_path(arg: Option<PathBuf>, config: &GameConfig) -> Result<PathBuf, Box<dyn Error>> {
    arg.or_else(|| config.session.levels.clone())
        .ok_or_else(|| "No level set given".into())
}

fn check(levelset: &LevelSet) -> bool {
    let mut good = true;
    for (i, lr) in levelset.levels().iter().enumerate() {
        match lr {
            Ok(level) => match level.check() {
                Ok(()) => println!("{}: '{}' ok", i, level.name()),
                Err(errors) => {
                    good = false;
                    println!("{}: '{}' {}", i, level.name(), errors);
                }
            },
            Err(e) => {
                good = false;
                println!("{}: {}", i, e);
            }
        }
    }
    good
}

fn play(levels: &[Level], start: usize, moves: &str) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(levels, start)?;
    let outcomes = session.run_script(moves)?;
    let rejected = outcomes.iter().filter(|o| **o == CommandOutcome::Rejected).count();
    if rejected != 0 {
        warn!("{} commands rejected", rejected);
    }
    let state = session.state();
    println!("Level {}/{}: {}", session.current_index()+1, session.level_count(),
            state.level().name());
    println!("{}", state);
    println!("Steps: {}, Pushes: {}, Completed: {}", state.steps(), state.pushes(),
            state.is_completed());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::new().parse_filters(&args.log_level).init();

    let config = GameConfig::load(&args.config)?;
    let (width, height) = (config.grid.width, config.grid.height);
    match args.command {
        Cmd::Check{ levelset } => {
            let path = levelset_path(levelset, &config)?;
            let levelset = LevelSet::from_file(&path, width, height)?;
            println!("Level set '{}': {} levels", levelset.name(), levelset.levels().len());
            if !check(&levelset) {
                return Err(format!("Level set {} has errors", path.display()).into());
            }
        }
        Cmd::Play{ levelset, level, moves } => {
            let path = levelset_path(levelset, &config)?;
            let levelset = LevelSet::from_file(&path, width, height)?;
            let levels = levelset.playable_levels();
            if levels.len() != levelset.levels().len() {
                warn!("Skipped {} bad levels", levelset.levels().len() - levels.len());
            }
            let start = level.unwrap_or(config.session.start_level);
            info!("Playing {} levels from {}", levels.len(), start);
            play(&levels, start, &moves)?;
        }
    }
    Ok(())
}

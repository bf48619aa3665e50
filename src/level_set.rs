// level_set.rs - level set reading of sokomad
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

use std::io;
use std::io::{Read,BufRead,BufReader,Seek};
use std::fs::File;
use std::path::Path;
use log::{info,warn};
use quick_xml::Reader as XmlReader;
use quick_xml::events::Event as XmlEvent;

use crate::defs::*;

use crate::Level;
use ParseError::*;
use LevelSetError::*;

/// Level result - contains level or parse error.
pub type LevelResult = Result<Level, LevelParseError>;

// rows with stripped trailing spaces
fn pad_rows(rows: &[String], width: usize) -> Vec<String> {
    rows.iter().map(|r| format!("{:<1$}", r, width)).collect()
}

fn level_result_set_name(lr: &mut LevelResult, name: &str) {
    match lr {
        Ok(l) => l.name = name.to_string(),
        Err(e) => e.name = name.to_string(),
    }
}

/// Level set. Contains levels and name of the level set. All levels have
/// the same dimensions.
#[derive(PartialEq,Eq,Debug)]
pub struct LevelSet {
    name: String,
    width: usize,
    height: usize,
    levels: Vec<LevelResult>,
}

impl LevelSet {
    /// Get name of levelset.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Get width of levels.
    pub fn width(&self) -> usize {
        self.width
    }
    /// Get height of levels.
    pub fn height(&self) -> usize {
        self.height
    }
    /// Get levels.
    pub fn levels(&self) -> &[LevelResult] {
        &self.levels
    }

    /// Returns true if level set has errors.
    pub fn has_errors(&self) -> bool {
        self.levels.iter().any(|lr| lr.is_err())
    }

    /// Get all correctly built levels.
    pub fn playable_levels(&self) -> Vec<Level> {
        self.levels.iter().filter_map(|lr| lr.as_ref().ok()).cloned().collect()
    }

    /// Read levelset from string.
    pub fn from_str(str: &str, width: usize, height: usize)
                    -> Result<LevelSet, LevelSetError> {
        Self::from_reader(&mut io::Cursor::new(str.as_bytes()), width, height)
    }
    /// Read levelset from file.
    pub fn from_file<P: AsRef<Path>>(path: P, width: usize, height: usize)
                    -> Result<LevelSet, LevelSetError> {
        let f = File::open(path.as_ref())?;
        info!("Reading level set from {}", path.as_ref().display());
        Self::from_reader(&mut BufReader::new(f), width, height)
    }
    /// Read levelset from reader.
    pub fn from_reader<B: BufRead + Read + Seek>(reader: &mut B, width: usize,
                    height: usize) -> Result<LevelSet, LevelSetError> {
        let mut first_bytes = [0;5];
        let readed = reader.read(&mut first_bytes)?;
        reader.seek(io::SeekFrom::Start(0))?;
        let lset = if readed == 5 && (&first_bytes == b"<?xml") {
            // if xml
            Self::read_from_xml(reader, width, height)?
        } else {
            // if text
            Self::read_from_text(reader, width, height)?
        };
        info!("Level set '{}': {} levels", lset.name, lset.levels.len());
        Ok(lset)
    }

    fn push_level(&mut self, name: &str, level_lines: &[String]) {
        let number = self.levels.len();
        let lr = Level::from_rows(name, self.width, self.height, level_lines)
            .map_err(|error| {
                warn!("Level {} '{}' rejected: {}", number, name, error);
                LevelParseError{ number, name: name.to_string(), error }
            });
        self.levels.push(lr);
    }

    fn read_from_text<B: BufRead>(reader: &mut B, width: usize, height: usize)
                    -> Result<LevelSet, LevelSetError> {
        let lines = reader.lines().collect::<Result<Vec<String>, io::Error>>()?;
        let mut lines = lines.into_iter();

        let mut lset = LevelSet{ name: String::new(), width, height, levels: vec![] };
        if let Some(l) = lines.next() {
            if let Some(name) = l.strip_prefix(';') {
                lset.name = name.trim().to_string();
            }
        }
        // skip comments and spaces
        let mut first_empty_line = false;
        let mut lev_lines = lines.skip_while(|l| {
            if l.starts_with(';') { return true; }
            if let Some(c) = l.chars().next() {
                // skip some text
                if c.is_alphanumeric() { return true; }
            } else if !first_empty_line {
                first_empty_line = true;
                return true;
            }
            false
        });

        // parse levels
        let mut level_name_first = false;
        let mut level_name = String::new();
        let mut next_line = lev_lines.next();
        while let Some(l) = next_line {
            if l.starts_with(';') {
                // comments
                level_name = l[1..].trim().to_string();
                if lset.levels.is_empty() {
                    level_name_first = true;
                }
                if !level_name_first {
                    if let Some(level_result) = lset.levels.last_mut() {
                        level_result_set_name(level_result, &level_name);
                    }
                }
                // skip other comments
                next_line = lev_lines.next();
                while next_line.as_ref().map_or(false, |l| l.starts_with(';')) {
                    next_line = lev_lines.next();
                }
            } else if l.is_empty() {
                // separator
                next_line = lev_lines.next();
            } else {
                // level area, blank rows belong to it until area is full
                let mut level_lines = vec![l];
                loop {
                    match lev_lines.next() {
                        Some(l) if !l.starts_with(';') &&
                                (!l.trim().is_empty() || level_lines.len() < height) =>
                            level_lines.push(l),
                        other => {
                            next_line = other;
                            break;
                        }
                    }
                }
                // excess blank rows before area are separators
                let blank_rows = level_lines.iter().take_while(|l| l.trim().is_empty()).count();
                if blank_rows < level_lines.len() {
                    let skip = blank_rows.min(level_lines.len().saturating_sub(height));
                    lset.push_level(&level_name, &pad_rows(&level_lines[skip..], width));
                }
            }
        }
        Ok(lset)
    }

    fn read_from_xml<B: BufRead>(reader: &mut B, width: usize, height: usize)
                    -> Result<LevelSet, LevelSetError> {
        let mut lset = LevelSet{ name: String::new(), width, height, levels: vec![] };

        let mut reader = XmlReader::from_reader(reader);
        let mut buf = Vec::new();
        let mut in_levels = false;
        let mut in_level_collection = false;
        let mut in_level_line = false;
        let mut in_title = false;

        loop {
            let mut in_level = false;
            let mut level_id: Option<String> = None;
            let (mut level_width, mut level_height) = (None, None);

            match reader.read_event(&mut buf) {
                Ok(XmlEvent::Start(ref e)) => {
                    match e.name() {
                        b"SokobanLevels" => {
                            if in_levels {
                                return Err(BadStructure);
                            }
                            in_levels = true;
                        }
                        b"Title" => {
                            if in_level_collection {
                                return Err(BadStructure);
                            }
                            in_title = true;
                        }
                        b"LevelCollection" => {
                            if !in_levels {
                                return Err(BadStructure);
                            }
                            in_level_collection = true;
                        }
                        b"Level" => {
                            if !in_level_collection {
                                return Err(BadStructure);
                            }
                            for attr in e.attributes().flatten() {
                                match attr.key {
                                    b"Id" => {
                                        level_id = Some(
                                            attr.unescape_and_decode_value(&reader)?);
                                    },
                                    b"Width" => {
                                        let v = attr.unescape_and_decode_value(&reader)?;
                                        level_width = Some(v.parse::<usize>().map_err(
                                            |_| BadAttribute(format!("Width={}", v)))?);
                                    },
                                    b"Height" => {
                                        let v = attr.unescape_and_decode_value(&reader)?;
                                        level_height = Some(v.parse::<usize>().map_err(
                                            |_| BadAttribute(format!("Height={}", v)))?);
                                    },
                                    _ => {},
                                }
                            }
                            in_level = true;
                        }
                        _ => {}
                    }
                }
                Ok(XmlEvent::End(ref e)) => {
                    match e.name() {
                        b"SokobanLevels" => { in_levels = false; }
                        b"Title" => { in_title = false; }
                        b"LevelCollection" => { in_level_collection = false; }
                        _ => {}
                    }
                }
                Ok(XmlEvent::Text(e)) => {
                    if in_title {
                        lset.name = e.unescape_and_decode(&reader)?;
                        in_title = false;
                    }
                }
                Err(e) => { return Err(Xml(e)); }
                Ok(XmlEvent::Eof) => break,
                _ => {}
            }
            buf.clear();

            if in_level {
                let name = level_id.unwrap_or_default();
                let mut level_lines = vec![];
                loop {
                    match reader.read_event(&mut buf) {
                        Ok(XmlEvent::Start(ref e)) => {
                            if e.name() == b"L" {
                                in_level_line = true;
                            }
                        }
                        Ok(XmlEvent::End(ref e)) => {
                            match e.name() {
                                b"Level" => { break; }
                                b"L" => { in_level_line = false; }
                                _ => {}
                            }
                        }
                        Err(e) => { return Err(Xml(e)); }
                        Ok(XmlEvent::Text(e)) => {
                            if in_level_line {
                                level_lines.push(e.unescape_and_decode(&reader)?);
                            }
                        }
                        Ok(XmlEvent::Eof) => break,
                        _ => {}
                    }
                    buf.clear();
                }
                buf.clear();

                // declared size must match size of level set
                if level_width.map_or(false, |w| w != width) ||
                        level_height.map_or(false, |h| h != height) {
                    let number = lset.levels.len();
                    warn!("Level {} '{}' has wrong declared size", number, name);
                    lset.levels.push(Err(LevelParseError{ number, name,
                            error: WrongSize(width, height) }));
                } else {
                    lset.push_level(&name, &level_lines);
                }
            }
        }
        Ok(lset)
    }
}

//! Turning external data (files, CLI arguments, JSON bodies) into raw boards.
//!
//! Nothing here decides validity; raw rows go through [`crate::validate`]
//! when the engine is built.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cell::CellState;
use crate::config::SimConfig;
use crate::error::LoadError;
use crate::grid::Grid;
use crate::patterns::{self, Pattern};

/// JSON accepts either a full config or a bare array of rows.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonBoard {
    Config(SimConfig),
    Rows(Vec<Vec<f64>>),
}

pub fn parse_json(text: &str) -> Result<SimConfig, LoadError> {
    Ok(match serde_json::from_str(text)? {
        JsonBoard::Config(cfg) => cfg,
        JsonBoard::Rows(rows) => SimConfig::new(rows),
    })
}

/// Plain-text board, one row per line. Blank lines and `!` comments are skipped.
///
/// Rows containing whitespace or commas are read as numbers (`0 1 0`,
/// `1,0,1`); other rows are read a character at a time, `.` dead and
/// `#`/`O`/`*` alive, digits taken at face value.
pub fn parse_text(text: &str) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut rows = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        let row = if line.contains(|c: char| c.is_whitespace() || c == ',') {
            line.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<f64>().map_err(|_| LoadError::Parse {
                        line: n + 1,
                        token: t.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            line.chars()
                .map(|c| match c {
                    '.' => Ok(0.0),
                    '#' | 'O' | '*' => Ok(1.0),
                    d if d.is_ascii_digit() => Ok(f64::from(d as u8 - b'0')),
                    other => Err(LoadError::Parse {
                        line: n + 1,
                        token: other.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        rows.push(row);
    }
    Ok(rows)
}

/// Where a board comes from, as named on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    File(PathBuf),
    /// `pattern:NAME`, placed centered on a board with a margin.
    Pattern(Pattern),
    /// `random:WxH[:density[:seed]]`
    Random {
        w: usize,
        h: usize,
        density: f32,
        seed: u64,
    },
}

impl Source {
    pub fn parse(arg: &str) -> Result<Self, LoadError> {
        if let Some(name) = arg.strip_prefix("pattern:") {
            return name
                .parse()
                .map(Source::Pattern)
                .map_err(|_| LoadError::UnknownPattern(name.to_string()));
        }
        if let Some(spec) = arg.strip_prefix("random:") {
            let bad = || LoadError::Parse {
                line: 0,
                token: arg.to_string(),
            };
            let mut parts = spec.split(':');
            let (w, h) = parts.next().and_then(|d| d.split_once('x')).ok_or_else(bad)?;
            let w = w.parse().map_err(|_| bad())?;
            let h = h.parse().map_err(|_| bad())?;
            let density = match parts.next() {
                Some(d) => d.parse().map_err(|_| bad())?,
                None => 0.35,
            };
            let seed = match parts.next() {
                Some(s) => s.parse().map_err(|_| bad())?,
                None => 42,
            };
            return Ok(Source::Random { w, h, density, seed });
        }
        Ok(Source::File(PathBuf::from(arg)))
    }

    pub fn load(&self) -> Result<SimConfig, LoadError> {
        match self {
            Source::File(path) => load_file(path),
            Source::Pattern(p) => Ok(SimConfig::new(to_raw(&patterns::padded(*p, 2)))),
            Source::Random { w, h, density, seed } => Ok(SimConfig::new(to_raw(
                &patterns::random_soup(*w, *h, *density, *seed),
            ))),
        }
    }
}

/// `.json` files are parsed as JSON, anything else as plain text.
pub fn load_file(path: &Path) -> Result<SimConfig, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&text)
    } else {
        Ok(SimConfig::new(parse_text(&text)?))
    }
}

fn to_raw(board: &Grid<CellState>) -> Vec<Vec<f64>> {
    board
        .rows()
        .map(|r| r.iter().map(|&c| f64::from(u8::from(c))).collect())
        .collect()
}

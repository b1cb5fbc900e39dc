//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Slots are addressed by the low 32 bits of the hash modulo the table
//! length; the full 64-bit hash is kept as a signature so that aliased
//! positions read as misses. Stores always overwrite. Entries carry the
//! full-move number at write time and are evicted by age.
//!
//! The table can be persisted as text, one entry per line:
//! `index,signature,move,depth,score,age,EXACT|LOWER|UPPER`.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::{trace, warn};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

impl Bound {
    pub const fn as_str(self) -> &'static str {
        match self {
            Bound::Exact => "EXACT",
            Bound::Lower => "LOWER",
            Bound::Upper => "UPPER",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXACT" => Ok(Bound::Exact),
            "LOWER" => Ok(Bound::Lower),
            "UPPER" => Ok(Bound::Upper),
            _ => Err(format!("unknown bound '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full Zobrist hash of the stored position.
    pub signature: u64,
    pub best_move: Option<Move>,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    /// Full-move number when the entry was written.
    pub age: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    /// Probes that found an occupied slot holding another signature.
    pub collisions: u64,
}

/// How `read_from` treats malformed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Fail on the first malformed line.
    Strict,
    /// Log and skip malformed lines.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new(entry_count: usize) -> Self {
        Self {
            entries: vec![None; entry_count.max(1)],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots holding an entry.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    pub fn index_of(&self, key: u64) -> usize {
        (key as u32 as usize) % self.entries.len()
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let slot = self.entries[self.index_of(key)];
        match slot {
            Some(entry) if entry.signature == key => {
                self.stats.hits += 1;
                Some(entry)
            }
            Some(_) => {
                self.stats.collisions += 1;
                None
            }
            None => None,
        }
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.index_of(entry.signature);
        self.entries[idx] = Some(entry);
    }

    /// Evict entries written before full-move `age`. Returns how many were
    /// removed.
    pub fn prune_older_than(&mut self, age: u16) -> usize {
        let mut removed = 0;
        for slot in &mut self.entries {
            if slot.is_some_and(|entry| entry.age < age) {
                *slot = None;
                removed += 1;
            }
        }
        trace!("pruned {removed} transposition entries older than move {age}");
        removed
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> ChessResult<()> {
        for (index, slot) in self.entries.iter().enumerate() {
            let Some(entry) = slot else {
                continue;
            };
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                index,
                entry.signature,
                entry.best_move.map_or(0, Move::raw),
                entry.depth,
                entry.score,
                entry.age,
                entry.bound
            )?;
        }
        Ok(())
    }

    /// Load entries from text produced by `write_to`. Entries are placed by
    /// their signature, so tables of different sizes can exchange files.
    /// Returns the number of entries loaded.
    pub fn read_from<R: BufRead>(&mut self, reader: R, mode: LoadMode) -> ChessResult<usize> {
        let mut loaded = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            match parse_entry_line(&line) {
                Ok(entry) => {
                    let idx = self.index_of(entry.signature);
                    self.entries[idx] = Some(entry);
                    loaded += 1;
                }
                Err(reason) => match mode {
                    LoadMode::Strict => {
                        return Err(ChessErrors::InvalidTableLine {
                            line: line_number,
                            reason,
                        })
                    }
                    LoadMode::Lenient => {
                        warn!("skipping transposition table line {line_number}: {reason}");
                    }
                },
            }
        }
        Ok(loaded)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ChessResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(&mut self, path: impl AsRef<Path>, mode: LoadMode) -> ChessResult<usize> {
        let reader = BufReader::new(File::open(path)?);
        self.read_from(reader, mode)
    }
}

fn parse_entry_line(line: &str) -> Result<TTEntry, String> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let [index, signature, best_move, depth, score, age, bound] = fields.as_slice() else {
        return Err(format!("expected 7 fields, found {}", fields.len()));
    };

    fn number<T: FromStr>(text: &str, name: &str) -> Result<T, String> {
        text.parse().map_err(|_| format!("invalid {name} '{text}'"))
    }

    let _: usize = number(index, "index")?;
    let raw_move: u16 = number(best_move, "move")?;

    Ok(TTEntry {
        signature: number(signature, "signature")?,
        best_move: (raw_move != 0).then_some(Move::from_raw(raw_move)),
        depth: number(depth, "depth")?,
        score: number(score, "score")?,
        bound: bound.parse()?,
        age: number(age, "age")?,
    })
}

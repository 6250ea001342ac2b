//! Grouping of the lines touched by a diagnostic into per-file containers of
//! maximal consecutive runs (`SPEC_FULL.md` §4.4).

use std::collections::BTreeSet;

use crate::diagnostic::{Diagnostic, FileRange};
use crate::file::FileId;

/// A maximal run of consecutive line numbers within one file.
#[derive(Clone, Debug)]
pub struct LineGroup {
    pub lines: Vec<u32>,
}

impl LineGroup {
    #[must_use]
    pub fn first(&self) -> u32 {
        self.lines[0]
    }

    #[must_use]
    pub fn last(&self) -> u32 {
        self.lines[self.lines.len() - 1]
    }
}

/// All groups belonging to a single file, in ascending line order.
#[derive(Clone, Debug)]
pub struct LineGroupContainer {
    pub file: FileId,
    pub groups: Vec<LineGroup>,
}

/// Collect every line touched by `diagnostic`'s ranges, labels, or colors,
/// grouped by file and split into maximal consecutive runs. Containers are
/// ordered by first occurrence of their file among those three sources.
#[must_use]
pub fn collect_containers(diagnostic: &Diagnostic, files: &crate::file::FileRegistry) -> Vec<LineGroupContainer> {
    let mut order: Vec<FileId> = Vec::new();
    let mut by_file: std::collections::HashMap<FileId, BTreeSet<u32>> = std::collections::HashMap::new();

    let mut touch = |fr: FileRange| {
        let file = files.get(fr.file());
        let lines = file.get_lines_in_range(&fr.range());
        let entry = by_file.entry(fr.file()).or_default();
        if entry.is_empty() && !order.contains(&fr.file()) {
            order.push(fr.file());
        }
        entry.extend(lines);
    };

    for r in diagnostic.ranges() {
        touch(*r);
    }
    for l in diagnostic.labels() {
        touch(l.range());
    }
    for c in diagnostic.colors() {
        touch(c.range());
    }

    order
        .into_iter()
        .map(|file| {
            let lines = &by_file[&file];
            LineGroupContainer {
                file,
                groups: group_consecutive(lines),
            }
        })
        .collect()
}

fn group_consecutive(lines: &BTreeSet<u32>) -> Vec<LineGroup> {
    let mut groups = Vec::new();
    let mut current: Vec<u32> = Vec::new();
    for &line in lines {
        if let Some(&last) = current.last() {
            if line != last + 1 {
                groups.push(LineGroup { lines: std::mem::take(&mut current) });
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        groups.push(LineGroup { lines: current });
    }
    groups
}

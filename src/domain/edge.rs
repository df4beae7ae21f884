// Edge store and emitter for Callvine.
// Collects resolved (caller, callee) references and reads them out as
// escaped label/callee pairs for flowchart tooling.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

/// Characters reserved by the flowchart syntax. Each occurrence is
/// escaped with one preceding backslash at emission.
const RESERVED: [char; 5] = ['<', '>', '{', '}', '|'];

/// Deduplicated collection of resolved references, keyed by
/// (caller, callee). Insertion order is preserved so the emitted list
/// follows a rough top-to-bottom correspondence with the source file.
#[derive(Debug, Default)]
pub struct EdgeStore {
    // Value is the "line:column" of the first triggering occurrence.
    edges: IndexMap<(String, String), String>,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge unless the (caller, callee) pair already exists.
    /// First write wins: repeated references keep the location of the
    /// first occurrence. Returns whether the edge was inserted.
    pub fn insert_if_absent(&mut self, caller: &str, callee: &str, location: String) -> bool {
        match self
            .edges
            .entry((caller.to_string(), callee.to_string()))
        {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(location);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Read the store out as `[escaped_label, escaped_callee]` pairs in
    /// insertion order, where the label is `"<location>: <caller>"`.
    pub fn emit(&self) -> Vec<[String; 2]> {
        self.edges
            .iter()
            .map(|((caller, callee), location)| {
                [escape(&format!("{location}: {caller}")), escape(callee)]
            })
            .collect()
    }
}

/// Escape flowchart-reserved characters with a single preceding backslash.
/// Applied exactly once, at emission.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if RESERVED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Emitted reference graph for a single analyzed source file.
#[derive(Debug, Clone, Serialize)]
pub struct FileGraph {
    pub file: String,
    pub pairs: Vec<[String; 2]>,
}

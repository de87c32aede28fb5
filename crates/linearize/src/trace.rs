use qp_ast::NodeID;
use qp_atom::AtomId;
use qp_span::Span;
use rustc_hash::FxHashMap;

/// One hoisted expression: where it came from and the names it was given.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub span: Span,
    /// `_<end>_<len>` or `v<n>`.
    pub trace_id: String,
    pub temp: AtomId,
    /// The identifier that replaced the expression.
    pub reference: NodeID,
}

/// Maps runtime trace records back to source positions.
#[derive(Debug, Default)]
pub struct TraceTable {
    entries: Vec<TraceEntry>,
    by_span: FxHashMap<Span, usize>,
    by_reference: FxHashMap<NodeID, usize>,
}

impl TraceTable {
    pub(crate) fn record(&mut self, entry: TraceEntry) {
        let idx = self.entries.len();
        if !entry.span.is_synthetic() {
            self.by_span.insert(entry.span, idx);
        }
        self.by_reference.insert(entry.reference, idx);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order the expressions were hoisted.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn by_span(&self, span: Span) -> Option<&TraceEntry> {
        self.by_span.get(&span).map(|&idx| &self.entries[idx])
    }

    pub fn by_reference(&self, id: NodeID) -> Option<&TraceEntry> {
        self.by_reference.get(&id).map(|&idx| &self.entries[idx])
    }

    pub fn by_trace_id(&self, trace_id: &str) -> Option<&TraceEntry> {
        self.entries.iter().find(|entry| entry.trace_id == trace_id)
    }
}

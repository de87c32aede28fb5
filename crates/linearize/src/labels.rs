use qp_ast::NodeID;
use qp_atom::AtomId;

/// Synthetic jump targets of the loops and switches being rewritten.
#[derive(Debug, Default)]
pub(crate) struct LabelStack {
    breaks: Vec<AtomId>,
    continues: Vec<AtomId>,
    /// User labels together with the statement each one labels directly.
    in_scope: Vec<(AtomId, NodeID)>,
}

impl LabelStack {
    pub(crate) fn push_iteration(&mut self, label: AtomId) {
        self.breaks.push(label);
        self.continues.push(label);
    }

    pub(crate) fn pop_iteration(&mut self) {
        self.breaks.pop();
        self.continues.pop();
    }

    pub(crate) fn push_switch(&mut self, label: AtomId) {
        self.breaks.push(label);
    }

    pub(crate) fn pop_switch(&mut self) {
        self.breaks.pop();
    }

    pub(crate) fn break_target(&self) -> Option<AtomId> {
        self.breaks.last().copied()
    }

    pub(crate) fn continue_target(&self) -> Option<AtomId> {
        self.continues.last().copied()
    }

    pub(crate) fn enter_labeled(&mut self, label: AtomId, stmt: NodeID) {
        self.in_scope.push((label, stmt));
    }

    pub(crate) fn exit_labeled(&mut self) {
        self.in_scope.pop();
    }

    /// Every user label attached directly to `stmt`, innermost first.
    pub(crate) fn user_labels_of(&self, stmt: NodeID) -> impl Iterator<Item = AtomId> + '_ {
        self.in_scope
            .iter()
            .rev()
            .filter(move |(_, target)| *target == stmt)
            .map(|(label, _)| *label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_span::ModuleID;

    #[test]
    fn switch_only_shadows_break() {
        let mut labels = LabelStack::default();
        let outer = AtomId::from_str("_10_4");
        let switch = AtomId::from_str("_8_2");
        labels.push_iteration(outer);
        labels.push_switch(switch);
        assert_eq!(labels.break_target(), Some(switch));
        assert_eq!(labels.continue_target(), Some(outer));
        labels.pop_switch();
        labels.pop_iteration();
        assert_eq!(labels.break_target(), None);
        assert_eq!(labels.continue_target(), None);
    }

    #[test]
    fn user_labels_match_their_statement() {
        let mut labels = LabelStack::default();
        let module = ModuleID::root();
        let a = AtomId::from_str("a");
        let b = AtomId::from_str("b");
        let c = AtomId::from_str("c");
        let loop_id = NodeID::new(module, 3);
        labels.enter_labeled(a, loop_id);
        labels.enter_labeled(b, NodeID::new(module, 5));
        labels.enter_labeled(c, loop_id);
        assert_eq!(labels.user_labels_of(loop_id).collect::<Vec<_>>(), vec![c, a]);
        labels.exit_labeled();
        assert_eq!(labels.user_labels_of(loop_id).collect::<Vec<_>>(), vec![a]);
    }
}

use qp_ast as ast;

/// Statements waiting to be spliced above the statement being rewritten,
/// one frame per enclosing block.
#[derive(Debug, Default)]
pub(crate) struct InsertionStack<'cx> {
    frames: Vec<Vec<&'cx ast::Stmt<'cx>>>,
}

impl<'cx> InsertionStack<'cx> {
    pub(crate) fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Returns whatever the frame still holds. The caller decides whether
    /// leftovers are an error.
    pub(crate) fn pop(&mut self) -> Vec<&'cx ast::Stmt<'cx>> {
        self.frames.pop().unwrap_or_default()
    }

    /// Every rewrite that queues or reads statements runs inside a block,
    /// so a frame always exists here.
    fn current(&mut self) -> Option<&mut Vec<&'cx ast::Stmt<'cx>>> {
        debug_assert!(!self.frames.is_empty(), "no insertion frame was pushed");
        self.frames.last_mut()
    }

    pub(crate) fn insert(&mut self, stmt: &'cx ast::Stmt<'cx>) {
        if let Some(frame) = self.current() {
            frame.push(stmt);
        }
    }

    pub(crate) fn take(&mut self) -> Vec<&'cx ast::Stmt<'cx>> {
        self.current().map(std::mem::take).unwrap_or_default()
    }

    pub(crate) fn drain_into(&mut self, out: &mut Vec<&'cx ast::Stmt<'cx>>) {
        if let Some(frame) = self.current() {
            out.append(frame);
        }
    }
}

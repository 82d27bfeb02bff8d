//! Edit history (undo/redo) with checkpoints.
//!
//! Checkpoints mark a depth in the undo stack. Everything pushed after a
//! checkpoint can be folded into a single transaction
//! ([`EditHistory::group_changes_since`]) or discarded outright
//! ([`EditHistory::revert_to`]).

/// Which side of an edit a position sticks to when the edit touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before text inserted at this position
    Before,
    /// Move after text inserted at this position
    After,
}

/// A single replace-shaped edit: `deleted_text` at `offset` became `inserted_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Character offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted_text: String,
}

impl EditOperation {
    /// Create an insert operation
    pub fn insert(offset: usize, text: String) -> Self {
        Self::replace(offset, String::new(), text)
    }

    /// Create a delete operation
    pub fn delete(offset: usize, text: String) -> Self {
        Self::replace(offset, text, String::new())
    }

    /// Create a replace operation
    pub fn replace(offset: usize, deleted_text: String, inserted_text: String) -> Self {
        Self {
            offset,
            deleted_text,
            inserted_text,
        }
    }

    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }

    /// Map an offset from before this edit to after it.
    ///
    /// Offsets inside the replaced span collapse to one of its new ends,
    /// chosen by `assoc`.
    pub fn map_offset(&self, pos: usize, assoc: Assoc) -> usize {
        let start = self.offset;
        let end = start + self.deleted_len();
        if pos < start {
            return pos;
        }
        if pos > end {
            return pos + self.inserted_len() - self.deleted_len();
        }
        match assoc {
            Assoc::Before => start,
            Assoc::After => start + self.inserted_len(),
        }
    }
}

/// Group of operations undone/redone as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub operations: Vec<EditOperation>,
}

impl Transaction {
    pub fn single(op: EditOperation) -> Self {
        Self {
            operations: vec![op],
        }
    }

    /// Operations that revert this transaction, in application order
    pub fn inverse_operations(&self) -> Vec<EditOperation> {
        self.operations.iter().rev().map(EditOperation::inverse).collect()
    }
}

/// Opaque handle to a recorded undo-stack depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckpointId(pub u64);

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    max_size: usize,
    checkpoints: Vec<(CheckpointId, usize)>,
    next_checkpoint: u64,
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            checkpoints: Vec::new(),
            next_checkpoint: 1,
        }
    }

    /// Push an operation onto the undo stack (clears redo stack)
    pub fn push(&mut self, op: EditOperation) {
        self.redo_stack.clear();
        self.undo_stack.push(Transaction::single(op));

        // Trim if exceeded max size; checkpoints shift down with the stack
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
            self.checkpoints.retain_mut(|(_, depth)| {
                if *depth == 0 {
                    return false;
                }
                *depth -= 1;
                true
            });
        }
    }

    /// Record the current undo depth
    pub fn create_checkpoint(&mut self) -> CheckpointId {
        let id = CheckpointId(self.next_checkpoint);
        self.next_checkpoint += 1;
        self.checkpoints.push((id, self.undo_stack.len()));
        id
    }

    fn checkpoint_depth(&self, id: CheckpointId) -> Option<usize> {
        self.checkpoints
            .iter()
            .find(|(cp, _)| *cp == id)
            .map(|(_, depth)| *depth)
            .filter(|depth| *depth <= self.undo_stack.len())
    }

    fn forget_checkpoints_deeper_than(&mut self, depth: usize) {
        self.checkpoints.retain(|(_, d)| *d <= depth);
    }

    /// Fold every transaction pushed since `id` into one. The checkpoint
    /// stays valid, so repeated calls keep extending the same unit.
    pub fn group_changes_since(&mut self, id: CheckpointId) -> bool {
        let Some(depth) = self.checkpoint_depth(id) else {
            return false;
        };
        if self.undo_stack.len() - depth > 1 {
            let operations = self
                .undo_stack
                .drain(depth..)
                .flat_map(|t| t.operations)
                .collect();
            self.undo_stack.push(Transaction { operations });
        }
        self.forget_checkpoints_deeper_than(depth);
        true
    }

    /// Drop every transaction pushed since `id` and return them, oldest
    /// first, so the caller can apply their inverses.
    pub fn revert_to(&mut self, id: CheckpointId) -> Option<Vec<Transaction>> {
        let depth = self.checkpoint_depth(id)?;
        let reverted = self.undo_stack.split_off(depth);
        self.forget_checkpoints_deeper_than(depth);
        Some(reverted)
    }

    /// Pop a transaction from the undo stack (moves to redo stack)
    pub fn pop_undo(&mut self) -> Option<Transaction> {
        let transaction = self.undo_stack.pop()?;
        self.redo_stack.push(transaction.clone());
        self.forget_checkpoints_deeper_than(self.undo_stack.len());
        Some(transaction)
    }

    /// Pop a transaction from the redo stack (moves to undo stack)
    pub fn pop_redo(&mut self) -> Option<Transaction> {
        let transaction = self.redo_stack.pop()?;
        self.undo_stack.push(transaction.clone());
        Some(transaction)
    }

    /// Get the number of transactions in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

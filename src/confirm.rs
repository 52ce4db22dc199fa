//! Confirmation capability for destructive operations.
//!
//! Deleting a note and replacing the collection on import both ask the caller
//! first. The repository only sees this trait; how the question reaches the
//! user (a terminal prompt, a dialog, a test double) is up to the caller.
use std::fmt;

use crate::NoteId;

/// The question being asked before a destructive operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    /// Delete one note
    DeleteNote { id: NoteId },
    /// Discard the whole collection in favor of an imported one
    ReplaceCollection { incoming: usize, current: usize },
}

impl fmt::Display for ConfirmPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmPrompt::DeleteNote { id } => {
                write!(f, "Deseja excluir este registro? (note {})", id)
            }
            ConfirmPrompt::ReplaceCollection { incoming, current } => write!(
                f,
                "Substituir acervo atual? ({} notes will replace the current {})",
                incoming, current
            ),
        }
    }
}

pub trait Confirmation {
    /// Returns `true` to go ahead with the operation.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&ConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self(prompt)
    }
}

/// Approves every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Declines every prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirmation for NeverConfirm {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> bool {
        false
    }
}

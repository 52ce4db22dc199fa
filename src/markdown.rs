//! Single-note markdown export.
use crate::{ExportedFile, Note};

pub const MARKDOWN_MIME: &str = "text/markdown";

/// Renders a note as `# <category>`, `Data: <date>`, a blank line, then the content.
pub fn export_note(note: &Note) -> String {
    format!("# {}\nData: {}\n\n{}", note.category, note.date, note.content)
}

/// The export wrapped as `nota_<id>.md`.
pub fn note_file(note: &Note) -> ExportedFile {
    ExportedFile {
        file_name: format!("nota_{}.md", note.id),
        mime_type: MARKDOWN_MIME.to_string(),
        contents: export_note(note),
    }
}

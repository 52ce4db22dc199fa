//! CLI module for the sistematiza application
//!
//! This module handles the command-line interface for interacting with the
//! note repository, the style guide and the backup protocol.
use std::{
    fs::{self, read_to_string},
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    export_backup, export_note, helper::content_preview, import_backup, note_file, visible,
    Category, CategoryFilter, Commands, Config, DeleteOutcome, ImportOutcome, KeyValueStore,
    Note, NoteId, NoteRepository, Result, StdinConfirmation, StyleAction, StyleGuideStore,
    SzError, CATEGORIES,
};

/// Marker lines in the editor scratch file; everything between them is dropped.
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// CLI Application handler - processes CLI commands against the repository
pub struct App<S: KeyValueStore> {
    /// The note repository
    repository: NoteRepository<S>,

    /// The style guide store, sharing the repository's store handle
    style_guide: StyleGuideStore<S>,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application with the given repository, style store and config
    pub fn new(
        repository: NoteRepository<S>,
        style_guide: StyleGuideStore<S>,
        config: Config,
        verbose: bool,
    ) -> Self {
        Self {
            repository,
            style_guide,
            config,
            verbose,
        }
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repository
    }

    /// Run the CLI application with the given command.
    ///
    /// Validation, empty-export and import-parse failures are reported as
    /// notices and do not fail the command.
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match self.dispatch(command) {
            Err(e) if e.is_notice() => {
                report_notice(&e);
                Ok(())
            }
            other => other,
        }
    }

    fn dispatch(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                content,
                category,
                tags,
                edit,
            } => self.add_note(content, category, &tags, edit),

            Commands::List {
                category,
                query,
                json,
                brief,
            } => self.list_notes(&category, &query, json, brief),

            Commands::Search { query, category } => self.list_notes(&category, &query, false, false),

            Commands::Show { id } => {
                let note = self.find_note(id)?;
                println!("{}", export_note(note));
                Ok(())
            }

            Commands::Delete { id, force } => self.delete_note(id, force),

            Commands::Export { id, output } => {
                let file = note_file(self.find_note(id)?);
                let path = file.write_into(&self.output_dir(output))?;
                println!("Exported note {} to {}", id, path.display());
                Ok(())
            }

            Commands::Backup { output } => {
                let file = export_backup(&self.repository)?;
                let path = file.write_into(&self.output_dir(output))?;
                println!("Backup written to {}", path.display());
                Ok(())
            }

            Commands::Import { file, force } => self.import_file(&file, force),

            Commands::Style { action } => self.handle_style(action),

            Commands::Categories => {
                for category in CATEGORIES.iter() {
                    println!(
                        "{:<8} {}  ({})",
                        category.key,
                        style(category).bold(),
                        category.id
                    );
                }
                Ok(())
            }
        }
    }

    fn add_note(
        &mut self,
        content: Option<String>,
        category: Option<String>,
        tags: &str,
        edit: bool,
    ) -> Result<()> {
        let category = match category {
            Some(input) => Some(
                Category::lookup(&input)
                    .ok_or(SzError::UnknownCategory { input })?
                    .id,
            ),
            None => None,
        };

        let content = match content {
            Some(text) if !edit => text,
            existing => self.open_editor_with_content(existing.as_deref().unwrap_or(""))?,
        };

        let note = self.repository.create(&content, category, tags)?;
        println!("Note archived with ID: {}", note.id);
        Ok(())
    }

    fn list_notes(&self, category: &str, query: &str, json: bool, brief: bool) -> Result<()> {
        let filter = CategoryFilter::parse(category)?;
        let notes = visible(self.repository.list(), &filter, query);
        debug!("Displaying {} notes", notes.len());

        if json {
            println!("{}", serde_json::to_string_pretty(&notes)?);
            return Ok(());
        }

        println!(
            "{} {}",
            style(filter.title()).bold().underlined(),
            style(format!("({} of {})", notes.len(), self.repository.len())).dim()
        );

        if notes.is_empty() {
            println!("{}", style("No notes found.").dim());
            return Ok(());
        }

        if brief {
            for note in &notes {
                println!("{}  {}", note.id, content_preview(&note.content, 60));
            }
        } else {
            self.display_notes_text(&notes);
        }
        Ok(())
    }

    /// Display notes in text format
    fn display_notes_text(&self, notes: &[&Note]) {
        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            let heading = Category::by_id(&note.category)
                .map(|c| c.to_string())
                .unwrap_or_else(|| note.category.clone());
            println!("ID: {} | {} | {}", note.id, style(heading).bold(), note.date);

            if !note.tags.is_empty() {
                let tags = note
                    .tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("Tags: {}", style(tags).cyan());
            }

            if self.verbose {
                println!("\n{}", note.content);
            } else {
                println!("\n{}", content_preview(&note.content, term_width.saturating_sub(4)));
            }
        }
    }

    fn delete_note(&mut self, id: NoteId, force: bool) -> Result<()> {
        if let Some(note) = self.repository.get(id) {
            if !force {
                println!("You are about to delete the following note:");
                println!("ID:       {}", note.id);
                println!("Category: {}", note.category);
                println!("Date:     {}", note.date);
                println!("\n{}\n", content_preview(&note.content, 100));
            }
        }

        let mut confirmation = StdinConfirmation::new(force);
        match self.repository.delete(id, &mut confirmation)? {
            DeleteOutcome::Deleted(note) => println!("Note {} has been deleted.", note.id),
            DeleteOutcome::NotFound => println!("No note with ID {}.", id),
            DeleteOutcome::Declined => println!("Deletion cancelled."),
        }
        Ok(())
    }

    fn import_file(&mut self, file: &Path, force: bool) -> Result<()> {
        let payload = fs::read(file).map_err(|e| SzError::ImportParse {
            message: format!("{}: {}", file.display(), e),
        })?;

        let mut confirmation = StdinConfirmation::new(force);
        match import_backup(&mut self.repository, &payload, &mut confirmation)? {
            ImportOutcome::Replaced { count } => {
                println!("Collection replaced with {} notes from {}", count, file.display())
            }
            ImportOutcome::Declined => println!("Import cancelled."),
        }
        Ok(())
    }

    fn handle_style(&mut self, action: StyleAction) -> Result<()> {
        match action {
            StyleAction::Show => {
                let text = self.style_guide.get()?;
                if text.is_empty() {
                    println!("{}", style("No style guide saved.").dim());
                } else {
                    println!("{}", text);
                }
            }
            StyleAction::Set { text, edit } => {
                let text = match text {
                    Some(text) if !edit => text,
                    _ => {
                        let current = self.style_guide.get()?;
                        self.open_editor_with_content(&current)?
                    }
                };
                self.style_guide.set(&text)?;
                println!("Style guide saved.");
            }
        }
        Ok(())
    }

    fn find_note(&self, id: NoteId) -> Result<&Note> {
        self.repository
            .get(id)
            .ok_or(SzError::NoteNotFound { id })
    }

    fn output_dir(&self, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| self.config.export_dir.clone())
    }

    fn open_editor_with_content(&self, existing_content: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let template = format!(
            "{}\n{}\nWrite below. Text between these markers is ignored.\nSave and exit the editor when you're done.\n{}\n",
            existing_content, COMMENT_OPEN, COMMENT_CLOSE
        );
        fs::write(&temp_path, template)?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor '{}'. Save and exit when done...", editor_cmd);
        launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_comments(&content))
    }
}

fn report_notice(error: &SzError) {
    match error {
        SzError::Validation { message } => {
            debug!("Nothing archived: {}", message);
            eprintln!("{}", style("Nothing archived: the note is empty.").dim());
        }
        SzError::NoData => eprintln!("{}", style("Nenhum dado para exportar.").yellow().bold()),
        SzError::ImportParse { message } => {
            info!("Import rejected: {}", message);
            eprintln!("{}", style("Erro ao importar arquivo.").red().bold());
        }
        other => eprintln!("{}", other),
    }
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    // Handle shell-like command parsing
    let args = split(editor_cmd).map_err(|e| SzError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let (program, extra) = args.split_first().ok_or_else(|| SzError::EditorError {
        message: "Empty editor command".to_string(),
    })?;

    let status = Command::new(program).args(extra).arg(file_path).status()?;

    if !status.success() {
        return Err(SzError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops `<!-- ... -->` blocks, which may span lines, and trailing blank lines.
fn strip_editor_comments(content: &str) -> String {
    let mut kept = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find(COMMENT_OPEN) {
        kept.push_str(&rest[..start]);
        let body_start = start + COMMENT_OPEN.len();
        match rest[body_start..].find(COMMENT_CLOSE) {
            Some(end) => rest = &rest[body_start + end + COMMENT_CLOSE.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    kept.push_str(rest);

    kept.trim_end().to_string()
}

//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::api::FileItem;
use crate::core::models::{ImportState, Project};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A single project
#[derive(Debug, Serialize)]
pub struct ProjectResult {
    /// The project
    pub project: Project,
}

/// All projects, most recent first
#[derive(Debug, Serialize)]
pub struct ProjectListResult {
    /// The projects
    pub projects: Vec<Project>,
}

/// Files ingested for one project
#[derive(Debug, Serialize)]
pub struct FileListResult {
    /// Owning project ID
    pub project_id: String,
    /// File summaries ordered by path
    pub files: Vec<FileItem>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn state_label(state: &ImportState) -> String {
    match state {
        ImportState::Pending => state.label().yellow().to_string(),
        ImportState::Imported { .. } => state.label().green().to_string(),
        ImportState::Failed { .. } => state.label().red().to_string(),
    }
}

fn print_project(project: &Project) {
    println!("{} {}", project.display_name().bold(), format!("({})", project.id).dimmed());
    println!("  Source:    {}", project.source);
    if let Some(description) = &project.description {
        println!("  About:     {description}");
    }
    println!("  Created:   {}", project.created.to_rfc3339());
    println!("  State:     {}", state_label(&project.state));
    if let Some(url) = project.download_url() {
        println!("  Archive:   {url}");
    }
    if let ImportState::Failed { reason } = &project.state {
        println!("  Reason:    {reason}");
    }
}

impl ProjectResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print_project(&self.project),
            OutputMode::Json => print_json(self),
        }
    }
}

impl ProjectListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.projects.is_empty() {
            println!("No projects.");
            return;
        }

        println!("Projects:\n");
        for (i, project) in self.projects.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_project(project);
        }
    }
}

impl FileListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.files.is_empty() {
            println!("No files ingested for {}.", self.project_id);
            return;
        }

        let width = self.files.iter().map(|f| f.size.to_string().len()).max().unwrap_or(1);
        for file in &self.files {
            println!("  {:>width$}  {}", file.size, file.path);
        }
        println!("\n{} file(s)", self.files.len());
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.success {
                    println!("{}", self.message);
                } else {
                    eprintln!("{} {}", "error:".red().bold(), self.message);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

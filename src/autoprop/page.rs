//! A terminal stand-in for a GUI page: a column of labelled text fields that
//! is redrawn on every `update()`.

use colored::*;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "│";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldId(usize);

#[derive(Debug, Clone)]
struct TextField {
    label: String,
    value: String,
}

#[derive(Debug, Default)]
pub struct Page {
    fields: Vec<TextField>,
    renders: usize,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>) -> FieldId {
        self.fields.push(TextField {
            label: label.into(),
            value: String::new(),
        });
        FieldId(self.fields.len() - 1)
    }

    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(id.0) {
            field.value = value.into();
        }
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Plain-text rendering, labels right-aligned.
    pub fn render(&self) -> String {
        let label_width = self
            .fields
            .iter()
            .map(|f| f.label.width())
            .max()
            .unwrap_or(0);

        self.fields
            .iter()
            .map(|f| {
                let padding = label_width - f.label.width();
                format!("  {}{} {} {}", " ".repeat(padding), f.label, SEPARATOR, f.value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Redraw the page on stdout.
    pub fn update(&mut self) {
        self.renders += 1;
        tracing::debug!(render = self.renders, "Page update");
        println!("{}", format!("-- render #{} --", self.renders).dimmed());
        println!("{}", self.render());
    }
}

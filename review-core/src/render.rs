//! Converts `.docx` bytes into blocks the viewer can lay out.

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document is empty")]
    Empty,
    #[error("failed to read docx: {0}")]
    Docx(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } | Block::Paragraph(text) => text,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| b.text().split_whitespace().count())
            .sum()
    }
}

pub fn render_docx(bytes: &[u8]) -> Result<RenderedDocument, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::Empty);
    }
    let docx = read_docx(bytes).map_err(|e| RenderError::Docx(e.to_string()))?;

    let mut blocks = Vec::new();
    for child in docx.document.children.iter() {
        match child {
            DocumentChild::Paragraph(para) => push_paragraph(&mut blocks, para),
            DocumentChild::Table(table) => push_table(&mut blocks, table),
            _ => {}
        }
    }

    tracing::debug!(blocks = blocks.len(), "rendered docx");
    Ok(RenderedDocument { blocks })
}

fn push_paragraph(blocks: &mut Vec<Block>, para: &Paragraph) {
    let text = paragraph_text(para);
    if text.trim().is_empty() {
        return;
    }
    match heading_level(para) {
        Some(level) => blocks.push(Block::Heading { level, text }),
        None => blocks.push(Block::Paragraph(text)),
    }
}

/// Tables are flattened row by row, one block per cell paragraph.
fn push_table(blocks: &mut Vec<Block>, table: &Table) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => push_paragraph(blocks, para),
                    TableCellContent::Table(nested) => push_table(blocks, nested),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|pc| match pc {
            ParagraphChild::Run(run) => Some(
                run.children
                    .iter()
                    .filter_map(|rc| match rc {
                        RunChild::Text(t) => Some(t.text.as_str()),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect()
}

/// Word's built-in "Heading1".."Heading6" and "Title" styles.
fn heading_level(para: &Paragraph) -> Option<u8> {
    let style = para.property.style.as_ref()?;
    let name = style.val.to_ascii_lowercase();
    if name == "title" {
        return Some(1);
    }
    name.strip_prefix("heading")
        .and_then(|n| n.trim().parse::<u8>().ok())
        .filter(|n| (1..=6).contains(n))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;

    pub(crate) fn sample_docx(heading: &str, paragraphs: &[&str]) -> Vec<u8> {
        let mut doc = Docx::new().add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(heading)),
        );
        for p in paragraphs {
            doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
        }
        let mut buf = Cursor::new(Vec::new());
        doc.build().pack(&mut buf).expect("pack docx");
        buf.into_inner()
    }

    #[test]
    fn renders_heading_and_paragraphs() {
        let bytes = sample_docx("Security", &["Supplier shall maintain ISO 27001.", ""]);
        let doc = render_docx(&bytes).expect("render");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading { level: 1, text: "Security".into() },
                Block::Paragraph("Supplier shall maintain ISO 27001.".into()),
            ]
        );
        assert_eq!(doc.word_count(), 6);
    }

    #[test]
    fn table_cells_become_paragraphs() {
        let cell = |text: &str| TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
        let table = Table::new(vec![
            TableRow::new(vec![cell("Clause"), cell("Cap")]),
            TableRow::new(vec![cell("Limitation of Liability"), cell("12 months of fees")]),
        ]);
        let doc = Docx::new()
            .add_paragraph(Paragraph::new().style("Heading1").add_run(Run::new().add_text("Schedule")))
            .add_table(table);
        let mut buf = Cursor::new(Vec::new());
        doc.build().pack(&mut buf).expect("pack docx");

        let rendered = render_docx(&buf.into_inner()).expect("render");
        assert_eq!(
            rendered.blocks,
            vec![
                Block::Heading { level: 1, text: "Schedule".into() },
                Block::Paragraph("Clause".into()),
                Block::Paragraph("Cap".into()),
                Block::Paragraph("Limitation of Liability".into()),
                Block::Paragraph("12 months of fees".into()),
            ]
        );
    }

    #[test]
    fn rejects_empty_and_garbage_bytes() {
        assert!(matches!(render_docx(&[]), Err(RenderError::Empty)));
        assert!(matches!(render_docx(b"not a zip"), Err(RenderError::Docx(_))));
    }
}

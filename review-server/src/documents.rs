//! Document blobs on disk, plus generation of the sample contracts.

use crate::error::ServerError;
use docx_rs::{Docx, Paragraph, Run};
use review_core::model::{DocumentSide, Project};
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only bare file names are served; anything that could walk out of the
    /// root is treated as missing.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains("..")
            && !name.contains('/')
            && !name.contains('\\');
        valid.then(|| self.root.join(name))
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, ServerError> {
        let path = self.resolve(name).ok_or(ServerError::NotFound)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ServerError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub fn has_documents(&self) -> Result<bool, ServerError> {
        if !self.root.exists() {
            return Ok(false);
        }
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "docx") {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Writes a supplier and a baseline `.docx` for every project, built from
    /// the clause texts of its deviations. Returns the number of files written.
    pub fn seed(&self, projects: &[Project]) -> Result<usize, ServerError> {
        std::fs::create_dir_all(&self.root)?;
        let mut written = 0;
        for project in projects {
            for side in [DocumentSide::Supplier, DocumentSide::Baseline] {
                let Some(name) = file_name(&project.document(side).url) else {
                    tracing::warn!(project = %project.id, ?side, "document url has no file name");
                    continue;
                };
                let Some(path) = self.resolve(name) else {
                    continue;
                };
                std::fs::write(&path, build_document(project, side)?)?;
                tracing::info!(path = %path.display(), "seeded sample document");
                written += 1;
            }
        }
        Ok(written)
    }
}

pub fn file_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|s| !s.is_empty())
}

fn build_document(project: &Project, side: DocumentSide) -> Result<Vec<u8>, ServerError> {
    let doc_ref = project.document(side);
    let mut doc = Docx::new().add_paragraph(
        Paragraph::new()
            .style("Title")
            .add_run(Run::new().add_text(&doc_ref.title)),
    );
    doc = doc.add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(&project.project_name)),
    );
    for deviation in &project.deviations {
        let text = match side {
            DocumentSide::Supplier => &deviation.supplier_text,
            DocumentSide::Baseline => &deviation.baseline_text,
        };
        doc = doc
            .add_paragraph(
                Paragraph::new()
                    .style("Heading2")
                    .add_run(Run::new().add_text(&deviation.clause)),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buf)
        .map_err(|e| ServerError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_core::render::{render_docx, Block};
    use review_core::source::sample_projects;

    #[test]
    fn resolve_rejects_traversal() {
        let store = DocumentStore::new("/srv/docs");
        assert!(store.resolve("contract.docx").is_some());
        assert!(store.resolve("../etc/passwd").is_none());
        assert!(store.resolve("a/b.docx").is_none());
        assert!(store.resolve("a\\b.docx").is_none());
        assert!(store.resolve(".hidden").is_none());
        assert!(store.resolve("").is_none());
    }

    #[test]
    fn seeded_documents_render_with_clause_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::new(dir.path());
        assert!(!store.has_documents().expect("scan"));

        let projects = sample_projects();
        assert_eq!(store.seed(&projects).expect("seed"), 6);
        assert!(store.has_documents().expect("scan"));

        let bytes = std::fs::read(dir.path().join("cloud-hosting-supplier.docx")).expect("read");
        let doc = render_docx(&bytes).expect("render");
        assert_eq!(
            doc.blocks[0],
            Block::Heading { level: 1, text: "Supplier Cloud Hosting Agreement".into() }
        );
        assert!(doc
            .blocks
            .contains(&Block::Heading { level: 2, text: "Security".into() }));
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("/documents/a.docx"), Some("a.docx"));
        assert_eq!(file_name("/documents/"), None);
    }
}

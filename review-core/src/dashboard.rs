use crate::model::{DocumentSide, Project};
use crate::source::{ProjectSource, SourceError};
use crate::summary::{ChipFilter, RiskSummary};
use crate::table::ProjectTable;

/// Open/closed flags for the three modals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modals {
    pub supplier_doc: bool,
    pub baseline_doc: bool,
    pub risk_summary: bool,
}

impl Modals {
    pub fn document(&self, side: DocumentSide) -> bool {
        match side {
            DocumentSide::Supplier => self.supplier_doc,
            DocumentSide::Baseline => self.baseline_doc,
        }
    }

    fn set_document(&mut self, side: DocumentSide, open: bool) {
        match side {
            DocumentSide::Supplier => self.supplier_doc = open,
            DocumentSide::Baseline => self.baseline_doc = open,
        }
    }
}

/// Root state: the table plus the modal flags wired to its selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub table: ProjectTable,
    modals: Modals,
    chip: ChipFilter,
}

impl Dashboard {
    pub fn new(table: ProjectTable) -> Self {
        Self {
            table,
            modals: Modals::default(),
            chip: ChipFilter::All,
        }
    }

    pub fn load(source: &dyn ProjectSource) -> Result<Self, SourceError> {
        Ok(Self::new(ProjectTable::from_source(source)?))
    }

    pub fn modals(&self) -> Modals {
        self.modals
    }

    pub fn selected(&self) -> Option<&Project> {
        self.table.selected()
    }

    /// Row click. Leaves every modal as it is.
    pub fn select_row(&mut self, project_id: &str) {
        self.table.select(project_id);
    }

    pub fn open_document(&mut self, project_id: &str, side: DocumentSide) {
        self.table.select(project_id);
        self.modals.set_document(side, true);
    }

    pub fn close_document(&mut self, side: DocumentSide) {
        self.modals.set_document(side, false);
    }

    pub fn open_risk_summary(&mut self, project_id: &str) {
        self.table.select(project_id);
        self.chip = ChipFilter::All;
        self.modals.risk_summary = true;
    }

    pub fn close_risk_summary(&mut self) {
        self.modals.risk_summary = false;
    }

    pub fn chip(&self) -> ChipFilter {
        self.chip
    }

    pub fn set_chip(&mut self, chip: ChipFilter) {
        self.chip = chip;
    }

    pub fn risk_summary(&self) -> Option<RiskSummary> {
        self.selected().map(|p| {
            RiskSummary::build(&p.deviations, p.risk_level, p.total_weighted_score, self.chip)
        })
    }

    /// Url of the document a viewer should load for the current selection.
    pub fn document_url(&self, side: DocumentSide) -> Option<String> {
        self.selected().map(|p| p.document(side).url.clone())
    }
}

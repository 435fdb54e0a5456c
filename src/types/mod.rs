pub mod brand;
pub mod contact;
pub mod report;

pub use brand::{ResearchRequest, SenderProfile, SimilarBrandCandidate, SimilarBrandList};
pub use contact::{ContactCategory, ContactRecord, EnrichmentResult, RawContact};
pub use report::{
    BranchStage, BranchStatus, BrandResult, OutreachDraft, ReportSummary, ResearchReport,
};

pub mod archive_builder;
pub mod document_service;
pub mod failure_writer;
pub mod pdf_truncator;

pub use archive_builder::ArchiveBuilder;
pub use document_service::DocumentService;
pub use failure_writer::FailureWriter;
pub use pdf_truncator::{end_page_index, truncate_pdf, TruncatedPdf};

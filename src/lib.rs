//! scasparse: extract requirements and test cases from 3GPP SCAS documents.
//!
//! A document arrives as an ordered stream of styled [`Paragraph`]s. [`parse_document`] walks
//! the stream once, nesting sections by heading level and collecting labelled fields into
//! requirement and test case records, and returns a [`Specification`] tree that [`render`]
//! turns into XML, JSON or a terminal outline.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod input;
pub mod model;
pub mod normalize;
pub mod paragraph;
pub mod record_context;
pub mod render;
pub mod section_stack;
pub mod tree_builder;

pub use model::{Node, Requirement, Section, Specification, TestCase};
pub use paragraph::Paragraph;
pub use record_context::{parse_document, ParseOutcome, RecordContext};
pub use render::{render, OutputFormat, RenderOptions};

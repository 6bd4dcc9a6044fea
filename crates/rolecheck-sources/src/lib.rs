//! Rolecheck Sources
//!
//! Readers for the two inputs of a role check: authoritative roles from an
//! XML file and document text from a PDF.
//!
//! Both readers come in two flavours. The `try_*` functions return a
//! [`SourceError`]; the plain ones log the failure and return an empty value
//! so a run can still produce a report.
//!
//! # Example Usage
//!
//! ```
//! use rolecheck_sources::{roles_from_str, RolePath};
//!
//! let xml = "<roles><role>Data Analyst</role><role>QA Tester</role></roles>";
//! let roles = roles_from_str(xml, &RolePath::default()).unwrap();
//! assert_eq!(roles, vec!["Data Analyst", "QA Tester"]);
//! ```

#![warn(missing_docs)]

mod error;
mod pdf;
mod xml;

pub use error::SourceError;
pub use pdf::{assemble_document, read_document, try_read_document, TABLE_END, TABLE_START};
pub use xml::{extract_roles, roles_from_str, try_extract_roles, RolePath, DEFAULT_ROLE_PATH};

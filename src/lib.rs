//! HaalCentraal BRP to StUF-BG Gateway Library
//!
//! This library answers StUF-BG `npsLv01` family-situation inquiries from
//! the HaalCentraal BRP `ingeschrevenpersonen` API: it fetches the subject
//! by BSN, fetches and filters the subject's relatives, classifies the
//! nationality, and maps the merged record into a StUF La01 XML envelope.
//!
//! # Modules
//!
//! - `brp_client`: HaalCentraal BRP API client.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `mapping`: Declarative record-to-document mapping.
//! - `merge`: Flat enriched-record assembly.
//! - `models`: HaalCentraal data models.
//! - `nationality`: Dutch nationality classification.
//! - `pipeline`: The inquiry pipeline and its fail-soft contract.
//! - `relatives`: Relative link extraction, resolution and address filter.
//! - `resources`: Source and mapping resolution by logical reference.
//! - `xml`: SOAP envelope encoding and decoding.

pub mod brp_client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod mapping;
pub mod merge;
pub mod models;
pub mod nationality;
pub mod pipeline;
pub mod relatives;
pub mod resources;
pub mod xml;

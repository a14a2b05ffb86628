/*!
This crate is the aggregation and introspection engine of the project status
backend. It discovers and normalizes the project's artifacts, the dataset,
the deployed model, the analysis notebooks, the directory tree, and the local
deployment tooling, into a single status snapshot, and exposes the read-only
query operations a presentation layer renders.
*/

pub mod api;
pub mod artifact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod notebook;
pub mod reference;
pub mod snapshot;
pub mod survey;
pub mod system;

// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive menu.
//
// Module responsibilities:
// - `storage`: the SQLite movie table (list, add, delete, update).
// - `api`: OMDb lookups and normalization of their responses.
// - `stats`, `catalog`: aggregation and in-memory queries over the
//   collection.
// - `website`: static HTML gallery rendering.
// - `ui`: the numbered menu that ties everything together.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod movie;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod website;

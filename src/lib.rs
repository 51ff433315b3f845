// Library root
// -----------
// This crate exposes the seeding workflow as a library. The binary
// (`main.rs`) only wires configuration, logging and process exit codes.
//
// Module responsibilities:
// - `config`: Base address and retry settings, read from the environment.
// - `error`: The error taxonomy shared by every stage.
// - `models`: JSON shapes sent to and read from the habit service.
// - `catalog`: The fixed sample tags, habits and habit-tag associations.
// - `api`: The request helper (URL building, verbs, retries) and the
//   `Transport` seam that tests replace with an in-memory server.
// - `seed`: The pipeline stages (probe, tags, habits, associations,
//   verification) and their orchestration.
// - `output`: Coloured console reporting.
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod seed;

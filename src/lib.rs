// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the upload flow.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the GoFile service
//   (upload-server resolution, multipart upload) and response
//   decoding.
// - `cli`: Command-line argument parsing, orchestration of the two
//   upload steps, and result printing.
// - `error`: The error kinds shared by both.
//
// Keeping this separation means the protocol logic in `api` can be
// tested directly, without spawning the binary.
pub mod api;
pub mod cli;
pub mod error;

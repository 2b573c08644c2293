// Library surface for headless/integration tests and reuse.
// The binary only adds the CLI, logging setup and terminal lifecycle.
pub mod app;
pub mod app_dirs;
pub mod calculator;
pub mod config;
pub mod report;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;

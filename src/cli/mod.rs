//! # CLI Module
//!
//! Command-line access to the compiler, for checking a catalog file without
//! booting the host application.
//!
//! ## Commands
//!
//! ### `compile`
//!
//! Compile a catalog and print every entry it produces:
//!
//! ```bash
//! waymark compile --catalog routes.yaml
//! waymark compile --catalog routes.yaml --owner Test --json
//! ```
//!
//! ### `route`
//!
//! Compile a catalog, then show which entry a request matches and the
//! route values it yields:
//!
//! ```bash
//! waymark route --catalog routes.yaml --method GET --path /test/index
//! ```
//!
//! Both commands accept `--config <FILE>` (TOML compiler config). Compile
//! errors are printed with their full cause chain and exit non-zero.

mod commands;


pub use commands::{run_cli, Cli, Commands};

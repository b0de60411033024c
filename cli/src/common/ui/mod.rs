//! # projgit UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction helpers for the interactive menu.
//!
//! - **`prompts`**: numbered choices, required answers, yes/no confirmations
//!   and "press Enter" pauses over any `BufRead`/`Write` pair.
//!
//! ```rust
//! use crate::common::ui::prompts::Prompter;
//!
//! let stdin = std::io::stdin();
//! let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
//! if prompter.confirm("Create the branch now?")? {
//!     // ...
//! }
//! ```
//!

pub mod prompts;

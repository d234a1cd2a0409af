//! LLM Mutator Shell CLI Library
//!
//! This crate provides the terminal front-end of the LLM Mutator shell. It runs
//! the external mutation jar against a Java file or project without opening a
//! window, rendering the tool's spinner in place and its log lines as they come.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`render`]: Terminal rendering of relayed output and errors
//! - [`session`]: Following a run and handling interrupts
//!
//! # Examples
//!
//! ```bash
//! # Mutate a single file
//! mutator src/main/java/Calculator.java
//!
//! # Mutate a whole project and open the results afterwards
//! mutator --open ./my-project
//!
//! # Use a specific JDK and jar
//! mutator --java /opt/jdk-21/bin/java --jar ~/tools/mutator.jar ./my-project
//! ```

pub mod cli_args;
pub mod render;
pub mod session;

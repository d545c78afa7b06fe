//! # pdf-chat
//!
//! Chat with a PDF document using a local Ollama instance.
//!
//! The pipeline is a straight line: the uploaded PDF's pages are extracted
//! and concatenated, the text is split on blank lines, every paragraph is
//! embedded and upserted into a vector-store collection, and each question
//! is answered by embedding it, taking the single nearest paragraph, and
//! asking the generative model to respond using that paragraph.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────┐   ┌─────────────┐
//! │ PDF      │──▶│ Split   │──▶│ Embed    │──▶│ Collection  │
//! │ extract  │   │ \n\n    │   │ (Ollama) │   │ memory/SQL  │
//! └──────────┘   └─────────┘   └──────────┘   └──────┬──────┘
//!                                                    │ top-1
//!                  ┌──────────────┐   ┌──────────┐   │
//!   question ─────▶│ Session      │──▶│ Generate │◀──┘
//!                  │ (history)    │   │ (Ollama) │
//!                  └──────────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pdf-chat chat paper.pdf                      # ingest, then ask questions on stdin
//! pdf-chat ask paper.pdf "What is the main result?"
//! pdf-chat serve                               # HTTP surface on 127.0.0.1:8501
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Chunks, conversation turns, reports |
//! | [`extract`] | PDF text extraction and upload checks |
//! | [`chunk`] | Blank-line paragraph splitting |
//! | [`embedding`] | Embedding provider trait, Ollama embedder, vector utilities |
//! | [`store`] | Vector store trait with in-memory and SQLite backends |
//! | [`retrieve`] | Top-1 nearest-chunk retrieval |
//! | [`generate`] | Prompt template and generative model trait |
//! | [`session`] | Per-session state |
//! | [`pipeline`] | Wires the collaborators together |
//! | [`ingest`] | Upload → collection |
//! | [`chat`] | Question → answer |
//! | [`repl`] | Terminal surface |
//! | [`server`] | HTTP surface |

pub mod chat;
pub mod chunk;
pub mod config;
pub mod db;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod generate;
pub mod ingest;
pub mod migrate;
pub mod models;
pub mod ollama;
pub mod pipeline;
pub mod repl;
pub mod retrieve;
pub mod server;
pub mod session;
pub mod store;

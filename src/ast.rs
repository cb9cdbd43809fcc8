//! # JSON++ - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for JSON++, a superset of
//! JSON where any value position may hold an arithmetic expression.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer, with source positions
//! - **[expressions]** - Expression nodes (literals, operations, containers)
//! - **[operators]** - Unary and binary operators
//!
//! ## Quick Start
//!
//! ```text
//! {"width": 2 * 40, "area": (2 * 40) ^ 2, "flags": [!true, -1]}
//! ```
//!
//! compiles to
//!
//! ```text
//! {"width":80,"area":6400,"flags":[false,-1]}
//! ```
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! From tightest to loosest binding:
//!
//! | Operators        | Binding power | Associativity |
//! |------------------|---------------|---------------|
//! | unary `+ - !`    | 80            | prefix        |
//! | `^`              | 70            | right         |
//! | `* /`            | 60            | left          |
//! | `+ -`            | 50            | left          |
//!
//! ### Provenance
//!
//! Nodes are immutable once built and keep the tokens they came from, so a
//! failure during evaluation can still report a line and column.
//!
//! ### Object Keys
//!
//! Keys are ordinary expressions. A key that reduces to a number, boolean or
//! null is written out as its JSON text, so `{1 + 1: "two"}` becomes
//! `{"2":"two"}`.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Literal, Property};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Position, Token, TokenKind};

//! # Autoprop
//!
//! Autoprop gives plain record types **observable attributes**. Instead of letting event
//! handlers update the UI directly, handlers update a model, and the model notifies whoever
//! observes it. The UI becomes a separate concern from the logic that changes the model.
//!
//! ## The Pieces
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ManagedTypeBuilder (registry.rs)                           │
//! │  - One `declare` call per attribute, chained                │
//! │  - Declaration order is boot order                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ build()
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ManagedType (registry.rs)                                  │
//! │  - Frozen, ordered list of AttributeSpec (spec.rs)          │
//! │  - Shared by every instance through an Rc                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Record::new()
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record (record.rs)                                         │
//! │  - Lazily created storage slots                             │
//! │  - get / set / update / boot                                │
//! │  - Observers (observer.rs) run after each committed write   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use autoprop::{AttributeOptions, ChangeLog, ManagedType, Record, Value};
//!
//! let log = ChangeLog::new();
//! let model = ManagedType::builder("Model")
//!     .declare("counter", AttributeOptions::new().default_value(10).on_change(log.observer()))?
//!     .declare("weather", AttributeOptions::new().default_value("sunny").on_change(log.observer()))?
//!     .build();
//!
//! let record = Record::new(model);
//! record.boot()?;
//! record.set("counter", 100)?;
//!
//! assert_eq!(
//!     log.entries(),
//!     vec![
//!         ("counter".to_string(), Value::Int(10)),
//!         ("weather".to_string(), Value::from("sunny")),
//!         ("counter".to_string(), Value::Int(100)),
//!     ]
//! );
//! # Ok::<(), autoprop::AutoPropError>(())
//! ```
//!
//! ## Boot
//!
//! [`Record::boot`] writes every attribute's current value back to itself. Every observer
//! fires once, in declaration order, so a UI gets its initial state through the same path
//! as every later change. Calling it again fires everything again.
//!
//! ## Threading
//!
//! Everything is single-threaded and synchronous. Observers run inline inside the write
//! that triggered them, and types are deliberately `!Send`.
//!
//! ## Module Overview
//!
//! - [`registry`]: `ManagedType` and its builder
//! - [`record`]: Instances, accessors and `boot`
//! - [`spec`]: Per-attribute schema and declaration options
//! - [`observer`]: Callback type and the `ChangeLog` recorder
//! - [`value`]: Dynamically typed attribute values
//! - [`config`]: Declaring types in JSON files
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod observer;
pub mod record;
pub mod registry;
pub mod spec;
pub mod value;

pub use error::{AutoPropError, Result};
pub use observer::{observer, ChangeLog, Observer};
pub use record::Record;
pub use registry::{ManagedType, ManagedTypeBuilder};
pub use spec::{AttributeOptions, AttributeSpec};
pub use value::Value;

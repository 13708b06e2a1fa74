//! Glance: a dual-dialect layout language for personalized info panels.
//!
//! A layout document describes row/column structure, alignment, spacing and
//! content placement in one of two grammars: call-style (`events(3)`) or
//! ASCII tables (bordered rows with pipe-delimited columns). The compiler
//! interprets a document in a single top-to-bottom pass, dispatching named
//! functions (built-in or caller overrides) into a nested container tree the
//! host then renders however it likes.
//!
//! ```
//! use glance::Compiler;
//!
//! let layout = "\
//! row(120)
//! column
//! date
//! left
//! column
//! events(3)
//! ";
//! let output = Compiler::new().compile(layout).unwrap();
//! assert!(!output.tree.children(output.tree.root()).is_empty());
//! ```

pub mod align;
pub mod compile;
pub mod content;
pub mod context;
pub mod data;
pub mod dialect;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod parse;
pub mod prefs;
pub mod registry;
pub mod tree;
pub mod width;

pub use align::Alignment;
pub use compile::{CompileOutput, Compiler, Pass};
pub use context::{ColumnSpec, Item, RenderContext};
pub use data::{DataCache, DataHub};
pub use dialect::Dialect;
pub use error::{PanelError, Result};
pub use logging::{FileSink, LogEvent, LogLevel, LogSink, Logger, MemorySink};
pub use metrics::{MetricsSnapshot, PassMetrics};
pub use parse::{Param, ParsedCall};
pub use prefs::{FieldMeta, Preferences, TemperatureUnit, field_catalog};
pub use registry::{Builtin, DispatchRegistry, OverrideFn};
pub use tree::{ContainerTree, NodeHandle, NodeKind, Surface};
pub use width::display_width;

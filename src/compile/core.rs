use serde_json::json;

use crate::context::RenderContext;
use crate::data::{DataCache, DataHub};
use crate::dialect::{self, Dialect};
use crate::error::{PanelError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_str};
use crate::metrics::{MetricsSnapshot, PassMetrics};
use crate::parse::{self, table};
use crate::prefs::Preferences;
use crate::registry::DispatchRegistry;
use crate::tree::{ContainerTree, NodeHandle, Surface};

const TARGET: &str = "glance::compile";

/// Everything one render pass owns: the output surface, the cursor state,
/// the memoizing data cache, and the pass counters. Built fresh per
/// document; nothing survives the pass.
pub struct Pass<'a> {
    pub surface: &'a mut dyn Surface,
    pub ctx: RenderContext,
    pub data: &'a DataHub,
    pub cache: DataCache,
    pub prefs: &'a Preferences,
    pub metrics: PassMetrics,
    pub logger: Option<&'a Logger>,
}

impl<'a> Pass<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        data: &'a DataHub,
        prefs: &'a Preferences,
        logger: Option<&'a Logger>,
    ) -> Self {
        Self {
            surface,
            ctx: RenderContext::new(),
            data,
            cache: DataCache::new(),
            prefs,
            metrics: PassMetrics::new(),
            logger,
        }
    }

    /// New row directly under the render root; resets the column cursor.
    pub fn begin_row(&mut self, height: Option<u32>) {
        let root = self.surface.root();
        let row = self.surface.add_row(root, height);
        // Containers start flat even on surfaces with nonzero defaults.
        self.surface.set_padding(row, 0);
        self.surface.set_spacing(row, 0);
        self.ctx.row = Some(row);
        self.ctx.column = None;
        self.ctx.row_pending = false;
        self.metrics.record_row();
        if let Some(logger) = self.logger {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Debug,
                TARGET,
                "row",
                [("height".to_string(), json!(height))],
            ));
        }
    }

    /// New column under the current row; becomes the content cursor.
    pub fn begin_column(&mut self, width: Option<u32>) -> Result<()> {
        let row = self.ctx.row.ok_or(PanelError::NoActiveRow)?;
        let column = self.surface.add_column(row, width);
        self.surface.set_padding(column, 0);
        self.surface.set_spacing(column, 0);
        self.ctx.column = Some(column);
        self.metrics.record_column();
        if let Some(logger) = self.logger {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Debug,
                TARGET,
                "column",
                [("width".to_string(), json!(width))],
            ));
        }
        Ok(())
    }

    /// Column under the cursor; content dispatched without one is a layout
    /// configuration error, never a silent drop.
    pub fn column(&self) -> Result<NodeHandle> {
        self.ctx.column.ok_or(PanelError::NoActiveColumn)
    }

    pub fn record_fallback(&mut self, what: &str) {
        self.metrics.record_fallback();
        if let Some(logger) = self.logger {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Warn,
                TARGET,
                "provider_fallback",
                [json_str("provider", what)],
            ));
        }
    }
}

/// Result of compiling a document onto the default surface.
#[derive(Debug)]
pub struct CompileOutput {
    pub tree: ContainerTree,
    pub metrics: MetricsSnapshot,
}

/// Drives a layout document through dialect routing, parsing and dispatch.
///
/// Lines are processed strictly top to bottom; every dispatch runs to
/// completion before the next line, so container creation and content
/// placement land in document order.
pub struct Compiler {
    registry: DispatchRegistry,
    data: DataHub,
    prefs: Preferences,
    logger: Option<Logger>,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            registry: DispatchRegistry::new(),
            data: DataHub::new(),
            prefs: Preferences::default(),
            logger: None,
        }
    }

    pub fn with_registry(mut self, registry: DispatchRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_data(mut self, data: DataHub) -> Self {
        self.data = data;
        self
    }

    pub fn with_prefs(mut self, prefs: Preferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn registry_mut(&mut self) -> &mut DispatchRegistry {
        &mut self.registry
    }

    /// Compile onto a fresh [`ContainerTree`].
    pub fn compile(&self, document: &str) -> Result<CompileOutput> {
        let mut tree = ContainerTree::new();
        let metrics = self.compile_into(&mut tree, document)?;
        Ok(CompileOutput { tree, metrics })
    }

    /// Compile onto a caller-owned surface.
    pub fn compile_into(
        &self,
        surface: &mut dyn Surface,
        document: &str,
    ) -> Result<MetricsSnapshot> {
        let mut pass = Pass::new(surface, &self.data, &self.prefs, self.logger.as_ref());
        let mut current = Dialect::default();

        for raw in document.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            pass.metrics.record_line();

            let next = dialect::decide(current, line);
            if next != current {
                current = next;
                if let Some(logger) = &self.logger {
                    let _ = logger.log_event(event_with_fields(
                        LogLevel::Info,
                        TARGET,
                        "dialect",
                        [json_str("dialect", format!("{current:?}"))],
                    ));
                }
            }

            if current.is_table() {
                table::feed(&mut pass, &self.registry, line)?;
            } else {
                let call = parse::parse_line(line);
                self.registry
                    .dispatch(&mut pass, &call.name, call.param.as_ref())?;
            }
        }

        // Tables normally close with a border; don't drop a trailing
        // section in documents that omit it.
        if current.is_table() {
            table::flush(&mut pass, &self.registry)?;
        }

        let snapshot = pass.metrics.snapshot();
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(snapshot.to_log_event(TARGET));
        }
        Ok(snapshot)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

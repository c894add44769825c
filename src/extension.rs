//! Frame saver extension entry point.
//!
//! `FrameSaverExtension::init` registers the extraction parameters and the
//! build step that applies them. It runs once at startup; every later build
//! only resolves the user's values and calls the inserter.

use crate::config::{FrameSaverConfig, ParamRegistry};
use crate::extraction::{ExtractionParams, FrameExtractionInserter};
use crate::workflow::WorkflowGenerator;

/// Name of the registered build step.
pub const STEP_NAME: &str = "frame_saver";

#[derive(Debug)]
pub struct FrameSaverExtension {
    params: Option<ExtractionParams>,
    step_registered: bool,
}

impl FrameSaverExtension {
    /// Register parameters and the build step.
    ///
    /// A registration failure is logged and leaves the extension disabled:
    /// no step is added and builds are unaffected.
    pub fn init(
        config: &FrameSaverConfig,
        registry: &mut ParamRegistry,
        generator: &mut WorkflowGenerator,
    ) -> Self {
        let params = match ExtractionParams::register(registry) {
            Ok(params) => params,
            Err(e) => {
                tracing::error!("Frame saver disabled, failed to register parameters: {}", e);
                return Self {
                    params: None,
                    step_registered: false,
                };
            }
        };

        if !config.step.enabled {
            tracing::info!("Frame saver step disabled by configuration");
            return Self {
                params: Some(params),
                step_registered: false,
            };
        }

        let inserter = FrameExtractionInserter::new(config);
        let step_params = params.clone();
        generator.add_step(STEP_NAME, config.step.priority, move |ctx| {
            let options = step_params.resolve(ctx.input());
            if !options.is_requested() {
                return;
            }
            if let Err(e) = inserter.insert(ctx.graph_mut(), &options) {
                ctx.report(e);
            }
        });

        Self {
            params: Some(params),
            step_registered: true,
        }
    }

    /// Parameter handles, if registration succeeded.
    pub fn params(&self) -> Option<&ExtractionParams> {
        self.params.as_ref()
    }

    /// Whether builds will run the frame saver step.
    pub fn is_active(&self) -> bool {
        self.step_registered
    }
}

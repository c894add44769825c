//! Ordered build steps that assemble a workflow.
//!
//! Extensions register steps with a priority. `generate` runs them once per
//! build, lowest priority first; equal priorities run in registration order.
//! Each build brings its own graph, user input and diagnostics, so a
//! generator can be shared between concurrent builds.

use crate::config::params::UserInput;
use crate::error::FrameSaverError;
use crate::workflow::diagnostics::DiagnosticSink;
use crate::workflow::graph::WorkflowGraph;

/// Callback run once per build.
pub type StepFn = Box<dyn Fn(&mut BuildContext<'_>) + Send + Sync>;

struct BuildStep {
    name: String,
    priority: i32,
    run: StepFn,
}

/// Everything a build step may read or change during one build.
pub struct BuildContext<'a> {
    graph: &'a mut WorkflowGraph,
    input: &'a UserInput,
    diagnostics: &'a mut dyn DiagnosticSink,
    step: &'a str,
}

impl<'a> BuildContext<'a> {
    pub fn graph(&self) -> &WorkflowGraph {
        self.graph
    }

    pub fn graph_mut(&mut self) -> &mut WorkflowGraph {
        self.graph
    }

    pub fn input(&self) -> &UserInput {
        self.input
    }

    pub fn step_name(&self) -> &str {
        self.step
    }

    /// Report a failure of the current step.
    pub fn report(&mut self, error: impl Into<FrameSaverError>) {
        let error = error.into();
        self.diagnostics.report(self.step, &error);
    }
}

#[derive(Default)]
pub struct WorkflowGenerator {
    steps: Vec<BuildStep>,
}

impl WorkflowGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step<F>(&mut self, name: impl Into<String>, priority: i32, run: F)
    where
        F: Fn(&mut BuildContext<'_>) + Send + Sync + 'static,
    {
        let name = name.into();
        let position = self
            .steps
            .iter()
            .position(|step| step.priority > priority)
            .unwrap_or(self.steps.len());
        tracing::info!("Registered build step '{}' at priority {}", name, priority);
        self.steps.insert(
            position,
            BuildStep {
                name,
                priority,
                run: Box::new(run),
            },
        );
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step against `graph`.
    pub fn generate(
        &self,
        graph: &mut WorkflowGraph,
        input: &UserInput,
        diagnostics: &mut dyn DiagnosticSink,
    ) {
        for step in &self.steps {
            let before = graph.len();
            let mut ctx = BuildContext {
                graph: &mut *graph,
                input,
                diagnostics: &mut *diagnostics,
                step: &step.name,
            };
            (step.run)(&mut ctx);
            tracing::debug!(
                "Step '{}' appended {} nodes",
                step.name,
                graph.len().saturating_sub(before)
            );
        }
    }
}

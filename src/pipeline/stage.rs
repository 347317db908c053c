use crate::pipeline::{FetchStage, PipelineContext};
use crate::StageResult;
use async_trait::async_trait;

/// One step of the importer pipeline
#[async_trait]
pub trait ImporterStage: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Runs the stage, returning whether the pipeline continues with this document
    async fn execute(&self, ctx: &mut PipelineContext) -> StageResult<bool>;
}

/// Ordered list of stages run against one document
#[derive(Default)]
pub struct ImporterPipeline {
    stages: Vec<Box<dyn ImporterStage>>,
}

impl ImporterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline made of the fetch stage alone
    pub fn fetch_only() -> Self {
        Self::new().with_stage(FetchStage::new())
    }

    pub fn with_stage(mut self, stage: impl ImporterStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs the stages in order, stopping at the first that returns false
    pub async fn execute(&self, ctx: &mut PipelineContext) -> StageResult<bool> {
        for stage in &self.stages {
            tracing::trace!(stage = stage.name(), url = %ctx.reference.url(), "Running stage");
            if !stage.execute(ctx).await? {
                tracing::debug!(
                    stage = stage.name(),
                    url = %ctx.reference.url(),
                    "Pipeline stopped"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

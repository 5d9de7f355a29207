use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::{
        entities::{AnalysisImage, FridgeAnalysis},
        value_objects::AnalyzeFridgeInput,
    },
};

/// Multimodal language model answering with JSON that follows `response_schema`.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait FridgeAnalysisService: Send + Sync {
    fn analyze_fridge(
        &self,
        session_id: Uuid,
        input: AnalyzeFridgeInput,
    ) -> impl Future<Output = Result<FridgeAnalysis, CoreError>> + Send;

    fn get_analysis(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<FridgeAnalysis, CoreError>> + Send;

    /// The processed photo of the latest analysis with item boxes drawn on it.
    fn get_analysis_image(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<AnalysisImage, CoreError>> + Send;
}

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    common::{
        deadline::with_deadline_retry, entities::app_errors::CoreError, generate_uuid_v7,
        services::Service,
    },
    fridge_analysis::{
        entities::{AnalysisImage, FridgeAnalysis},
        helpers::parse_analysis_response,
        ports::{FridgeAnalysisService, LLMClient},
        preprocessing::{annotate_image, preprocess_image},
        prompts::build_analysis_prompt,
        schema::get_fridge_analysis_schema,
        value_objects::AnalyzeFridgeInput,
    },
    meal_plan::ports::CalendarGateway,
    recipe::ports::{ChatCompletionClient, RecipeSearchClient},
    session::ports::SessionRepository,
};

impl<LLM, RS, CC, CG, SR> FridgeAnalysisService for Service<LLM, RS, CC, CG, SR>
where
    LLM: LLMClient,
    RS: RecipeSearchClient,
    CC: ChatCompletionClient,
    CG: CalendarGateway,
    SR: SessionRepository,
{
    async fn analyze_fridge(
        &self,
        session_id: Uuid,
        input: AnalyzeFridgeInput,
    ) -> Result<FridgeAnalysis, CoreError> {
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid("image is empty".to_string()));
        }

        // Fail fast on unknown sessions before the slow part.
        self.load_session(session_id, Utc::now()).await?;

        let image_data = input.image_data;
        let processed = tokio::task::spawn_blocking(move || preprocess_image(&image_data))
            .await
            .map_err(|e| {
                tracing::error!("image preprocessing task failed: {}", e);
                CoreError::InternalServerError
            })??;

        let prompt = build_analysis_prompt();
        let schema = get_fridge_analysis_schema();
        let raw = with_deadline_retry(
            "fridge analysis",
            self.timeouts.analysis,
            self.timeouts.analysis_retry,
            || {
                self.llm_client.generate_with_image(
                    prompt.clone(),
                    processed.bytes.clone(),
                    schema.clone(),
                )
            },
        )
        .await?;

        let parsed = parse_analysis_response(&raw);
        let items = parsed
            .items
            .into_iter()
            .map(|(name, mut item)| {
                item.pixel_box = item
                    .bounding_box
                    .map(|bounding_box| bounding_box.to_pixels(processed.width, processed.height));
                (name, item)
            })
            .collect();

        let analysis = FridgeAnalysis {
            id: generate_uuid_v7(),
            summary: parsed.summary,
            items,
            image_width: processed.width,
            image_height: processed.height,
            analyzed_at: Utc::now(),
        };

        let boxes = analysis.pixel_boxes();
        let jpeg = tokio::task::spawn_blocking(move || annotate_image(&processed, &boxes))
            .await
            .map_err(|e| {
                tracing::error!("image annotation task failed: {}", e);
                CoreError::InternalServerError
            })??;
        let image = AnalysisImage {
            analysis_id: analysis.id,
            jpeg,
        };

        let now = Utc::now();
        let stored = analysis.clone();
        self.update_session(session_id, move |session| {
            session.touch(now);
            session.replace_analysis(stored, Some(image));
        })
        .await?;

        info!(
            session_id = %session_id,
            analysis_id = %analysis.id,
            items = analysis.items.len(),
            "fridge analyzed"
        );

        Ok(analysis)
    }

    async fn get_analysis(&self, session_id: Uuid) -> Result<FridgeAnalysis, CoreError> {
        self.load_session(session_id, Utc::now())
            .await?
            .analysis
            .ok_or_else(|| CoreError::NotFound("fridge analysis".to_string()))
    }

    async fn get_analysis_image(&self, session_id: Uuid) -> Result<AnalysisImage, CoreError> {
        self.load_session(session_id, Utc::now())
            .await?
            .analysis_image
            .ok_or_else(|| CoreError::NotFound("fridge analysis image".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::domain::{
        common::services::test_support::{Mocks, seed},
        fridge_analysis::entities::{Freshness, PixelBox},
        recipe::entities::SelectedRecipe,
        session::entities::SessionContext,
    };

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 200, 30])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    const RESPONSE: &str = r#"{
        "summary": "Eggs and peppers, milk is running low.",
        "items": [
            {"name": "Egg", "quantity": 6, "category": "dairy", "freshness": "fresh",
             "bounding_box": {"x": 50, "y": 50, "width": 10, "height": 10}},
            {"name": "bell pepper", "quantity": 2, "category": "vegetable", "freshness": "use_soon"}
        ]
    }"#;

    #[tokio::test]
    async fn test_analysis_replaces_session_state() {
        let mut mocks = Mocks::default();
        mocks
            .llm
            .expect_generate_with_image()
            .withf(|prompt, image_data, schema| {
                prompt.contains("refrigerator")
                    && image::guess_format(image_data).ok() == Some(ImageFormat::Jpeg)
                    && schema["required"][0] == "summary"
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(RESPONSE.to_string()) }));
        let service = mocks.into_service();

        let mut session = SessionContext::new(Utc::now());
        session.selected_recipe = Some(SelectedRecipe {
            recipe_id: 1,
            title: "Old pick".to_string(),
            prep_minutes: 20,
        });
        let session_id = seed(&service, session).await;

        let analysis = service
            .analyze_fridge(
                session_id,
                AnalyzeFridgeInput {
                    image_data: jpeg(1000, 500),
                },
            )
            .await
            .unwrap();

        assert_eq!((analysis.image_width, analysis.image_height), (800, 400));
        assert_eq!(analysis.items["egg"].quantity, 6);
        assert_eq!(
            analysis.items["egg"].pixel_box,
            Some(PixelBox {
                x: 400,
                y: 200,
                width: 80,
                height: 40,
            })
        );
        assert_eq!(analysis.items["bell pepper"].freshness, Freshness::UseSoon);
        assert!(analysis.items["bell pepper"].pixel_box.is_none());

        let stored = service.load_session(session_id, Utc::now()).await.unwrap();
        assert_eq!(stored.analysis, Some(analysis.clone()));
        assert!(stored.selected_recipe.is_none());
        assert_eq!(service.get_analysis(session_id).await, Ok(analysis.clone()));

        let image = service.get_analysis_image(session_id).await.unwrap();
        assert_eq!(image.analysis_id, analysis.id);
        let decoded = image::load_from_memory_with_format(&image.jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 400));
    }

    #[tokio::test]
    async fn test_free_text_answer_still_produces_analysis() {
        let mut mocks = Mocks::default();
        mocks
            .llm
            .expect_generate_with_image()
            .returning(|_, _, _| Box::pin(async { Ok("Sorry, the photo is blurry.".to_string()) }));
        let service = mocks.into_service();
        let session_id = seed(&service, SessionContext::new(Utc::now())).await;

        let analysis = service
            .analyze_fridge(
                session_id,
                AnalyzeFridgeInput {
                    image_data: jpeg(64, 64),
                },
            )
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Sorry, the photo is blurry.");
        assert!(analysis.items.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_upload_is_rejected_before_calling_model() {
        let mut mocks = Mocks::default();
        mocks.llm.expect_generate_with_image().never();
        let service = mocks.into_service();
        let session_id = seed(&service, SessionContext::new(Utc::now())).await;

        let empty = service
            .analyze_fridge(session_id, AnalyzeFridgeInput { image_data: Vec::new() })
            .await;
        let garbage = service
            .analyze_fridge(
                session_id,
                AnalyzeFridgeInput {
                    image_data: b"plain text".to_vec(),
                },
            )
            .await;

        assert!(matches!(empty, Err(CoreError::Invalid(_))));
        assert!(matches!(garbage, Err(CoreError::Invalid(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_is_retried_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut mocks = Mocks::default();
        mocks
            .llm
            .expect_generate_with_image()
            .times(2)
            .returning(move |_, _, _| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                Box::pin(async move {
                    if attempt == 0 {
                        tokio::time::sleep(Duration::from_secs(300)).await;
                    }
                    Ok(RESPONSE.to_string())
                })
            });
        let service = mocks.into_service();
        let session_id = seed(&service, SessionContext::new(Utc::now())).await;

        let analysis = service
            .analyze_fridge(
                session_id,
                AnalyzeFridgeInput {
                    image_data: jpeg(64, 64),
                },
            )
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(analysis.items.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_analysis_is_not_found() {
        let service = Mocks::default().into_service();
        let session_id = seed(&service, SessionContext::new(Utc::now())).await;

        assert_eq!(
            service.get_analysis(session_id).await,
            Err(CoreError::NotFound("fridge analysis".to_string()))
        );
        assert_eq!(
            service.get_analysis_image(session_id).await,
            Err(CoreError::NotFound("fridge analysis image".to_string()))
        );
    }
}

use foodease_core::domain::recipe::value_objects::{DEFAULT_MAX_RESULTS, FindRecipesInput};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct FindRecipesParams {
    #[schema(example = 4)]
    #[validate(range(min = 1, max = 100, message = "max_results must be between 1 and 100"))]
    pub max_results: Option<u32>,
    #[schema(example = 0)]
    pub offset: Option<u32>,
}

impl From<FindRecipesParams> for FindRecipesInput {
    fn from(params: FindRecipesParams) -> Self {
        FindRecipesInput {
            max_results: params.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            offset: params.offset.unwrap_or(0),
        }
    }
}

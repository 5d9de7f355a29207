/// Used when the recipe database has no usable preparation time.
pub const DEFAULT_PREP_MINUTES: i64 = 30;

pub const DEFAULT_MAX_RESULTS: u32 = 4;
pub const MAX_RESULTS_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct FindRecipesInput {
    pub max_results: u32,
    pub offset: u32,
}

impl Default for FindRecipesInput {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            offset: 0,
        }
    }
}

pub mod analyze_fridge;
pub mod get_analysis;
pub mod get_analysis_image;

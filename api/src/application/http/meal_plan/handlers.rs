pub mod find_slots;
pub mod schedule_meal_prep;

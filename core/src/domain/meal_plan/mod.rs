pub mod entities;
pub mod ports;
pub mod scheduler;
pub mod services;
pub mod slot_finder;
pub mod value_objects;

pub use entities::{ActiveWindow, BusyInterval, CandidateSlot, ScheduleRequest};
pub use ports::{CalendarGateway, MealPlanService};
pub use slot_finder::SlotFinder;

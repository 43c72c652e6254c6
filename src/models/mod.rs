pub mod application;
pub mod course;
pub mod enums;

pub use application::ApplicationRecord;
pub use course::Course;
pub use enums::{ApplicationStatus, ParseEnumError, View};

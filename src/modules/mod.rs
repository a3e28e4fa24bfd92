pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod system;
pub mod uploads;
pub mod users;

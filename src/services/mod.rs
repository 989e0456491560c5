pub mod courses;
pub mod enrollment;
pub mod streams;

pub use courses::CourseService;
pub use enrollment::EnrollmentService;
pub use streams::StreamService;

pub mod cgpa;
pub mod dashboard;
pub mod gpa;
pub mod init;
pub mod resolve;
pub mod table;
pub mod validate;

pub mod error;
pub mod forms;
pub mod job_board_service;
pub mod job_posting_service;
pub mod listing;
pub mod outcome;
pub mod profile_service;
pub mod worker_directory_service;

pub mod init;
pub mod listings;
pub mod run;
pub mod status;
pub mod subscriber;
pub mod tags;

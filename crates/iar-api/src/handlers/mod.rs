pub mod db_status;
pub mod index;
pub mod preview;
pub mod upload;

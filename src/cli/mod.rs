pub mod command;
pub mod frames;
pub mod info;
pub mod scan;

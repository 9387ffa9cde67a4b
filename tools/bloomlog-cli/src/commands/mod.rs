pub mod check;
pub mod export_csv;
pub mod info;
pub mod init;
pub mod merge;
pub mod notebook;
pub mod timelapse;
pub mod validate;

pub mod assembly;
pub mod excel_read;
pub mod excel_write;

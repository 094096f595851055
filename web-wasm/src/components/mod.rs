pub mod header;
pub mod image_upload;
pub mod notice_banner;
pub mod nutrition_results;

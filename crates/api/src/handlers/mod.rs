pub mod favorites;
pub mod list_page;

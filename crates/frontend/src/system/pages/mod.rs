pub mod home;
pub mod login;
pub mod page_view;

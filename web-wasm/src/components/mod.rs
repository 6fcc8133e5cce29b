pub mod navbar;
pub mod home;
pub mod scanner;
pub mod scan_page;
pub mod serial_form;
pub mod drug_info;
pub mod generate_page;

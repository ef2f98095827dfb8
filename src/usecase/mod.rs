pub mod admin_login_usecase;
pub mod check_in_usecase;
pub mod lookup_usecase;
pub mod register_visitor_usecase;

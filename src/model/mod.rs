pub mod leave_balance;
pub mod leave_request;
pub mod profile;
pub mod role;

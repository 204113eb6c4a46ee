//! Application services for user accounts.

mod account;

pub use account::{
    AccountResult, AccountService, AccountServiceError, CreateMemberRequest, ProfileUpdate,
    RegisterRequest,
};

// Accounts: sign-up, sign-in, token refresh, sign-out and password reset.
// Credentials never touch the database; the identity provider owns them.
// Sign-up is the only place a profile row (and therefore a role) is created.

pub mod handlers;
pub mod password;

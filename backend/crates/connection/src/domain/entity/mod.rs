pub mod external_auth;

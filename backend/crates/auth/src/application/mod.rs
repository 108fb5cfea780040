//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credentials;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use credentials::{
    UpdateEmailInput, UpdateEmailUseCase, UpdatePasswordInput, UpdatePasswordUseCase,
};
pub use forgot_password::{ForgotPasswordInput, ForgotPasswordUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use profile::{GetProfileUseCase, UpdateProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, IssuedToken, TokenIssuer};

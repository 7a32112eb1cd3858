//! One-time password retry.

use std::future::Future;

use crate::{
    credentials::RequestAuth, profile::ProfileError, prompt::Prompt, tokens::TokenError,
};

/// Run `call`, and if the registry asks for a one-time password, prompt for
/// one and run `call` a second time with it. A second OTP failure is returned
/// as is.
///
/// # Errors
///
/// Returns the error of the last attempt, or the prompt failure.
pub async fn with_otp<T, F, Fut>(
    prompt: &dyn Prompt,
    auth: &RequestAuth,
    mut call: F,
) -> Result<T, TokenError>
where
    F: FnMut(RequestAuth) -> Fut,
    Fut: Future<Output = Result<T, ProfileError>>,
{
    match call(auth.clone()).await {
        Err(ProfileError::OtpRequired) => {
            let otp = prompt.otp().await?;

            tracing::info!("retrying with one-time password");

            Ok(call(auth.with_otp(otp)).await?)
        }
        result => Ok(result?),
    }
}

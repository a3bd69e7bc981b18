use moviequotes_client::AppContext;

use crate::cli::ForgotPasswordArgs;
use crate::client::{CliError, CliResult};

pub(crate) async fn handle_forgot_password(
    context: &AppContext,
    args: ForgotPasswordArgs,
) -> CliResult<String> {
    let email = args.email.trim();
    if email.is_empty() {
        return Err(CliError::validation("email must not be empty"));
    }
    context.account.forgot_password(email).await?;
    Ok(format!("recovery instructions sent to {email}"))
}

use moviequotes_client::AppContext;
use moviequotes_client::core::SessionFlag;

use crate::cli::OutputFormat;
use crate::client::CliResult;
use crate::output::render_user;

pub(crate) async fn whoami(context: &AppContext, output: OutputFormat) -> CliResult<String> {
    let flag = context.session.resolve().await;
    let user = match flag {
        SessionFlag::Authenticated => context.users.current(),
        SessionFlag::Anonymous | SessionFlag::Unknown => None,
    };
    render_user(user.as_ref(), output)
}

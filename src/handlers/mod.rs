pub mod dashboards;
pub mod login;
pub mod reports;

use crate::auth::{authorize, Access, Role, Session, SessionContext};
use crate::responses::{redirect, ResultResp};

/// The signed-in session, or the redirect the route guard asks for.
pub(crate) fn guard<'a>(
    ctx: &'a SessionContext,
    allowed: &[Role],
) -> Result<&'a Session, ResultResp> {
    match authorize(ctx.current(), allowed) {
        Access::Granted(session) => Ok(session),
        Access::RedirectLogin => Err(redirect(login::LOGIN_PATH)),
        Access::Redirect(home) => Err(redirect(home)),
    }
}

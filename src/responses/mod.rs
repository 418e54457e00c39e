pub mod html;
pub mod redirect;

pub use crate::errors::ResultResp;

// Normal HTML response
pub use html::{html_response, html_response_with_cookie};
pub use redirect::{redirect, redirect_with_cookie};

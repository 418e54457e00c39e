use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Blocking notice shown after the backend ends the session. Moves on to
/// the login page by itself after `delay_secs`.
pub fn session_expired_page(delay_secs: u64) -> Markup {
    let refresh = format!("{delay_secs};url=/login");

    desktop_layout(
        "Session expired",
        None,
        html! {
            meta http-equiv="refresh" content=(refresh);
            main class="container" style="max-width: 480px;" {
                div class="card" role="alertdialog" aria-labelledby="expired-title" {
                    h2 id="expired-title" { "Session expired" }
                    p { "Your session has expired. Please log in again." }
                    a href="/login" { button type="button" { "OK" } }
                }
            }
        },
    )
}

use crate::report::Notice;
use crate::templates::{components::notice, desktop_layout};
use maud::{html, Markup};

pub fn login_page(username: &str, message: Option<&Notice>) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container" style="max-width: 420px;" {
                div class="card" {
                    h1 { "Sign in" }
                    @if let Some(n) = message {
                        (notice(n))
                    }
                    form method="post" action="/login" {
                        p {
                            label for="username" { "Username" }
                            br;
                            input type="text" id="username" name="username" value=(username) autocomplete="username" required;
                        }
                        p {
                            label for="password" { "Password" }
                            br;
                            input type="password" id="password" name="password" autocomplete="current-password" required;
                        }
                        button type="submit" { "Sign in" }
                    }
                }
            }
        },
    )
}

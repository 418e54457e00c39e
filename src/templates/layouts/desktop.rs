use crate::auth::Session;
use crate::report::catalog;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; justify-content: space-between; padding: 12px 24px; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header nav ul { display: flex; gap: 16px; list-style: none; margin: 0; padding: 0; }
header a { color: #374151; text-decoration: none; }
main.container { max-width: 1100px; margin: 24px auto; padding: 0 16px; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; margin-bottom: 16px; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px; }
.stat { font-size: 1.8rem; font-weight: 600; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px; text-align: left; border-bottom: 1px solid #f3f4f6; }
th { border-bottom: 2px solid #e5e7eb; }
.notice { padding: 10px 14px; border-radius: 6px; margin: 12px 0; }
.notice-info { background: #eff6ff; color: #1e40af; }
.notice-warning { background: #fffbeb; color: #92400e; }
.notice-error { background: #fef2f2; color: #b91c1c; }
.filters { display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; }
.pager { display: flex; gap: 12px; align-items: center; margin-top: 12px; }
.pager .disabled { color: #9ca3af; }
.bar { background: #6366f1; height: 12px; border-radius: 3px; }
"#;

pub fn desktop_layout(title: &str, session: Option<&Session>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Outreach Dashboard" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Citizen Outreach Workshops" }
                    @if let Some(session) = session {
                        nav {
                            ul {
                                li { a href=(session.role.default_route()) { "Dashboard" } }
                                @for report in catalog::for_role(session.role) {
                                    li { a href=(report.href()) { (report.title) } }
                                }
                            }
                        }
                        form method="post" action="/logout" style="margin: 0;" {
                            span style="margin-right: 8px; color: #6b7280;" { (session.role.label()) }
                            button type="submit" { "Log out" }
                        }
                    } @else {
                        a href="/login" { "Login" }
                    }
                }
                (content)
            }
        }
    }
}

use maud::{html, Markup};

pub mod error;
pub mod export;
pub mod filters;
pub mod notice;
pub mod table;

pub use error::html_error_response;
pub use export::export_panel;
pub use filters::filter_form;
pub use notice::notice;
pub use table::{pager, report_table};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

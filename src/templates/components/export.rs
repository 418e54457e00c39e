use crate::report::{ExportJob, ExportStatus, FilterState, ReportSpec};
use crate::templates::components::notice;
use maud::{html, Markup};

/// Only absolute `http`/`https` links are ever rendered as clickable.
fn openable(url: &str) -> bool {
    url::Url::parse(url.trim())
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn export_panel(spec: &ReportSpec, filters: &FilterState, job: Option<&ExportJob>) -> Markup {
    html! {
        section class="card" id="export" {
            h3 { "Download" }
            form method="post" action=(format!("{}/export", spec.href())) {
                @for (name, value) in filters.export_fields() {
                    input type="hidden" name=(name) value=(value);
                }
                button type="submit" { "Generate report" }
            }

            @if let Some(job) = job {
                @if let Some(n) = job.notice() {
                    (notice(&n))
                }
                @if job.status == ExportStatus::Ready {
                    @if let Some(url) = &job.download_url {
                        @if openable(url) {
                            p class="download" {
                                "Your report is ready: "
                                a href=(url.trim()) target="_blank" rel="noopener" { "Open report" }
                            }
                        } @else {
                            p class="download" {
                                "Your report is ready, but its link cannot be opened from here: "
                                code { (url) }
                            }
                        }
                    }
                }
            }
        }
    }
}

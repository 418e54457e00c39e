use crate::auth::Session;
use crate::report::{DistrictDirectory, ExportJob, FilterState, ReportQueryEngine, ReportSpec};
use crate::templates::components::{export_panel, filter_form, notice, pager, report_table};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ReportVm<'a> {
    pub session: &'a Session,
    pub spec: &'static ReportSpec,
    pub filters: &'a FilterState,
    pub districts: &'a DistrictDirectory,
    /// `None` until the user applies filters.
    pub query: Option<&'a ReportQueryEngine>,
    pub export: Option<&'a ExportJob>,
}

pub fn report_page(vm: &ReportVm) -> Markup {
    desktop_layout(
        vm.spec.title,
        Some(vm.session),
        html! {
            main class="container" {
                h1 { (vm.spec.title) }

                section class="card" {
                    (filter_form(vm.spec, vm.filters, vm.districts))
                }

                section class="card" id="results" {
                    @match vm.query {
                        Some(engine) => {
                            @if let Some(n) = engine.notice() {
                                (notice(n))
                            }
                            (report_table(vm.spec, engine.rows()))
                            (pager(engine))
                        },
                        None => {
                            p style="color: #6b7280;" { "Choose filters and press Apply to view records." }
                        },
                    }
                }

                (export_panel(vm.spec, vm.filters, vm.export))
            }
        },
    )
}
